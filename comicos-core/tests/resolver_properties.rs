//! Resolver Property Tests
//!
//! Checks the resolver across the whole preset and resolution catalogs:
//! - Bounds on every preset/resolution pair
//! - Monotonic growth with resolution
//! - Clamp boundaries for custom sizes
//! - Purity and mode switching through the dialog

use comicos_core::{
    resolve, Dpi, NewCanvasDialog, PixelSize, SelectionState, SizeMode, MAX_PX, MIN_PX, PRESETS,
};

fn size(width: u32, height: u32) -> PixelSize {
    PixelSize { width, height }
}

// ============================================================================
// Catalog-wide properties
// ============================================================================

#[test]
fn test_all_catalog_pairs_are_in_bounds() {
    for preset in &PRESETS {
        for dpi in Dpi::ALL {
            let px = resolve(&SelectionState::preset(preset.label, dpi));
            assert!(px.width >= MIN_PX && px.width <= MAX_PX);
            assert!(px.height >= MIN_PX && px.height <= MAX_PX);
        }
    }
}

#[test]
fn test_higher_resolution_never_shrinks() {
    for preset in &PRESETS {
        let sizes: Vec<PixelSize> = Dpi::ALL
            .iter()
            .map(|dpi| resolve(&SelectionState::preset(preset.label, *dpi)))
            .collect();

        for pair in sizes.windows(2) {
            assert!(pair[1].width >= pair[0].width, "{}", preset.label);
            assert!(pair[1].height >= pair[0].height, "{}", preset.label);
        }
    }
}

#[test]
fn test_resolve_is_idempotent() {
    let states = [
        SelectionState::preset("B6", Dpi::DPI_350),
        SelectionState::preset("nope", Dpi::DPI_72),
        SelectionState::custom("640", "x"),
    ];
    for state in &states {
        assert_eq!(resolve(state), resolve(state));
    }
}

// ============================================================================
// Concrete scenarios
// ============================================================================

#[test]
fn test_known_scenarios() {
    assert_eq!(
        resolve(&SelectionState::preset("B5", Dpi::DPI_300)),
        size(2150, 3035)
    );
    assert_eq!(
        resolve(&SelectionState::preset("A4", Dpi::DPI_72)),
        size(595, 842)
    );
    assert_eq!(
        resolve(&SelectionState::preset("Tabloid", Dpi::DPI_300)),
        size(1200, 800)
    );
}

#[test]
fn test_custom_clamp_boundaries() {
    assert_eq!(resolve(&SelectionState::custom(0, 0)), size(1, 1));
    assert_eq!(
        resolve(&SelectionState::custom(999_999, 999_999)),
        size(10_000, 10_000)
    );
    assert_eq!(
        resolve(&SelectionState::custom(10_000, 10_001)),
        size(10_000, 10_000)
    );
}

// ============================================================================
// Dialog mode switching
// ============================================================================

#[test]
fn test_preset_custom_preset_reproduces_size() {
    for preset in &PRESETS {
        let mut dialog = NewCanvasDialog::new();
        dialog.select_preset(preset.label);
        dialog.select_dpi(Dpi::DPI_144);
        let original = dialog.preview();

        dialog.toggle_mode();
        assert_eq!(dialog.mode(), SizeMode::Custom);
        dialog.toggle_mode();

        assert_eq!(dialog.preview(), original);
    }
}

#[test]
fn test_dialog_serializes_remembered_values() {
    let mut dialog = NewCanvasDialog::new();
    dialog.set_custom_width("3000");
    dialog.set_mode(SizeMode::Custom);

    let json = serde_json::to_string(&dialog).expect("serialize");
    let restored: NewCanvasDialog = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(restored, dialog);
    assert_eq!(restored.preview(), size(3000, 800));
}

//! State model for the "new canvas" dialog.

use serde::{Deserialize, Serialize};

use crate::paper::{Dpi, DEFAULT_PRESET};
use crate::resolver::{resolve, PixelEntry, PixelSize, SelectionState, SizeMode};

/// Custom width shown when the dialog opens.
pub const DEFAULT_CUSTOM_WIDTH: u32 = 1200;

/// Custom height shown when the dialog opens.
pub const DEFAULT_CUSTOM_HEIGHT: u32 = 800;

/// What a confirmed dialog hands to canvas creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasRequest {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Print resolution recorded with the document.
    pub dpi: Dpi,
}

/// The "new canvas" dialog.
///
/// Preset and custom values are remembered independently, so toggling the
/// mode back and forth never loses what the user entered. The pixel size is
/// derived on demand through [`resolve`] and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCanvasDialog {
    mode: SizeMode,
    preset: String,
    dpi: Dpi,
    custom_width: PixelEntry,
    custom_height: PixelEntry,
}

impl NewCanvasDialog {
    /// Open a dialog with the defaults: B5 at 300 DPI, custom 1200 × 800.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: SizeMode::Preset,
            preset: DEFAULT_PRESET.to_string(),
            dpi: Dpi::default(),
            custom_width: PixelEntry::from(DEFAULT_CUSTOM_WIDTH),
            custom_height: PixelEntry::from(DEFAULT_CUSTOM_HEIGHT),
        }
    }

    /// Pick a paper preset. Switches to preset mode.
    pub fn select_preset(&mut self, label: impl Into<String>) {
        self.preset = label.into();
        self.mode = SizeMode::Preset;
        tracing::debug!("Preset selected: {}", self.preset);
    }

    /// Pick a print resolution.
    pub fn select_dpi(&mut self, dpi: Dpi) {
        self.dpi = dpi;
        tracing::debug!("Resolution selected: {dpi}");
    }

    /// Record the custom width field as typed.
    pub fn set_custom_width(&mut self, value: impl Into<PixelEntry>) {
        self.custom_width = value.into();
        tracing::debug!("Custom width: {:?}", self.custom_width);
    }

    /// Record the custom height field as typed.
    pub fn set_custom_height(&mut self, value: impl Into<PixelEntry>) {
        self.custom_height = value.into();
        tracing::debug!("Custom height: {:?}", self.custom_height);
    }

    /// Switch to `mode`.
    pub fn set_mode(&mut self, mode: SizeMode) {
        if self.mode != mode {
            tracing::debug!("Mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }

    /// Switch to the other mode.
    pub fn toggle_mode(&mut self) {
        self.set_mode(self.mode.toggled());
    }

    /// The active mode.
    #[must_use]
    pub fn mode(&self) -> SizeMode {
        self.mode
    }

    /// The remembered preset label.
    #[must_use]
    pub fn preset(&self) -> &str {
        &self.preset
    }

    /// The remembered resolution.
    #[must_use]
    pub fn dpi(&self) -> Dpi {
        self.dpi
    }

    /// Snapshot of the resolver input for the active mode.
    #[must_use]
    pub fn selection(&self) -> SelectionState {
        match self.mode {
            SizeMode::Preset => SelectionState::preset(self.preset.clone(), self.dpi),
            SizeMode::Custom => {
                SelectionState::custom(self.custom_width.clone(), self.custom_height.clone())
            }
        }
    }

    /// The live pixel size preview.
    #[must_use]
    pub fn preview(&self) -> PixelSize {
        resolve(&self.selection())
    }

    /// Close the dialog, producing the canvas to create.
    #[must_use]
    pub fn confirm(self) -> CanvasRequest {
        let size = self.preview();
        tracing::info!("New canvas confirmed: {size} at {}", self.dpi);
        CanvasRequest {
            width: size.width,
            height: size.height,
            dpi: self.dpi,
        }
    }

    /// Close the dialog without creating a canvas.
    pub fn cancel(self) {
        tracing::debug!("New canvas dialog cancelled");
    }
}

impl Default for NewCanvasDialog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let dialog = NewCanvasDialog::new();
        assert_eq!(dialog.mode(), SizeMode::Preset);
        assert_eq!(dialog.preset(), "B5");
        assert_eq!(dialog.dpi(), Dpi::DPI_300);
        assert_eq!(
            dialog.preview(),
            PixelSize {
                width: 2150,
                height: 3035
            }
        );
    }

    #[test]
    fn test_custom_defaults_remembered() {
        let mut dialog = NewCanvasDialog::new();
        dialog.toggle_mode();
        assert_eq!(
            dialog.preview(),
            PixelSize {
                width: 1200,
                height: 800
            }
        );
    }

    #[test]
    fn test_toggle_round_trip_keeps_preset_size() {
        let mut dialog = NewCanvasDialog::new();
        dialog.select_preset("A4");
        dialog.select_dpi(Dpi::DPI_72);
        let before = dialog.preview();

        dialog.set_mode(SizeMode::Custom);
        assert_ne!(dialog.preview(), before);
        dialog.set_mode(SizeMode::Preset);

        assert_eq!(dialog.preview(), before);
    }

    #[test]
    fn test_custom_edits_survive_preset_detour() {
        let mut dialog = NewCanvasDialog::new();
        dialog.set_mode(SizeMode::Custom);
        dialog.set_custom_width("2000");
        dialog.set_custom_height(1500);

        dialog.select_preset("A6");
        assert_eq!(dialog.mode(), SizeMode::Preset);
        dialog.toggle_mode();

        assert_eq!(
            dialog.preview(),
            PixelSize {
                width: 2000,
                height: 1500
            }
        );
    }

    #[test]
    fn test_partial_typing_previews_floor() {
        let mut dialog = NewCanvasDialog::new();
        dialog.set_mode(SizeMode::Custom);
        dialog.set_custom_width("");
        assert_eq!(dialog.preview().width, 1);
        assert_eq!(dialog.preview().height, 800);
    }

    #[test]
    fn test_confirm_carries_size_and_dpi() {
        let mut dialog = NewCanvasDialog::new();
        dialog.select_dpi(Dpi::DPI_600);
        let request = dialog.confirm();
        assert_eq!(request.dpi, Dpi::DPI_600);
        assert_eq!(request.width, 4299);
        assert_eq!(request.height, 6071);
    }

    #[test]
    fn test_confirm_in_custom_mode() {
        let mut dialog = NewCanvasDialog::new();
        dialog.set_mode(SizeMode::Custom);
        dialog.set_custom_width(50_000);
        let request = dialog.confirm();
        assert_eq!(request.width, 10_000);
        assert_eq!(request.height, 800);
        assert_eq!(request.dpi, Dpi::DPI_300);
    }

    #[test]
    fn test_serde_round_trip_with_nan_width() {
        let mut dialog = NewCanvasDialog::new();
        dialog.set_mode(SizeMode::Custom);
        dialog.set_custom_width(f64::NAN);
        dialog.set_custom_height(f64::INFINITY);

        let json = serde_json::to_string(&dialog).expect("serialize");
        let restored: NewCanvasDialog = serde_json::from_str(&json).expect("deserialize");

        assert_eq!(restored.mode(), SizeMode::Custom);
        assert_eq!(
            restored.preview(),
            PixelSize {
                width: 1,
                height: 10_000
            }
        );
        assert_eq!(restored.preview(), dialog.preview());
    }
}

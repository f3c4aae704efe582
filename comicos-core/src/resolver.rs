//! Canvas dimension resolver.
//!
//! Turns a [`SelectionState`] into a [`PixelSize`]. Resolution never fails:
//! every input, however malformed, maps to a pixel size inside
//! `[MIN_PX, MAX_PX]` on both axes so the preview can always be drawn and the
//! confirm action is always available.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::paper::{Dpi, PaperPreset, MM_PER_INCH};

/// Smallest allowed pixel extent on either axis.
pub const MIN_PX: u32 = 1;

/// Largest allowed pixel extent on either axis.
pub const MAX_PX: u32 = 10_000;

/// Size used when a preset label is not in the catalog.
pub const FALLBACK_SIZE: PixelSize = PixelSize {
    width: 1200,
    height: 800,
};

/// A validated canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl fmt::Display for PixelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} × {} px", self.width, self.height)
    }
}

/// A raw pixel value as entered in a numeric field.
///
/// Entries are kept unvalidated so half-typed or nonsense input is still
/// representable. [`PixelEntry::to_pixels`] coerces it.
///
/// Non-finite numbers serialize as the text `"NaN"`, `"Infinity"` or
/// `"-Infinity"`, which coerce back to the same pixel count.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PixelEntry {
    /// A numeric value.
    Number(f64),
    /// Text as typed by the user.
    Text(String),
}

impl PixelEntry {
    /// Coerce the entry to a pixel count in `[MIN_PX, MAX_PX]`.
    ///
    /// Blank, non-numeric, zero and NaN entries become [`MIN_PX`]. Fractions
    /// are truncated toward zero. Of the non-finite spellings, text only
    /// accepts `Infinity` and `-Infinity`; `inf` or `nan` are non-numeric.
    #[must_use]
    pub fn to_pixels(&self) -> u32 {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(text) => parse_text(text),
        };
        clamp_axis(value.trunc())
    }
}

impl Serialize for PixelEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Number(n) if n.is_finite() => serializer.serialize_f64(*n),
            Self::Number(n) if n.is_nan() => serializer.serialize_str("NaN"),
            Self::Number(n) if n.is_sign_positive() => serializer.serialize_str("Infinity"),
            Self::Number(_) => serializer.serialize_str("-Infinity"),
            Self::Text(text) => serializer.serialize_str(text),
        }
    }
}

fn parse_text(text: &str) -> f64 {
    let text = text.trim();
    match text {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ => {
            let lower = text.to_ascii_lowercase();
            if lower.contains("inf") || lower.contains("nan") {
                return f64::NAN;
            }
            text.parse::<f64>().unwrap_or(f64::NAN)
        }
    }
}

impl From<u32> for PixelEntry {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i32> for PixelEntry {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<f64> for PixelEntry {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for PixelEntry {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PixelEntry {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// The resolver's input: which mode is active and the values for that mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum SelectionState {
    /// A paper preset printed at a given resolution.
    Preset {
        /// Label of the preset in the catalog.
        label: String,
        /// Print resolution.
        dpi: Dpi,
    },
    /// An explicit pixel size.
    Custom {
        /// Requested width.
        width: PixelEntry,
        /// Requested height.
        height: PixelEntry,
    },
}

impl SelectionState {
    /// Preset-mode selection.
    #[must_use]
    pub fn preset(label: impl Into<String>, dpi: Dpi) -> Self {
        Self::Preset {
            label: label.into(),
            dpi,
        }
    }

    /// Custom-mode selection.
    #[must_use]
    pub fn custom(width: impl Into<PixelEntry>, height: impl Into<PixelEntry>) -> Self {
        Self::Custom {
            width: width.into(),
            height: height.into(),
        }
    }

    /// The active mode.
    #[must_use]
    pub fn mode(&self) -> SizeMode {
        match self {
            Self::Preset { .. } => SizeMode::Preset,
            Self::Custom { .. } => SizeMode::Custom,
        }
    }
}

/// The two dimension-selection modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeMode {
    /// Paper preset at a print resolution.
    Preset,
    /// Pixel size entered directly.
    Custom,
}

impl SizeMode {
    /// The other mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Preset => Self::Custom,
            Self::Custom => Self::Preset,
        }
    }
}

/// Resolve a selection to a pixel size.
///
/// Unknown preset labels resolve to [`FALLBACK_SIZE`].
#[must_use]
pub fn resolve(state: &SelectionState) -> PixelSize {
    match state {
        SelectionState::Preset { label, dpi } => match PaperPreset::find(label) {
            Some(preset) => preset_size(preset, *dpi),
            None => {
                tracing::warn!("Unknown paper preset {label:?}, using fallback size");
                FALLBACK_SIZE
            }
        },
        SelectionState::Custom { width, height } => PixelSize {
            width: width.to_pixels(),
            height: height.to_pixels(),
        },
    }
}

/// Pixel size of `preset` printed at `dpi`, clamped to the allowed range.
#[must_use]
pub fn preset_size(preset: &PaperPreset, dpi: Dpi) -> PixelSize {
    PixelSize {
        width: clamp_axis(mm_to_px(preset.width_mm, dpi)),
        height: clamp_axis(mm_to_px(preset.height_mm, dpi)),
    }
}

/// Convert millimeters to pixels at `dpi`, rounding half away from zero.
#[must_use]
pub fn mm_to_px(mm: f64, dpi: Dpi) -> f64 {
    (mm / MM_PER_INCH * f64::from(dpi.get())).round()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to [1, 10000]
fn clamp_axis(value: f64) -> u32 {
    if value.is_nan() {
        return MIN_PX;
    }
    value.clamp(f64::from(MIN_PX), f64::from(MAX_PX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paper::PRESETS;

    #[test]
    fn test_b5_at_300_dpi() {
        let size = resolve(&SelectionState::preset("B5", Dpi::DPI_300));
        assert_eq!(
            size,
            PixelSize {
                width: 2150,
                height: 3035
            }
        );
    }

    #[test]
    fn test_a4_at_72_dpi() {
        let size = resolve(&SelectionState::preset("A4", Dpi::DPI_72));
        assert_eq!(
            size,
            PixelSize {
                width: 595,
                height: 842
            }
        );
    }

    #[test]
    fn test_unknown_preset_falls_back() {
        let size = resolve(&SelectionState::preset("Letter", Dpi::DPI_600));
        assert_eq!(size, FALLBACK_SIZE);
        assert_eq!(size.width, 1200);
        assert_eq!(size.height, 800);
    }

    #[test]
    fn test_every_preset_within_bounds() {
        for preset in &PRESETS {
            for dpi in Dpi::ALL {
                let size = resolve(&SelectionState::preset(preset.label, dpi));
                assert!((MIN_PX..=MAX_PX).contains(&size.width), "{preset} @ {dpi}");
                assert!((MIN_PX..=MAX_PX).contains(&size.height), "{preset} @ {dpi}");
            }
        }
    }

    #[test]
    fn test_largest_preset_stays_under_cap() {
        let size = resolve(&SelectionState::preset("B4", Dpi::DPI_600));
        assert_eq!(size.width, 6071);
        assert_eq!(size.height, 8598);
    }

    #[test]
    fn test_custom_clamps_low_and_high() {
        assert_eq!(
            resolve(&SelectionState::custom(0, 0)),
            PixelSize {
                width: 1,
                height: 1
            }
        );
        assert_eq!(
            resolve(&SelectionState::custom(999_999, 999_999)),
            PixelSize {
                width: 10_000,
                height: 10_000
            }
        );
    }

    #[test]
    fn test_custom_passes_valid_values_through() {
        let size = resolve(&SelectionState::custom(1920, 1080));
        assert_eq!(
            size,
            PixelSize {
                width: 1920,
                height: 1080
            }
        );
    }

    #[test]
    fn test_custom_malformed_entries_become_floor() {
        let size = resolve(&SelectionState::custom("abc", "640"));
        assert_eq!(size.width, 1);
        assert_eq!(size.height, 640);

        let size = resolve(&SelectionState::custom("", f64::NAN));
        assert_eq!(size, PixelSize { width: 1, height: 1 });

        let size = resolve(&SelectionState::custom(-50.0, "0.4"));
        assert_eq!(size, PixelSize { width: 1, height: 1 });
    }

    #[test]
    fn test_custom_fractions_truncate() {
        let size = resolve(&SelectionState::custom(" 800.9 ", 600.5));
        assert_eq!(
            size,
            PixelSize {
                width: 800,
                height: 600
            }
        );
    }

    #[test]
    fn test_infinite_entries_saturate() {
        let size = resolve(&SelectionState::custom(f64::INFINITY, f64::NEG_INFINITY));
        assert_eq!(
            size,
            PixelSize {
                width: MAX_PX,
                height: MIN_PX
            }
        );
    }

    #[test]
    fn test_text_infinity_spellings() {
        for text in ["inf", "infinity", "-inf", "nan", "NaN", " INF "] {
            assert_eq!(PixelEntry::from(text).to_pixels(), MIN_PX, "{text:?}");
        }
        assert_eq!(PixelEntry::from("Infinity").to_pixels(), MAX_PX);
        assert_eq!(PixelEntry::from("-Infinity").to_pixels(), MIN_PX);
    }

    #[test]
    fn test_non_finite_numbers_serialize_as_text() {
        for (value, text, pixels) in [
            (f64::NAN, "NaN", MIN_PX),
            (f64::INFINITY, "Infinity", MAX_PX),
            (f64::NEG_INFINITY, "-Infinity", MIN_PX),
        ] {
            let entry = PixelEntry::Number(value);
            let json = serde_json::to_string(&entry).expect("serialize");
            assert_eq!(json, format!("\"{text}\""));

            let back: PixelEntry = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(back.to_pixels(), pixels);
            assert_eq!(entry.to_pixels(), pixels);
        }
        assert_eq!(
            serde_json::to_string(&PixelEntry::Number(640.5)).expect("serialize"),
            "640.5"
        );
    }

    #[test]
    fn test_selection_serde_shape() {
        let state = SelectionState::preset("A5", Dpi::DPI_144);
        let json = serde_json::to_value(&state).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({ "mode": "preset", "label": "A5", "dpi": 144 })
        );

        let custom: SelectionState =
            serde_json::from_str(r#"{"mode":"custom","width":"12a","height":300}"#)
                .expect("deserialize");
        assert_eq!(resolve(&custom), PixelSize { width: 1, height: 300 });
    }

    #[test]
    fn test_mode_toggle() {
        assert_eq!(SizeMode::Preset.toggled(), SizeMode::Custom);
        assert_eq!(SizeMode::Custom.toggled(), SizeMode::Preset);
        assert_eq!(SelectionState::custom(1, 1).mode(), SizeMode::Custom);
    }
}

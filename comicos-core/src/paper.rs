//! Paper presets and print resolutions.
//!
//! Both catalogs are fixed, process-wide constants. Presets are listed in
//! display order and given in portrait orientation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Millimeters per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// A named physical page size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PaperPreset {
    /// Short unique identifier, e.g. `"B5"`.
    pub label: &'static str,
    /// Width in millimeters.
    pub width_mm: f64,
    /// Height in millimeters.
    pub height_mm: f64,
}

impl PaperPreset {
    /// Find a preset by its label. Matching is exact.
    #[must_use]
    pub fn find(label: &str) -> Option<&'static PaperPreset> {
        PRESETS.iter().find(|p| p.label == label)
    }

    /// Find a preset by label, failing on an unknown label.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownPreset`] if no preset carries `label`.
    pub fn lookup(label: &str) -> CoreResult<&'static PaperPreset> {
        Self::find(label).ok_or_else(|| CoreError::UnknownPreset(label.to_string()))
    }
}

impl fmt::Display for PaperPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}×{}mm)", self.label, self.width_mm, self.height_mm)
    }
}

/// The preset catalog, in display order.
pub static PRESETS: [PaperPreset; 6] = [
    PaperPreset {
        label: "B4",
        width_mm: 257.0,
        height_mm: 364.0,
    },
    PaperPreset {
        label: "B5",
        width_mm: 182.0,
        height_mm: 257.0,
    },
    PaperPreset {
        label: "B6",
        width_mm: 128.0,
        height_mm: 182.0,
    },
    PaperPreset {
        label: "A4",
        width_mm: 210.0,
        height_mm: 297.0,
    },
    PaperPreset {
        label: "A5",
        width_mm: 148.0,
        height_mm: 210.0,
    },
    PaperPreset {
        label: "A6",
        width_mm: 105.0,
        height_mm: 148.0,
    },
];

/// Label of the preset selected when the dialog opens.
pub const DEFAULT_PRESET: &str = "B5";

/// A supported print resolution in dots per inch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Dpi(u32);

impl Dpi {
    /// 72 DPI (screen).
    pub const DPI_72: Dpi = Dpi(72);
    /// 144 DPI.
    pub const DPI_144: Dpi = Dpi(144);
    /// 300 DPI (print).
    pub const DPI_300: Dpi = Dpi(300);
    /// 350 DPI.
    pub const DPI_350: Dpi = Dpi(350);
    /// 600 DPI.
    pub const DPI_600: Dpi = Dpi(600);

    /// Every supported resolution, ascending.
    pub const ALL: [Dpi; 5] = [
        Self::DPI_72,
        Self::DPI_144,
        Self::DPI_300,
        Self::DPI_350,
        Self::DPI_600,
    ];

    /// Accept `value` if it is a supported resolution.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnsupportedDpi`] for any other value.
    pub fn new(value: u32) -> CoreResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.0 == value)
            .ok_or(CoreError::UnsupportedDpi(value))
    }

    /// The raw dots-per-inch value.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Dpi {
    fn default() -> Self {
        Self::DPI_300
    }
}

impl TryFrom<u32> for Dpi {
    type Error = CoreError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Dpi> for u32 {
    fn from(dpi: Dpi) -> Self {
        dpi.0
    }
}

impl FromStr for Dpi {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_suffix("DPI")
            .or_else(|| trimmed.strip_suffix("dpi"))
            .unwrap_or(trimmed)
            .trim();
        let value = digits
            .parse::<u32>()
            .map_err(|_| CoreError::InvalidDpi(s.to_string()))?;
        Self::new(value)
    }
}

impl fmt::Display for Dpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} DPI", self.0)
    }
}

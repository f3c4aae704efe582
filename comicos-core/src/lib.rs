//! # Comicos Core
//!
//! Canvas sizing logic for the Comicos comic editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                comicos-core                 │
//! ├─────────────────────────────────────────────┤
//! │  Paper Catalog   │  Dimension Resolver      │
//! │  - Presets (mm)  │  - mm -> px at DPI       │
//! │  - Resolutions   │  - Clamping              │
//! ├─────────────────────────────────────────────┤
//! │  New Canvas Dialog                          │
//! │  - Preset / custom modes                    │
//! │  - Live preview, confirm                    │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod dialog;
pub mod error;
pub mod paper;
pub mod resolver;

pub use dialog::{CanvasRequest, NewCanvasDialog};
pub use error::{CoreError, CoreResult};
pub use paper::{Dpi, PaperPreset, PRESETS};
pub use resolver::{resolve, PixelEntry, PixelSize, SelectionState, SizeMode, MAX_PX, MIN_PX};

/// Comicos core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

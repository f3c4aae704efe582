//! # Comicos Desktop
//!
//! Application-process side of the Comicos editor shell.
//!
//! This crate serves the requests the editor UI sends across the process
//! boundary: saving and opening `.cmc` projects, exporting images, reading
//! and changing the zoom factor. It also fans menu actions out to the UI.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p comicos-desktop -- resolve --preset A4 --dpi 350
//! cargo run -p comicos-desktop -- save --input page.json
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `DesktopConfig` - Project directory, default resolution and zoom
//! - `Bridge` - Channel dispatcher over a `FileDialog` and a `ZoomSurface`
//! - `MenuBus` - Menu action notifications with cancellable subscriptions

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

pub mod bridge;
pub mod error;
pub mod export;
pub mod file_dialog;
pub mod menu;
pub mod project;
pub mod zoom;

pub use bridge::{Bridge, BridgeRequest, BridgeResponse, OpenedProject, Outcome, SavedFile};
pub use error::{BridgeError, BridgeResult};
pub use export::{ExportFormat, ImagePayload};
pub use file_dialog::{DialogOptions, FileDialog, FileFilter, Headless, PromptDialog, ScriptedDialog};
pub use menu::{MenuAction, MenuBus, Subscription};
pub use zoom::{ViewZoom, ZoomSurface};

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use comicos_core::{Dpi, NewCanvasDialog, SizeMode};

/// Command-line arguments for comicos.
#[derive(Debug, Clone, Parser)]
#[command(name = "comicos")]
#[command(about = "Comicos editor shell")]
#[command(version)]
pub struct CliArgs {
    /// Directory relative dialog answers are resolved against
    #[arg(long, env = "COMICOS_PROJECT_DIR")]
    pub project_dir: Option<PathBuf>,

    /// Print resolution selected when the new canvas dialog opens
    #[arg(long, env = "COMICOS_DPI", default_value = "300")]
    pub dpi: Dpi,

    /// Initial zoom factor of the canvas view
    #[arg(long, default_value = "1.0")]
    pub zoom: f64,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands of comicos.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List paper presets with their pixel size at the selected resolution
    Presets,

    /// Resolve a new canvas size from a preset or an explicit pixel size
    Resolve {
        /// Paper preset label, e.g. B5
        #[arg(long, conflicts_with_all = ["width", "height"])]
        preset: Option<String>,

        /// Custom width in pixels, as typed
        #[arg(long, allow_hyphen_values = true)]
        width: Option<String>,

        /// Custom height in pixels, as typed
        #[arg(long, allow_hyphen_values = true)]
        height: Option<String>,
    },

    /// Save a project file, asking for a path if none is given
    Save {
        /// File holding the serialized project
        #[arg(long)]
        input: PathBuf,

        /// Path to save to
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// Save a project file under a new path
    SaveAs {
        /// File holding the serialized project
        #[arg(long)]
        input: PathBuf,
    },

    /// Open a project file and print it
    Open,

    /// Export an image given as a data URI or raw image file
    Export {
        /// File holding a data URI, base64 text or image bytes
        #[arg(long)]
        input: PathBuf,
    },

    /// Send a raw JSON bridge request, e.g. {"channel":"zoom:get"}
    Request {
        /// The request
        json: String,
    },
}

/// Desktop application configuration.
#[derive(Debug, Clone)]
pub struct DesktopConfig {
    /// Directory dialog answers are resolved against.
    pub project_dir: PathBuf,
    /// Resolution the new canvas dialog starts with.
    pub default_dpi: Dpi,
    /// Zoom factor of a fresh view.
    pub initial_zoom: f64,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DesktopConfig {
    /// Create a new desktop configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            project_dir: PathBuf::from("."),
            default_dpi: Dpi::default(),
            initial_zoom: zoom::DEFAULT_ZOOM,
        }
    }
}

impl From<&CliArgs> for DesktopConfig {
    fn from(args: &CliArgs) -> Self {
        Self {
            project_dir: args
                .project_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(".")),
            default_dpi: args.dpi,
            initial_zoom: args.zoom,
        }
    }
}

/// Drive a new canvas dialog the way the `resolve` command describes it.
///
/// A preset label selects preset mode. Any custom dimension selects custom
/// mode, with the dialog's remembered value standing in for the other one.
#[must_use]
pub fn new_canvas_dialog(
    config: &DesktopConfig,
    preset: Option<&str>,
    width: Option<&str>,
    height: Option<&str>,
) -> NewCanvasDialog {
    let mut dialog = NewCanvasDialog::new();
    dialog.select_dpi(config.default_dpi);
    if let Some(label) = preset {
        dialog.select_preset(label);
    }
    if width.is_some() || height.is_some() {
        dialog.set_mode(SizeMode::Custom);
        if let Some(w) = width {
            dialog.set_custom_width(w);
        }
        if let Some(h) = height {
            dialog.set_custom_height(h);
        }
    }
    dialog
}

//! The bridge between the UI layer and the application process.
//!
//! Every file operation answers with an [`Outcome`]: `{ "success": true, ... }`
//! or `{ "success": false }`. A failure means "nothing happened, keep the
//! previous state". It covers a cancelled dialog as well as an I/O error, and
//! the error itself is only logged.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::BridgeResult;
use crate::export::{self, ImagePayload};
use crate::file_dialog::FileDialog;
use crate::menu::MenuBus;
use crate::project;
use crate::zoom::ZoomSurface;

/// Binary result of a bridge operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The operation happened; carries its data.
    Success(T),
    /// Nothing happened.
    Failure,
}

impl<T> Outcome<T> {
    /// Whether the operation happened.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The data of a successful operation.
    #[must_use]
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure => None,
        }
    }
}

impl<T: Serialize> Serialize for Outcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Wire<'a, T> {
            success: bool,
            #[serde(flatten)]
            data: Option<&'a T>,
        }

        let wire = match self {
            Self::Success(data) => Wire {
                success: true,
                data: Some(data),
            },
            Self::Failure => Wire {
                success: false,
                data: None,
            },
        };
        wire.serialize(serializer)
    }
}

/// A file written by the bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedFile {
    /// Where the file was written.
    pub file_path: PathBuf,
}

/// A project read by the bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenedProject {
    /// The project document.
    pub data: String,
    /// Where it was read from.
    pub file_path: PathBuf,
}

/// A request arriving over the bridge, tagged with its channel name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "channel")]
pub enum BridgeRequest {
    /// Save a project, prompting for a path if none is given.
    #[serde(rename = "file:save-project")]
    SaveProject {
        /// Serialized project.
        data: String,
        /// Path the project was last saved to.
        #[serde(default, rename = "filePath")]
        file_path: Option<PathBuf>,
    },
    /// Save a project under a newly chosen path.
    #[serde(rename = "file:save-project-as")]
    SaveProjectAs {
        /// Serialized project.
        data: String,
    },
    /// Let the user pick a project and read it.
    #[serde(rename = "file:open-project")]
    OpenProject,
    /// Let the user pick a path and write an image.
    #[serde(rename = "file:export-image")]
    ExportImage {
        /// Image data.
        payload: ImagePayload,
    },
    /// Read the zoom factor.
    #[serde(rename = "zoom:get")]
    GetZoom,
    /// Change the zoom factor.
    #[serde(rename = "zoom:set")]
    SetZoom {
        /// New factor.
        factor: f64,
    },
}

impl BridgeRequest {
    /// The channel name of this request.
    #[must_use]
    pub fn channel(&self) -> &'static str {
        match self {
            Self::SaveProject { .. } => "file:save-project",
            Self::SaveProjectAs { .. } => "file:save-project-as",
            Self::OpenProject => "file:open-project",
            Self::ExportImage { .. } => "file:export-image",
            Self::GetZoom => "zoom:get",
            Self::SetZoom { .. } => "zoom:set",
        }
    }
}

/// The answer to a [`BridgeRequest`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BridgeResponse {
    /// Answer to save and export requests.
    Saved(Outcome<SavedFile>),
    /// Answer to the open request.
    Opened(Outcome<OpenedProject>),
    /// Answer to `zoom:get`.
    Zoom(f64),
    /// Answer to `zoom:set`, which returns nothing.
    Done,
}

/// Application-side handlers for bridge requests.
#[derive(Clone)]
pub struct Bridge {
    dialog: Arc<dyn FileDialog>,
    zoom: Arc<dyn ZoomSurface>,
    menu: MenuBus,
}

impl Bridge {
    /// Create a bridge over a dialog host and a zoomable surface.
    #[must_use]
    pub fn new(dialog: Arc<dyn FileDialog>, zoom: Arc<dyn ZoomSurface>) -> Self {
        Self {
            dialog,
            zoom,
            menu: MenuBus::new(),
        }
    }

    /// The bus menu actions are delivered on.
    #[must_use]
    pub fn menu(&self) -> &MenuBus {
        &self.menu
    }

    /// Save `data` to `file_path`, or to a path chosen in a save dialog.
    pub async fn save_project(&self, data: &str, file_path: Option<&Path>) -> Outcome<SavedFile> {
        let result = match file_path {
            Some(path) => project::write_project(path, data)
                .await
                .map(|()| Some(path.to_path_buf())),
            None => self.save_with_dialog(data, "Save Project").await,
        };
        settle("file:save-project", result.map(|p| p.map(saved)))
    }

    /// Save `data` to a path chosen in a save dialog.
    pub async fn save_project_as(&self, data: &str) -> Outcome<SavedFile> {
        let result = self.save_with_dialog(data, "Save As").await;
        settle("file:save-project-as", result.map(|p| p.map(saved)))
    }

    /// Read a project chosen in an open dialog.
    pub async fn open_project(&self) -> Outcome<OpenedProject> {
        settle("file:open-project", self.try_open_project().await)
    }

    /// Write an image to a path chosen in the export dialog.
    pub async fn export_image(&self, payload: &ImagePayload) -> Outcome<SavedFile> {
        settle(
            "file:export-image",
            self.try_export_image(payload).await.map(|p| p.map(saved)),
        )
    }

    /// The surface's zoom factor.
    #[must_use]
    pub fn zoom_factor(&self) -> f64 {
        self.zoom.zoom_factor()
    }

    /// Pass `factor` to the surface.
    ///
    /// # Errors
    ///
    /// Returns whatever the surface rejects `factor` with.
    pub fn set_zoom_factor(&self, factor: f64) -> BridgeResult<f64> {
        self.zoom.set_zoom_factor(factor)
    }

    /// Serve a channel-tagged request.
    pub async fn dispatch(&self, request: BridgeRequest) -> BridgeResponse {
        tracing::debug!("Bridge request on {}", request.channel());
        match request {
            BridgeRequest::SaveProject { data, file_path } => {
                BridgeResponse::Saved(self.save_project(&data, file_path.as_deref()).await)
            }
            BridgeRequest::SaveProjectAs { data } => {
                BridgeResponse::Saved(self.save_project_as(&data).await)
            }
            BridgeRequest::OpenProject => BridgeResponse::Opened(self.open_project().await),
            BridgeRequest::ExportImage { payload } => {
                BridgeResponse::Saved(self.export_image(&payload).await)
            }
            BridgeRequest::GetZoom => BridgeResponse::Zoom(self.zoom_factor()),
            BridgeRequest::SetZoom { factor } => {
                if let Err(e) = self.set_zoom_factor(factor) {
                    tracing::warn!("zoom:set ignored: {e}");
                }
                BridgeResponse::Done
            }
        }
    }

    async fn save_with_dialog(&self, data: &str, title: &str) -> BridgeResult<Option<PathBuf>> {
        let Some(path) = self.dialog.save(&project::save_dialog(title)).await? else {
            return Ok(None);
        };
        project::write_project(&path, data).await?;
        Ok(Some(path))
    }

    async fn try_open_project(&self) -> BridgeResult<Option<OpenedProject>> {
        let Some(path) = self.dialog.open(&project::open_dialog()).await? else {
            return Ok(None);
        };
        let data = project::read_project(&path).await?;
        Ok(Some(OpenedProject {
            data,
            file_path: path,
        }))
    }

    async fn try_export_image(&self, payload: &ImagePayload) -> BridgeResult<Option<PathBuf>> {
        let Some(path) = self.dialog.save(&export::export_dialog()).await? else {
            return Ok(None);
        };
        export::write_image(&path, payload).await?;
        Ok(Some(path))
    }
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("zoom", &self.zoom.zoom_factor())
            .field("menu", &self.menu)
            .finish_non_exhaustive()
    }
}

fn saved(file_path: PathBuf) -> SavedFile {
    SavedFile { file_path }
}

/// Collapse an operation result into an [`Outcome`], logging why it failed.
fn settle<T>(channel: &str, result: BridgeResult<Option<T>>) -> Outcome<T> {
    match result {
        Ok(Some(data)) => {
            tracing::info!("{channel} succeeded");
            Outcome::Success(data)
        }
        Ok(None) => {
            tracing::debug!("{channel} cancelled");
            Outcome::Failure
        }
        Err(e) => {
            tracing::warn!("{channel} failed: {e}");
            Outcome::Failure
        }
    }
}

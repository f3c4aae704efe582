//! Native open/save file dialogs.
//!
//! The bridge only sees the [`FileDialog`] trait. A dialog answers with the
//! chosen path, `None` when the user cancels, or [`BridgeError::NoWindow`]
//! when there is nothing to show it in.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::error::{BridgeError, BridgeResult};

/// A named group of file extensions offered by a dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    /// Human readable name, e.g. `"PNG Image"`.
    pub name: String,
    /// Extensions without the leading dot.
    pub extensions: Vec<String>,
}

impl FileFilter {
    /// Create a filter from a name and extensions.
    #[must_use]
    pub fn new(name: impl Into<String>, extensions: &[&str]) -> Self {
        Self {
            name: name.into(),
            extensions: extensions.iter().map(|e| (*e).to_string()).collect(),
        }
    }

    /// Whether `path` carries one of this filter's extensions.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
    }
}

/// What a dialog should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogOptions {
    /// Window title.
    pub title: String,
    /// Suggested file name or path for save dialogs.
    pub default_path: Option<PathBuf>,
    /// Offered file types, first is the default.
    pub filters: Vec<FileFilter>,
}

/// A host for native file dialogs.
#[async_trait]
pub trait FileDialog: Send + Sync {
    /// Ask for a path to save to.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::NoWindow`] if no dialog can be shown.
    async fn save(&self, options: &DialogOptions) -> BridgeResult<Option<PathBuf>>;

    /// Ask for an existing file to open.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::NoWindow`] if no dialog can be shown.
    async fn open(&self, options: &DialogOptions) -> BridgeResult<Option<PathBuf>>;
}

/// A dialog that replays queued answers.
///
/// Each call pops the next answer. An exhausted queue behaves like the user
/// pressing cancel. Every request is recorded for inspection.
#[derive(Debug, Default)]
pub struct ScriptedDialog {
    answers: Mutex<VecDeque<Option<PathBuf>>>,
    seen: Mutex<Vec<DialogOptions>>,
}

impl ScriptedDialog {
    /// Create a dialog that answers with `answers` in order.
    #[must_use]
    pub fn new(answers: impl IntoIterator<Item = Option<PathBuf>>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Options of every dialog shown so far.
    #[must_use]
    pub fn requests(&self) -> Vec<DialogOptions> {
        self.seen
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    fn next(&self, options: &DialogOptions) -> Option<PathBuf> {
        self.seen
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(options.clone());
        self.answers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .pop_front()
            .flatten()
    }
}

#[async_trait]
impl FileDialog for ScriptedDialog {
    async fn save(&self, options: &DialogOptions) -> BridgeResult<Option<PathBuf>> {
        Ok(self.next(options))
    }

    async fn open(&self, options: &DialogOptions) -> BridgeResult<Option<PathBuf>> {
        Ok(self.next(options))
    }
}

/// A dialog that has no window to attach to. Every request fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

#[async_trait]
impl FileDialog for Headless {
    async fn save(&self, _options: &DialogOptions) -> BridgeResult<Option<PathBuf>> {
        Err(BridgeError::NoWindow)
    }

    async fn open(&self, _options: &DialogOptions) -> BridgeResult<Option<PathBuf>> {
        Err(BridgeError::NoWindow)
    }
}

/// A line-based dialog on the terminal.
///
/// Prompts on stderr and reads one line from stdin. An empty line cancels.
/// Relative answers are taken relative to `base_dir`. Save answers whose
/// extension is not offered get the first extension of the default filter.
#[derive(Debug, Clone)]
pub struct PromptDialog {
    base_dir: PathBuf,
}

impl PromptDialog {
    /// Create a prompt dialog rooted at `base_dir`.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    async fn ask(&self, options: &DialogOptions) -> BridgeResult<Option<PathBuf>> {
        let hint = options
            .default_path
            .as_ref()
            .map(|p| format!(" [{}]", p.display()))
            .unwrap_or_default();
        eprint!("{}{hint}: ", options.title);

        let mut line = String::new();
        let read = BufReader::new(tokio::io::stdin())
            .read_line(&mut line)
            .await?;
        if read == 0 {
            return Err(BridgeError::NoWindow);
        }

        let answer = line.trim();
        if answer.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.base_dir.join(answer)))
    }
}

#[async_trait]
impl FileDialog for PromptDialog {
    async fn save(&self, options: &DialogOptions) -> BridgeResult<Option<PathBuf>> {
        let answer = self.ask(options).await?;
        Ok(answer.map(|path| with_default_extension(path, options)))
    }

    async fn open(&self, options: &DialogOptions) -> BridgeResult<Option<PathBuf>> {
        self.ask(options).await
    }
}

/// Append the default filter's first extension when `path` matches none of
/// the offered filters.
#[must_use]
pub fn with_default_extension(path: PathBuf, options: &DialogOptions) -> PathBuf {
    if options.filters.iter().any(|filter| filter.matches(&path)) {
        return path;
    }
    match options
        .filters
        .first()
        .and_then(|filter| filter.extensions.first())
    {
        Some(ext) => {
            tracing::debug!("{} matches no filter, adding .{ext}", path.display());
            let mut name = path.into_os_string();
            name.push(".");
            name.push(ext);
            PathBuf::from(name)
        }
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> DialogOptions {
        DialogOptions {
            title: "Export Image".to_string(),
            default_path: Some(PathBuf::from("untitled.png")),
            filters: vec![
                FileFilter::new("PNG Image", &["png"]),
                FileFilter::new("JPEG Image", &["jpg", "jpeg"]),
            ],
        }
    }

    #[test]
    fn test_filter_matches_case_insensitive() {
        let jpeg = FileFilter::new("JPEG Image", &["jpg", "jpeg"]);
        assert!(jpeg.matches(Path::new("a/b/photo.JPG")));
        assert!(jpeg.matches(Path::new("photo.jpeg")));
        assert!(!jpeg.matches(Path::new("photo.png")));
        assert!(!jpeg.matches(Path::new("photo")));
    }

    #[test]
    fn test_default_extension_appended() {
        let opts = options();
        assert_eq!(
            with_default_extension(PathBuf::from("page1"), &opts),
            PathBuf::from("page1.png")
        );
        assert_eq!(
            with_default_extension(PathBuf::from("page1.jpg"), &opts),
            PathBuf::from("page1.jpg")
        );
        assert_eq!(
            with_default_extension(PathBuf::from("page1.JPEG"), &opts),
            PathBuf::from("page1.JPEG")
        );
    }

    #[test]
    fn test_unoffered_extension_gets_default() {
        let opts = options();
        assert_eq!(
            with_default_extension(PathBuf::from("page1.tiff"), &opts),
            PathBuf::from("page1.tiff.png")
        );
        assert_eq!(
            with_default_extension(PathBuf::from("chapter.v2"), &opts),
            PathBuf::from("chapter.v2.png")
        );

        let unfiltered = DialogOptions {
            filters: Vec::new(),
            ..opts
        };
        assert_eq!(
            with_default_extension(PathBuf::from("page1.tiff"), &unfiltered),
            PathBuf::from("page1.tiff")
        );
    }

    #[tokio::test]
    async fn test_scripted_dialog_replays_then_cancels() {
        let dialog = ScriptedDialog::new([Some(PathBuf::from("one.cmc")), None]);
        let opts = options();

        assert_eq!(
            dialog.save(&opts).await.expect("save"),
            Some(PathBuf::from("one.cmc"))
        );
        assert_eq!(dialog.open(&opts).await.expect("open"), None);
        assert_eq!(dialog.save(&opts).await.expect("exhausted"), None);
        assert_eq!(dialog.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_headless_has_no_window() {
        let result = Headless.save(&options()).await;
        assert!(matches!(result, Err(BridgeError::NoWindow)));
    }
}

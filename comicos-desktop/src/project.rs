//! Project file persistence.
//!
//! A project is an opaque UTF-8 document stored in a `.cmc` file. The shell
//! never looks inside it.

use std::path::Path;

use crate::error::BridgeResult;
use crate::file_dialog::{DialogOptions, FileFilter};

/// Extension of Comicos project files.
pub const PROJECT_EXTENSION: &str = "cmc";

/// File name suggested for a project that was never saved.
pub const UNTITLED_PROJECT: &str = "Untitled.cmc";

/// Filter offered by project dialogs.
#[must_use]
pub fn project_filter() -> FileFilter {
    FileFilter::new("Comicos Project", &[PROJECT_EXTENSION])
}

/// Options for a "save project" dialog titled `title`.
#[must_use]
pub fn save_dialog(title: &str) -> DialogOptions {
    DialogOptions {
        title: title.to_string(),
        default_path: Some(UNTITLED_PROJECT.into()),
        filters: vec![project_filter()],
    }
}

/// Options for the "open project" dialog.
#[must_use]
pub fn open_dialog() -> DialogOptions {
    DialogOptions {
        title: "Open Project".to_string(),
        default_path: None,
        filters: vec![project_filter()],
    }
}

/// Write `data` to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`BridgeError::Io`](crate::BridgeError::Io) if the file cannot be written.
pub async fn write_project(path: &Path, data: &str) -> BridgeResult<()> {
    tokio::fs::write(path, data.as_bytes()).await?;
    tracing::debug!("Wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}

/// Read the project at `path`.
///
/// # Errors
///
/// Returns [`BridgeError::Io`](crate::BridgeError::Io) if the file cannot be
/// read or is not valid UTF-8.
pub async fn read_project(path: &Path) -> BridgeResult<String> {
    let data = tokio::fs::read_to_string(path).await?;
    tracing::debug!("Read {} bytes from {}", data.len(), path.display());
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("chapter1.cmc");

        write_project(&path, "{\"pages\":[]}").await.expect("write");
        let data = read_project(&path).await.expect("read");

        assert_eq!(data, "{\"pages\":[]}");
    }

    #[tokio::test]
    async fn test_write_replaces_existing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("chapter1.cmc");

        write_project(&path, "first version, longer").await.expect("write");
        write_project(&path, "second").await.expect("overwrite");

        assert_eq!(read_project(&path).await.expect("read"), "second");
    }

    #[tokio::test]
    async fn test_read_missing_file_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = read_project(&dir.path().join("missing.cmc")).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_dialog_options() {
        let save = save_dialog("Save Project");
        assert_eq!(save.default_path.as_deref(), Some(Path::new("Untitled.cmc")));
        assert!(save.filters[0].matches(Path::new("book.cmc")));
        assert!(open_dialog().default_path.is_none());
    }
}

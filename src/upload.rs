//! Upload validation and temp-file handling
//!
//! Uploaded images are persisted to the upload directory only for the
//! duration of one OCR call. `TempUpload` owns that file and removes it on
//! every exit path, including panics; a failed delete is swallowed so cleanup
//! can never mask the OCR outcome.

use std::path::{Path, PathBuf};

/// File extensions accepted for upload, matched case-insensitively on the
/// substring after the last `.`.
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "bmp"];

/// Check if a filename carries an allowed image extension.
pub fn allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map_or(false, |(_, ext)| {
            ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
        })
}

/// Reduce a client-supplied filename to something safe to join onto the
/// upload directory: directory components are dropped, whitespace becomes
/// `_`, and everything outside `[A-Za-z0-9._-]` is removed.
pub fn sanitize_filename(filename: &str) -> String {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);

    let cleaned: String = name
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}

/// A temporarily persisted upload, deleted when dropped.
pub struct TempUpload {
    path: PathBuf,
}

impl TempUpload {
    /// Write `bytes` under `dir` using an already-sanitized filename.
    pub async fn write(dir: &Path, filename: &str, bytes: &[u8]) -> std::io::Result<Self> {
        let path = dir.join(filename);
        tokio::fs::write(&path, bytes).await?;
        tracing::info!(path = %path.display(), size = bytes.len(), "upload saved");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        // Best effort: a cleanup failure must never surface to the caller.
        if let Err(err) = std::fs::remove_file(&self.path) {
            tracing::debug!(path = %self.path.display(), error = %err, "temp upload cleanup failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn extension_allow_list_is_case_insensitive() {
        assert!(allowed_file("note.png"));
        assert!(allowed_file("note.PNG"));
        assert!(allowed_file("archive.tar.JPEG"));
        assert!(allowed_file(".bmp"));

        assert!(!allowed_file("note.txt"));
        assert!(!allowed_file("note.png.exe"));
        assert!(!allowed_file("no-extension"));
        assert!(!allowed_file(""));
    }

    #[test]
    fn sanitize_strips_directory_components() {
        assert_eq!(sanitize_filename("../../etc/passwd.png"), "passwd.png");
        assert_eq!(sanitize_filename("C:\\temp\\shot.jpg"), "shot.jpg");
        assert_eq!(sanitize_filename("plain.gif"), "plain.gif");
    }

    #[test]
    fn sanitize_normalizes_unsafe_characters() {
        assert_eq!(sanitize_filename("my scan (1).png"), "my_scan_1.png");
        assert_eq!(sanitize_filename("..hidden.png"), "hidden.png");
        // Non-ASCII is dropped entirely; leading dots of what remains go too.
        assert_eq!(sanitize_filename("écran.png"), "cran.png");
    }

    #[test]
    fn sanitize_falls_back_when_nothing_survives() {
        assert_eq!(sanitize_filename("©®™"), "upload");
        assert_eq!(sanitize_filename("..."), "upload");
        assert_eq!(sanitize_filename(""), "upload");
    }

    #[tokio::test]
    async fn temp_upload_is_removed_on_drop() {
        let dir = TempDir::new().unwrap();
        let upload = TempUpload::write(dir.path(), "scan.png", b"png bytes")
            .await
            .unwrap();

        let path = upload.path().to_path_buf();
        assert_eq!(std::fs::read(&path).unwrap(), b"png bytes");

        drop(upload);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn cleanup_failure_is_swallowed() {
        let dir = TempDir::new().unwrap();
        let upload = TempUpload::write(dir.path(), "scan.png", b"x").await.unwrap();

        // Remove the file out from under the guard; dropping it must not panic.
        std::fs::remove_file(upload.path()).unwrap();
        drop(upload);
    }

    #[tokio::test]
    async fn write_fails_when_upload_dir_is_missing() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(TempUpload::write(&missing, "scan.png", b"x").await.is_err());
    }
}

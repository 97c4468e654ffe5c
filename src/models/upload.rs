//! File upload models

use std::path::{Path, PathBuf};

/// Recipient and local file for a direct-message upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUploadTarget {
    pub recipient_id: String,
    pub file_path: PathBuf,
}

impl FileUploadTarget {
    pub fn new(recipient_id: &str, file_path: impl AsRef<Path>) -> Self {
        Self {
            recipient_id: recipient_id.to_string(),
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    /// Name sent in the multipart part, the path's final component.
    pub fn file_name(&self) -> String {
        self.file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_from_path() {
        let target = FileUploadTarget::new("42", "/tmp/some/report.txt");
        assert_eq!(target.file_name(), "report.txt");
    }

    #[test]
    fn test_file_name_fallback() {
        let target = FileUploadTarget::new("42", "/");
        assert_eq!(target.file_name(), "file");
    }
}

//! Resume file validation performed before an upload is attempted.

use std::fs;
use std::path::Path;

use crate::errors::AppError;

const MAX_RESUME_BYTES: u64 = 5 * 1024 * 1024;

/// Checks that the path points at a plausible resume PDF: it exists, looks
/// like a PDF (extension or `%PDF` magic), and is at most 5 MB. All
/// violations are reported together in one validation error.
pub fn validate_resume_file(path: &Path) -> Result<(), AppError> {
    let mut problems = Vec::new();

    let metadata = match fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => Some(metadata),
        Ok(_) => {
            problems.push(format!("'{}' is not a file", path.display()));
            None
        }
        Err(_) => {
            problems.push(format!("file '{}' does not exist", path.display()));
            None
        }
    };

    if let Some(metadata) = &metadata {
        if !looks_like_pdf(path) {
            problems.push("resume must be a PDF file".to_string());
        }
        if metadata.len() > MAX_RESUME_BYTES {
            problems.push("resume is larger than 5 MB".to_string());
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(problems.join("; ")))
    }
}

fn looks_like_pdf(path: &Path) -> bool {
    let by_extension = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    if by_extension {
        return true;
    }
    // Extension lies or is missing — check the magic bytes.
    fs::read(path)
        .map(|bytes| bytes.starts_with(b"%PDF"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = validate_resume_file(&dir.path().join("ghost.pdf")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_pdf_extension_passes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.pdf");
        fs::write(&path, b"%PDF-1.7 content").unwrap();
        assert!(validate_resume_file(&path).is_ok());
    }

    #[test]
    fn test_magic_bytes_accepted_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume");
        fs::write(&path, b"%PDF-1.4 content").unwrap();
        assert!(validate_resume_file(&path).is_ok());
    }

    #[test]
    fn test_non_pdf_content_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.txt");
        fs::write(&path, b"plain text").unwrap();
        let err = validate_resume_file(&path).unwrap_err();
        assert!(err.to_string().contains("PDF"));
    }

    #[test]
    fn test_oversized_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.pdf");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(b"%PDF-").unwrap();
        file.set_len(MAX_RESUME_BYTES + 1).unwrap();
        drop(file);
        let err = validate_resume_file(&path).unwrap_err();
        assert!(err.to_string().contains("5 MB"));
    }
}

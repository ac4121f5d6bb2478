//! Error types for the docxtract library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for docxtract operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while extracting from a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input path does not exist.
    #[error("Input file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The input is not a readable ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// The package is a valid archive but does not hold a Word document.
    #[error("Not a Word document: {0}")]
    NotWordDocument(String),

    /// A required package part is missing.
    #[error("Missing component: {0}")]
    MissingComponent(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::FileNotFound(PathBuf::from("backend/public/NotePBL.docx"));
        assert_eq!(
            err.to_string(),
            "Input file not found: backend/public/NotePBL.docx"
        );

        let err = Error::MissingComponent("word/document.xml".to_string());
        assert_eq!(err.to_string(), "Missing component: word/document.xml");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_from_zip() {
        let err: Error = zip::result::ZipError::FileNotFound.into();
        assert!(matches!(err, Error::ZipArchive(_)));
    }
}

//! Error types for the dormroster library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for dormroster operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting a workbook.
///
/// Every variant here is fatal to the run: a row that merely fails the
/// business rules is skipped by the normalizer, not surfaced as an error.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The workbook path does not exist or is not readable.
    #[error("Workbook not found: {0}")]
    WorkbookNotFound(PathBuf),

    /// The container is not a valid ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// A required workbook part is missing from the archive.
    #[error("Missing workbook part: {0}")]
    MissingPart(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// Invalid or malformed data inside an otherwise well-formed part.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A cell referenced a shared-string index past the end of the table.
    #[error("Shared string index {index} out of range (table has {len} entries)")]
    SharedStringIndex { index: usize, len: usize },

    /// Error during text encoding conversion.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Error serializing the output document.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
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
        let err = Error::MissingPart("xl/worksheets/sheet2.xml".to_string());
        assert_eq!(
            err.to_string(),
            "Missing workbook part: xl/worksheets/sheet2.xml"
        );

        let err = Error::SharedStringIndex { index: 7, len: 3 };
        assert_eq!(
            err.to_string(),
            "Shared string index 7 out of range (table has 3 entries)"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}

//! ZIP container abstraction for the workbook.

use crate::error::{Error, Result};
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

/// Workbook container over a ZIP archive.
///
/// Yields named internal parts as raw bytes or decoded XML text. The whole
/// archive is held in memory for the duration of a run; parts are read on
/// demand and never written back.
pub struct WorkbookContainer {
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
}

impl WorkbookContainer {
    /// Open a workbook container from a file path.
    ///
    /// Fails with [`Error::WorkbookNotFound`] when the path does not exist
    /// and [`Error::ZipArchive`] when the file is not a valid archive.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::WorkbookNotFound(path.to_path_buf()));
        }
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Create a workbook container from a byte vector.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let cursor = Cursor::new(data);
        let archive = zip::ZipArchive::new(cursor)?;
        Ok(Self {
            archive: RefCell::new(archive),
        })
    }

    /// Create a workbook container from a reader.
    pub fn from_reader<R: Read + Seek>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Read a named part from the archive as raw bytes.
    ///
    /// Fails with [`Error::MissingPart`] when the part is absent.
    pub fn read_part(&self, name: &str) -> Result<Vec<u8>> {
        let mut archive = self.archive.borrow_mut();
        let mut file = archive
            .by_name(name)
            .map_err(|_| Error::MissingPart(name.to_string()))?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        Ok(data)
    }

    /// Read a named XML part as a string.
    ///
    /// Tolerates a UTF-8 byte order mark; anything that is not valid UTF-8
    /// beyond that is rejected rather than decoded lossily, since a corrupt
    /// part must abort the run.
    pub fn read_xml(&self, name: &str) -> Result<String> {
        let bytes = self.read_part(name)?;
        decode_xml_bytes(&bytes)
    }

    /// Check if a named part exists in the archive.
    pub fn exists(&self, name: &str) -> bool {
        let archive = self.archive.borrow();
        let found = archive.file_names().any(|n| n == name);
        found
    }

    /// List all part names in the archive.
    pub fn list_parts(&self) -> Vec<String> {
        let archive = self.archive.borrow();
        archive.file_names().map(String::from).collect()
    }
}

impl std::fmt::Debug for WorkbookContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkbookContainer")
            .field("parts", &self.list_parts().len())
            .finish()
    }
}

/// Decode part bytes as UTF-8, stripping a leading BOM when present.
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    let body = match bytes {
        [0xEF, 0xBB, 0xBF, rest @ ..] => rest,
        _ => bytes,
    };
    String::from_utf8(body.to_vec()).map_err(|e| Error::Encoding(e.to_string()))
}

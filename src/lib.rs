//! # dormroster
//!
//! Converts a hostel occupancy workbook (a two-sheet `.xlsx` export) into a
//! normalized, deterministically sorted JSON array of student records.
//!
//! The workbook is decoded directly: named parts are pulled out of the ZIP
//! container, the shared-string table resolved, sparse worksheet rows
//! densified and projected against each sheet's header row, and the business
//! rules (check-in filter, room and block normalization, residency status,
//! stable ids) applied to produce the final record set.
//!
//! ## Quick Start
//!
//! ```no_run
//! use dormroster::{convert_workbook, records_to_json};
//!
//! let records = convert_workbook("studentdata.xlsx")?;
//! std::fs::write("students.json", records_to_json(&records)?)?;
//! println!("{} records", records.len());
//! # Ok::<(), dormroster::Error>(())
//! ```
//!
//! ## Lower-level API
//!
//! ```no_run
//! use dormroster::{Pipeline, WorkbookContainer};
//!
//! let container = WorkbookContainer::open("studentdata.xlsx")?;
//! let records = Pipeline::default().convert(&container)?;
//! # Ok::<(), dormroster::Error>(())
//! ```

pub mod container;
pub mod error;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod xlsx;

// Re-exports
pub use container::WorkbookContainer;
pub use error::{Error, Result};
pub use model::{FieldRecord, StudentRecord, GENDER_FIELD};
pub use normalize::{NormalizeRules, RecordNormalizer};
pub use pipeline::{records_to_json, Pipeline, SHARED_STRINGS_PART, SHEET_PARTS};

use std::path::Path;

/// Convert a workbook file into the sorted student record set.
///
/// Opens the container at `path` and runs the full pipeline with the
/// default rule set.
pub fn convert_workbook(path: impl AsRef<Path>) -> Result<Vec<StudentRecord>> {
    let container = WorkbookContainer::open(path)?;
    Pipeline::default().convert(&container)
}

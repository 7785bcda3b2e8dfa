//! Worksheet decoding for the occupancy workbook.
//!
//! A worksheet part is walked cell by cell, each cell resolved through the
//! shared-string table when indirected, sparse rows densified and then
//! projected against the sheet's header row into field records.

mod parser;
mod project;
mod shared_strings;

pub use parser::{column_index, SheetParser};
pub use project::RowProjector;
pub use shared_strings::SharedStrings;

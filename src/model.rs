//! Data model for decoded rows and the output record set.

use serde::Serialize;
use std::collections::HashMap;

/// Field key that carries the sheet-level gender tag injected by the parser.
pub const GENDER_FIELD: &str = "GENDER";

/// One data row of a sheet, keyed by header label.
///
/// Only columns whose header label is non-empty are present. Transient:
/// produced while parsing a sheet and consumed by the normalizer.
pub type FieldRecord = HashMap<String, String>;

/// A normalized student occupancy record.
///
/// Immutable once produced. `block` is always one of the configured block
/// codes, `room_number` is in normalized `BLOCK-…` form, and `id` is a
/// deterministic function of `(student_id, room_number)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: String,
    pub student_id: String,
    pub name: String,
    pub programme: String,
    pub room_number: String,
    pub gender: String,
    pub status: String,
    pub block: String,
}

impl StudentRecord {
    /// Composite sort key producing the deterministic output order.
    pub fn sort_key(&self) -> (&str, &str, &str) {
        (&self.block, &self.room_number, &self.name)
    }
}

//! The two-sheet conversion pipeline.

use crate::container::WorkbookContainer;
use crate::error::Result;
use crate::model::StudentRecord;
use crate::normalize::{NormalizeRules, RecordNormalizer};
use crate::xlsx::{SharedStrings, SheetParser};

/// Part name of the optional shared-string table.
pub const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

/// The two worksheet parts with their gender tags, in processing order.
/// Sheet layout is fixed; there is no dynamic sheet discovery.
pub const SHEET_PARTS: [(&str, &str); 2] = [
    ("xl/worksheets/sheet1.xml", "Male"),
    ("xl/worksheets/sheet2.xml", "Female"),
];

/// Drives both worksheets through parsing and normalization and produces
/// the deterministically sorted record set.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    normalizer: RecordNormalizer,
}

impl Pipeline {
    /// Create a pipeline applying the given normalization rules.
    pub fn new(rules: NormalizeRules) -> Self {
        Self {
            normalizer: RecordNormalizer::new(rules),
        }
    }

    /// Convert an opened workbook into the sorted student record set.
    ///
    /// Both sheets must decode cleanly or the whole run fails; individual
    /// rows rejected by the normalizer are silently skipped. The result is
    /// sorted ascending by `(block, roomNumber, name)`, so output order is
    /// independent of processing order. Rows producing the same id are both
    /// retained.
    pub fn convert(&self, container: &WorkbookContainer) -> Result<Vec<StudentRecord>> {
        let shared_strings = if container.exists(SHARED_STRINGS_PART) {
            SharedStrings::parse(&container.read_xml(SHARED_STRINGS_PART)?)?
        } else {
            SharedStrings::default()
        };
        let parser = SheetParser::new(&shared_strings);

        let mut records = Vec::new();
        for (part, gender) in SHEET_PARTS {
            let xml = container.read_xml(part)?;
            for row in parser.parse(&xml, gender)? {
                if let Some(record) = self.normalizer.normalize(&row) {
                    records.push(record);
                }
            }
        }

        records.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        Ok(records)
    }
}

/// Render the record set as the pretty-printed output document.
pub fn records_to_json(records: &[StudentRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

//! Worksheet decoding into header-mapped field records.

use crate::error::{Error, Result};
use crate::model::FieldRecord;
use std::collections::HashMap;

use super::project::RowProjector;
use super::shared_strings::SharedStrings;

/// Decode the column letters of a cell reference to a zero-based index.
///
/// Non-alphabetic characters (the row digits) are skipped, so the full
/// reference can be passed as-is. Returns `None` when the reference carries
/// no letters at all; such cells are ignored by the parser.
pub fn column_index(reference: &str) -> Option<usize> {
    let mut index: usize = 0;
    let mut seen_letter = false;
    for ch in reference.chars() {
        if !ch.is_ascii_alphabetic() {
            continue;
        }
        seen_letter = true;
        index = index * 26 + (ch.to_ascii_uppercase() as usize - 'A' as usize + 1);
    }
    seen_letter.then(|| index - 1)
}

/// Parser for one worksheet part.
///
/// Walks the part's `<row>`/`<c>` markup in document order, resolves each
/// cell through the shared-string table when indirected, densifies the
/// sparse cells into contiguous rows and projects them against the sheet's
/// header row. Rows with no cells are skipped entirely and do not count as
/// the header.
pub struct SheetParser<'a> {
    shared_strings: &'a SharedStrings,
}

impl<'a> SheetParser<'a> {
    /// Create a parser resolving shared-string cells through the given table.
    pub fn new(shared_strings: &'a SharedStrings) -> Self {
        Self { shared_strings }
    }

    /// Parse a worksheet part into field records tagged with `gender`.
    pub fn parse(&self, xml: &str, gender: &str) -> Result<Vec<FieldRecord>> {
        let mut records = Vec::new();
        let mut projector = RowProjector::new(gender);

        let mut reader = quick_xml::Reader::from_str(xml);
        let mut buf = Vec::new();

        let mut in_cell = false;
        let mut in_text = false;
        let mut cells: HashMap<usize, String> = HashMap::new();
        let mut cell_column: Option<usize> = None;
        let mut cell_type: Option<String> = None;
        let mut cell_value = String::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(quick_xml::events::Event::Start(ref e)) => match e.name().as_ref() {
                    b"row" => {
                        cells.clear();
                    }
                    b"c" => {
                        in_cell = true;
                        cell_column = None;
                        cell_type = None;
                        cell_value.clear();

                        for attr in e.attributes().flatten() {
                            match attr.key.as_ref() {
                                b"r" => {
                                    let reference = String::from_utf8_lossy(&attr.value);
                                    cell_column = column_index(&reference);
                                }
                                b"t" => {
                                    cell_type =
                                        Some(String::from_utf8_lossy(&attr.value).to_string());
                                }
                                _ => {}
                            }
                        }
                    }
                    // <v> holds literal and shared-string values, <t> the
                    // runs of an inline string.
                    b"v" | b"t" if in_cell => {
                        in_text = true;
                    }
                    _ => {}
                },
                Ok(quick_xml::events::Event::Empty(ref e)) if e.name().as_ref() == b"c" => {
                    // A self-closing cell has no value; an addressed one
                    // still claims its column as empty text.
                    let mut column = None;
                    for attr in e.attributes().flatten() {
                        if attr.key.as_ref() == b"r" {
                            let reference = String::from_utf8_lossy(&attr.value);
                            column = column_index(&reference);
                        }
                    }
                    if let Some(column) = column {
                        cells.insert(column, String::new());
                    }
                }
                Ok(quick_xml::events::Event::Text(ref e)) => {
                    if in_text {
                        let text = e.unescape().unwrap_or_default();
                        cell_value.push_str(&text);
                    }
                }
                Ok(quick_xml::events::Event::End(ref e)) => match e.name().as_ref() {
                    b"row" => {
                        if !cells.is_empty() {
                            let dense = densify(&mut cells);
                            if let Some(record) = projector.push_row(dense) {
                                records.push(record);
                            }
                        }
                    }
                    b"c" => {
                        // Cells whose reference carries no column letters
                        // have no place in the row and are dropped unread.
                        if let Some(column) = cell_column {
                            let value =
                                self.resolve_cell_value(&cell_value, cell_type.as_deref())?;
                            cells.insert(column, value);
                        }
                        in_cell = false;
                    }
                    b"v" | b"t" => {
                        in_text = false;
                    }
                    _ => {}
                },
                Ok(quick_xml::events::Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(records)
    }

    /// Resolve a cell's raw value text according to its type discriminator.
    ///
    /// Numeric and date cells pass through as their literal string form with
    /// no reformatting.
    fn resolve_cell_value(&self, value: &str, cell_type: Option<&str>) -> Result<String> {
        match cell_type {
            Some("s") => {
                if value.is_empty() {
                    return Ok(String::new());
                }
                let index = value.parse::<usize>().map_err(|_| {
                    Error::InvalidData(format!("shared string index is not a number: {value:?}"))
                })?;
                Ok(self.shared_strings.resolve(index)?.to_string())
            }
            _ => Ok(value.to_string()),
        }
    }
}

/// Expand sparse cells into a contiguous row `[0 ..= max_present_index]`,
/// filling gaps with empty strings. Drains the map for reuse.
fn densify(cells: &mut HashMap<usize, String>) -> Vec<String> {
    let max_index = cells.keys().copied().max().unwrap_or(0);
    (0..=max_index)
        .map(|i| cells.remove(&i).unwrap_or_default())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GENDER_FIELD;

    #[test]
    fn test_column_index() {
        assert_eq!(column_index("A"), Some(0));
        assert_eq!(column_index("Z"), Some(25));
        assert_eq!(column_index("AA"), Some(26));
        assert_eq!(column_index("AB"), Some(27));
        assert_eq!(column_index("C7"), Some(2));
        assert_eq!(column_index("aa3"), Some(26));
        assert_eq!(column_index("42"), None);
        assert_eq!(column_index(""), None);
    }

    #[test]
    fn test_parse_inline_and_literal_cells() {
        let xml = r#"<worksheet><sheetData>
            <row r="1">
                <c r="A1" t="inlineStr"><is><t>STUDENT ID</t></is></c>
                <c r="B1" t="inlineStr"><is><t>ROOM NO</t></is></c>
            </row>
            <row r="2">
                <c r="A2"><v>1001</v></c>
                <c r="B2" t="inlineStr"><is><t>HA/1/2</t></is></c>
            </row>
        </sheetData></worksheet>"#;

        let shared = SharedStrings::default();
        let records = SheetParser::new(&shared).parse(xml, "Male").unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("STUDENT ID").unwrap(), "1001");
        assert_eq!(records[0].get("ROOM NO").unwrap(), "HA/1/2");
        assert_eq!(records[0].get(GENDER_FIELD).unwrap(), "Male");
    }

    #[test]
    fn test_shared_string_cells_resolved() {
        let sst = r#"<sst><si><t>NAME</t></si><si><t>Alice</t></si></sst>"#;
        let shared = SharedStrings::parse(sst).unwrap();

        let xml = r#"<worksheet><sheetData>
            <row r="1"><c r="A1" t="s"><v>0</v></c></row>
            <row r="2"><c r="A2" t="s"><v>1</v></c></row>
        </sheetData></worksheet>"#;

        let records = SheetParser::new(&shared).parse(xml, "Female").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("NAME").unwrap(), "Alice");
    }

    #[test]
    fn test_out_of_range_shared_index_fails() {
        let shared = SharedStrings::parse("<sst><si><t>x</t></si></sst>").unwrap();
        let xml = r#"<worksheet><sheetData>
            <row r="1"><c r="A1" t="s"><v>5</v></c></row>
        </sheetData></worksheet>"#;

        let err = SheetParser::new(&shared).parse(xml, "Male").unwrap_err();
        assert!(matches!(err, Error::SharedStringIndex { index: 5, .. }));
    }

    #[test]
    fn test_sparse_row_densified_with_gaps() {
        let xml = r#"<worksheet><sheetData>
            <row r="1">
                <c r="A1" t="inlineStr"><is><t>A</t></is></c>
                <c r="B1" t="inlineStr"><is><t>B</t></is></c>
                <c r="C1" t="inlineStr"><is><t>C</t></is></c>
            </row>
            <row r="2">
                <c r="C2"><v>only-c</v></c>
            </row>
        </sheetData></worksheet>"#;

        let shared = SharedStrings::default();
        let records = SheetParser::new(&shared).parse(xml, "Male").unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("A").unwrap(), "");
        assert_eq!(records[0].get("B").unwrap(), "");
        assert_eq!(records[0].get("C").unwrap(), "only-c");
    }

    #[test]
    fn test_cell_free_rows_do_not_consume_the_header() {
        let xml = r#"<worksheet><sheetData>
            <row r="1"/>
            <row r="2"><c r="A2" t="inlineStr"><is><t>HEADER</t></is></c></row>
            <row r="3"><c r="A3"><v>data</v></c></row>
        </sheetData></worksheet>"#;

        let shared = SharedStrings::default();
        let records = SheetParser::new(&shared).parse(xml, "Male").unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("HEADER").unwrap(), "data");
    }

    #[test]
    fn test_self_closing_cell_counts_as_empty() {
        let xml = r#"<worksheet><sheetData>
            <row r="1">
                <c r="A1" t="inlineStr"><is><t>A</t></is></c>
                <c r="B1" t="inlineStr"><is><t>B</t></is></c>
            </row>
            <row r="2">
                <c r="A2"/>
                <c r="B2"><v>kept</v></c>
            </row>
        </sheetData></worksheet>"#;

        let shared = SharedStrings::default();
        let records = SheetParser::new(&shared).parse(xml, "Male").unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("A").unwrap(), "");
        assert_eq!(records[0].get("B").unwrap(), "kept");
    }

    #[test]
    fn test_bad_shared_index_text_is_invalid_data() {
        let shared = SharedStrings::default();
        let xml = r#"<worksheet><sheetData>
            <row r="1"><c r="A1" t="s"><v>not-a-number</v></c></row>
        </sheetData></worksheet>"#;

        let err = SheetParser::new(&shared).parse(xml, "Male").unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_malformed_markup_is_fatal() {
        let shared = SharedStrings::default();
        let xml = "<worksheet><sheetData><row></sheetData></worksheet>";

        let err = SheetParser::new(&shared).parse(xml, "Male").unwrap_err();
        assert!(matches!(err, Error::XmlParse(_)));
    }
}

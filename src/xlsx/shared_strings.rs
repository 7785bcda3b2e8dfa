//! Shared string table decoding.

use crate::error::{Error, Result};

/// Ordered shared-string table resolved from `xl/sharedStrings.xml`.
///
/// Cells typed as shared strings carry an integer index into this table.
/// A workbook without the part simply has an empty table; an index past the
/// end of the table is data corruption and fails the whole run.
#[derive(Debug, Clone, Default)]
pub struct SharedStrings {
    strings: Vec<String>,
}

impl SharedStrings {
    /// Parse the shared string table from XML content.
    ///
    /// Each `<si>` entry becomes one table slot; a rich-text entry split
    /// across several `<t>` runs is concatenated in document order.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut strings = Vec::new();
        let mut reader = quick_xml::Reader::from_str(xml);

        let mut buf = Vec::new();
        let mut in_si = false;
        let mut in_t = false;
        let mut current_text = String::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(quick_xml::events::Event::Start(e)) => match e.name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current_text.clear();
                    }
                    b"t" if in_si => {
                        in_t = true;
                    }
                    _ => {}
                },
                Ok(quick_xml::events::Event::Text(e)) => {
                    if in_t {
                        let text = e.unescape().unwrap_or_default();
                        current_text.push_str(&text);
                    }
                }
                Ok(quick_xml::events::Event::End(e)) => match e.name().as_ref() {
                    b"si" => {
                        strings.push(current_text.clone());
                        in_si = false;
                    }
                    b"t" => {
                        in_t = false;
                    }
                    _ => {}
                },
                Ok(quick_xml::events::Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(Self { strings })
    }

    /// Resolve an index to its string, failing on an out-of-range index.
    pub fn resolve(&self, index: usize) -> Result<&str> {
        self.strings
            .get(index)
            .map(|s| s.as_str())
            .ok_or(Error::SharedStringIndex {
                index,
                len: self.strings.len(),
            })
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

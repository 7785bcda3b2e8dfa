//! Header/data projection of densified rows.

use crate::model::{FieldRecord, GENDER_FIELD};

/// Projection state for one sheet.
#[derive(Debug, Clone)]
enum State {
    /// No non-empty row seen yet; the next one becomes the header.
    AwaitingHeader,
    /// Header captured; every further row is projected against it.
    EmittingRecords { headers: Vec<String> },
}

/// Projects densified rows into [`FieldRecord`]s.
///
/// The first row pushed becomes the header and is consumed, not emitted.
/// Every later row is zipped positionally against the header labels; columns
/// with an empty header label are dropped, and when two positions share a
/// label the later one wins. One projector serves exactly one sheet — the
/// header of one sheet never applies to another.
#[derive(Debug, Clone)]
pub struct RowProjector {
    state: State,
    gender: String,
}

impl RowProjector {
    /// Create a projector that tags every record with the given gender.
    pub fn new(gender: impl Into<String>) -> Self {
        Self {
            state: State::AwaitingHeader,
            gender: gender.into(),
        }
    }

    /// Whether the header row has been consumed yet.
    pub fn header_consumed(&self) -> bool {
        matches!(self.state, State::EmittingRecords { .. })
    }

    /// The captured header labels, once the header has been consumed.
    pub fn headers(&self) -> Option<&[String]> {
        match &self.state {
            State::AwaitingHeader => None,
            State::EmittingRecords { headers } => Some(headers),
        }
    }

    /// Push one densified row; returns a record for every row after the header.
    pub fn push_row(&mut self, row: Vec<String>) -> Option<FieldRecord> {
        match &self.state {
            State::AwaitingHeader => {
                self.state = State::EmittingRecords { headers: row };
                None
            }
            State::EmittingRecords { headers } => {
                let mut record = FieldRecord::new();
                for (label, value) in headers.iter().zip(row) {
                    if !label.is_empty() {
                        record.insert(label.clone(), value);
                    }
                }
                record.insert(GENDER_FIELD.to_string(), self.gender.clone());
                Some(record)
            }
        }
    }
}

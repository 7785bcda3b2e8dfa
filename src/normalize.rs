//! Business-rule normalization of field records into student records.

use crate::model::{FieldRecord, StudentRecord, GENDER_FIELD};
use sha1::{Digest as _, Sha1};

/// Header label of the occupancy status column.
pub const ROOM_STATUS_FIELD: &str = "ROOM STATUS";
/// Header label of the student id column.
pub const STUDENT_ID_FIELD: &str = "STUDENT ID";
/// Header label of the resident name column.
pub const NAME_FIELD: &str = "STUDENT / RESIDENT / RESERVED";
/// Header label of the room code column.
pub const ROOM_NO_FIELD: &str = "ROOM NO";
/// Header label of the programme column.
pub const PROG_FIELD: &str = "PROG";
/// Header label of the nationality column.
pub const NATIONALITY_FIELD: &str = "NAT.";

/// Configurable rule set applied by the normalizer.
#[derive(Debug, Clone)]
pub struct NormalizeRules {
    /// Two-letter block codes accepted as valid housing blocks.
    pub valid_blocks: Vec<String>,
    /// Gender recorded when a record carries no gender tag at all.
    pub default_gender: String,
}

impl Default for NormalizeRules {
    fn default() -> Self {
        Self {
            valid_blocks: ["HA", "HB", "HC", "HD", "HE", "HF", "HG", "HH"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            default_gender: "Male".to_string(),
        }
    }
}

/// Applies filtering, validation and field normalization to field records.
///
/// Rejection is silent: a record that fails the status filter, lacks a
/// required field or sits in an unknown block is simply excluded from the
/// output, never surfaced as an error.
#[derive(Debug, Clone, Default)]
pub struct RecordNormalizer {
    rules: NormalizeRules,
}

impl RecordNormalizer {
    /// Create a normalizer with the given rule set.
    pub fn new(rules: NormalizeRules) -> Self {
        Self { rules }
    }

    /// Normalize one field record, or reject it.
    pub fn normalize(&self, record: &FieldRecord) -> Option<StudentRecord> {
        let field = |name: &str| record.get(name).map(String::as_str).unwrap_or("");

        let status = field(ROOM_STATUS_FIELD).trim().to_uppercase();
        if status != "CHECKED IN" {
            return None;
        }

        let student_id = field(STUDENT_ID_FIELD).trim();
        let name = field(NAME_FIELD).trim();
        let room_raw = field(ROOM_NO_FIELD).trim();
        if student_id.is_empty() || name.is_empty() || room_raw.is_empty() {
            return None;
        }

        let room_number = normalize_room(room_raw);
        let block = extract_block(room_raw);
        if !self.rules.valid_blocks.iter().any(|b| *b == block) {
            return None;
        }

        let programme = match field(PROG_FIELD).trim() {
            "" => "Unknown".to_string(),
            prog => prog.to_string(),
        };

        let gender = record
            .get(GENDER_FIELD)
            .cloned()
            .unwrap_or_else(|| self.rules.default_gender.clone());

        Some(StudentRecord {
            id: record_id(student_id, &room_number),
            student_id: student_id.to_string(),
            name: name.to_string(),
            programme,
            room_number,
            gender,
            status: residency_status(field(NATIONALITY_FIELD)),
            block,
        })
    }
}

/// Normalize a raw room code into uppercase, hyphen-joined form.
///
/// `"ha/12/3"` becomes `"HA-12-3"`; a code with no usable separator tokens
/// is kept as the cleaned text itself.
pub fn normalize_room(room: &str) -> String {
    let clean = room.trim().to_uppercase();
    if clean.is_empty() {
        return clean;
    }
    let replaced = clean.replace('\\', "/");
    let tokens: Vec<&str> = replaced
        .split('/')
        .filter(|token| !token.is_empty() && *token != "-")
        .collect();
    if tokens.is_empty() {
        return clean;
    }
    tokens.join("-")
}

/// First two characters of the trimmed, uppercased raw room text.
///
/// Deliberately reads the raw text rather than the normalized room, matching
/// the upstream registry's behavior even where the two could diverge.
pub fn extract_block(room: &str) -> String {
    room.trim().to_uppercase().chars().take(2).collect()
}

/// Derive residency status from the free-text nationality field.
///
/// Any occurrence of the substring `malay`, or an entirely empty field,
/// counts as local; everything else is international.
pub fn residency_status(nationality: &str) -> String {
    let normalized = nationality.trim().to_lowercase();
    if normalized.is_empty() || normalized.contains("malay") {
        "Local".to_string()
    } else {
        "International".to_string()
    }
}

/// Stable record id: first 20 hex characters of the SHA-1 of
/// `"{student_id}|{room_number}"`.
///
/// Purely a compact deterministic key, not a security measure.
pub fn record_id(student_id: &str, room_number: &str) -> String {
    let key = format!("{}|{}", student_id.trim(), room_number);
    let digest = Sha1::digest(key.as_bytes());
    let mut id = hex::encode(digest);
    id.truncate(20);
    id
}

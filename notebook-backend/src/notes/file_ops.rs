//! Note file naming
//!
//! A note's file name is its creation time, `YYYY_MM_DD__HH___MM___SS.txt`.
//! Notes created in the same second get a `_NNN` sequence suffix so that
//! none is overwritten; names still sort chronologically.

use chrono::{NaiveDateTime, Timelike};

pub const NOTE_EXTENSION: &str = ".txt";

const TIMESTAMP_FORMAT: &str = "%Y_%m_%d__%H___%M___%S";
const TIMESTAMP_LEN: usize = 24;
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Largest sequence number that still sorts correctly with 3-digit padding
pub const MAX_SEQ: u32 = 999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoteId {
    pub created: NaiveDateTime,
    pub seq: u32,
}

impl NoteId {
    /// First id for a creation time (sub-second precision is dropped)
    pub fn new(created: NaiveDateTime) -> Self {
        let created = created.with_nanosecond(0).unwrap_or(created);
        Self { created, seq: 0 }
    }

    /// The id to try when this one is already taken
    pub fn next(self) -> Option<Self> {
        if self.seq >= MAX_SEQ {
            return None;
        }
        Some(Self {
            created: self.created,
            seq: self.seq + 1,
        })
    }

    pub fn file_name(&self) -> String {
        let stamp = self.created.format(TIMESTAMP_FORMAT);
        if self.seq == 0 {
            format!("{}{}", stamp, NOTE_EXTENSION)
        } else {
            format!("{}_{:03}{}", stamp, self.seq, NOTE_EXTENSION)
        }
    }

    /// Parse a file name produced by [`NoteId::file_name`]
    pub fn parse(file_name: &str) -> Option<Self> {
        let stem = file_name.strip_suffix(NOTE_EXTENSION)?;
        if stem.len() < TIMESTAMP_LEN || !stem.is_char_boundary(TIMESTAMP_LEN) {
            return None;
        }
        let (stamp, rest) = stem.split_at(TIMESTAMP_LEN);

        let created = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()?;
        // Reject loose forms chrono accepts (e.g. unpadded fields)
        if created.format(TIMESTAMP_FORMAT).to_string() != stamp {
            return None;
        }

        let seq = if rest.is_empty() {
            0
        } else {
            let digits = rest.strip_prefix('_')?;
            if digits.len() != 3 || !digits.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            let seq: u32 = digits.parse().ok()?;
            if seq == 0 {
                return None;
            }
            seq
        };

        Some(Self { created, seq })
    }

    pub fn display_date(&self) -> String {
        self.created.format(DISPLAY_FORMAT).to_string()
    }
}

/// Human-readable date for a stored file name.
///
/// Names that are not note ids fall back to plain separator substitution.
pub fn display_date(file_name: &str) -> String {
    match NoteId::parse(file_name) {
        Some(id) => id.display_date(),
        None => file_name
            .replace("___", ":")
            .replace("__", " ")
            .replace('_', "-")
            .replace(NOTE_EXTENSION, ""),
    }
}

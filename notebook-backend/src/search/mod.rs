//! Substring search over every stored note.
//!
//! Each search rescans all notes and replaces the result set with the matches.

pub mod results;

pub use results::{ResultEntry, ResultSet};

use std::sync::Arc;

use crate::error::Result;
use crate::notes::NoteStore;

/// How a note's content is compared against the (always lowercased) query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Content is compared as stored, so only lowercase text can match
    #[default]
    Observed,
    /// Content is lowercased too
    CaseInsensitive,
}

impl MatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::Observed => "observed",
            MatchMode::CaseInsensitive => "case_insensitive",
        }
    }

    /// `query` must already be lowercased
    pub fn matches(&self, query: &str, content: &str) -> bool {
        match self {
            MatchMode::Observed => content.contains(query),
            MatchMode::CaseInsensitive => content.to_lowercase().contains(query),
        }
    }
}

pub struct SearchEngine {
    notes: Arc<NoteStore>,
    results: Arc<ResultSet>,
    mode: MatchMode,
}

impl SearchEngine {
    pub fn new(notes: Arc<NoteStore>, results: Arc<ResultSet>, mode: MatchMode) -> Self {
        Self {
            notes,
            results,
            mode,
        }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Find every note containing `query` and make them the new result set.
    ///
    /// Returns the locations of the matched notes in the note store.
    pub fn search(&self, query: &str) -> Result<Vec<String>> {
        let query = query.to_lowercase();

        let mut matched = Vec::new();
        for name in self.notes.list()? {
            let raw = self.notes.read(&name)?;
            if self.mode.matches(&query, &String::from_utf8_lossy(&raw)) {
                matched.push((name, raw));
            }
        }

        self.results.replace(&matched)?;

        log::info!(
            "[SEARCH] {:?} matched {} note(s) ({})",
            query,
            matched.len(),
            self.mode.as_str()
        );

        let storage = self.notes.storage();
        Ok(matched
            .iter()
            .map(|(name, _)| storage.location(name))
            .collect())
    }
}

//! Core data models used throughout the snippet database.
//!
//! These types represent the rows that flow from the ingestion pipeline into
//! the index and back out through search.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::Serialize;

/// A snippet row as recorded in the index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnippetRecord {
    pub id: i64,
    pub language: String,
    pub title: String,
    pub description: String,
    pub file_path: String,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied by the ingestion service when appending a row.
#[derive(Debug, Clone)]
pub struct NewSnippet {
    pub language: String,
    pub title: String,
    pub description: String,
    pub file_path: String,
    pub created_at: DateTime<Utc>,
}

/// A search hit: what a front-end needs to list and open a snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnippetSummary {
    pub title: String,
    pub description: String,
    pub file_path: String,
}

impl SnippetSummary {
    /// `title - description`, or just the title when there is no description.
    pub fn display_name(&self) -> String {
        if self.description.is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", self.title, self.description)
        }
    }
}

impl NewSnippet {
    pub fn into_record(self, id: i64) -> SnippetRecord {
        SnippetRecord {
            id,
            language: self.language,
            title: self.title,
            description: self.description,
            file_path: self.file_path,
            created_at: self.created_at,
        }
    }
}

/// ISO-8601 UTC form stored in the `created_at` column.
pub fn format_ts_iso(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored `created_at`.
///
/// Accepts RFC 3339 and the offset-less ISO-8601 form (taken as UTC) that
/// older databases contain.
pub fn parse_ts_iso(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

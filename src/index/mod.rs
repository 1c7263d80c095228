//! Snippet metadata catalog.
//!
//! The [`SnippetIndex`] trait is the durable mapping from
//! `(language, title)` to snippet metadata. Rows are append-only: the core
//! inserts and queries, it never updates or deletes.
//!
//! | Implementation | Backing |
//! |----------------|---------|
//! | [`SqliteIndex`] | single SQLite file (`snippets` table) |
//! | [`InMemoryIndex`] | `Vec` behind a `RwLock`, for tests and embedding |

mod memory;
mod sqlite;

pub use memory::InMemoryIndex;
pub use sqlite::SqliteIndex;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{NewSnippet, SnippetRecord, SnippetSummary};

#[async_trait]
pub trait SnippetIndex: Send + Sync {
    /// Append a row and return its id. Ids are unique and increasing.
    async fn insert(&self, snippet: &NewSnippet) -> Result<i64>;

    /// Rows in `language` whose title contains `substring`, ordered by title.
    ///
    /// The match is a plain case-sensitive "contains"; an empty substring
    /// matches every title in the language.
    async fn query(&self, language: &str, substring: &str) -> Result<Vec<SnippetSummary>>;

    /// Every language with at least one row, ascending.
    async fn distinct_languages(&self) -> Result<Vec<String>>;

    /// Full row by id. `NotFound` when absent.
    async fn get(&self, id: i64) -> Result<SnippetRecord>;
}

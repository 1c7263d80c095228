//! In-memory [`SnippetIndex`] for tests and embedding.
//!
//! Same ordering and matching rules as the SQLite index; nothing survives
//! the process.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::error::{Result, SnippetError};
use crate::models::{NewSnippet, SnippetRecord, SnippetSummary};

use super::SnippetIndex;

#[derive(Default)]
pub struct InMemoryIndex {
    rows: RwLock<Vec<SnippetRecord>>,
}

impl InMemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<SnippetRecord>>> {
        self.rows
            .read()
            .map_err(|_| SnippetError::Storage("in-memory index lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<SnippetRecord>>> {
        self.rows
            .write()
            .map_err(|_| SnippetError::Storage("in-memory index lock poisoned".to_string()))
    }
}

#[async_trait]
impl SnippetIndex for InMemoryIndex {
    async fn insert(&self, snippet: &NewSnippet) -> Result<i64> {
        let mut rows = self.write()?;
        let id = rows.last().map(|r| r.id + 1).unwrap_or(1);
        rows.push(snippet.clone().into_record(id));
        Ok(id)
    }

    async fn query(&self, language: &str, substring: &str) -> Result<Vec<SnippetSummary>> {
        let rows = self.read()?;
        let mut hits: Vec<&SnippetRecord> = rows
            .iter()
            .filter(|r| r.language == language && r.title.contains(substring))
            .collect();
        hits.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));

        Ok(hits
            .into_iter()
            .map(|r| SnippetSummary {
                title: r.title.clone(),
                description: r.description.clone(),
                file_path: r.file_path.clone(),
            })
            .collect())
    }

    async fn distinct_languages(&self) -> Result<Vec<String>> {
        let rows = self.read()?;
        let mut languages: Vec<String> = rows.iter().map(|r| r.language.clone()).collect();
        languages.sort();
        languages.dedup();
        Ok(languages)
    }

    async fn get(&self, id: i64) -> Result<SnippetRecord> {
        self.read()?
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| SnippetError::NotFound(format!("snippet id {}", id)))
    }
}

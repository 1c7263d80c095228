//! Snippet retrieval by id.
//!
//! Search only touches the index; the body is read from the content file
//! when a caller actually asks for it. The file may have been edited or
//! overwritten since ingestion, so the body is whatever is on disk now.

use std::path::Path;

use serde::Serialize;

use crate::config::Config;
use crate::error::Result;
use crate::index::SnippetIndex;
use crate::ingest;
use crate::models::{format_ts_iso, SnippetRecord};
use crate::store::SnippetStore;

#[derive(Debug, Clone, Serialize)]
pub struct SnippetContent {
    pub record: SnippetRecord,
    pub body: String,
}

/// Look up row `id` and load its current file content.
pub async fn get_snippet(
    index: &dyn SnippetIndex,
    store: &SnippetStore,
    id: i64,
) -> Result<SnippetContent> {
    let record = index.get(id).await?;
    let body = store.read(Path::new(&record.file_path))?;
    Ok(SnippetContent { record, body })
}

/// CLI entry point for `snip show`.
pub async fn run_show(config: &Config, id: i64) -> Result<()> {
    let index = ingest::init(config).await?;
    let store = SnippetStore::new(&config.store);
    let snippet = get_snippet(&index, &store, id).await;
    index.close().await;
    let snippet = snippet?;

    let record = &snippet.record;
    println!("--- Snippet ---");
    println!("id:          {}", record.id);
    println!("language:    {}", record.language);
    println!("title:       {}", record.title);
    if !record.description.is_empty() {
        println!("description: {}", record.description);
    }
    println!("file_path:   {}", record.file_path);
    println!("created_at:  {}", format_ts_iso(&record.created_at));
    println!();
    println!("--- Body ---");
    print!("{}", snippet.body);
    if !snippet.body.ends_with('\n') {
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use crate::error::SnippetError;
    use crate::index::InMemoryIndex;
    use crate::models::NewSnippet;
    use chrono::Utc;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_current_file_content() {
        let tmp = TempDir::new().unwrap();
        let store = SnippetStore::new(&StoreConfig {
            root: tmp.path().to_path_buf(),
            ..StoreConfig::default()
        });
        let path = store.write("Lua", "Greet", "-- Greet\nprint('hi')\n").unwrap();
        let index = InMemoryIndex::new();
        let id = index
            .insert(&NewSnippet {
                language: "Lua".to_string(),
                title: "Greet".to_string(),
                description: String::new(),
                file_path: path.to_string_lossy().to_string(),
                created_at: Utc::now(),
            })
            .await
            .unwrap();

        std::fs::write(&path, "-- Greet\nprint('edited')\n").unwrap();

        let snippet = get_snippet(&index, &store, id).await.unwrap();
        assert_eq!(snippet.record.title, "Greet");
        assert_eq!(snippet.body, "-- Greet\nprint('edited')\n");
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let store = SnippetStore::new(&StoreConfig {
            root: tmp.path().to_path_buf(),
            ..StoreConfig::default()
        });
        let index = InMemoryIndex::new();
        let id = index
            .insert(&NewSnippet {
                language: "Lua".to_string(),
                title: "Gone".to_string(),
                description: String::new(),
                file_path: tmp.path().join("Lua/Gone.txt").to_string_lossy().to_string(),
                created_at: Utc::now(),
            })
            .await
            .unwrap();

        let err = get_snippet(&index, &store, id).await.unwrap_err();
        assert!(matches!(err, SnippetError::NotFound(_)));
    }
}

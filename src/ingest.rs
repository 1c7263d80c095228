//! Ingestion pipeline.
//!
//! Turns raw snippet text into a committed [`SnippetRecord`]:
//! markers → parse → validate → write content file → insert index row.
//!
//! The content file is always written before the index row is inserted, so
//! a failure in between leaves an orphaned file and never a row pointing at
//! nothing. There is no compensation step: an index failure is returned as
//! `Storage` with the file left in place.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::sync::{Arc, Mutex as StdMutex};

use chrono::Utc;
use tokio::sync::Mutex;

use crate::config::Config;
use crate::error::{Result, SnippetError};
use crate::index::{SnippetIndex, SqliteIndex};
use crate::markers::MarkerRegistry;
use crate::models::{NewSnippet, SnippetRecord};
use crate::parser::{parse_snippet, SnippetHeader};
use crate::store::{check_language, derived_file_name, SnippetStore};

type KeyLock = Arc<Mutex<()>>;

/// Orchestrates registry, parser, store, and index as one failure domain.
///
/// Ingestions that land on the same `(language, derived file name)` are
/// serialized for the whole write + insert pair.
pub struct Ingestor {
    markers: MarkerRegistry,
    store: SnippetStore,
    index: Arc<dyn SnippetIndex>,
    locks: StdMutex<HashMap<(String, String), KeyLock>>,
}

impl Ingestor {
    pub fn new(markers: MarkerRegistry, store: SnippetStore, index: Arc<dyn SnippetIndex>) -> Self {
        Self {
            markers,
            store,
            index,
            locks: StdMutex::new(HashMap::new()),
        }
    }

    /// Parse, validate, and commit `raw_text` under `language`.
    ///
    /// Validation failures (empty language, missing title, unusable title)
    /// leave no directory, file, or row behind.
    pub async fn ingest(&self, language: &str, raw_text: &str) -> Result<SnippetRecord> {
        check_language(language)?;

        let header = parse_snippet(raw_text, self.markers.markers_for(language));
        if header.title.is_empty() {
            return Err(SnippetError::validation("missing title"));
        }
        let name = derived_file_name(&header.title)?;

        let key = (language.to_string(), name);
        let key_lock = self.key_lock(&key)?;
        let result = {
            let _guard = key_lock.lock().await;
            self.commit(language, header, raw_text).await
        };
        self.release_key_lock(&key, key_lock);
        result
    }

    /// Steps that run under the per-key lock: write the file, then the row.
    async fn commit(
        &self,
        language: &str,
        header: SnippetHeader,
        raw_text: &str,
    ) -> Result<SnippetRecord> {
        let path = self.store.write(language, &header.title, raw_text)?;
        let file_path = path.to_string_lossy().to_string();

        let snippet = NewSnippet {
            language: language.to_string(),
            title: header.title,
            description: header.description,
            file_path,
            created_at: Utc::now(),
        };

        let id = match self.index.insert(&snippet).await {
            Ok(id) => id,
            Err(e) => {
                log::warn!(
                    "index insert failed, leaving orphaned snippet file {}: {}",
                    snippet.file_path,
                    e
                );
                return Err(e);
            }
        };

        log::info!(
            "ingested snippet {} [{}] {:?} -> {}",
            id,
            snippet.language,
            snippet.title,
            snippet.file_path
        );

        Ok(snippet.into_record(id))
    }

    fn key_lock(&self, key: &(String, String)) -> Result<KeyLock> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| SnippetError::Storage("ingestion lock table poisoned".to_string()))?;
        Ok(locks.entry(key.clone()).or_default().clone())
    }

    /// Drop the table entry once no other ingestion holds or waits on it.
    fn release_key_lock(&self, key: &(String, String), key_lock: KeyLock) {
        drop(key_lock);
        let Ok(mut locks) = self.locks.lock() else {
            return;
        };
        if locks.get(key).is_some_and(|l| Arc::strong_count(l) == 1) {
            locks.remove(key);
        }
    }
}

/// Create the snippet root and the index schema. Idempotent.
pub async fn init(config: &Config) -> Result<SqliteIndex> {
    SnippetStore::new(&config.store).init()?;
    SqliteIndex::open(&config.index).await
}

/// Build an [`Ingestor`] over the configured store and SQLite index.
pub async fn open_ingestor(config: &Config) -> Result<Ingestor> {
    let index = init(config).await?;
    Ok(Ingestor::new(
        MarkerRegistry::from_config(&config.markers),
        SnippetStore::new(&config.store),
        Arc::new(index),
    ))
}

/// Read snippet text from `file`, or from stdin when `file` is `-`.
pub fn read_source(file: &Path) -> Result<String> {
    if file == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    std::fs::read_to_string(file).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            SnippetError::NotFound(format!("source file {}", file.display()))
        }
        _ => SnippetError::Io(e),
    })
}

/// CLI entry point for `snip add`.
pub async fn run_add(config: &Config, language: &str, file: &Path) -> Result<()> {
    let text = read_source(file)?;
    let index = Arc::new(init(config).await?);
    let ingestor = Ingestor::new(
        MarkerRegistry::from_config(&config.markers),
        SnippetStore::new(&config.store),
        index.clone(),
    );
    let record = ingestor.ingest(language, &text).await;
    index.close().await;

    println!("Snippet saved to {}", record?.file_path);
    Ok(())
}

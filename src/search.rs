//! Snippet search.
//!
//! A thin layer over [`SnippetIndex::query`]: a search is always scoped to
//! exactly one language, a missing query means "everything in that
//! language", and results come back ordered by title.

use crate::config::Config;
use crate::error::{Result, SnippetError};
use crate::index::SnippetIndex;
use crate::ingest;
use crate::models::SnippetSummary;

/// Search `language` for titles containing `query`.
pub async fn search_snippets(
    index: &dyn SnippetIndex,
    language: &str,
    query: Option<&str>,
) -> Result<Vec<SnippetSummary>> {
    if language.trim().is_empty() {
        return Err(SnippetError::validation("empty language"));
    }
    index.query(language, query.unwrap_or("")).await
}

/// Languages present in the index, ascending. Front-ends default their
/// language selector to the first entry.
pub async fn list_languages(index: &dyn SnippetIndex) -> Result<Vec<String>> {
    index.distinct_languages().await
}

/// CLI entry point for `snip search`.
pub async fn run_search(
    config: &Config,
    language: &str,
    query: Option<&str>,
    json: bool,
) -> Result<()> {
    let index = ingest::init(config).await?;
    let results = search_snippets(&index, language, query).await;
    index.close().await;
    let results = results?;

    if json {
        let out = serde_json::to_string_pretty(&results)
            .map_err(|e| SnippetError::Io(std::io::Error::other(e)))?;
        println!("{}", out);
        return Ok(());
    }

    if results.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for hit in &results {
        println!("{} -> {}", hit.display_name(), hit.file_path);
    }

    Ok(())
}

/// CLI entry point for `snip languages`.
pub async fn run_languages(config: &Config) -> Result<()> {
    let index = ingest::init(config).await?;
    let languages = list_languages(&index).await;
    index.close().await;

    for language in languages? {
        println!("{}", language);
    }
    Ok(())
}

//! SQLite-backed [`SnippetIndex`].

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::config::IndexConfig;
use crate::db;
use crate::error::{Result, SnippetError};
use crate::migrate;
use crate::models::{format_ts_iso, parse_ts_iso, NewSnippet, SnippetRecord, SnippetSummary};

use super::SnippetIndex;

pub struct SqliteIndex {
    pool: SqlitePool,
}

impl SqliteIndex {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to the configured database and make sure the schema exists.
    pub async fn open(config: &IndexConfig) -> Result<Self> {
        let pool = db::connect(config).await?;
        migrate::run_migrations(&pool).await?;
        Ok(Self::new(pool))
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn summary_from_row(row: &SqliteRow) -> Result<SnippetSummary> {
    let description: Option<String> = row.try_get("description")?;
    Ok(SnippetSummary {
        title: row.try_get("title")?,
        description: description.unwrap_or_default(),
        file_path: row.try_get("file_path")?,
    })
}

fn record_from_row(row: &SqliteRow) -> Result<SnippetRecord> {
    let id: i64 = row.try_get("id")?;
    let created_at: String = row.try_get("created_at")?;
    let created_at = parse_ts_iso(&created_at).ok_or_else(|| {
        SnippetError::Storage(format!("row {}: invalid created_at {:?}", id, created_at))
    })?;
    let description: Option<String> = row.try_get("description")?;

    Ok(SnippetRecord {
        id,
        language: row.try_get("language")?,
        title: row.try_get("title")?,
        description: description.unwrap_or_default(),
        file_path: row.try_get("file_path")?,
        created_at,
    })
}

#[async_trait]
impl SnippetIndex for SqliteIndex {
    async fn insert(&self, snippet: &NewSnippet) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO snippets (language, title, description, file_path, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&snippet.language)
        .bind(&snippet.title)
        .bind(&snippet.description)
        .bind(&snippet.file_path)
        .bind(format_ts_iso(&snippet.created_at))
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn query(&self, language: &str, substring: &str) -> Result<Vec<SnippetSummary>> {
        // instr() keeps the match case-sensitive and treats % and _ literally.
        let rows = sqlx::query(
            r#"
            SELECT title, description, file_path
            FROM snippets
            WHERE language = ? AND (? = '' OR instr(title, ?) > 0)
            ORDER BY title ASC, id ASC
            "#,
        )
        .bind(language)
        .bind(substring)
        .bind(substring)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(summary_from_row).collect()
    }

    async fn distinct_languages(&self) -> Result<Vec<String>> {
        let languages: Vec<String> =
            sqlx::query_scalar("SELECT DISTINCT language FROM snippets ORDER BY language ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(languages)
    }

    async fn get(&self, id: i64) -> Result<SnippetRecord> {
        let row = sqlx::query(
            "SELECT id, language, title, description, file_path, created_at FROM snippets WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => record_from_row(&row),
            None => Err(SnippetError::NotFound(format!("snippet id {}", id))),
        }
    }
}

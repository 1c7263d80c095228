use sqlx::SqlitePool;

use crate::error::Result;

/// Create the `snippets` table and its lookup index. Safe to run repeatedly.
///
/// A table created by an older tool with nullable columns is left as is;
/// the index reads tolerate NULL descriptions.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS snippets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            language TEXT NOT NULL,
            title TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            file_path TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_snippets_language_title ON snippets(language, title)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

//! Database access for fileproc
//!
//! A single `files` table records one row per processed file. Rows are
//! inserted by the processing loop, never updated, never deleted.

use std::path::Path;

use chrono::{DateTime, Utc};
use fileproc_common::Result;
use serde::Serialize;
use sqlx::SqlitePool;

/// One row per processed file
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct FileRecord {
    pub id: i64,
    pub filename: String,
    pub processed_at: DateTime<Utc>,
}

/// Initialize database connection pool
///
/// Opens (or creates) the SQLite database and ensures the schema exists.
pub async fn init_database_pool(db_path: &Path) -> Result<SqlitePool> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // mode=rwc (read, write, create)
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    tracing::debug!("Connecting to database: {}", db_url);

    let pool = SqlitePool::connect(&db_url).await?;

    init_tables(&pool).await?;

    Ok(pool)
}

/// Create the `files` table if it does not exist. No migration support.
async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS files (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            filename TEXT NOT NULL,
            processed_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_files_filename ON files (filename)")
        .execute(pool)
        .await?;

    tracing::info!("Database tables initialized (files)");

    Ok(())
}

/// Insert one record for a processed file, returning the assigned id.
///
/// Duplicate filenames are allowed and produce separate rows.
pub async fn insert_file_record(
    pool: &SqlitePool,
    filename: &str,
    processed_at: DateTime<Utc>,
) -> Result<i64> {
    let result = sqlx::query("INSERT INTO files (filename, processed_at) VALUES (?, ?)")
        .bind(filename)
        .bind(processed_at)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}

/// All records ordered by id ascending (insertion order, since ids are
/// assigned monotonically).
pub async fn list_file_records(pool: &SqlitePool) -> Result<Vec<FileRecord>> {
    let records = sqlx::query_as::<_, FileRecord>(
        "SELECT id, filename, processed_at FROM files ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool() -> (SqlitePool, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let pool = init_database_pool(&dir.path().join("files.db"))
            .await
            .expect("Failed to init database");
        (pool, dir)
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let (pool, _dir) = test_pool().await;

        let a = insert_file_record(&pool, "a.txt", Utc::now()).await.unwrap();
        let b = insert_file_record(&pool, "b.txt", Utc::now()).await.unwrap();
        let c = insert_file_record(&pool, "c.txt", Utc::now()).await.unwrap();

        assert!(a < b && b < c);
    }

    #[tokio::test]
    async fn list_returns_insertion_order() {
        let (pool, _dir) = test_pool().await;

        insert_file_record(&pool, "first.txt", Utc::now()).await.unwrap();
        insert_file_record(&pool, "second.txt", Utc::now()).await.unwrap();

        let records = list_file_records(&pool).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].filename, "first.txt");
        assert_eq!(records[1].filename, "second.txt");
        assert!(records[0].id < records[1].id);
    }

    #[tokio::test]
    async fn duplicate_filenames_produce_separate_rows() {
        let (pool, _dir) = test_pool().await;

        insert_file_record(&pool, "dup.txt", Utc::now()).await.unwrap();
        insert_file_record(&pool, "dup.txt", Utc::now()).await.unwrap();

        let records = list_file_records(&pool).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].filename, "dup.txt");
        assert_eq!(records[1].filename, "dup.txt");
    }

    #[tokio::test]
    async fn schema_init_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("files.db");

        let pool = init_database_pool(&db_path).await.unwrap();
        insert_file_record(&pool, "kept.txt", Utc::now()).await.unwrap();
        pool.close().await;

        // Reopening must not clobber existing rows
        let pool = init_database_pool(&db_path).await.unwrap();
        let records = list_file_records(&pool).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].filename, "kept.txt");
    }
}

//! Processing loop
//!
//! Drains the intake directory: each regular file is read as text, recorded
//! in the database, and moved to the processed directory. Runs as a single
//! perpetual background task started once at process startup; the manual
//! trigger endpoint reuses [`run_cycle`] for a one-shot pass.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use fileproc_common::{Config, Error, Result};
use sqlx::SqlitePool;
use tracing::{debug, error, info};

use crate::db;

/// Perpetual processing loop. Never returns.
///
/// Each iteration runs one cycle and then sleeps the fixed interval. A cycle
/// error is logged and retried after the same interval (no backoff).
pub async fn run(pool: SqlitePool, config: Arc<Config>) {
    loop {
        match run_cycle(&pool, &config).await {
            Ok(count) if count > 0 => {
                info!("Processing cycle complete: {} file(s) processed", count);
            }
            Ok(_) => {
                debug!("Processing cycle complete: intake empty");
            }
            Err(e) => {
                error!("Error in file processing: {}", e);
            }
        }
        tokio::time::sleep(config.process_interval).await;
    }
}

/// One pass over the intake directory. Returns the number of files processed.
///
/// A missing intake directory is treated as empty. Any error aborts the
/// remainder of the pass: files handled earlier in the pass stay moved and
/// recorded, the rest stay in the intake directory and are picked up again
/// on the next pass. Ordering across files follows the directory listing and
/// is not guaranteed stable.
pub async fn run_cycle(pool: &SqlitePool, config: &Config) -> Result<usize> {
    if !config.upload_dir.exists() {
        return Ok(0);
    }

    let mut processed = 0usize;
    let mut entries = tokio::fs::read_dir(&config.upload_dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        // Symlinks and subdirectories are skipped
        if !entry.file_type().await?.is_file() {
            continue;
        }
        process_file(pool, config, &entry.path()).await?;
        processed += 1;
    }

    Ok(processed)
}

/// Read, record, and relocate a single intake file.
async fn process_file(pool: &SqlitePool, config: &Config, path: &Path) -> Result<()> {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| Error::Internal(format!("No filename for {}", path.display())))?;

    let bytes = tokio::fs::read(path).await?;
    let content = String::from_utf8(bytes)
        .map_err(|e| Error::Decode(format!("{}: {}", filename, e)))?;

    info!("Processing file: {}", filename);
    info!("Content: {}", content);

    db::insert_file_record(pool, &filename, Utc::now()).await?;

    tokio::fs::create_dir_all(&config.processed_dir).await?;
    tokio::fs::rename(path, config.processed_dir.join(&filename)).await?;

    info!("File {} processed and added to database", filename);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn setup() -> (SqlitePool, Config, TempDir) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = Config::rooted_at(dir.path());
        let pool = db::init_database_pool(&config.database_path)
            .await
            .expect("Failed to init database");
        (pool, config, dir)
    }

    #[tokio::test]
    async fn missing_intake_dir_is_an_empty_cycle() {
        let (pool, config, _dir) = setup().await;

        let count = run_cycle(&pool, &config).await.unwrap();

        assert_eq!(count, 0);
        assert!(db::list_file_records(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn cycle_records_and_moves_files() {
        let (pool, config, _dir) = setup().await;
        std::fs::create_dir_all(&config.upload_dir).unwrap();
        std::fs::write(config.upload_dir.join("a.txt"), "hello").unwrap();

        let count = run_cycle(&pool, &config).await.unwrap();
        assert_eq!(count, 1);

        assert!(!config.upload_dir.join("a.txt").exists());
        let moved = std::fs::read_to_string(config.processed_dir.join("a.txt")).unwrap();
        assert_eq!(moved, "hello");

        let records = db::list_file_records(&pool).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].filename, "a.txt");
    }

    #[tokio::test]
    async fn subdirectories_are_skipped() {
        let (pool, config, _dir) = setup().await;
        std::fs::create_dir_all(config.upload_dir.join("nested")).unwrap();

        let count = run_cycle(&pool, &config).await.unwrap();

        assert_eq!(count, 0);
        assert!(config.upload_dir.join("nested").exists());
        assert!(db::list_file_records(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn move_overwrites_same_named_processed_file() {
        let (pool, config, _dir) = setup().await;
        std::fs::create_dir_all(&config.upload_dir).unwrap();
        std::fs::create_dir_all(&config.processed_dir).unwrap();
        std::fs::write(config.processed_dir.join("a.txt"), "old").unwrap();
        std::fs::write(config.upload_dir.join("a.txt"), "new").unwrap();

        run_cycle(&pool, &config).await.unwrap();

        let moved = std::fs::read_to_string(config.processed_dir.join("a.txt")).unwrap();
        assert_eq!(moved, "new");
    }

    #[tokio::test]
    async fn invalid_utf8_aborts_the_cycle_and_is_retried() {
        let (pool, config, _dir) = setup().await;
        std::fs::create_dir_all(&config.upload_dir).unwrap();
        std::fs::write(config.upload_dir.join("bad.bin"), [0xff, 0xfe, 0x00, 0x01]).unwrap();

        let err = run_cycle(&pool, &config).await.unwrap_err();
        assert!(matches!(err, Error::Decode(_)));

        // The offending file is neither moved nor recorded
        assert!(config.upload_dir.join("bad.bin").exists());
        assert!(db::list_file_records(&pool).await.unwrap().is_empty());

        // It fails the same way every cycle until someone removes it
        assert!(run_cycle(&pool, &config).await.is_err());

        std::fs::remove_file(config.upload_dir.join("bad.bin")).unwrap();
        std::fs::write(config.upload_dir.join("good.txt"), "ok").unwrap();

        let count = run_cycle(&pool, &config).await.unwrap();
        assert_eq!(count, 1);
        assert_eq!(db::list_file_records(&pool).await.unwrap().len(), 1);
    }
}

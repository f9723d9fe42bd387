//! Service configuration
//!
//! All values are fixed constants: there is no environment-variable, CLI, or
//! config-file resolution. The struct exists so the process root owns the
//! wiring explicitly and hands it to every component that needs it, and so
//! tests can point the service at temporary directories.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Address the HTTP listener binds to
pub const BIND_ADDR: &str = "0.0.0.0:8000";

/// Directory holding uploaded, not-yet-processed files
pub const UPLOAD_DIR: &str = "./uploads";

/// Directory holding files after successful processing
pub const PROCESSED_DIR: &str = "./processed";

/// SQLite database file recording processed files
pub const DATABASE_PATH: &str = "./files.db";

/// Delay between processing passes
pub const PROCESS_INTERVAL: Duration = Duration::from_secs(10);

/// Service configuration, owned by the process root
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub database_path: PathBuf,
    pub upload_dir: PathBuf,
    pub processed_dir: PathBuf,
    pub process_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: BIND_ADDR.to_string(),
            database_path: PathBuf::from(DATABASE_PATH),
            upload_dir: PathBuf::from(UPLOAD_DIR),
            processed_dir: PathBuf::from(PROCESSED_DIR),
            process_interval: PROCESS_INTERVAL,
        }
    }
}

impl Config {
    /// Configuration with all paths placed under `root`.
    ///
    /// Binds to an ephemeral port. Used by tests to isolate each instance in
    /// its own temporary directory.
    pub fn rooted_at(root: &Path) -> Self {
        Self {
            bind_addr: "127.0.0.1:0".to_string(),
            database_path: root.join("files.db"),
            upload_dir: root.join("uploads"),
            processed_dir: root.join("processed"),
            process_interval: PROCESS_INTERVAL,
        }
    }
}

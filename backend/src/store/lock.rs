//! Named advisory locks over the shared data directory
//!
//! A lock is a file created with `create_new` under `<data_dir>/.locks`;
//! creation is all-or-nothing, so acquisition is atomic for every process
//! sharing the directory. Contenders retry on a bounded delay loop and may
//! break locks whose file age exceeds the stale timeout (a crashed holder
//! never releases; its lock ages out instead).

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Name of the lock serializing all stock-ledger mutations
pub const STOCK_LOCK: &str = "stock_transaction";

/// Retry and staleness knobs for lock acquisition
#[derive(Debug, Clone)]
pub struct LockSettings {
    /// Acquisition attempts before giving up
    pub max_retries: u32,
    /// Delay between attempts
    pub retry_delay: Duration,
    /// Age after which a held lock is treated as orphaned
    pub stale_timeout: Duration,
}

impl Default for LockSettings {
    fn default() -> Self {
        Self {
            max_retries: 20,
            retry_delay: Duration::from_millis(100),
            stale_timeout: Duration::from_millis(5000),
        }
    }
}

/// Manages the named locks for one data directory.
///
/// Injected into services rather than held as a process-wide singleton, so
/// tests can point each instance at its own directory.
#[derive(Debug, Clone)]
pub struct LockManager {
    lock_dir: PathBuf,
    settings: LockSettings,
}

impl LockManager {
    pub fn new(lock_dir: impl Into<PathBuf>, settings: LockSettings) -> Self {
        Self {
            lock_dir: lock_dir.into(),
            settings,
        }
    }

    /// Create the lock directory if it does not exist yet
    pub async fn ensure_lock_dir(&self) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.lock_dir).await?;
        Ok(())
    }

    fn lock_path(&self, name: &str) -> PathBuf {
        self.lock_dir.join(format!("{}.lock", name))
    }

    /// Run `task` while holding the named lock.
    ///
    /// The lock is released whether the task succeeds or fails. A task that
    /// panics leaves the lock file behind; staleness takeover reclaims it.
    pub async fn run_exclusive<T, F, Fut>(&self, name: &str, task: F) -> AppResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = AppResult<T>>,
    {
        self.acquire(name).await?;
        let result = task().await;
        self.release(name).await;
        result
    }

    /// Acquire the named lock, retrying on contention.
    pub async fn acquire(&self, name: &str) -> AppResult<()> {
        let path = self.lock_path(name);
        let mut attempt = 0u32;
        loop {
            match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(_) => {
                    tracing::debug!(lock = name, attempt, "lock acquired");
                    return Ok(());
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    attempt += 1;
                    if self.break_if_stale(name).await {
                        // Retry immediately after reclaiming an orphan
                        continue;
                    }
                    if attempt >= self.settings.max_retries {
                        return Err(AppError::LockAcquisition(format!(
                            "lock '{}' still held after {} attempts",
                            name, attempt
                        )));
                    }
                    tokio::time::sleep(self.settings.retry_delay).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Release the named lock. Idempotent: a missing lock file is fine.
    pub async fn release(&self, name: &str) {
        let path = self.lock_path(name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => tracing::debug!(lock = name, "lock released"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(lock = name, error = %e, "failed to release lock"),
        }
    }

    /// Force-release the lock if its file has outlived the stale timeout.
    /// Returns true when the lock was (or already had been) removed.
    async fn break_if_stale(&self, name: &str) -> bool {
        let path = self.lock_path(name);
        let age = match tokio::fs::metadata(&path).await {
            Ok(meta) => meta
                .modified()
                .ok()
                .and_then(|modified| modified.elapsed().ok()),
            // Holder released between our open and this check
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return true,
            Err(_) => None,
        };

        match age {
            Some(age) if age > self.settings.stale_timeout => {
                tracing::warn!(lock = name, age_ms = age.as_millis() as u64, "breaking stale lock");
                self.release(name).await;
                true
            }
            _ => false,
        }
    }
}

//! Backup screen: listing, creation with local download, and restore.

pub mod format;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::api::DatabaseGateway;
use crate::config::ConsoleConfig;
use crate::controller::Confirm;
use crate::error::ConsoleError;
use crate::models::{BackupEntry, BackupStatistics, DatabaseInfo};

pub use format::{format_backup_date, format_file_size, is_restorable, resolve_download_filename};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Status line shown under the backup controls
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
}

/// Result of a restore attempt that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    Restored,
    Declined,
}

pub struct BackupConsole {
    gateway: DatabaseGateway,
    download_dir: PathBuf,
    message_delay: Duration,

    entries: Vec<BackupEntry>,
    statistics: Option<BackupStatistics>,
    loading: bool,
    creating: bool,
    restoring: bool,

    notice: Option<Notice>,
    clear_notice_at: Option<Instant>,
}

impl BackupConsole {
    pub fn new(gateway: DatabaseGateway, download_dir: impl Into<PathBuf>, message_delay: Duration) -> Self {
        Self {
            gateway,
            download_dir: download_dir.into(),
            message_delay,
            entries: Vec::new(),
            statistics: None,
            loading: false,
            creating: false,
            restoring: false,
            notice: None,
            clear_notice_at: None,
        }
    }

    pub fn from_config(gateway: DatabaseGateway, config: &ConsoleConfig) -> Self {
        Self::new(gateway, config.storage.download_dir.clone(), config.ui.backup_message_delay())
    }

    pub fn entries(&self) -> &[BackupEntry] {
        &self.entries
    }

    /// Statistics that arrived with the last listing
    pub fn last_statistics(&self) -> Option<&BackupStatistics> {
        self.statistics.as_ref()
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_creating(&self) -> bool {
        self.creating
    }

    pub fn is_restoring(&self) -> bool {
        self.restoring
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub async fn load(&mut self) -> Result<(), ConsoleError> {
        self.loading = true;
        let result = self.gateway.list_backups().await;
        self.loading = false;

        match result {
            Ok(listing) => {
                debug!(count = listing.backups.len(), "backups listed");
                self.entries = listing.backups.into_iter().map(BackupEntry::from_filename).collect();
                self.statistics = Some(listing.statistics);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "listing backups failed");
                self.set_notice("Error loading backups", NoticeKind::Error);
                Err(err)
            }
        }
    }

    pub async fn statistics(&self) -> Result<BackupStatistics, ConsoleError> {
        self.gateway.statistics().await
    }

    pub async fn info(&self) -> Result<DatabaseInfo, ConsoleError> {
        self.gateway.info().await
    }

    /// Asks the backend for a fresh backup and saves the returned file in the
    /// download directory. Returns the saved path.
    pub async fn create(&mut self, compress: bool) -> Result<PathBuf, ConsoleError> {
        self.creating = true;
        let result = self.download(compress).await;
        self.creating = false;

        match result {
            Ok(path) => {
                info!(path = %path.display(), compress, "backup downloaded");
                self.set_notice("Backup created and downloaded successfully!", NoticeKind::Success);
                if let Err(err) = self.load().await {
                    debug!(error = %err, "reload after backup failed");
                }
                Ok(path)
            }
            Err(err) => {
                warn!(error = %err, "backup creation failed");
                self.set_notice("Error creating backup", NoticeKind::Error);
                Err(err)
            }
        }
    }

    async fn download(&self, compress: bool) -> Result<PathBuf, ConsoleError> {
        let download = self.gateway.create_backup(compress).await?;
        let filename = resolve_download_filename(download.content_disposition.as_deref(), compress, Utc::now());

        tokio::fs::create_dir_all(&self.download_dir).await?;
        let path = self.download_dir.join(filename);
        tokio::fs::write(&path, &download.bytes).await?;
        Ok(path)
    }

    /// Restores the database from a server-side backup file after the
    /// operator confirms.
    pub async fn restore<C: Confirm + ?Sized>(
        &mut self,
        filename: &str,
        confirm: &C,
    ) -> Result<RestoreOutcome, ConsoleError> {
        if !is_restorable(filename) {
            let err = ConsoleError::validation("Please select a .sqlite, .db, or .zip file");
            self.set_notice(&err.to_string(), NoticeKind::Error);
            return Err(err);
        }

        let prompt = format!("Are you sure you want to restore from {filename}? This will overwrite current data.");
        if !confirm.confirm(&prompt) {
            debug!(filename, "restore declined");
            return Ok(RestoreOutcome::Declined);
        }

        self.restoring = true;
        let result = self.gateway.restore(filename).await;
        self.restoring = false;

        match result {
            Ok(response) => {
                info!(filename, status = %response.status, "database restored");
                self.set_notice("Database restored successfully!", NoticeKind::Success);
                if let Err(err) = self.load().await {
                    debug!(error = %err, "reload after restore failed");
                }
                Ok(RestoreOutcome::Restored)
            }
            Err(err) => {
                warn!(filename, error = %err, "restore failed");
                self.set_notice(&err.display_message("Failed to restore database"), NoticeKind::Error);
                Err(err)
            }
        }
    }

    fn set_notice(&mut self, text: &str, kind: NoticeKind) {
        self.notice = Some(Notice {
            text: text.to_string(),
            kind,
        });
        self.clear_notice_at = Some(Instant::now() + self.message_delay);
    }

    pub fn tick(&mut self, now: Instant) {
        if self.clear_notice_at.is_some_and(|at| at <= now) {
            self.clear_notice_at = None;
            self.notice = None;
        }
    }
}

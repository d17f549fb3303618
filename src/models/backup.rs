use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::backup::format::{format_backup_date, parse_backup_timestamp};

/// Counters the backend attaches to most database responses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackupStatistics {
    pub total_backups: u64,
    pub max_allowed: u64,
    pub available_slots: u64,
    pub oldest_backup: String,
    pub latest_backup: String,
    pub total_size: u64,
}

/// Body of `GET /api/database/backups`, newest file first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackupListing {
    pub backups: Vec<String>,
    pub count: u64,
    #[serde(flatten)]
    pub statistics: BackupStatistics,
}

/// Body of `GET /api/database/info`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatabaseInfo {
    pub database_size: u64,
    #[serde(flatten)]
    pub statistics: BackupStatistics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestoreResponse {
    pub message: String,
    pub status: String,
}

/// One backup file as shown in the console
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupEntry {
    pub filename: String,
    /// Parsed from the `backup_YYYYMMDD_HHMMSS` stamp, when present and valid
    pub timestamp: Option<NaiveDateTime>,
    /// The backup listing carries names only, so this stays unset unless a
    /// caller fills it from elsewhere
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl BackupEntry {
    pub fn from_filename(filename: impl Into<String>) -> Self {
        let filename = filename.into();
        Self {
            timestamp: parse_backup_timestamp(&filename),
            filename,
            size: None,
        }
    }

    /// Formatted stamp, or the raw filename when it carries none
    pub fn display_date(&self) -> String {
        format_backup_date(&self.filename)
    }
}

impl fmt::Display for BackupEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self.display_date();
        if date == self.filename {
            write!(f, "{}", self.filename)
        } else {
            write!(f, "{}  {}", date, self.filename)
        }
    }
}

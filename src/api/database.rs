use reqwest::header::{HeaderName, CONTENT_DISPOSITION, CONTENT_TYPE};

use super::ApiClient;
use crate::error::ConsoleError;
use crate::models::{BackupListing, BackupStatistics, DatabaseInfo, RestoreResponse};

/// Binary body of a backup creation, with the headers needed to save it
#[derive(Debug, Clone)]
pub struct BackupDownload {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub content_disposition: Option<String>,
}

/// Client for the database-management endpoints under `/api/database`.
#[derive(Debug, Clone)]
pub struct DatabaseGateway {
    client: ApiClient,
}

impl DatabaseGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn url(&self, extra: &[&str]) -> url::Url {
        self.client.url(["api", "database"].iter().chain(extra.iter()))
    }

    pub async fn list_backups(&self) -> Result<BackupListing, ConsoleError> {
        self.client.get_json(self.url(&["backups"])).await
    }

    pub async fn statistics(&self) -> Result<BackupStatistics, ConsoleError> {
        self.client.get_json(self.url(&["backup", "statistics"])).await
    }

    pub async fn info(&self) -> Result<DatabaseInfo, ConsoleError> {
        self.client.get_json(self.url(&["info"])).await
    }

    /// `POST /backup?compress=<bool>`; the body is the backup file itself
    /// (`application/zip` when compressed, `application/x-sqlite3` otherwise).
    pub async fn create_backup(&self, compress: bool) -> Result<BackupDownload, ConsoleError> {
        let mut url = self.url(&["backup"]);
        url.query_pairs_mut().append_pair("compress", if compress { "true" } else { "false" });

        let response = self.client.post_empty(url).await?;
        let header = |name: HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };
        let content_type = header(CONTENT_TYPE);
        let content_disposition = header(CONTENT_DISPOSITION);
        let bytes = response.bytes().await?.to_vec();

        Ok(BackupDownload {
            bytes,
            content_type,
            content_disposition,
        })
    }

    pub async fn restore(&self, filename: &str) -> Result<RestoreResponse, ConsoleError> {
        let response = self.client.post_empty(self.url(&["restore", filename])).await?;
        Ok(response.json::<RestoreResponse>().await?)
    }
}

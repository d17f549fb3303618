use async_trait::async_trait;
use chrono::NaiveDate;

use super::{EngineerGateway, SummaryGateway};
use crate::error::ConsoleError;
use crate::models::{Engineer, EngineerSummary};

// Server-side queries beyond the basic contract
impl EngineerGateway {
    pub async fn by_name(&self, name: &str) -> Result<Vec<Engineer>, ConsoleError> {
        self.client().get_json(self.url(&["by-name", name])).await
    }

    pub async fn by_type(&self, engineer_type: &str) -> Result<Vec<Engineer>, ConsoleError> {
        self.client().get_json(self.url(&["by-type", engineer_type])).await
    }

    pub async fn by_cheque_date(&self, date: NaiveDate) -> Result<Vec<Engineer>, ConsoleError> {
        let date = date.to_string();
        self.client().get_json(self.url(&["all", date.as_str()])).await
    }

    pub async fn by_name_and_date(&self, name: &str, date: NaiveDate) -> Result<Vec<Engineer>, ConsoleError> {
        let date = date.to_string();
        self.client().get_json(self.url(&[name, date.as_str()])).await
    }
}

#[async_trait]
impl SummaryGateway for EngineerGateway {
    type Summary = EngineerSummary;

    async fn summary(&self, name: &str) -> Result<EngineerSummary, ConsoleError> {
        self.client().get_json(self.url(&["summary", name])).await
    }
}

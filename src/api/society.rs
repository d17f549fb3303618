use async_trait::async_trait;
use chrono::NaiveDate;

use super::{SocietyGateway, SummaryGateway};
use crate::error::ConsoleError;
use crate::models::{Society, SocietySummary};

impl SocietyGateway {
    pub async fn by_name(&self, name: &str) -> Result<Vec<Society>, ConsoleError> {
        self.client().get_json(self.url(&[name])).await
    }

    pub async fn by_name_and_date(&self, name: &str, date: NaiveDate) -> Result<Vec<Society>, ConsoleError> {
        let date = date.to_string();
        self.client().get_json(self.url(&[name, date.as_str()])).await
    }

    pub async fn by_date(&self, date: NaiveDate) -> Result<Vec<Society>, ConsoleError> {
        let date = date.to_string();
        self.client().get_json(self.url(&[date.as_str()])).await
    }
}

#[async_trait]
impl SummaryGateway for SocietyGateway {
    type Summary = SocietySummary;

    async fn summary(&self, name: &str) -> Result<SocietySummary, ConsoleError> {
        self.client().get_json(self.url(&["summary", name])).await
    }
}

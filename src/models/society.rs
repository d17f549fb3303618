use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{format_values, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Society {
    pub attachment_number: i64,
    pub cheque_number: i64,
    pub society_name: String,
    pub date: NaiveDate,
    pub sum: f64,
    #[serde(default)]
    pub batches: Vec<f64>,
    #[serde(default)]
    pub batch_type: String,
    #[serde(default)]
    pub section: Option<i64>,
    #[serde(default)]
    pub created_by: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocietyRequest {
    pub cheque_number: i64,
    pub society_name: String,
    pub date: Option<NaiveDate>,
    pub sum: f64,
    pub batches: Vec<f64>,
    pub batch_type: String,
    pub section: Option<i64>,
    pub created_by: String,
}

/// Aggregate returned by `/api/societies/summary/{name}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocietySummary {
    pub society_name: String,
    pub batches: Vec<f64>,
    pub total_batches: f64,
    pub total_sum: f64,
}

impl SocietyRequest {
    /// Appends a batch number; zero and negative values are ignored.
    pub fn add_batch(&mut self, batch: f64) -> bool {
        if batch > 0.0 {
            self.batches.push(batch);
            true
        } else {
            false
        }
    }

    pub fn remove_batch(&mut self, index: usize) -> Option<f64> {
        (index < self.batches.len()).then(|| self.batches.remove(index))
    }
}

impl Resource for Society {
    type Id = i64;
    type Key = i64;
    type Request = SocietyRequest;

    const COLLECTION: &'static [&'static str] = &["api", "societies"];
    const LABEL: &'static str = "society";
    const PLURAL: &'static str = "societies";

    fn id(&self) -> i64 {
        self.attachment_number
    }

    fn to_request(&self) -> SocietyRequest {
        SocietyRequest {
            cheque_number: self.cheque_number,
            society_name: self.society_name.clone(),
            date: Some(self.date),
            sum: self.sum,
            batches: self.batches.clone(),
            batch_type: self.batch_type.clone(),
            section: self.section,
            created_by: self.created_by.clone(),
        }
    }
}

impl fmt::Display for Society {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} cheque {} | {} | {} | {} | {}",
            self.attachment_number, self.cheque_number, self.society_name, self.sum, self.date, self.batch_type
        )?;
        if let Some(section) = self.section {
            write!(f, " (section {section})")?;
        }
        write!(f, " | batches [{}] | by {}", format_values(&self.batches), self.created_by)
    }
}

impl fmt::Display for SocietySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Society: {}", self.society_name)?;
        writeln!(f, "Batches: [{}]", format_values(&self.batches))?;
        writeln!(f, "Total batches: {}", self.total_batches)?;
        write!(f, "Total sum: {}", self.total_sum)
    }
}

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{format_values, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Engineer {
    pub engineer_id: i64,
    pub cheque_number: i64,
    pub engineer_name: String,
    pub amount: f64,
    pub cheque_date: NaiveDate,
    #[serde(default)]
    pub acts: Vec<f64>,
    #[serde(default)]
    pub engineer_type: String,
    #[serde(default)]
    pub created_by: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineerRequest {
    pub cheque_number: i64,
    pub engineer_name: String,
    pub amount: f64,
    pub cheque_date: Option<NaiveDate>,
    pub acts: Vec<f64>,
    pub engineer_type: String,
    pub created_by: String,
}

/// Aggregate returned by `/api/engineers/summary/{name}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineerSummary {
    pub engineer_name: String,
    pub acts: Vec<f64>,
    pub total_acts: f64,
    pub total_amount: f64,
}

impl EngineerRequest {
    /// Appends an act number; zero and negative values are ignored.
    pub fn add_act(&mut self, act: f64) -> bool {
        if act > 0.0 {
            self.acts.push(act);
            true
        } else {
            false
        }
    }

    pub fn remove_act(&mut self, index: usize) -> Option<f64> {
        (index < self.acts.len()).then(|| self.acts.remove(index))
    }
}

impl Resource for Engineer {
    type Id = i64;
    type Key = i64;
    type Request = EngineerRequest;

    const COLLECTION: &'static [&'static str] = &["api", "engineers"];
    const LABEL: &'static str = "engineer";
    const PLURAL: &'static str = "engineers";

    fn id(&self) -> i64 {
        self.engineer_id
    }

    fn to_request(&self) -> EngineerRequest {
        EngineerRequest {
            cheque_number: self.cheque_number,
            engineer_name: self.engineer_name.clone(),
            amount: self.amount,
            cheque_date: Some(self.cheque_date),
            acts: self.acts.clone(),
            engineer_type: self.engineer_type.clone(),
            created_by: self.created_by.clone(),
        }
    }
}

impl fmt::Display for Engineer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} cheque {} | {} | {} | {} | {} | acts [{}] | by {}",
            self.engineer_id,
            self.cheque_number,
            self.engineer_name,
            self.amount,
            self.cheque_date,
            self.engineer_type,
            format_values(&self.acts),
            self.created_by
        )
    }
}

impl fmt::Display for EngineerSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Engineer: {}", self.engineer_name)?;
        writeln!(f, "Acts: [{}]", format_values(&self.acts))?;
        writeln!(f, "Total acts: {}", self.total_acts)?;
        write!(f, "Total amount: {}", self.total_amount)
    }
}

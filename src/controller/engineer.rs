use chrono::NaiveDate;

use super::{contains_ignore_case, is_blank, matches_exact, require, ListController, ListResource};
use crate::api::EngineerGateway;
use crate::error::ConsoleError;
use crate::grouping::{group_by_name, GroupedView};
use crate::models::{Engineer, EngineerRequest};

pub type EngineerController<G = EngineerGateway> = ListController<Engineer, G>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineerCriteria {
    pub name: String,
    pub engineer_type: String,
    pub cheque_date: Option<NaiveDate>,
    /// Zero or absent matches every cheque
    pub cheque_number: Option<i64>,
}

impl ListResource for Engineer {
    type Criteria = EngineerCriteria;

    fn matches(&self, criteria: &EngineerCriteria) -> bool {
        contains_ignore_case(&self.engineer_name, &criteria.name)
            && contains_ignore_case(&self.engineer_type, &criteria.engineer_type)
            && matches_exact(&self.cheque_date, &criteria.cheque_date)
            && matches_exact(&self.cheque_number, &criteria.cheque_number.filter(|n| *n != 0))
    }

    fn validate(form: &EngineerRequest) -> Result<(), ConsoleError> {
        require(!is_blank(&form.engineer_name), "Engineer name is required")?;
        require(form.cheque_number > 0, "Valid cheque number is required")?;
        require(form.amount > 0.0, "Valid amount is required")?;
        require(form.cheque_date.is_some(), "Cheque date is required")?;
        require(!is_blank(&form.engineer_type), "Engineer type is required")
    }

    fn sort_key(&self) -> Option<i64> {
        Some(self.engineer_id)
    }

    fn stamp_creator(form: &mut EngineerRequest, username: &str) {
        form.created_by = username.to_string();
    }

    fn regroup(rows: &[Self]) -> GroupedView<Self> {
        group_by_name(rows)
    }
}

use chrono::NaiveDate;

use super::{contains_ignore_case, is_blank, matches_exact, require, ListController, ListResource};
use crate::api::SocietyGateway;
use crate::error::ConsoleError;
use crate::grouping::{group_by_name, GroupedView};
use crate::models::{Society, SocietyRequest};

pub type SocietyController<G = SocietyGateway> = ListController<Society, G>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SocietyCriteria {
    pub name: String,
    pub batch_type: String,
    pub date: Option<NaiveDate>,
    /// Zero or absent matches every cheque
    pub cheque_number: Option<i64>,
}

impl ListResource for Society {
    type Criteria = SocietyCriteria;

    fn matches(&self, criteria: &SocietyCriteria) -> bool {
        contains_ignore_case(&self.society_name, &criteria.name)
            && contains_ignore_case(&self.batch_type, &criteria.batch_type)
            && matches_exact(&self.date, &criteria.date)
            && matches_exact(&self.cheque_number, &criteria.cheque_number.filter(|n| *n != 0))
    }

    fn validate(form: &SocietyRequest) -> Result<(), ConsoleError> {
        require(!is_blank(&form.society_name), "Society name is required")?;
        require(form.cheque_number > 0, "Valid cheque number is required")?;
        require(form.sum > 0.0, "Valid sum is required")?;
        require(form.date.is_some(), "Cheque date is required")?;
        require(!is_blank(&form.batch_type), "Batch type is required")
    }

    fn sort_key(&self) -> Option<i64> {
        Some(self.attachment_number)
    }

    fn stamp_creator(form: &mut SocietyRequest, username: &str) {
        form.created_by = username.to_string();
    }

    fn regroup(rows: &[Self]) -> GroupedView<Self> {
        group_by_name(rows)
    }
}

use super::{contains_ignore_case, is_blank, require, ListController, ListResource};
use crate::api::EngineerTypeGateway;
use crate::error::ConsoleError;
use crate::models::{EngineerType, EngineerTypeRequest};

pub type EngineerTypeController<G = EngineerTypeGateway> = ListController<EngineerType, G>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineerTypeCriteria {
    pub engineer_type: String,
}

impl ListResource for EngineerType {
    type Criteria = EngineerTypeCriteria;

    fn matches(&self, criteria: &EngineerTypeCriteria) -> bool {
        contains_ignore_case(&self.engineer_type, &criteria.engineer_type)
    }

    fn validate(form: &EngineerTypeRequest) -> Result<(), ConsoleError> {
        require(!is_blank(&form.engineer_type), "Engineer type is required")
    }
}

use super::{contains_ignore_case, is_blank, require, ListController, ListResource};
use crate::api::UserGateway;
use crate::error::ConsoleError;
use crate::models::User;

pub type UserController<G = UserGateway> = ListController<User, G>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserCriteria {
    pub username: String,
}

impl ListResource for User {
    type Criteria = UserCriteria;

    fn matches(&self, criteria: &UserCriteria) -> bool {
        contains_ignore_case(&self.username, &criteria.username)
    }

    fn validate(form: &User) -> Result<(), ConsoleError> {
        require(!is_blank(&form.username), "Username is required")?;
        require(!is_blank(&form.password), "Password is required")
    }
}

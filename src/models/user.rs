use std::fmt;

use serde::{Deserialize, Serialize};

use super::Resource;

/// Console account. The password travels and is held in plaintext; the
/// backend owns hashing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl Resource for User {
    type Id = String;
    type Key = String;
    type Request = User;

    const COLLECTION: &'static [&'static str] = &["api", "users"];
    const LABEL: &'static str = "user";
    const PLURAL: &'static str = "users";

    fn id(&self) -> String {
        self.username.clone()
    }

    fn to_request(&self) -> User {
        self.clone()
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.username)
    }
}

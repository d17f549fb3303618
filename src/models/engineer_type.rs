use std::fmt;

use serde::{Deserialize, Serialize};

use super::Resource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineerType {
    pub engineer_type_id: i64,
    pub engineer_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineerTypeRequest {
    pub engineer_type: String,
}

impl Resource for EngineerType {
    type Id = i64;
    type Key = String;
    type Request = EngineerTypeRequest;

    const COLLECTION: &'static [&'static str] = &["api", "engineer-types"];
    const LABEL: &'static str = "engineer type";
    const PLURAL: &'static str = "engineer types";

    fn id(&self) -> i64 {
        self.engineer_type_id
    }

    fn to_request(&self) -> EngineerTypeRequest {
        EngineerTypeRequest {
            engineer_type: self.engineer_type.clone(),
        }
    }
}

impl fmt::Display for EngineerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.engineer_type_id, self.engineer_type)
    }
}

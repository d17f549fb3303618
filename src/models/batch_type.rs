use std::fmt;

use serde::{Deserialize, Serialize};

use super::Resource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchType {
    pub batch_type_id: i64,
    #[serde(rename = "type")]
    pub batch_type: String,
    #[serde(default)]
    pub section: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchTypeRequest {
    #[serde(rename = "type")]
    pub batch_type: String,
    pub section: Option<i64>,
}

impl Resource for BatchType {
    type Id = i64;
    type Key = String;
    type Request = BatchTypeRequest;

    const COLLECTION: &'static [&'static str] = &["api", "batch-types"];
    const LABEL: &'static str = "batch type";
    const PLURAL: &'static str = "batch types";

    fn id(&self) -> i64 {
        self.batch_type_id
    }

    fn to_request(&self) -> BatchTypeRequest {
        BatchTypeRequest {
            batch_type: self.batch_type.clone(),
            section: self.section,
        }
    }
}

impl fmt::Display for BatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.section {
            Some(section) => write!(f, "#{} {} (section {})", self.batch_type_id, self.batch_type, section),
            None => write!(f, "#{} {}", self.batch_type_id, self.batch_type),
        }
    }
}

//! Records mirrored from the backend and the payloads sent back to it.

pub mod auth;
pub mod backup;
pub mod batch_type;
pub mod engineer;
pub mod engineer_type;
pub mod society;
pub mod user;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub use auth::{LoginRequest, LoginResponse};
pub use backup::{BackupEntry, BackupListing, BackupStatistics, DatabaseInfo, RestoreResponse};
pub use batch_type::{BatchType, BatchTypeRequest};
pub use engineer::{Engineer, EngineerRequest, EngineerSummary};
pub use engineer_type::{EngineerType, EngineerTypeRequest};
pub use society::{Society, SocietyRequest, SocietySummary};
pub use user::User;

/// A record type served by one REST collection.
pub trait Resource: Clone + fmt::Debug + DeserializeOwned + Send + Sync + 'static {
    /// Server-assigned key used by update and delete
    type Id: Clone + fmt::Debug + fmt::Display + PartialEq + Send + Sync;
    /// Identifying field used by the single-record lookup
    type Key: fmt::Display + Send + Sync;
    /// Body sent on create and update
    type Request: Clone + fmt::Debug + Default + PartialEq + Serialize + Send + Sync;

    /// Path segments of the collection, e.g. `["api", "engineers"]`
    const COLLECTION: &'static [&'static str];
    /// Lower-case singular label used in operator messages
    const LABEL: &'static str;
    /// Lower-case plural label used in operator messages
    const PLURAL: &'static str;

    fn id(&self) -> Self::Id;

    /// Owned copy of the fields an edit form may change
    fn to_request(&self) -> Self::Request;
}

/// Upper-cases the first character of a label ("batch type" -> "Batch type").
pub fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub(crate) fn format_values(values: &[f64]) -> String {
    values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
}

//! Wire models exchanged between the API service and its clients
//!
//! Field names follow the JSON contract the frontend already speaks:
//! camelCase, with record identifiers serialized as `_id`.

pub mod job;
pub mod user;

pub use job::{
    CreateJobRequest, Creator, DEFAULT_SALARY_TYPE, Job, JobFilter, NewJob, Salary, SearchQuery,
};
pub use user::{AuthStatus, Identity, Role, User};

/// Generic `{"message": ...}` body used for errors and acknowledgements
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

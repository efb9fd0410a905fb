//! Repositories for users and job postings
//!
//! Handlers only see the [`UserDirectory`] and [`JobStore`] ports; the
//! PostgreSQL repositories and the in-memory store implement them.

use anyhow::Result;
use async_trait::async_trait;
use common::models::{Identity, Job, JobFilter, NewJob, User};
use uuid::Uuid;

pub mod job;
pub mod memory;
pub mod user;

pub use job::JobRepository;
pub use memory::MemoryStore;
pub use user::UserRepository;

/// Result of provisioning a local user for an external identity
#[derive(Debug, Clone)]
pub struct Provisioned {
    pub user: User,
    /// Whether this call created the record
    pub created: bool,
}

/// Result of an apply attempt
#[derive(Debug, Clone)]
pub enum ApplyOutcome {
    Applied(Job),
    AlreadyApplied,
    JobNotFound,
}

/// Port for local user records
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Return the user for this identity, creating it on first sight.
    /// Safe to call concurrently for the same identity.
    async fn get_or_create(&self, identity: &Identity) -> Result<Provisioned>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
    async fn find_by_auth0_id(&self, auth0_id: &str) -> Result<Option<User>>;
}

/// Port for job postings. Listings are returned newest first.
#[async_trait]
pub trait JobStore: Send + Sync {
    async fn create(&self, creator_id: Uuid, job: &NewJob) -> Result<Job>;
    async fn list(&self) -> Result<Vec<Job>>;
    async fn list_by_creator(&self, creator_id: Uuid) -> Result<Vec<Job>>;
    async fn search(&self, filter: &JobFilter) -> Result<Vec<Job>>;
    async fn get(&self, id: Uuid) -> Result<Option<Job>>;
    /// Add or remove the user from the job's likes. `None` if the job is gone.
    async fn toggle_like(&self, job_id: Uuid, user_id: Uuid) -> Result<Option<Job>>;
    async fn add_applicant(&self, job_id: Uuid, user_id: Uuid) -> Result<ApplyOutcome>;
    /// Returns whether a job was deleted
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

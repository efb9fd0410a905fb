//! In-memory store for local development and tests

use std::{collections::HashMap, sync::Arc};

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use common::models::{Creator, Identity, Job, JobFilter, NewJob, Role, User};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{ApplyOutcome, JobStore, Provisioned, UserDirectory};

#[derive(Debug, Default)]
struct MemoryState {
    users: HashMap<Uuid, User>,
    users_by_auth0_id: HashMap<String, Uuid>,
    /// Insertion order, oldest first
    jobs: Vec<Job>,
}

impl MemoryState {
    /// Copy of the job with its creator summary refreshed from the directory
    fn populated(&self, job: &Job) -> Job {
        let mut job = job.clone();
        if let Some(user) = self.users.get(&job.created_by.id) {
            job.created_by.name = user.name.clone();
            job.created_by.profile_picture = user.profile_picture.clone();
        }
        job
    }

    fn newest_first<'a>(&self, jobs: impl DoubleEndedIterator<Item = &'a Job>) -> Vec<Job> {
        jobs.rev().map(|job| self.populated(job)).collect()
    }

    fn job_mut(&mut self, id: Uuid) -> Option<&mut Job> {
        self.jobs.iter_mut().find(|job| job.id == id)
    }
}

/// Users and jobs kept in process memory behind one lock
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn get_or_create(&self, identity: &Identity) -> Result<Provisioned> {
        let mut state = self.state.lock().await;

        if let Some(user) = state
            .users_by_auth0_id
            .get(&identity.sub)
            .and_then(|id| state.users.get(id))
        {
            return Ok(Provisioned {
                user: user.clone(),
                created: false,
            });
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            auth0_id: identity.sub.clone(),
            email: identity.email.clone().unwrap_or_default(),
            name: identity.name.clone().unwrap_or_default(),
            role: Role::default(),
            profile_picture: identity.picture.clone(),
            created_at: now,
            updated_at: now,
        };

        state
            .users_by_auth0_id
            .insert(user.auth0_id.clone(), user.id);
        state.users.insert(user.id, user.clone());

        Ok(Provisioned {
            user,
            created: true,
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.state.lock().await.users.get(&id).cloned())
    }

    async fn find_by_auth0_id(&self, auth0_id: &str) -> Result<Option<User>> {
        let state = self.state.lock().await;

        Ok(state
            .users_by_auth0_id
            .get(auth0_id)
            .and_then(|id| state.users.get(id))
            .cloned())
    }
}

#[async_trait]
impl JobStore for MemoryStore {
    async fn create(&self, creator_id: Uuid, job: &NewJob) -> Result<Job> {
        let mut state = self.state.lock().await;

        let now = Utc::now();
        let record = Job {
            id: Uuid::new_v4(),
            title: job.title.clone(),
            description: job.description.clone(),
            location: job.location.clone(),
            salary: job.salary,
            salary_type: job.salary_type.clone(),
            negotiable: job.negotiable,
            job_type: job.job_type.clone(),
            tags: job.tags.clone(),
            skills: job.skills.clone(),
            created_by: Creator {
                id: creator_id,
                name: String::new(),
                profile_picture: None,
            },
            likes: Vec::new(),
            applicants: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        let created = state.populated(&record);
        state.jobs.push(record);

        Ok(created)
    }

    async fn list(&self) -> Result<Vec<Job>> {
        let state = self.state.lock().await;

        Ok(state.newest_first(state.jobs.iter()))
    }

    async fn list_by_creator(&self, creator_id: Uuid) -> Result<Vec<Job>> {
        let state = self.state.lock().await;

        Ok(state.newest_first(
            state
                .jobs
                .iter()
                .filter(|job| job.created_by.id == creator_id),
        ))
    }

    async fn search(&self, filter: &JobFilter) -> Result<Vec<Job>> {
        let state = self.state.lock().await;

        Ok(state.newest_first(state.jobs.iter().filter(|job| filter.matches(job))))
    }

    async fn get(&self, id: Uuid) -> Result<Option<Job>> {
        let state = self.state.lock().await;

        Ok(state
            .jobs
            .iter()
            .find(|job| job.id == id)
            .map(|job| state.populated(job)))
    }

    async fn toggle_like(&self, job_id: Uuid, user_id: Uuid) -> Result<Option<Job>> {
        let mut state = self.state.lock().await;

        let Some(job) = state.job_mut(job_id) else {
            return Ok(None);
        };

        if job.is_liked_by(user_id) {
            job.likes.retain(|id| *id != user_id);
        } else {
            job.likes.push(user_id);
        }
        job.updated_at = Utc::now();

        let job = job.clone();
        Ok(Some(state.populated(&job)))
    }

    async fn add_applicant(&self, job_id: Uuid, user_id: Uuid) -> Result<ApplyOutcome> {
        let mut state = self.state.lock().await;

        let Some(job) = state.job_mut(job_id) else {
            return Ok(ApplyOutcome::JobNotFound);
        };

        if job.has_applicant(user_id) {
            return Ok(ApplyOutcome::AlreadyApplied);
        }

        job.applicants.push(user_id);
        job.updated_at = Utc::now();

        let job = job.clone();
        Ok(ApplyOutcome::Applied(state.populated(&job)))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut state = self.state.lock().await;

        let before = state.jobs.len();
        state.jobs.retain(|job| job.id != id);

        Ok(state.jobs.len() < before)
    }
}

//! Job lists and the operations that change them
//!
//! Read failures are logged and leave the lists as they were. Mutating
//! operations report their outcome through the [`Notifier`], using the
//! server's message when it sent one.

use std::sync::Arc;

use common::models::{CreateJobRequest, Job, SearchQuery};
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{api::JobBoardApi, auth_store::ProfileAccessor, notifier::Notifier};

/// Point-in-time view of the jobs store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobsSnapshot {
    /// Listing or latest search results
    pub jobs: Vec<Job>,
    /// Postings of the signed-in user
    pub user_jobs: Vec<Job>,
    pub loading: bool,
}

#[derive(Default)]
struct JobsState {
    snapshot: JobsSnapshot,
    /// Profile id the user jobs were last loaded for
    synced_profile: Option<Uuid>,
}

pub struct JobsStore {
    api: Arc<dyn JobBoardApi>,
    profile: Arc<dyn ProfileAccessor>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<JobsState>,
}

impl JobsStore {
    pub fn new(
        api: Arc<dyn JobBoardApi>,
        profile: Arc<dyn ProfileAccessor>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            profile,
            notifier,
            state: Mutex::new(JobsState::default()),
        }
    }

    /// Load all jobs, then the user's own once a profile is known
    pub async fn mount(&self) {
        self.refresh_jobs().await;
        self.sync_profile().await;
    }

    /// Reload the user's jobs if the profile id changed since the last sync
    pub async fn sync_profile(&self) {
        let current = self.profile.profile_id().await;

        {
            let mut state = self.state.lock().await;
            if state.synced_profile == current {
                return;
            }
            state.synced_profile = current;
        }

        match current {
            Some(user_id) => self.refresh_user_jobs(user_id).await,
            None => {
                self.state.lock().await.snapshot.user_jobs.clear();
            }
        }
    }

    pub async fn snapshot(&self) -> JobsSnapshot {
        self.state.lock().await.snapshot.clone()
    }

    async fn set_loading(&self, loading: bool) {
        self.state.lock().await.snapshot.loading = loading;
    }

    pub async fn refresh_jobs(&self) {
        self.set_loading(true).await;

        match self.api.list_jobs().await {
            Ok(jobs) => {
                self.state.lock().await.snapshot.jobs = jobs;
            }
            Err(e) => warn!("Error getting jobs: {}", e),
        }

        self.set_loading(false).await;
    }

    async fn refresh_user_jobs(&self, user_id: Uuid) {
        self.set_loading(true).await;

        match self.api.user_jobs(user_id).await {
            Ok(jobs) => {
                self.state.lock().await.snapshot.user_jobs = jobs;
            }
            Err(e) => warn!("Error getting jobs for user {}: {}", user_id, e),
        }

        self.set_loading(false).await;
    }

    /// Post a job and put it at the top of both lists
    pub async fn create_job(&self, request: &CreateJobRequest) -> Option<Job> {
        let job = match self.api.create_job(request).await {
            Ok(job) => job,
            Err(e) => {
                warn!("Error creating a job: {}", e);
                self.notifier.error(&e.user_message());
                return None;
            }
        };

        self.notifier.success("Job created successfully");
        info!("Created job {}", job.id);

        let has_profile = self.profile.profile_id().await.is_some();
        let mut state = self.state.lock().await;
        state.snapshot.jobs.insert(0, job.clone());
        if has_profile {
            state.snapshot.user_jobs.insert(0, job.clone());
        }

        Some(job)
    }

    /// Replace the job list with search results. Blank filters are not sent.
    pub async fn search_jobs(
        &self,
        tags: Option<&str>,
        location: Option<&str>,
        title: Option<&str>,
    ) {
        let query = SearchQuery {
            tags: non_blank(tags),
            location: non_blank(location),
            title: non_blank(title),
        };

        self.set_loading(true).await;

        match self.api.search_jobs(&query).await {
            Ok(jobs) => {
                self.state.lock().await.snapshot.jobs = jobs;
            }
            Err(e) => warn!("Error while searching: {}", e),
        }

        self.set_loading(false).await;
    }

    pub async fn get_job(&self, id: Uuid) -> Option<Job> {
        self.set_loading(true).await;
        let result = self.api.get_job(id).await;
        self.set_loading(false).await;

        result
            .inspect_err(|e| warn!("Error getting job {}: {}", id, e))
            .ok()
    }

    /// Toggle the caller's like, then reload the listing
    pub async fn like_job(&self, id: Uuid) {
        match self.api.like_job(id).await {
            Ok(_) => {
                self.notifier.success("Job liked successfully");
                self.refresh_jobs().await;
            }
            Err(e) => {
                warn!("Error liking job {}: {}", id, e);
                self.notifier.error(&e.user_message());
            }
        }
    }

    /// Apply to a job, then reload the listing
    pub async fn apply_job(&self, id: Uuid) {
        match self.api.apply_job(id).await {
            Ok(_) => {
                self.notifier.success("Applied to job successfully");
                self.refresh_jobs().await;
            }
            Err(e) => {
                warn!("Error applying to job {}: {}", id, e);
                self.notifier.error(&e.user_message());
            }
        }
    }

    /// Delete a job and drop it from both lists
    pub async fn delete_job(&self, id: Uuid) {
        match self.api.delete_job(id).await {
            Ok(_) => {
                self.notifier.success("Job deleted successfully");
                let mut state = self.state.lock().await;
                state.snapshot.jobs.retain(|job| job.id != id);
                state.snapshot.user_jobs.retain(|job| job.id != id);
            }
            Err(e) => {
                warn!("Error deleting job {}: {}", id, e);
                self.notifier.error(&e.user_message());
            }
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

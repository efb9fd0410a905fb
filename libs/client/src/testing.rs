//! In-process fakes shared by the store tests

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use chrono::Utc;
use common::models::{
    AuthStatus, CreateJobRequest, Creator, Identity, Job, JobFilter, MessageResponse, Role,
    SearchQuery, User,
};
use uuid::Uuid;

use crate::{
    api::JobBoardApi,
    auth_store::ProfileAccessor,
    error::{ClientError, ClientResult},
    notifier::Notifier,
};

pub fn identity(sub: &str, name: &str) -> Identity {
    Identity {
        sub: sub.to_string(),
        email: Some(format!("{}@example.com", name.to_lowercase())),
        name: Some(name.to_string()),
        picture: None,
    }
}

fn api_error(status: u16, message: &str) -> ClientError {
    ClientError::Api {
        status,
        message: message.to_string(),
    }
}

#[derive(Default)]
struct FakeState {
    session: Option<Identity>,
    users: Vec<User>,
    /// Newest first, like the service
    jobs: Vec<Job>,
    fail_reads: bool,
    fail_writes: bool,
    calls: HashMap<&'static str, usize>,
}

/// Behaves like the service for a single signed-in caller
#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, identity: Identity) -> User {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            auth0_id: identity.sub.clone(),
            email: identity.email.clone().unwrap_or_default(),
            name: identity.name.clone().unwrap_or_default(),
            role: Role::Jobseeker,
            profile_picture: identity.picture.clone(),
            created_at: now,
            updated_at: now,
        };
        self.state.lock().unwrap().users.push(user.clone());
        user
    }

    pub fn sign_in(&self, sub: &str, name: &str) {
        self.state.lock().unwrap().session = Some(identity(sub, name));
    }

    pub fn add_job(&self, title: &str, creator: Uuid) -> Job {
        let now = Utc::now();
        let job = Job {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: "Ship it".to_string(),
            location: "Remote".to_string(),
            salary: 50_000.0,
            salary_type: "Year".to_string(),
            negotiable: false,
            job_type: vec!["Full Time".to_string()],
            tags: vec![],
            skills: vec![],
            created_by: Creator {
                id: creator,
                name: String::new(),
                profile_picture: None,
            },
            likes: vec![],
            applicants: vec![],
            created_at: now,
            updated_at: now,
        };
        self.state.lock().unwrap().jobs.insert(0, job.clone());
        job
    }

    pub fn fail_reads(&self) {
        self.state.lock().unwrap().fail_reads = true;
    }

    pub fn fail_writes(&self) {
        self.state.lock().unwrap().fail_writes = true;
    }

    pub fn calls(&self, name: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .get(name)
            .copied()
            .unwrap_or(0)
    }

    fn record(&self, name: &'static str, write: bool) -> ClientResult<()> {
        let mut state = self.state.lock().unwrap();
        *state.calls.entry(name).or_default() += 1;

        if (write && state.fail_writes) || (!write && state.fail_reads) {
            return Err(api_error(500, "Internal server error"));
        }
        Ok(())
    }

    fn caller(state: &FakeState) -> ClientResult<User> {
        let sub = state
            .session
            .as_ref()
            .ok_or_else(|| api_error(401, "Unauthorized"))?
            .sub
            .clone();

        state
            .users
            .iter()
            .find(|user| user.auth0_id == sub)
            .cloned()
            .ok_or_else(|| api_error(404, "User not found"))
    }

    fn job_mut(state: &mut FakeState, id: Uuid) -> ClientResult<&mut Job> {
        state
            .jobs
            .iter_mut()
            .find(|job| job.id == id)
            .ok_or_else(|| api_error(404, "Job not found"))
    }
}

#[async_trait]
impl JobBoardApi for FakeApi {
    async fn check_auth(&self) -> ClientResult<AuthStatus> {
        self.record("check_auth", false)?;
        let user = self.state.lock().unwrap().session.clone();

        Ok(AuthStatus {
            is_authenticated: user.is_some(),
            user,
        })
    }

    async fn user_profile(&self, auth0_id: &str) -> ClientResult<User> {
        self.record("user_profile", false)?;

        self.state
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|user| user.auth0_id == auth0_id)
            .cloned()
            .ok_or_else(|| api_error(404, "User not found"))
    }

    async fn list_jobs(&self) -> ClientResult<Vec<Job>> {
        self.record("list_jobs", false)?;
        Ok(self.state.lock().unwrap().jobs.clone())
    }

    async fn user_jobs(&self, user_id: Uuid) -> ClientResult<Vec<Job>> {
        self.record("user_jobs", false)?;

        Ok(self
            .state
            .lock()
            .unwrap()
            .jobs
            .iter()
            .filter(|job| job.created_by.id == user_id)
            .cloned()
            .collect())
    }

    async fn search_jobs(&self, query: &SearchQuery) -> ClientResult<Vec<Job>> {
        self.record("search_jobs", false)?;
        let filter = JobFilter::from_query(query);

        Ok(self
            .state
            .lock()
            .unwrap()
            .jobs
            .iter()
            .filter(|job| filter.matches(job))
            .cloned()
            .collect())
    }

    async fn get_job(&self, id: Uuid) -> ClientResult<Job> {
        self.record("get_job", false)?;
        let mut state = self.state.lock().unwrap();

        Ok(Self::job_mut(&mut state, id)?.clone())
    }

    async fn create_job(&self, job: &CreateJobRequest) -> ClientResult<Job> {
        self.record("create_job", true)?;
        let creator = Self::caller(&self.state.lock().unwrap())?;
        let title = job
            .title
            .clone()
            .ok_or_else(|| api_error(400, "title is required"))?;

        Ok(self.add_job(&title, creator.id))
    }

    async fn like_job(&self, id: Uuid) -> ClientResult<Job> {
        self.record("like_job", true)?;
        let mut state = self.state.lock().unwrap();
        let user = Self::caller(&state)?;
        let job = Self::job_mut(&mut state, id)?;

        if job.is_liked_by(user.id) {
            job.likes.retain(|id| *id != user.id);
        } else {
            job.likes.push(user.id);
        }
        Ok(job.clone())
    }

    async fn apply_job(&self, id: Uuid) -> ClientResult<Job> {
        self.record("apply_job", true)?;
        let mut state = self.state.lock().unwrap();
        let user = Self::caller(&state)?;
        let job = Self::job_mut(&mut state, id)?;

        if job.has_applicant(user.id) {
            return Err(api_error(400, "Already applied for this job"));
        }
        job.applicants.push(user.id);
        Ok(job.clone())
    }

    async fn delete_job(&self, id: Uuid) -> ClientResult<MessageResponse> {
        self.record("delete_job", true)?;
        let mut state = self.state.lock().unwrap();
        Self::job_mut(&mut state, id)?;
        state.jobs.retain(|job| job.id != id);

        Ok(MessageResponse {
            message: "Job deleted".to_string(),
        })
    }
}

/// Profile accessor with a settable id
#[derive(Default)]
pub struct FixedProfile {
    id: Mutex<Option<Uuid>>,
}

impl FixedProfile {
    pub fn new(id: Option<Uuid>) -> Arc<Self> {
        Arc::new(Self { id: Mutex::new(id) })
    }

    pub fn set(&self, id: Option<Uuid>) {
        *self.id.lock().unwrap() = id;
    }
}

#[async_trait]
impl ProfileAccessor for FixedProfile {
    async fn profile_id(&self) -> Option<Uuid> {
        *self.id.lock().unwrap()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Success(String),
    Error(String),
}

/// Notifier that keeps every message
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<Notification> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(Notification::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(Notification::Error(message.to_string()));
    }
}

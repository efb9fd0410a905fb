//! HTTP access to the job board API

use async_trait::async_trait;
use common::models::{AuthStatus, CreateJobRequest, Job, MessageResponse, SearchQuery, User};
use reqwest::{
    Client, IntoUrl, Response,
    header::{COOKIE, HeaderMap, HeaderValue},
};
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use crate::{
    config::ClientConfig,
    error::{ClientError, ClientResult},
};

/// Calls the stores make against the service
#[async_trait]
pub trait JobBoardApi: Send + Sync {
    async fn check_auth(&self) -> ClientResult<AuthStatus>;
    /// Profile by external subject id
    async fn user_profile(&self, auth0_id: &str) -> ClientResult<User>;
    async fn list_jobs(&self) -> ClientResult<Vec<Job>>;
    async fn user_jobs(&self, user_id: Uuid) -> ClientResult<Vec<Job>>;
    async fn search_jobs(&self, query: &SearchQuery) -> ClientResult<Vec<Job>>;
    async fn get_job(&self, id: Uuid) -> ClientResult<Job>;
    async fn create_job(&self, job: &CreateJobRequest) -> ClientResult<Job>;
    async fn like_job(&self, id: Uuid) -> ClientResult<Job>;
    async fn apply_job(&self, id: Uuid) -> ClientResult<Job>;
    async fn delete_job(&self, id: Uuid) -> ClientResult<MessageResponse>;
}

/// reqwest-backed [`JobBoardApi`]
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = &config.session_cookie {
            let value = HeaderValue::from_str(cookie)
                .map_err(|e| ClientError::Config(format!("Invalid session cookie: {}", e)))?;
            headers.insert(COOKIE, value);
        }

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn read<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let message = match response.json::<MessageResponse>().await {
                Ok(body) => body.message,
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string(),
            };
            debug!("API returned {}: {}", status, message);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.fetch(self.config.endpoint(path)).await
    }

    async fn fetch<T: DeserializeOwned>(&self, url: impl IntoUrl) -> ClientResult<T> {
        let response = self.http.get(url).send().await?;
        Self::read(response).await
    }

    async fn put<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.http.put(self.config.endpoint(path)).send().await?;
        Self::read(response).await
    }
}

#[async_trait]
impl JobBoardApi for ApiClient {
    async fn check_auth(&self) -> ClientResult<AuthStatus> {
        self.get("/check-auth").await
    }

    async fn user_profile(&self, auth0_id: &str) -> ClientResult<User> {
        let url = self.config.endpoint_with_segment("/user", auth0_id)?;
        self.fetch(url).await
    }

    async fn list_jobs(&self) -> ClientResult<Vec<Job>> {
        self.get("/jobs").await
    }

    async fn user_jobs(&self, user_id: Uuid) -> ClientResult<Vec<Job>> {
        self.get(&format!("/jobs/user/{}", user_id)).await
    }

    async fn search_jobs(&self, query: &SearchQuery) -> ClientResult<Vec<Job>> {
        let response = self
            .http
            .get(self.config.endpoint("/jobs/search"))
            .query(query)
            .send()
            .await?;
        Self::read(response).await
    }

    async fn get_job(&self, id: Uuid) -> ClientResult<Job> {
        self.get(&format!("/jobs/{}", id)).await
    }

    async fn create_job(&self, job: &CreateJobRequest) -> ClientResult<Job> {
        let response = self
            .http
            .post(self.config.endpoint("/jobs"))
            .json(job)
            .send()
            .await?;
        Self::read(response).await
    }

    async fn like_job(&self, id: Uuid) -> ClientResult<Job> {
        self.put(&format!("/jobs/like/{}", id)).await
    }

    async fn apply_job(&self, id: Uuid) -> ClientResult<Job> {
        self.put(&format!("/jobs/apply/{}", id)).await
    }

    async fn delete_job(&self, id: Uuid) -> ClientResult<MessageResponse> {
        let response = self
            .http
            .delete(self.config.endpoint(&format!("/jobs/{}", id)))
            .send()
            .await?;
        Self::read(response).await
    }
}

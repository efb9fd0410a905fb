//! Shared harness for API integration tests
#![allow(dead_code)]

use api::{AppState, ServiceConfig, config::StorageBackend, create_router};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode, get_current_timestamp};
use serde_json::{Value, json};
use tower::ServiceExt;

pub const SECRET: &str = "integration-test-secret";
pub const CLIENT_URL: &str = "http://localhost:3000";

pub fn test_config() -> ServiceConfig {
    ServiceConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        client_url: CLIENT_URL.to_string(),
        api_prefix: "/api/v1".to_string(),
        session_cookie: "appSession".to_string(),
        session_secret: SECRET.to_string(),
        session_issuer: None,
        session_audience: None,
        storage: StorageBackend::Memory,
    }
}

/// Signed session token for an identity
pub fn session_for(sub: &str, name: &str) -> String {
    let claims = json!({
        "sub": sub,
        "email": format!("{}@example.com", name.to_lowercase()),
        "name": name,
        "picture": format!("https://cdn.example.com/{}.png", name.to_lowercase()),
        "exp": get_current_timestamp() + 3600,
    });

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub allow_origin: Option<String>,
    pub body: Vec<u8>,
}

impl TestResponse {
    async fn read(response: Response) -> Self {
        let status = response.status();
        let header_value = |name: header::HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };
        let location = header_value(header::LOCATION);
        let allow_origin = header_value(header::ACCESS_CONTROL_ALLOW_ORIGIN);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();

        Self {
            status,
            location,
            allow_origin,
            body,
        }
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).unwrap()
    }

    pub fn message(&self) -> String {
        self.json()["message"].as_str().unwrap_or_default().to_string()
    }
}

/// Router over a fresh in-memory store
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self {
            router: create_router(AppState::in_memory(test_config())),
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        session: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = session {
            builder = builder.header(header::COOKIE, format!("appSession={}", token));
        }

        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        self.send(builder.body(body).unwrap()).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();

        TestResponse::read(response).await
    }

    pub async fn get(&self, uri: &str, session: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, session, None).await
    }

    /// Log in through the root endpoint so the local user exists
    pub async fn sign_in(&self, sub: &str, name: &str) -> String {
        let token = session_for(sub, name);
        let response = self.get("/", Some(&token)).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER);
        token
    }

    /// Internal id of a provisioned user
    pub async fn user_id(&self, sub: &str, session: &str) -> String {
        let response = self.get(&format!("/api/v1/user/{}", sub), Some(session)).await;
        assert_eq!(response.status, StatusCode::OK);
        response.json()["_id"].as_str().unwrap().to_string()
    }

    pub async fn create_job(&self, session: &str, payload: Value) -> TestResponse {
        self.request(Method::POST, "/api/v1/jobs", Some(session), Some(payload))
            .await
    }
}

pub fn job_payload(title: &str, location: &str, tags: &[&str]) -> Value {
    json!({
        "title": title,
        "description": "Build and run the platform",
        "location": location,
        "salary": 70000,
        "jobType": ["Full Time"],
        "tags": tags,
        "skills": ["rust", "postgres"],
    })
}

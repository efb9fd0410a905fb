//! Application state shared across handlers

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    config::ServiceConfig,
    repositories::{JobRepository, JobStore, MemoryStore, UserDirectory, UserRepository},
    session::{JwtSessionVerifier, SessionVerifier},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub user_repository: Arc<dyn UserDirectory>,
    pub job_repository: Arc<dyn JobStore>,
    pub session_verifier: Arc<dyn SessionVerifier>,
    pub config: Arc<ServiceConfig>,
}

impl AppState {
    /// State backed by PostgreSQL
    pub fn with_postgres(pool: PgPool, config: ServiceConfig) -> Self {
        Self {
            user_repository: Arc::new(UserRepository::new(pool.clone())),
            job_repository: Arc::new(JobRepository::new(pool)),
            session_verifier: Arc::new(JwtSessionVerifier::from_config(&config)),
            config: Arc::new(config),
        }
    }

    /// State backed by a single process-local store
    pub fn in_memory(config: ServiceConfig) -> Self {
        let store = MemoryStore::new();

        Self {
            user_repository: Arc::new(store.clone()),
            job_repository: Arc::new(store),
            session_verifier: Arc::new(JwtSessionVerifier::from_config(&config)),
            config: Arc::new(config),
        }
    }
}

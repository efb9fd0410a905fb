//! Client state layer for the job board API
//!
//! [`ApiClient`] speaks HTTP to the service. [`AuthStore`] tracks the session
//! and the caller's profile; [`JobsStore`] keeps job lists in sync and takes
//! the profile through [`ProfileAccessor`] so the two stores are wired
//! together explicitly by whoever builds them.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use client::{ApiClient, AuthStore, ClientConfig, JobsStore, TracingNotifier};
//!
//! # async fn run() -> Result<(), client::ClientError> {
//! let config = ClientConfig::new("http://localhost:3001").with_session_cookie("appSession=...");
//! let api = Arc::new(ApiClient::new(config)?);
//!
//! let auth = Arc::new(AuthStore::new(api.clone()));
//! auth.mount().await;
//!
//! let jobs = JobsStore::new(api, auth.clone(), Arc::new(TracingNotifier));
//! jobs.mount().await;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth_store;
pub mod config;
pub mod error;
pub mod jobs_store;
pub mod notifier;

#[cfg(test)]
mod testing;

pub use api::{ApiClient, JobBoardApi};
pub use auth_store::{AuthSnapshot, AuthStore, ProfileAccessor};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use jobs_store::{JobsSnapshot, JobsStore};
pub use notifier::{Notifier, TracingNotifier};

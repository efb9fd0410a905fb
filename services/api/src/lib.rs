//! Job board API service

pub mod config;
pub mod error;
pub mod middleware;
pub mod repositories;
pub mod routes;
pub mod session;
pub mod state;
pub mod validation;

pub use config::ServiceConfig;
pub use routes::create_router;
pub use state::AppState;

/// Schema migrations for the users and jobs tables
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

//! Common library for the job board
//!
//! This crate provides functionality shared by the API service and the
//! client library: the wire models exchanged over HTTP, PostgreSQL
//! connectivity and the database error type.

pub mod database;
pub mod error;
pub mod models;


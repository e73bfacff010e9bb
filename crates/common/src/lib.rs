//! Shared utilities, configuration, and error handling for the media studio core
//!
//! This crate provides common functionality used across the studio crates:
//! - Configuration management following 12-factor principles
//! - Error types, stable error codes and HTTP mapping
//! - Repository error types shared by the metadata stores
//! - Tracing subscriber initialisation

pub mod config;
pub mod db;
pub mod error;
pub mod telemetry;

pub use config::{Config, LogFormat};
pub use db::RepositoryError;
pub use error::{Error, ErrorCode, Result};

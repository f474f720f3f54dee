//! # Listwire Config
//!
//! Configuration management for Listwire.
//! Supports layered configuration from files and environment variables,
//! validated before any request is sent.

mod app_config;
mod loader;
mod validation;

pub use app_config::*;
pub use loader::*;
pub use validation::*;

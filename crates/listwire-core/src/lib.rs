//! # Listwire Core
//!
//! Core types, traits, and error definitions for Listwire.
//! This crate holds the subscriber-list domain model shared by the
//! HTTP client, the configuration layer and the import tool.

pub mod error;
pub mod id;
pub mod result;
pub mod subscriber;
pub mod traits;

pub use error::*;
pub use id::*;
pub use result::*;
pub use subscriber::*;
pub use traits::*;

//! # Listwire CLI
//!
//! Import runs against a subscriber-list service: resolve (or create) the
//! target group, then submit subscribers in bulk or one at a time.

pub mod import;
pub mod logging;

pub use import::*;

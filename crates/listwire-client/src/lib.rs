//! # Listwire Client
//!
//! HTTP/JSON client for the MailerLite subscriber API.
//!
//! [`MailerLiteClient`] implements
//! [`SubscriberListService`](listwire_core::SubscriberListService) with typed
//! results, and also exposes the sentinel forms (`Option` / `bool`) that log
//! the failure instead of returning it.

mod client;
mod wire;

pub use client::*;

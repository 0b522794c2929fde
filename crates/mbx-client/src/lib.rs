//! HTTP client for the mailbox platform API.
//!
//! [`ApiClient`] owns the request lifecycle: it attaches the active
//! session's bearer credential before every request and tears the session
//! down when the server answers 401. The typed endpoint wrappers in
//! [`mailbox`] and [`admin`] all route through it.

pub mod admin;
pub mod client;
pub mod error;
pub mod mailbox;

pub use client::{ApiClient, Navigator, NoopNavigator};
pub use error::ApiError;

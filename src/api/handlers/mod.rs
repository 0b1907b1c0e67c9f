//! API request handlers.
//!
//! One module per resource: document upload, question answering, session
//! inspection/teardown, and health.

pub mod ask;
pub mod documents;
pub mod health;
pub mod session;

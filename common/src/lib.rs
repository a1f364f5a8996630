//! Shared types for the leakscope client.
//!
//! This crate contains pure data structures with no business logic:
//! error provenance, HTTP status categorization, and the redacted
//! credential wrapper used for the backend auth token.
//!
//! ## Architecture
//!
//! - **common** (this crate): Pure shared types
//! - **client-core**: Session, token store, request pipeline, API logic
//! - **leakscope**: CLI application wiring everything together

pub mod error;
pub mod http_status;
pub mod token;

pub use error::location::ErrorLocation;
pub use error::redact::RedactError;
pub use http_status::HttpStatusCode;
pub use token::RedactedToken;

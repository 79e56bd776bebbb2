//! Application layer: typed API access, services, the query cache behind the
//! data hooks, the quest form session, and the sign-in session.

pub mod api;
pub mod auth;
pub mod dto;
pub mod error;
pub mod form;
pub mod query;
pub mod services;

pub use error::{ServiceError, DEFAULT_REQUEST_TIMEOUT_MS};

//! Application services
//!
//! Services implement the client's use cases on top of the typed [`Api`]
//! wrapper and the shared [`QueryClient`]. They depend on port traits only.
//!
//! [`Api`]: crate::application::api::Api
//! [`QueryClient`]: crate::application::query::QueryClient

pub mod quest_service;
pub mod server_service;

pub use quest_service::QuestService;
pub use server_service::{ServerResource, ServerService};

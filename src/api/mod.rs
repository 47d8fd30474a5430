//! HTTP adapter over the controller.
//!
//! Every route lives under `/v1/ply`. Handlers translate between JSON (or
//! multipart) and controller calls and carry no business rules of their
//! own. Request middleware: CORS → access log → body limit → handler.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{start_api_server, ApiServer, ApiSession, ServerError};
pub use types::ApiContext;

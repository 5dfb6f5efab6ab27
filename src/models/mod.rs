//! Models Module
//!
//! Request and response DTOs for the HTTP API.

pub mod requests;
pub mod responses;

pub use requests::SetRequest;
pub use responses::{ErrorResponse, GetResponse, HealthResponse, SetResponse, StatsResponse};

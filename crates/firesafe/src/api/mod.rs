//! HTTP client for the remote fire-safety API.

mod client;
pub mod wire;

pub use client::{ApiClient, ApiError};
pub use wire::WireError;

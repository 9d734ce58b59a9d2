pub mod api;
pub mod config;
pub mod error;
pub mod reports;
pub mod session;
pub mod telemetry;
pub mod workflows;

//! Infrastructure adapters: backend HTTP access and telemetry.

pub mod error;
pub mod http;
pub mod telemetry;

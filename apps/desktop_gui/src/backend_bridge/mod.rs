//! Backend worker: owns the tokio runtime and the prediction client.

pub mod commands;
pub mod runtime;

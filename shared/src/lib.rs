//! Shared types and models for the Kisan Setu weather advisory service
//!
//! This crate holds the pure parts of the pipeline: the domain models, the
//! daily forecast aggregation and the farming advisory rules. It is used by
//! the backend and, through WASM, by the mobile client for offline advice.

pub mod advisory;
pub mod forecast;
pub mod models;
pub mod types;
pub mod validation;

pub use advisory::*;
pub use forecast::*;
pub use models::*;
pub use types::*;
pub use validation::*;

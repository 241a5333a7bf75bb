//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod dataset;
pub mod error;
pub mod services;

pub use dataset::parse_csv;
pub use error::{ApplicationError, ApplicationResult, IoResultExt};

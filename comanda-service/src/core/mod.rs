//! Core module - configuration and service errors
//!
//! - [`Config`] - environment driven configuration
//! - [`ServiceError`] - setup errors

pub mod config;
pub mod error;

pub use config::Config;
pub use error::{ServiceError, ServiceResult};

//! Shared types for the Comanda print stack
//!
//! Receipt payloads, print configuration and print results used by both
//! the ESC/POS formatter and the print dispatcher.

pub mod models;

// Re-exports
pub use models::*;
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};

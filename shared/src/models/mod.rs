//! Data models
//!
//! Wire format is camelCase JSON, matching what the storefront sends.

pub mod print;
pub mod print_config;
pub mod receipt;
pub mod store_info;

// Re-exports
pub use print::*;
pub use print_config::*;
pub use receipt::*;
pub use store_info::*;

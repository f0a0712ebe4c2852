//! Utilities - logging, money and time formatting

pub mod logger;
pub mod money;
pub mod time;

pub use money::{format_amount, format_eur};
pub use time::{format_time, format_timestamp};

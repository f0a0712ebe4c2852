//! Comanda Print - print method selection for the restaurant storefront
//!
//! # Overview
//!
//! Order tickets (comandas) and table bills leave through exactly one of
//! three channels: a full page A4 document, the PrintNode cloud API, or a
//! locally attached USB thermal printer.
//!
//! # Module structure
//!
//! ```text
//! comanda-service/src/
//! ├── core/          # Config, errors
//! ├── printing/      # Capabilities, resolver, formatter, channels, dispatcher, notifier
//! └── utils/         # Logging, money and time formatting
//! ```

pub mod core;
pub mod printing;
pub mod utils;

pub use core::{Config, ServiceError, ServiceResult};
pub use printing::{
    ConnectOutcome, Notifier, PrintDispatcher, is_channel_available, resolve_available_methods,
};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env`, read the configuration and start logging
pub fn setup_environment() -> ServiceResult<Config> {
    // A missing .env file is fine
    let _ = dotenv::dotenv();

    let config = Config::from_env()?;
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    Ok(config)
}

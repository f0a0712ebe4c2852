use std::path::PathBuf;
use std::time::Duration;

use chrono_tz::Tz;

use super::error::{ServiceError, ServiceResult};

/// Print service configuration
///
/// # Environment variables
///
/// Every field can be overridden from the environment:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | ENVIRONMENT | development | Runtime environment |
/// | LOG_LEVEL | info | Log level or filter directive |
/// | LOG_DIR | (unset) | Directory for daily rolling log files |
/// | PRINTNODE_API_URL | https://api.printnode.com | PrintNode API base URL |
/// | PRINTNODE_API_KEY | (unset) | PrintNode API key |
/// | PRINTNODE_TIMEOUT_MS | 15000 | PrintNode request timeout (ms) |
/// | USB_DEVICE_PATH | /dev/usb/lp0 | USB printer device node |
/// | USB_WRITE_TIMEOUT_MS | 5000 | USB open/write timeout (ms) |
/// | PRINT_EMBEDDED | false | Running embedded inside a host shell |
/// | SPOOL_DIR | ./spool | Output directory for A4 documents |
/// | TIMEZONE | Europe/Madrid | Timezone for receipt timestamps |
///
/// # Example
///
/// ```ignore
/// PRINTNODE_API_KEY=xxx USB_DEVICE_PATH=/dev/ttyUSB0 comanda-print capabilities
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,

    // === PrintNode ===
    pub printnode_api_url: String,
    pub printnode_api_key: Option<String>,
    pub printnode_timeout_ms: u64,

    // === USB ===
    pub usb_device_path: PathBuf,
    pub usb_write_timeout_ms: u64,
    /// Embedded hosts own device access, so USB is never offered there
    pub embedded: bool,

    // === A4 ===
    pub spool_dir: PathBuf,

    pub timezone: Tz,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to defaults; malformed values are errors.
    pub fn from_env() -> ServiceResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> ServiceResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timezone = match get("TIMEZONE") {
            Some(tz) => tz
                .parse::<Tz>()
                .map_err(|_| ServiceError::Config(format!("Invalid TIMEZONE: {}", tz)))?,
            None => chrono_tz::Europe::Madrid,
        };

        Ok(Self {
            environment: get("ENVIRONMENT").unwrap_or_else(|| "development".into()),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: get("LOG_DIR"),
            printnode_api_url: get("PRINTNODE_API_URL")
                .unwrap_or_else(|| "https://api.printnode.com".into())
                .trim_end_matches('/')
                .to_string(),
            printnode_api_key: get("PRINTNODE_API_KEY"),
            printnode_timeout_ms: parse_or(
                get("PRINTNODE_TIMEOUT_MS"),
                "PRINTNODE_TIMEOUT_MS",
                15000,
            )?,
            usb_device_path: get("USB_DEVICE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("/dev/usb/lp0")),
            usb_write_timeout_ms: parse_or(
                get("USB_WRITE_TIMEOUT_MS"),
                "USB_WRITE_TIMEOUT_MS",
                5000,
            )?,
            embedded: parse_or(get("PRINT_EMBEDDED"), "PRINT_EMBEDDED", false)?,
            spool_dir: get("SPOOL_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./spool")),
            timezone,
        })
    }

    pub fn printnode_timeout(&self) -> Duration {
        Duration::from_millis(self.printnode_timeout_ms)
    }

    pub fn usb_write_timeout(&self) -> Duration {
        Duration::from_millis(self.usb_write_timeout_ms)
    }

    /// Whether running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn parse_or<T: std::str::FromStr>(
    value: Option<String>,
    key: &str,
    default: T,
) -> ServiceResult<T> {
    match value {
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| ServiceError::Config(format!("Invalid {}: {}", key, v))),
        None => Ok(default),
    }
}

//! Per-attempt print configuration

use serde::{Deserialize, Serialize};

use super::print::PaperProfile;
use super::store_info::StoreInfo;

/// Retry budget for cloud jobs when the caller does not set one
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Configuration for one print attempt
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintConfig {
    #[serde(default)]
    pub printer_width: PaperProfile,
    /// PrintNode printer id; blank means the cloud channel is not configured
    pub print_node_printer_id: Option<String>,
    pub store_id: Option<String>,
    pub order_id: Option<String>,
    /// Display name of the printer, for job traceability
    pub printer_name: Option<String>,
    pub max_retries: Option<u32>,
    /// Logo shown on full page documents
    pub logo_url: Option<String>,
    pub store_info: Option<StoreInfo>,
}

impl PrintConfig {
    pub fn new(printer_width: PaperProfile) -> Self {
        Self {
            printer_width,
            ..Default::default()
        }
    }

    /// PrintNode printer id, if one is configured
    pub fn cloud_printer_id(&self) -> Option<&str> {
        self.print_node_printer_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    pub fn has_cloud_channel(&self) -> bool {
        self.cloud_printer_id().is_some()
    }

    pub fn retry_budget(&self) -> u32 {
        self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES)
    }
}

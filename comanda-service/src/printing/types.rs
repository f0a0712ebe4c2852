//! Channel-level printing types

use serde::{Deserialize, Serialize};

/// Traceability fields attached to a cloud print job
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMeta {
    pub store_id: Option<String>,
    pub order_id: Option<String>,
    pub order_number: Option<u64>,
    pub printer_name: Option<String>,
    /// Additional attempts after the first one
    pub max_retries: u32,
}

/// Outcome of a cloud job submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudSubmission {
    pub success: bool,
    pub job_id: Option<i64>,
    pub error: Option<String>,
}

impl CloudSubmission {
    pub fn accepted(job_id: i64) -> Self {
        Self {
            success: true,
            job_id: Some(job_id),
            error: None,
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            job_id: None,
            error: Some(error.into()),
        }
    }
}

/// Outcome of connecting the local USB printer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConnectOutcome {
    pub fn connected() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

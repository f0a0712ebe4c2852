//! Print channel, paper profile and print result

use serde::{Deserialize, Serialize};
use std::fmt;

/// Output channel used for a print attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrintMethod {
    /// Locally attached thermal printer (serial/USB)
    #[serde(rename = "usb")]
    Usb,
    /// PrintNode cloud print API
    #[serde(rename = "printnode")]
    PrintNode,
    /// Full page document through the page renderer
    #[serde(rename = "a4")]
    A4,
}

impl PrintMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrintMethod::Usb => "usb",
            PrintMethod::PrintNode => "printnode",
            PrintMethod::A4 => "a4",
        }
    }
}

impl fmt::Display for PrintMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Paper / output profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaperProfile {
    /// 58mm thermal roll
    #[serde(rename = "58mm")]
    Mm58,
    /// 80mm thermal roll
    #[default]
    #[serde(rename = "80mm")]
    Mm80,
    /// Full page (A4) document
    #[serde(rename = "a4")]
    A4,
}

impl PaperProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaperProfile::Mm58 => "58mm",
            PaperProfile::Mm80 => "80mm",
            PaperProfile::A4 => "a4",
        }
    }

    pub fn is_full_page(&self) -> bool {
        matches!(self, PaperProfile::A4)
    }

    /// Characters per line on thermal paper, `None` for the full page profile
    ///
    /// - 58mm paper: 32 characters
    /// - 80mm paper: 48 characters
    pub fn columns(&self) -> Option<usize> {
        match self {
            PaperProfile::Mm58 => Some(32),
            PaperProfile::Mm80 => Some(48),
            PaperProfile::A4 => None,
        }
    }
}

impl fmt::Display for PaperProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaperProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "58mm" | "58" => Ok(PaperProfile::Mm58),
            "80mm" | "80" => Ok(PaperProfile::Mm80),
            "a4" => Ok(PaperProfile::A4),
            other => Err(format!("Unknown paper profile: {}", other)),
        }
    }
}

/// Outcome of one dispatch call
///
/// `method` is the channel that was attempted, also on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintResult {
    pub success: bool,
    pub method: PrintMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<i64>,
}

impl PrintResult {
    pub fn succeeded(method: PrintMethod) -> Self {
        Self {
            success: true,
            method,
            error: None,
            job_id: None,
        }
    }

    pub fn failed(method: PrintMethod, error: impl Into<String>) -> Self {
        Self {
            success: false,
            method,
            error: Some(error.into()),
            job_id: None,
        }
    }

    pub fn with_job_id(mut self, job_id: Option<i64>) -> Self {
        self.job_id = job_id;
        self
    }
}

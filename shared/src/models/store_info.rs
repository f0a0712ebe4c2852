//! Store Info Model

use serde::{Deserialize, Serialize};

/// Store branding printed on receipt headers and footers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    /// Tax identification number (NIF)
    pub nif: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    /// Footer line, e.g. "¡Gracias por su visita!"
    pub footer_message: Option<String>,
    /// Small print under the footer
    pub footer_note: Option<String>,
}

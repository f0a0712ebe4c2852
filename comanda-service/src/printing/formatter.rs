//! Receipt formatter
//!
//! One seam for everything the dispatcher needs to turn a payload into
//! printable output: ESC/POS bytes for thermal channels and HTML markup for
//! full page printing.

use chrono_tz::Tz;
use shared::models::{OrderReceipt, PaperProfile, StoreInfo, TableBill};

use super::markup::MarkupRenderer;
use super::renderer::{ComandaRenderer, TableBillRenderer};

/// Column count used when a full page profile reaches the thermal path
const FALLBACK_COLUMNS: usize = 48;

/// Builds printable output for orders and table bills
pub trait ReceiptFormatter: Send + Sync {
    /// ESC/POS byte stream for an order ticket
    fn build_thermal_bytes(&self, order: &OrderReceipt, profile: PaperProfile) -> Vec<u8>;

    /// Full page document for an order ticket
    fn build_full_page_markup(
        &self,
        order: &OrderReceipt,
        logo_url: Option<&str>,
        store: Option<&StoreInfo>,
    ) -> String;

    /// ESC/POS byte stream for a table bill
    fn build_table_bill_thermal_bytes(&self, bill: &TableBill, profile: PaperProfile) -> Vec<u8>;

    /// Full page document for a table bill
    fn build_table_bill_markup(
        &self,
        bill: &TableBill,
        logo_url: Option<&str>,
        store: Option<&StoreInfo>,
    ) -> String;
}

/// Formatter backed by the ESC/POS and HTML renderers
#[derive(Debug, Clone, Copy)]
pub struct EscPosReceiptFormatter {
    timezone: Tz,
}

impl EscPosReceiptFormatter {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    fn columns(profile: PaperProfile) -> usize {
        profile.columns().unwrap_or(FALLBACK_COLUMNS)
    }
}

impl Default for EscPosReceiptFormatter {
    fn default() -> Self {
        Self::new(chrono_tz::Europe::Madrid)
    }
}

impl ReceiptFormatter for EscPosReceiptFormatter {
    fn build_thermal_bytes(&self, order: &OrderReceipt, profile: PaperProfile) -> Vec<u8> {
        ComandaRenderer::new(Self::columns(profile), self.timezone).render(order)
    }

    fn build_full_page_markup(
        &self,
        order: &OrderReceipt,
        logo_url: Option<&str>,
        store: Option<&StoreInfo>,
    ) -> String {
        MarkupRenderer::new(self.timezone).render_order(order, logo_url, store)
    }

    fn build_table_bill_thermal_bytes(&self, bill: &TableBill, profile: PaperProfile) -> Vec<u8> {
        TableBillRenderer::new(Self::columns(profile), self.timezone).render(bill)
    }

    fn build_table_bill_markup(
        &self,
        bill: &TableBill,
        logo_url: Option<&str>,
        store: Option<&StoreInfo>,
    ) -> String {
        MarkupRenderer::new(self.timezone).render_table_bill(bill, logo_url, store)
    }
}

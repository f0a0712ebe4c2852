//! Receipt payloads
//!
//! Immutable snapshots built by the caller right before a print attempt.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Extra added to a line item (e.g. "Extra queso")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemExtra {
    pub name: String,
    #[serde(default)]
    pub price: Decimal,
}

/// One line of a receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub total: Decimal,
    #[serde(default)]
    pub extras: Vec<ItemExtra>,
    pub note: Option<String>,
}

/// How the order reaches the customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Delivery,
    #[default]
    Pickup,
    DineIn,
}

impl ServiceType {
    /// Label printed on tickets
    pub fn label(&self) -> &'static str {
        match self {
            ServiceType::Delivery => "A DOMICILIO",
            ServiceType::Pickup => "PARA RECOGER",
            ServiceType::DineIn => "EN MESA",
        }
    }
}

/// Order ticket (comanda)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub order_id: String,
    pub order_number: u64,
    #[serde(default)]
    pub service_type: ServiceType,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub delivery_address: Option<String>,
    pub table_label: Option<String>,
    pub items: Vec<LineItem>,
    pub subtotal: Decimal,
    pub delivery_fee: Option<Decimal>,
    pub discount: Option<Decimal>,
    pub total: Decimal,
    pub payment_method: Option<String>,
    /// Cash amount the customer will pay with (delivery change)
    pub change_for: Option<Decimal>,
    pub notes: Option<String>,
    /// Unix millis
    pub created_at: i64,
}

/// One payment of a (possibly split) table bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSplit {
    pub method: String,
    pub amount: Decimal,
}

/// Table bill (cuenta de mesa)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableBill {
    pub table_label: String,
    pub table_id: Option<String>,
    /// Unix millis
    pub opened_at: i64,
    pub closed_at: Option<i64>,
    pub guest_count: Option<u32>,
    pub items: Vec<LineItem>,
    pub subtotal: Decimal,
    pub service_charge: Option<Decimal>,
    pub discount: Option<Decimal>,
    pub total: Decimal,
    #[serde(default)]
    pub payments: Vec<PaymentSplit>,
}

impl TableBill {
    pub fn paid_amount(&self) -> Decimal {
        self.payments.iter().map(|p| p.amount).sum()
    }

    /// Positive when the bill is not fully paid yet
    pub fn outstanding(&self) -> Decimal {
        self.total - self.paid_amount()
    }
}

/// Either receipt kind, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReceiptPayload {
    Order(OrderReceipt),
    TableBill(TableBill),
}

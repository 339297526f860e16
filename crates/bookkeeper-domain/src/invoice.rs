//! Domain models for invoices, their line items and update payloads.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tax rate applied when an invoice is created without one.
pub const DEFAULT_TAX_RATE: f64 = 0.10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    pub id: String,
    /// Raw calendar date as stored; may carry a time component or be absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub customer_id: String,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,
    #[serde(default)]
    pub tax_amount: f64,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub status: InvoiceStatus,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<InvoiceKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_info: Option<Value>,
}

fn default_tax_rate() -> f64 {
    DEFAULT_TAX_RATE
}

impl Invoice {
    pub fn is_paid(&self) -> bool {
        self.status == InvoiceStatus::Paid
    }

    /// Derived amounts currently stored on the invoice.
    pub fn totals(&self) -> InvoiceTotals {
        InvoiceTotals {
            subtotal: self.subtotal,
            tax_amount: self.tax_amount,
            total: self.total,
        }
    }

    pub fn set_totals(&mut self, totals: InvoiceTotals) {
        self.subtotal = totals.subtotal;
        self.tax_amount = totals.tax_amount;
        self.total = totals.total;
    }
}

/// A single billed line. Both numeric fields are required for totals to be computed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
}

impl LineItem {
    pub fn new(quantity: f64, unit_price: f64) -> Self {
        Self {
            description: None,
            quantity: Some(quantity),
            unit_price: Some(unit_price),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct InvoiceTotals {
    pub subtotal: f64,
    pub tax_amount: f64,
    pub total: f64,
}

/// Payment state of an invoice. Unknown labels are preserved verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InvoiceStatus {
    #[default]
    Pending,
    Paid,
    Other(String),
}

impl From<String> for InvoiceStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => InvoiceStatus::Pending,
            "paid" => InvoiceStatus::Paid,
            _ => InvoiceStatus::Other(value),
        }
    }
}

impl From<InvoiceStatus> for String {
    fn from(status: InvoiceStatus) -> Self {
        status.to_string()
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvoiceStatus::Pending => f.write_str("pending"),
            InvoiceStatus::Paid => f.write_str("paid"),
            InvoiceStatus::Other(label) => f.write_str(label),
        }
    }
}

/// Free-text income/expense classification carried in the `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InvoiceKind {
    Income,
    Expense,
    Other(String),
}

impl From<String> for InvoiceKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "income" => InvoiceKind::Income,
            "expense" => InvoiceKind::Expense,
            _ => InvoiceKind::Other(value),
        }
    }
}

impl From<InvoiceKind> for String {
    fn from(kind: InvoiceKind) -> Self {
        kind.to_string()
    }
}

impl fmt::Display for InvoiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvoiceKind::Income => f.write_str("income"),
            InvoiceKind::Expense => f.write_str("expense"),
            InvoiceKind::Other(label) => f.write_str(label),
        }
    }
}

/// Fields accepted when creating an invoice.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InvoiceDraft {
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<LineItem>>,
    #[serde(default)]
    pub tax_rate: Option<f64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub status: Option<InvoiceStatus>,
    #[serde(rename = "type", default)]
    pub kind: Option<InvoiceKind>,
    #[serde(default)]
    pub payment_date: Option<String>,
    #[serde(default)]
    pub payment_info: Option<Value>,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InvoiceUpdate {
    #[serde(default)]
    pub items: Option<Vec<LineItem>>,
    #[serde(default)]
    pub tax_rate: Option<f64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub status: Option<InvoiceStatus>,
    #[serde(rename = "type", default)]
    pub kind: Option<InvoiceKind>,
    #[serde(default)]
    pub payment_date: Option<String>,
    #[serde(default)]
    pub payment_info: Option<Value>,
}

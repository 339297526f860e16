//! Non-fatal data-quality checks over a snapshot.

use std::{collections::HashSet, fmt};

use serde::Serialize;

use crate::{compute_totals, invoice_date, Snapshot};

const TOTALS_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    UnusableDate,
    UnknownCustomer,
    InvalidLineItem,
    TaxRateOutOfRange,
    TotalsMismatch,
    IncompleteCustomer,
}

impl WarningKind {
    /// Which table the flagged record lives in.
    pub fn record(self) -> &'static str {
        match self {
            WarningKind::IncompleteCustomer => "customer",
            _ => "invoice",
        }
    }
}

/// A record the engine will skip or distrust, reported instead of failing.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DataQualityWarning {
    pub kind: WarningKind,
    /// Invoice id, or customer id for customer-level kinds.
    pub record_id: String,
    pub detail: String,
}

impl fmt::Display for DataQualityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.kind.record(), self.record_id, self.detail)
    }
}

/// Detects records that reports will skip or that break the totals invariant.
pub fn snapshot_warnings(snapshot: &Snapshot) -> Vec<DataQualityWarning> {
    let customer_ids: HashSet<_> = snapshot.customers.iter().map(|c| c.id.as_str()).collect();
    let mut warnings = Vec::new();
    let mut push = |kind, record_id: &str, detail: String| {
        warnings.push(DataQualityWarning {
            kind,
            record_id: record_id.to_string(),
            detail,
        })
    };

    for invoice in &snapshot.invoices {
        if let Err(err) = invoice_date(invoice) {
            push(WarningKind::UnusableDate, &invoice.id, err.to_string());
        }
        if !customer_ids.contains(invoice.customer_id.as_str()) {
            push(
                WarningKind::UnknownCustomer,
                &invoice.id,
                format!("references unknown customer `{}`", invoice.customer_id),
            );
        }
        if !(0.0..=1.0).contains(&invoice.tax_rate) {
            push(
                WarningKind::TaxRateOutOfRange,
                &invoice.id,
                format!("tax rate {} is outside [0, 1]", invoice.tax_rate),
            );
        }
        match compute_totals(&invoice.items, invoice.tax_rate) {
            Ok(expected) => {
                let stored = invoice.totals();
                let drift = (expected.subtotal - stored.subtotal)
                    .abs()
                    .max((expected.tax_amount - stored.tax_amount).abs())
                    .max((expected.total - stored.total).abs());
                if drift > TOTALS_TOLERANCE {
                    push(
                        WarningKind::TotalsMismatch,
                        &invoice.id,
                        format!(
                            "stored total {} differs from computed total {}",
                            stored.total, expected.total
                        ),
                    );
                }
            }
            Err(err) => push(WarningKind::InvalidLineItem, &invoice.id, err.to_string()),
        }
    }
    for customer in &snapshot.customers {
        if customer.has_incomplete_name() {
            push(
                WarningKind::IncompleteCustomer,
                &customer.id,
                format!("name is incomplete, rankings show `{}`", customer.display_name()),
            );
        }
    }
    warnings
}

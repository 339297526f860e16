//! Invoice total calculation and the create/update rules built on it.

use bookkeeper_domain::{
    Invoice, InvoiceDraft, InvoiceStatus, InvoiceTotals, InvoiceUpdate, LineItem,
};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{CoreError, CoreResult};

/// Derives subtotal, tax and total from line items. No rounding is applied.
pub fn compute_totals(items: &[LineItem], tax_rate: f64) -> CoreResult<InvoiceTotals> {
    let mut subtotal = 0.0;
    for (index, item) in items.iter().enumerate() {
        let quantity = item
            .quantity
            .ok_or_else(|| CoreError::Validation(format!("item {index} is missing quantity")))?;
        let unit_price = item
            .unit_price
            .ok_or_else(|| CoreError::Validation(format!("item {index} is missing unit_price")))?;
        subtotal += quantity * unit_price;
    }
    let tax_amount = subtotal * tax_rate;
    Ok(InvoiceTotals {
        subtotal,
        tax_amount,
        total: subtotal + tax_amount,
    })
}

/// Rejects tax rates outside `[0, 1]`.
pub fn validate_tax_rate(tax_rate: f64) -> CoreResult<()> {
    if !(0.0..=1.0).contains(&tax_rate) {
        return Err(CoreError::Validation(format!(
            "tax rate {tax_rate} must be between 0 and 1"
        )));
    }
    Ok(())
}

pub struct InvoiceService;

impl InvoiceService {
    /// Builds a new invoice from `draft`, applying `default_tax_rate` only when none is given.
    pub fn create(
        draft: InvoiceDraft,
        default_tax_rate: f64,
        today: NaiveDate,
    ) -> CoreResult<Invoice> {
        let customer_id = draft
            .customer_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| CoreError::Validation("customer_id is required".into()))?;
        let items = draft
            .items
            .ok_or_else(|| CoreError::Validation("items are required".into()))?;
        let tax_rate = draft.tax_rate.unwrap_or(default_tax_rate);
        validate_tax_rate(tax_rate)?;
        let totals = compute_totals(&items, tax_rate)?;

        let mut invoice = Invoice {
            id: Uuid::new_v4().to_string(),
            date: Some(draft.date.unwrap_or_else(|| today.to_string())),
            customer_id,
            items,
            subtotal: 0.0,
            tax_rate,
            tax_amount: 0.0,
            total: 0.0,
            status: draft.status.unwrap_or(InvoiceStatus::Pending),
            kind: draft.kind,
            payment_date: draft.payment_date,
            payment_info: draft.payment_info,
        };
        invoice.set_totals(totals);
        Ok(invoice)
    }

    /// Returns an updated copy of `invoice`.
    ///
    /// Derived amounts are recomputed only when `update.items` is present; a new
    /// `tax_rate` on its own is stored without touching subtotal, tax or total.
    pub fn apply_update(invoice: &Invoice, update: &InvoiceUpdate) -> CoreResult<Invoice> {
        let mut updated = invoice.clone();
        if let Some(tax_rate) = update.tax_rate {
            validate_tax_rate(tax_rate)?;
            updated.tax_rate = tax_rate;
        }
        if let Some(items) = &update.items {
            let totals = compute_totals(items, updated.tax_rate)?;
            updated.items = items.clone();
            updated.set_totals(totals);
        }
        if let Some(date) = &update.date {
            updated.date = Some(date.clone());
        }
        if let Some(customer_id) = &update.customer_id {
            updated.customer_id = customer_id.clone();
        }
        if let Some(status) = &update.status {
            updated.status = status.clone();
        }
        if let Some(kind) = &update.kind {
            updated.kind = Some(kind.clone());
        }
        if let Some(payment_date) = &update.payment_date {
            updated.payment_date = Some(payment_date.clone());
        }
        if let Some(payment_info) = &update.payment_info {
            updated.payment_info = Some(payment_info.clone());
        }
        Ok(updated)
    }
}

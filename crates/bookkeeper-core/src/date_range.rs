//! Date parsing, default reporting window and inclusive range filtering.

use bookkeeper_domain::{Invoice, ReportPeriod};
use chrono::{Datelike, Months, NaiveDate};

use crate::{CoreError, CoreResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive calendar range used by every report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> CoreResult<Self> {
        if start > end {
            return Err(CoreError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Window from the first day of the previous month to the last day of `today`'s month.
    pub fn default_for(today: NaiveDate) -> Self {
        let month_start = today.with_day(1).unwrap_or(today);
        let start = month_start
            .checked_sub_months(Months::new(1))
            .unwrap_or(month_start);
        let end = month_start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(today);
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Every calendar day in the range, both ends included.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    pub fn len_days(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    pub fn period(&self) -> ReportPeriod {
        ReportPeriod {
            start_date: self.start,
            end_date: self.end,
        }
    }
}

/// Parses the calendar-date component of `raw`, ignoring any time or zone suffix.
pub fn parse_date(raw: &str) -> CoreResult<NaiveDate> {
    let trimmed = raw.trim();
    let date_part = trimmed
        .find(|c: char| matches!(c, 'T' | 't' | ' ' | 'Z' | 'z' | '+'))
        .map_or(trimmed, |idx| &trimmed[..idx]);
    NaiveDate::parse_from_str(date_part, DATE_FORMAT)
        .map_err(|_| CoreError::InvalidDateFormat(raw.to_string()))
}

/// Resolves the effective range. Both bounds must be supplied to override the default window.
pub fn resolve_range(
    start: Option<&str>,
    end: Option<&str>,
    today: NaiveDate,
) -> CoreResult<DateRange> {
    match (start, end) {
        (Some(start), Some(end)) => DateRange::new(parse_date(start)?, parse_date(end)?),
        _ => Ok(DateRange::default_for(today)),
    }
}

/// Calendar date of an invoice, or `InvalidDateFormat` when missing or unparsable.
pub fn invoice_date(invoice: &Invoice) -> CoreResult<NaiveDate> {
    match invoice.date.as_deref() {
        Some(raw) => parse_date(raw),
        None => Err(CoreError::InvalidDateFormat(format!(
            "invoice {} has no date",
            invoice.id
        ))),
    }
}

/// Keeps invoices dated within `range`. Invoices without a usable date are skipped and logged.
pub fn filter_by_range<'a>(invoices: &'a [Invoice], range: &DateRange) -> Vec<&'a Invoice> {
    invoices
        .iter()
        .filter(|invoice| match invoice_date(invoice) {
            Ok(date) => range.contains(date),
            Err(err) => {
                tracing::warn!(
                    invoice_id = %invoice.id,
                    reason = %err,
                    "skipping invoice without a usable date"
                );
                false
            }
        })
        .collect()
}

//! Per-operation report configuration and request parameters.

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// Number of rows returned by the top-customers ranking when no limit is given.
pub const DEFAULT_TOP_CUSTOMERS_LIMIT: usize = 5;

/// How an operation reacts to malformed input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Surface the typed error to the caller.
    Strict,
    /// Return a zero-valued document carrying an explanatory message.
    Degrade,
}

/// Rule deciding which invoices count as income or expenses in the daily report.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Paid invoices are income; expenses stay at zero.
    #[default]
    Status,
    /// Deprecated alternate: `type == income` / `type == expense`, regardless of status.
    Type,
}

/// Output shape of the income/expenses report.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SeriesShape {
    #[default]
    Chart,
    Summary,
}

/// Invoice scope for the top-customers ranking when the caller gives no range.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RangeScope {
    #[default]
    AllTime,
    DefaultWindow,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportOptions {
    #[serde(default = "ReportOptions::strict")]
    pub profit_loss: ErrorPolicy,
    #[serde(default = "ReportOptions::degrade")]
    pub income_expenses: ErrorPolicy,
    /// Only `Strict` is accepted; see [`ReportOptions::validate`].
    #[serde(default = "ReportOptions::strict")]
    pub top_customers: ErrorPolicy,
    #[serde(default)]
    pub classification: Classification,
    #[serde(default)]
    pub income_expenses_shape: SeriesShape,
    #[serde(default = "ReportOptions::default_limit")]
    pub top_customers_limit: usize,
    #[serde(default)]
    pub top_customers_scope: RangeScope,
}

impl ReportOptions {
    fn strict() -> ErrorPolicy {
        ErrorPolicy::Strict
    }

    fn degrade() -> ErrorPolicy {
        ErrorPolicy::Degrade
    }

    fn default_limit() -> usize {
        DEFAULT_TOP_CUSTOMERS_LIMIT
    }

    /// Rejects settings the engine cannot honour. The ranking is a bare list of rows and
    /// cannot carry a degraded-response message, so it only runs strict.
    pub fn validate(&self) -> CoreResult<()> {
        if self.top_customers == ErrorPolicy::Degrade {
            return Err(CoreError::Validation(
                "top_customers supports only the strict error policy".into(),
            ));
        }
        if self.top_customers_limit == 0 {
            return Err(CoreError::Validation(
                "top_customers_limit must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            profit_loss: ErrorPolicy::Strict,
            income_expenses: ErrorPolicy::Degrade,
            top_customers: ErrorPolicy::Strict,
            classification: Classification::default(),
            income_expenses_shape: SeriesShape::default(),
            top_customers_limit: DEFAULT_TOP_CUSTOMERS_LIMIT,
            top_customers_scope: RangeScope::default(),
        }
    }
}

/// Caller-supplied parameters for a single report call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub limit: Option<usize>,
}

impl ReportQuery {
    pub fn between(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start_date: Some(start.into()),
            end_date: Some(end.into()),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// True when both bounds were supplied.
    pub fn has_range(&self) -> bool {
        self.start_date.is_some() && self.end_date.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_options_fill_in_defaults() {
        let options: ReportOptions =
            serde_json::from_str(r#"{"classification":"type","top_customers_limit":3}"#)
                .expect("parse options");
        assert_eq!(options.classification, Classification::Type);
        assert_eq!(options.top_customers_limit, 3);
        assert_eq!(options.profit_loss, ErrorPolicy::Strict);
        assert_eq!(options.income_expenses, ErrorPolicy::Degrade);
        assert_eq!(options.top_customers_scope, RangeScope::AllTime);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn degraded_ranking_is_rejected() {
        let options: ReportOptions =
            serde_json::from_str(r#"{"top_customers":"degrade"}"#).expect("parse options");
        let err = options.validate().expect_err("degrade is not allowed for rankings");
        assert!(matches!(err, CoreError::Validation(message) if message.contains("top_customers")));
    }
}

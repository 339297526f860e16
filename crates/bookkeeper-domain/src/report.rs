//! Report documents produced by the report engine. Computed per call, never persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive date bounds echoed back in every report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfitLossReport {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
    pub period: ReportPeriod,
    /// Set only on a degraded response, so it never looks like a genuinely empty period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Totals-only rendition of the income/expenses report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncomeExpensesSummary {
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub invoice_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
}

/// Chart-friendly dense series: one label per day, datasets parallel to the labels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ChartSeries {
    pub fn dataset(&self, label: &str) -> Option<&ChartDataset> {
        self.datasets.iter().find(|set| set.label == label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum IncomeExpensesReport {
    Chart(ChartSeries),
    Summary(IncomeExpensesSummary),
}

impl IncomeExpensesReport {
    pub fn message(&self) -> Option<&str> {
        match self {
            IncomeExpensesReport::Chart(series) => series.message.as_deref(),
            IncomeExpensesReport::Summary(summary) => summary.message.as_deref(),
        }
    }
}

/// One row of the top-customers ranking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopCustomer {
    pub id: String,
    pub name: String,
    pub revenue: f64,
}

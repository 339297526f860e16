//! Profit/loss, income/expenses and top-customer reports over a snapshot.

use std::collections::HashMap;

use bookkeeper_domain::{
    ChartDataset, ChartSeries, Customer, IncomeExpensesReport, IncomeExpensesSummary, Invoice,
    InvoiceKind, ProfitLossReport, TopCustomer,
};
use chrono::NaiveDate;

use crate::{
    filter_by_range, invoice_date, rank_descending, resolve_range, Classification, CoreError,
    CoreResult, DateRange, ErrorPolicy, RangeScope, ReportOptions, ReportQuery, SeriesShape,
    Snapshot,
};

pub const INCOME_LABEL: &str = "Income";
pub const EXPENSES_LABEL: &str = "Expenses";

/// Where a single invoice lands in the income/expenses report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Income,
    Expense,
    Ignored,
}

fn classify(invoice: &Invoice, rule: Classification) -> Flow {
    match rule {
        Classification::Status if invoice.is_paid() => Flow::Income,
        Classification::Status => Flow::Ignored,
        Classification::Type => match invoice.kind {
            Some(InvoiceKind::Income) => Flow::Income,
            Some(InvoiceKind::Expense) => Flow::Expense,
            _ => Flow::Ignored,
        },
    }
}

pub struct ReportService;

impl ReportService {
    /// Realized income from paid invoices in range. No expense ledger exists, so expenses are zero.
    pub fn profit_loss(
        snapshot: &Snapshot,
        query: &ReportQuery,
        options: &ReportOptions,
        today: NaiveDate,
    ) -> CoreResult<ProfitLossReport> {
        let range = match Self::range_for(query, today) {
            Ok(range) => range,
            Err(err) => {
                let message = format!(
                    "Could not build the report ({err}); showing an empty default period instead"
                );
                Self::degrade_or_fail(options.profit_loss, err, "profit-loss")?;
                return Ok(ProfitLossReport {
                    total_income: 0.0,
                    total_expenses: 0.0,
                    net_profit: 0.0,
                    period: DateRange::default_for(today).period(),
                    message: Some(message),
                });
            }
        };

        let invoices = filter_by_range(&snapshot.invoices, &range);
        // fold from +0.0: an empty f64 `sum()` yields -0.0
        let total_income = invoices
            .iter()
            .filter(|invoice| invoice.is_paid())
            .fold(0.0, |acc, invoice| acc + invoice.total);
        let total_expenses = 0.0;
        tracing::debug!(
            start = %range.start,
            end = %range.end,
            invoices = invoices.len(),
            total_income,
            "profit-loss computed"
        );

        Ok(ProfitLossReport {
            total_income,
            total_expenses,
            net_profit: total_income - total_expenses,
            period: range.period(),
            message: None,
        })
    }

    /// Income and expenses for the range, as a dense daily chart series or as totals.
    pub fn income_expenses(
        snapshot: &Snapshot,
        query: &ReportQuery,
        options: &ReportOptions,
        today: NaiveDate,
    ) -> CoreResult<IncomeExpensesReport> {
        let range = match Self::range_for(query, today) {
            Ok(range) => range,
            Err(err) => {
                let message = format!(
                    "Could not build the report ({err}); showing an empty default period instead"
                );
                Self::degrade_or_fail(options.income_expenses, err, "income-expenses")?;
                let fallback = DateRange::default_for(today);
                return Ok(match options.income_expenses_shape {
                    SeriesShape::Chart => {
                        IncomeExpensesReport::Chart(empty_series(&fallback, Some(message)))
                    }
                    SeriesShape::Summary => IncomeExpensesReport::Summary(IncomeExpensesSummary {
                        income: 0.0,
                        expenses: 0.0,
                        net: 0.0,
                        start_date: fallback.start,
                        end_date: fallback.end,
                        invoice_count: 0,
                        message: Some(message),
                    }),
                });
            }
        };

        let invoices = filter_by_range(&snapshot.invoices, &range);
        let message = invoices.is_empty().then(|| {
            format!(
                "No invoices found between {} and {}",
                range.start, range.end
            )
        });
        tracing::debug!(
            start = %range.start,
            end = %range.end,
            invoices = invoices.len(),
            classification = ?options.classification,
            "income-expenses computed"
        );

        Ok(match options.income_expenses_shape {
            SeriesShape::Chart => IncomeExpensesReport::Chart(daily_series(
                &invoices,
                &range,
                options.classification,
                message,
            )),
            SeriesShape::Summary => {
                let (income, expenses) = invoices.iter().fold((0.0, 0.0), |(inc, exp), invoice| {
                    match classify(invoice, options.classification) {
                        Flow::Income => (inc + invoice.total, exp),
                        Flow::Expense => (inc, exp + invoice.total),
                        Flow::Ignored => (inc, exp),
                    }
                });
                IncomeExpensesReport::Summary(IncomeExpensesSummary {
                    income,
                    expenses,
                    net: income - expenses,
                    start_date: range.start,
                    end_date: range.end,
                    invoice_count: invoices.len(),
                    message,
                })
            }
        })
    }

    /// Customers ranked by revenue from paid invoices.
    ///
    /// Revenue for a `customer_id` with no matching customer is dropped before truncation.
    /// Always strict: a ranking has no flagged empty shape, so range errors are returned.
    pub fn top_customers(
        snapshot: &Snapshot,
        query: &ReportQuery,
        options: &ReportOptions,
        today: NaiveDate,
    ) -> CoreResult<Vec<TopCustomer>> {
        let limit = query.limit.unwrap_or(options.top_customers_limit);
        let scoped: Vec<&Invoice> =
            if query.has_range() || options.top_customers_scope == RangeScope::DefaultWindow {
                filter_by_range(&snapshot.invoices, &Self::range_for(query, today)?)
            } else {
                snapshot.invoices.iter().collect()
            };

        let mut totals: Vec<(&str, f64)> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();
        for invoice in scoped.into_iter().filter(|invoice| invoice.is_paid()) {
            let id = invoice.customer_id.as_str();
            let idx = *positions.entry(id).or_insert_with(|| {
                totals.push((id, 0.0));
                totals.len() - 1
            });
            totals[idx].1 += invoice.total;
        }

        let customers: HashMap<&str, &Customer> = snapshot
            .customers
            .iter()
            .map(|customer| (customer.id.as_str(), customer))
            .collect();
        let rows: Vec<TopCustomer> = totals
            .into_iter()
            .filter_map(|(id, revenue)| match customers.get(id) {
                Some(customer) => Some(TopCustomer {
                    id: id.to_string(),
                    name: customer.display_name(),
                    revenue,
                }),
                None => {
                    tracing::warn!(
                        customer_id = %id,
                        revenue,
                        "dropping revenue for unknown customer"
                    );
                    None
                }
            })
            .collect();

        Ok(rank_descending(rows, |row| row.revenue, limit))
    }

    fn range_for(query: &ReportQuery, today: NaiveDate) -> CoreResult<DateRange> {
        resolve_range(query.start_date.as_deref(), query.end_date.as_deref(), today)
    }

    fn degrade_or_fail(policy: ErrorPolicy, err: CoreError, report: &str) -> CoreResult<()> {
        match policy {
            ErrorPolicy::Strict => Err(err),
            ErrorPolicy::Degrade => {
                tracing::warn!(report, reason = %err, "returning degraded report");
                Ok(())
            }
        }
    }
}

fn empty_series(range: &DateRange, message: Option<String>) -> ChartSeries {
    let zeros = vec![0.0; range.len_days()];
    ChartSeries {
        labels: range.days().map(|day| day.to_string()).collect(),
        datasets: vec![
            ChartDataset {
                label: INCOME_LABEL.into(),
                data: zeros.clone(),
            },
            ChartDataset {
                label: EXPENSES_LABEL.into(),
                data: zeros,
            },
        ],
        message,
    }
}

fn daily_series(
    invoices: &[&Invoice],
    range: &DateRange,
    rule: Classification,
    message: Option<String>,
) -> ChartSeries {
    let mut series = empty_series(range, message);
    let (income, expenses) = series.datasets.split_at_mut(1);
    for invoice in invoices {
        let Ok(date) = invoice_date(invoice) else {
            continue;
        };
        let slot = (date - range.start).num_days() as usize;
        match classify(invoice, rule) {
            Flow::Income => income[0].data[slot] += invoice.total,
            Flow::Expense => expenses[0].data[slot] += invoice.total,
            Flow::Ignored => {}
        }
    }
    series
}

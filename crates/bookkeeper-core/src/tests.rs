use bookkeeper_domain::{Customer, IncomeExpensesReport, Invoice};
use chrono::NaiveDate;
use serde_json::json;

use crate::{
    report_service::{ReportService, EXPENSES_LABEL, INCOME_LABEL},
    Classification, CoreError, ErrorPolicy, RangeScope, ReportOptions, ReportQuery, SeriesShape,
    Snapshot,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
}

fn invoice(id: &str, date: &str, customer: &str, total: f64, status: &str) -> Invoice {
    serde_json::from_value(json!({
        "id": id,
        "date": date,
        "customer_id": customer,
        "total": total,
        "status": status,
    }))
    .expect("invoice fixture")
}

fn customers() -> Vec<Customer> {
    vec![
        Customer::new("C1", "Ada", "Lovelace"),
        Customer::new("C2", "Alan", "Turing"),
        Customer::new("C3", "Grace", "Hopper"),
    ]
}

fn summary_options() -> ReportOptions {
    ReportOptions {
        income_expenses_shape: SeriesShape::Summary,
        ..ReportOptions::default()
    }
}

#[test]
fn profit_loss_counts_only_paid_invoices_in_range() {
    let snapshot = Snapshot::new(
        vec![
            invoice("1", "2024-01-15", "C1", 200.0, "paid"),
            invoice("2", "2024-02-20", "C1", 300.0, "pending"),
        ],
        customers(),
    );
    let report = ReportService::profit_loss(
        &snapshot,
        &ReportQuery::between("2024-01-01", "2024-01-31"),
        &ReportOptions::default(),
        today(),
    )
    .expect("profit-loss");

    assert_eq!(report.total_income, 200.0);
    assert_eq!(report.total_expenses, 0.0);
    assert_eq!(report.net_profit, 200.0);
    assert_eq!(report.period.start_date.to_string(), "2024-01-01");
    assert_eq!(report.period.end_date.to_string(), "2024-01-31");
}

#[test]
fn profit_loss_defaults_to_previous_and_current_month() {
    let snapshot = Snapshot::new(
        vec![
            invoice("old", "2024-01-31", "C1", 50.0, "paid"),
            invoice("feb", "2024-02-01", "C1", 20.0, "paid"),
            invoice("mar", "2024-03-31T23:00:00Z", "C1", 30.0, "paid"),
        ],
        customers(),
    );
    let report = ReportService::profit_loss(
        &snapshot,
        &ReportQuery::default(),
        &ReportOptions::default(),
        today(),
    )
    .expect("profit-loss");

    assert_eq!(report.total_income, 50.0);
    assert_eq!(report.period.start_date.to_string(), "2024-02-01");
    assert_eq!(report.period.end_date.to_string(), "2024-03-31");
}

#[test]
fn profit_loss_surfaces_malformed_dates_in_strict_mode() {
    let snapshot = Snapshot::new(Vec::new(), customers());
    let err = ReportService::profit_loss(
        &snapshot,
        &ReportQuery::between("2024-01-01", "January 31"),
        &ReportOptions::default(),
        today(),
    )
    .expect_err("strict mode fails");
    assert!(matches!(err, CoreError::InvalidDateFormat(raw) if raw == "January 31"));
}

#[test]
fn profit_loss_degrades_when_configured() {
    let snapshot = Snapshot::new(vec![invoice("1", "2024-03-01", "C1", 10.0, "paid")], customers());
    let options = ReportOptions {
        profit_loss: ErrorPolicy::Degrade,
        ..ReportOptions::default()
    };
    let report = ReportService::profit_loss(
        &snapshot,
        &ReportQuery::between("bad", "2024-01-31"),
        &options,
        today(),
    )
    .expect("degraded report");
    assert_eq!(report.total_income, 0.0);
    assert_eq!(report.period.start_date.to_string(), "2024-02-01");
    assert!(report
        .message
        .as_deref()
        .is_some_and(|message| message.contains("Invalid date format")));

    let json = serde_json::to_value(&report).expect("serialize");
    assert!(json.get("message").is_some());
}

#[test]
fn profit_loss_without_paid_invoices_is_positive_zero() {
    let snapshot = Snapshot::new(
        vec![invoice("1", "2024-03-01", "C1", 80.0, "pending")],
        customers(),
    );
    let report = ReportService::profit_loss(
        &snapshot,
        &ReportQuery::default(),
        &ReportOptions::default(),
        today(),
    )
    .expect("profit-loss");

    assert!(report.total_income.is_sign_positive());
    assert!(report.net_profit.is_sign_positive());
    assert!(report.message.is_none());
    let json = serde_json::to_string(&report).expect("serialize");
    assert!(json.contains(r#""total_income":0.0"#), "{json}");
    assert!(json.contains(r#""net_profit":0.0"#), "{json}");
    assert!(!json.contains("message"));
}

#[test]
fn income_expenses_summary_with_no_invoices_is_zero_with_message() {
    let snapshot = Snapshot::new(vec![invoice("1", "2023-06-01", "C1", 10.0, "paid")], customers());
    let report = ReportService::income_expenses(
        &snapshot,
        &ReportQuery::between("2024-01-01", "2024-01-31"),
        &summary_options(),
        today(),
    )
    .expect("income-expenses");

    let IncomeExpensesReport::Summary(summary) = report else {
        panic!("expected summary shape");
    };
    assert_eq!(summary.income, 0.0);
    assert_eq!(summary.expenses, 0.0);
    assert_eq!(summary.net, 0.0);
    assert_eq!(summary.invoice_count, 0);
    assert!(summary.message.as_deref().is_some_and(|m| !m.is_empty()));
}

#[test]
fn income_expenses_falls_back_instead_of_failing() {
    let snapshot = Snapshot::new(vec![invoice("1", "2024-03-01", "C1", 10.0, "paid")], customers());
    let report = ReportService::income_expenses(
        &snapshot,
        &ReportQuery::between("2024-01-01", "not-a-date"),
        &summary_options(),
        today(),
    )
    .expect("degrade mode never fails");

    let IncomeExpensesReport::Summary(summary) = report else {
        panic!("expected summary shape");
    };
    assert_eq!(summary.income, 0.0);
    assert_eq!(summary.invoice_count, 0);
    assert!(summary.message.is_some());
}

#[test]
fn income_expenses_strict_mode_surfaces_errors() {
    let snapshot = Snapshot::default();
    let options = ReportOptions {
        income_expenses: ErrorPolicy::Strict,
        ..ReportOptions::default()
    };
    let result = ReportService::income_expenses(
        &snapshot,
        &ReportQuery::between("2024-02-01", "2024-01-01"),
        &options,
        today(),
    );
    assert!(matches!(result, Err(CoreError::InvalidRange { .. })));
}

#[test]
fn daily_series_is_dense_and_parallel() {
    let snapshot = Snapshot::new(
        vec![
            invoice("1", "2024-01-02", "C1", 100.0, "paid"),
            invoice("2", "2024-01-02T15:00:00", "C2", 50.0, "paid"),
            invoice("3", "2024-01-04", "C1", 75.0, "pending"),
            invoice("4", "2024-01-05", "C3", 25.0, "paid"),
        ],
        customers(),
    );
    let report = ReportService::income_expenses(
        &snapshot,
        &ReportQuery::between("2024-01-01", "2024-01-05"),
        &ReportOptions::default(),
        today(),
    )
    .expect("income-expenses");

    let IncomeExpensesReport::Chart(series) = report else {
        panic!("expected chart shape");
    };
    assert_eq!(
        series.labels,
        vec!["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-04", "2024-01-05"]
    );
    let income = series.dataset(INCOME_LABEL).expect("income dataset");
    let expenses = series.dataset(EXPENSES_LABEL).expect("expenses dataset");
    assert_eq!(income.data, vec![0.0, 150.0, 0.0, 0.0, 25.0]);
    assert_eq!(expenses.data, vec![0.0; 5]);
    assert!(series.message.is_none());
}

#[test]
fn type_classification_splits_income_and_expenses() {
    let mut snapshot = Snapshot::new(Vec::new(), customers());
    for (id, kind, total, status) in [
        ("1", "income", 100.0, "pending"),
        ("2", "expense", 40.0, "paid"),
        ("3", "other", 999.0, "paid"),
    ] {
        let mut inv = invoice(id, "2024-01-10", "C1", total, status);
        inv.kind = Some(kind.to_string().into());
        snapshot.invoices.push(inv);
    }
    let options = ReportOptions {
        classification: Classification::Type,
        ..summary_options()
    };
    let report = ReportService::income_expenses(
        &snapshot,
        &ReportQuery::between("2024-01-01", "2024-01-31"),
        &options,
        today(),
    )
    .expect("income-expenses");

    let IncomeExpensesReport::Summary(summary) = report else {
        panic!("expected summary shape");
    };
    assert_eq!(summary.income, 100.0);
    assert_eq!(summary.expenses, 40.0);
    assert_eq!(summary.net, 60.0);
    assert_eq!(summary.invoice_count, 3);
    assert!(summary.message.is_none());
}

#[test]
fn top_customers_keeps_encounter_order_on_ties() {
    let snapshot = Snapshot::new(
        vec![
            invoice("1", "2024-01-01", "C1", 100.0, "paid"),
            invoice("2", "2024-01-02", "C2", 60.0, "paid"),
            invoice("3", "2024-01-03", "C3", 50.0, "paid"),
            invoice("4", "2024-01-04", "C2", 40.0, "paid"),
        ],
        customers(),
    );
    let rows = ReportService::top_customers(
        &snapshot,
        &ReportQuery::default().with_limit(2),
        &ReportOptions::default(),
        today(),
    )
    .expect("top customers");

    let ids: Vec<_> = rows.iter().map(|row| row.id.as_str()).collect();
    assert_eq!(ids, vec!["C1", "C2"]);
    assert_eq!(rows[1].name, "Alan Turing");
    assert_eq!(rows[1].revenue, 100.0);
}

#[test]
fn top_customers_ignores_unpaid_and_dangling_references() {
    let snapshot = Snapshot::new(
        vec![
            invoice("1", "2024-01-01", "ghost", 1000.0, "paid"),
            invoice("2", "2024-01-02", "C3", 500.0, "pending"),
            invoice("3", "2024-01-03", "C2", 10.0, "paid"),
        ],
        customers(),
    );
    let rows = ReportService::top_customers(
        &snapshot,
        &ReportQuery::default(),
        &ReportOptions::default(),
        today(),
    )
    .expect("dangling reference does not fail");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "C2");
}

#[test]
fn top_customers_surfaces_malformed_dates() {
    let snapshot = Snapshot::new(vec![invoice("1", "2024-01-01", "C1", 10.0, "paid")], customers());
    let err = ReportService::top_customers(
        &snapshot,
        &ReportQuery::between("2024-01-01", "31/01/2024"),
        &ReportOptions::default(),
        today(),
    )
    .expect_err("strict ranking");
    assert!(matches!(err, CoreError::InvalidDateFormat(raw) if raw == "31/01/2024"));

    let reversed = ReportService::top_customers(
        &snapshot,
        &ReportQuery::between("2024-02-01", "2024-01-01"),
        &ReportOptions::default(),
        today(),
    );
    assert!(matches!(reversed, Err(CoreError::InvalidRange { .. })));
}

#[test]
fn top_customers_scope_controls_unranged_queries() {
    let snapshot = Snapshot::new(
        vec![
            invoice("1", "2023-01-01", "C1", 500.0, "paid"),
            invoice("2", "2024-03-02", "C2", 10.0, "paid"),
        ],
        customers(),
    );
    let all_time = ReportService::top_customers(
        &snapshot,
        &ReportQuery::default(),
        &ReportOptions::default(),
        today(),
    )
    .expect("all time");
    assert_eq!(all_time.len(), 2);

    let windowed = ReportService::top_customers(
        &snapshot,
        &ReportQuery::default(),
        &ReportOptions {
            top_customers_scope: RangeScope::DefaultWindow,
            ..ReportOptions::default()
        },
        today(),
    )
    .expect("default window");
    assert_eq!(windowed.len(), 1);
    assert_eq!(windowed[0].id, "C2");

    let ranged = ReportService::top_customers(
        &snapshot,
        &ReportQuery::between("2023-01-01", "2023-12-31"),
        &ReportOptions::default(),
        today(),
    )
    .expect("explicit range");
    assert_eq!(ranged[0].id, "C1");
}

#[test]
fn reports_are_idempotent_over_an_unchanged_snapshot() {
    let snapshot = Snapshot::new(
        vec![
            invoice("1", "2024-02-03", "C1", 10.5, "paid"),
            invoice("2", "2024-03-04", "C2", 7.25, "paid"),
        ],
        customers(),
    );
    let options = ReportOptions::default();
    let query = ReportQuery::default();
    let render = || {
        let profit = ReportService::profit_loss(&snapshot, &query, &options, today()).unwrap();
        let series = ReportService::income_expenses(&snapshot, &query, &options, today()).unwrap();
        let top = ReportService::top_customers(&snapshot, &query, &options, today()).unwrap();
        (
            serde_json::to_string(&profit).unwrap(),
            serde_json::to_string(&series).unwrap(),
            serde_json::to_string(&top).unwrap(),
        )
    };
    assert_eq!(render(), render());
}

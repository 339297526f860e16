use bookkeeper_core::{
    CustomerRepository, InvoiceRepository, InvoiceService, ReportOptions, ReportQuery,
    ReportService, SeriesShape, Snapshot,
};
use bookkeeper_domain::{Customer, InvoiceDraft, InvoiceStatus, LineItem};
use bookkeeper_storage_json::JsonStore;
use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tempfile::tempdir;

fn build_snapshot(invoice_count: usize, customer_count: usize) -> Snapshot {
    let customers: Vec<Customer> = (0..customer_count)
        .map(|idx| Customer::new(format!("C{idx}"), "Customer", format!("{idx}")))
        .collect();

    let start_date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let invoices = (0..invoice_count)
        .map(|idx| {
            let draft = InvoiceDraft {
                customer_id: Some(format!("C{}", idx % customer_count)),
                items: Some(vec![LineItem::new(
                    1.0 + (idx % 4) as f64,
                    25.0 + (idx % 100) as f64,
                )]),
                date: Some((start_date + Duration::days((idx % 366) as i64)).to_string()),
                status: Some(if idx % 3 == 0 {
                    InvoiceStatus::Pending
                } else {
                    InvoiceStatus::Paid
                }),
                ..InvoiceDraft::default()
            };
            InvoiceService::create(draft, 0.1, start_date).expect("invoice")
        })
        .collect();

    Snapshot::new(invoices, customers)
}

fn bench_reports(c: &mut Criterion) {
    let snapshot = build_snapshot(black_box(10_000), 250);
    let today = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    let year = ReportQuery::between("2024-01-01", "2024-12-31");
    let options = ReportOptions::default();
    let summary = ReportOptions {
        income_expenses_shape: SeriesShape::Summary,
        ..ReportOptions::default()
    };

    c.bench_function("profit_loss_10k", |b| {
        b.iter(|| ReportService::profit_loss(&snapshot, &year, &options, today).expect("report"))
    });

    c.bench_function("income_expenses_chart_10k", |b| {
        b.iter(|| {
            ReportService::income_expenses(&snapshot, &year, &options, today).expect("report")
        })
    });

    c.bench_function("income_expenses_summary_10k", |b| {
        b.iter(|| {
            ReportService::income_expenses(&snapshot, &year, &summary, today).expect("report")
        })
    });

    c.bench_function("top_customers_10k", |b| {
        b.iter(|| {
            ReportService::top_customers(&snapshot, &ReportQuery::default(), &options, today)
                .expect("report")
        })
    });
}

fn bench_snapshot_io(c: &mut Criterion) {
    let snapshot = build_snapshot(black_box(10_000), 250);
    let dir = tempdir().expect("tempdir");
    let store = JsonStore::new(dir.path().to_path_buf()).expect("store");
    store.save_customers(&snapshot.customers).expect("seed customers");

    c.bench_function("invoices_save_10k", |b| {
        b.iter(|| store.save_invoices(&snapshot.invoices).expect("save invoices"))
    });

    store.save_invoices(&snapshot.invoices).expect("seed invoices");

    c.bench_function("snapshot_load_10k", |b| {
        b.iter(|| {
            let loaded = Snapshot::load(&store).expect("load snapshot");
            black_box(loaded);
        })
    });
}

criterion_group!(benches, bench_reports, bench_snapshot_io);
criterion_main!(benches);

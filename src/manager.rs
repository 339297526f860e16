use bookkeeper_config::Config;
use bookkeeper_core::{
    snapshot_warnings, Clock, CoreError, DataQualityWarning, DataStore, InvoiceService,
    ReportOptions, ReportQuery, ReportService, Snapshot,
};
use bookkeeper_domain::{
    IncomeExpensesReport, Invoice, InvoiceDraft, InvoiceUpdate, ProfitLossReport, TopCustomer,
};
use bookkeeper_storage_json::JsonStore;
use chrono::NaiveDate;

use crate::{Result, SystemClock};

/// Facade that coordinates the data store, report options and the clock.
pub struct Bookkeeper {
    store: Box<dyn DataStore>,
    clock: Box<dyn Clock>,
    options: ReportOptions,
    default_tax_rate: f64,
}

impl Bookkeeper {
    pub fn new(store: Box<dyn DataStore>, clock: Box<dyn Clock>, config: &Config) -> Self {
        Self {
            store,
            clock,
            options: config.reports.clone(),
            default_tax_rate: config.default_tax_rate,
        }
    }

    /// Opens the JSON tables under the configured data directory with the system clock.
    pub fn open(config: &Config) -> Result<Self> {
        config.reports.validate()?;
        let store = JsonStore::new(config.resolve_data_dir())?;
        tracing::debug!(data_dir = %store.data_dir().display(), "opened json store");
        Ok(Self::new(Box::new(store), Box::new(SystemClock), config))
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn snapshot(&self) -> Result<Snapshot> {
        Ok(Snapshot::load(self.store.as_ref())?)
    }

    pub fn profit_loss(&self, query: &ReportQuery) -> Result<ProfitLossReport> {
        let snapshot = self.snapshot()?;
        Ok(ReportService::profit_loss(
            &snapshot,
            query,
            &self.options,
            self.today(),
        )?)
    }

    pub fn income_expenses(&self, query: &ReportQuery) -> Result<IncomeExpensesReport> {
        let snapshot = self.snapshot()?;
        Ok(ReportService::income_expenses(
            &snapshot,
            query,
            &self.options,
            self.today(),
        )?)
    }

    pub fn top_customers(&self, query: &ReportQuery) -> Result<Vec<TopCustomer>> {
        let snapshot = self.snapshot()?;
        Ok(ReportService::top_customers(
            &snapshot,
            query,
            &self.options,
            self.today(),
        )?)
    }

    /// Validates and appends a new invoice, rewriting the invoice table.
    pub fn create_invoice(&self, draft: InvoiceDraft) -> Result<Invoice> {
        let invoice = InvoiceService::create(draft, self.default_tax_rate, self.today())?;
        let mut invoices = self.store.load_invoices()?;
        invoices.push(invoice.clone());
        self.store.save_invoices(&invoices)?;
        tracing::info!(invoice_id = %invoice.id, total = invoice.total, "invoice created");
        Ok(invoice)
    }

    pub fn update_invoice(&self, id: &str, update: &InvoiceUpdate) -> Result<Invoice> {
        let mut invoices = self.store.load_invoices()?;
        let slot = invoices
            .iter_mut()
            .find(|invoice| invoice.id == id)
            .ok_or_else(|| CoreError::InvoiceNotFound(id.to_string()))?;
        let updated = InvoiceService::apply_update(slot, update)?;
        *slot = updated.clone();
        self.store.save_invoices(&invoices)?;
        tracing::info!(invoice_id = %id, total = updated.total, "invoice updated");
        Ok(updated)
    }

    /// Data-quality warnings for the current snapshot; each one is also logged.
    pub fn check(&self) -> Result<Vec<DataQualityWarning>> {
        let warnings = snapshot_warnings(&self.snapshot()?);
        for warning in &warnings {
            tracing::warn!(
                record_id = %warning.record_id,
                kind = ?warning.kind,
                "{}",
                warning.detail
            );
        }
        Ok(warnings)
    }
}

use std::sync::RwLock;

use bookkeeper_domain::{Customer, Invoice};

use crate::{CoreError, CoreResult};

/// Whole-collection persistence for invoices.
pub trait InvoiceRepository: Send + Sync {
    fn load_invoices(&self) -> CoreResult<Vec<Invoice>>;
    fn save_invoices(&self, invoices: &[Invoice]) -> CoreResult<()>;
}

/// Whole-collection persistence for customers.
pub trait CustomerRepository: Send + Sync {
    fn load_customers(&self) -> CoreResult<Vec<Customer>>;
    fn save_customers(&self, customers: &[Customer]) -> CoreResult<()>;
}

/// Backend able to serve both collections.
pub trait DataStore: InvoiceRepository + CustomerRepository {}

impl<T: InvoiceRepository + CustomerRepository> DataStore for T {}

/// Read-only view of invoices and customers taken at the start of a report call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub invoices: Vec<Invoice>,
    pub customers: Vec<Customer>,
}

impl Snapshot {
    pub fn new(invoices: Vec<Invoice>, customers: Vec<Customer>) -> Self {
        Self {
            invoices,
            customers,
        }
    }

    pub fn load(store: &dyn DataStore) -> CoreResult<Self> {
        Ok(Self {
            invoices: store.load_invoices()?,
            customers: store.load_customers()?,
        })
    }
}

/// In-memory backend, interchangeable with the file-backed stores.
#[derive(Debug, Default)]
pub struct MemoryStore {
    invoices: RwLock<Vec<Invoice>>,
    customers: RwLock<Vec<Customer>>,
}

impl MemoryStore {
    pub fn new(invoices: Vec<Invoice>, customers: Vec<Customer>) -> Self {
        Self {
            invoices: RwLock::new(invoices),
            customers: RwLock::new(customers),
        }
    }
}

fn poisoned<T>(_: T) -> CoreError {
    CoreError::Storage("in-memory store lock poisoned".into())
}

impl InvoiceRepository for MemoryStore {
    fn load_invoices(&self) -> CoreResult<Vec<Invoice>> {
        Ok(self.invoices.read().map_err(poisoned)?.clone())
    }

    fn save_invoices(&self, invoices: &[Invoice]) -> CoreResult<()> {
        *self.invoices.write().map_err(poisoned)? = invoices.to_vec();
        Ok(())
    }
}

impl CustomerRepository for MemoryStore {
    fn load_customers(&self) -> CoreResult<Vec<Customer>> {
        Ok(self.customers.read().map_err(poisoned)?.clone())
    }

    fn save_customers(&self, customers: &[Customer]) -> CoreResult<()> {
        *self.customers.write().map_err(poisoned)? = customers.to_vec();
        Ok(())
    }
}

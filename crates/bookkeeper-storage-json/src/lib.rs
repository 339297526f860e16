//! bookkeeper-storage-json
//!
//! Flat JSON files as tables: each collection is one array rewritten wholesale on save.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use bookkeeper_core::{CoreError, CustomerRepository, InvoiceRepository};
use bookkeeper_domain::{Customer, Invoice};
use serde::{de::DeserializeOwned, Serialize};

const INVOICES_FILE: &str = "invoices.json";
const CUSTOMERS_FILE: &str = "customers.json";
const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed JSON persistence for invoices and customers.
#[derive(Debug, Clone)]
pub struct JsonStore {
    data_dir: PathBuf,
}

impl JsonStore {
    pub fn new(data_dir: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn invoices_path(&self) -> PathBuf {
        self.data_dir.join(INVOICES_FILE)
    }

    pub fn customers_path(&self) -> PathBuf {
        self.data_dir.join(CUSTOMERS_FILE)
    }
}

impl InvoiceRepository for JsonStore {
    fn load_invoices(&self) -> Result<Vec<Invoice>, CoreError> {
        load_table(&self.invoices_path())
    }

    fn save_invoices(&self, invoices: &[Invoice]) -> Result<(), CoreError> {
        save_table(&self.invoices_path(), invoices)
    }
}

impl CustomerRepository for JsonStore {
    fn load_customers(&self) -> Result<Vec<Customer>, CoreError> {
        load_table(&self.customers_path())
    }

    fn save_customers(&self, customers: &[Customer]) -> Result<(), CoreError> {
        save_table(&self.customers_path(), customers)
    }
}

/// Reads a JSON array; a missing file is an empty table.
fn load_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, CoreError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "table file absent, using empty collection");
        return Ok(Vec::new());
    }
    let data = fs::read_to_string(path)?;
    if data.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&data)
        .map_err(|err| CoreError::Storage(format!("{}: {}", path.display(), err)))
}

fn save_table<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), CoreError> {
    let json = serde_json::to_string_pretty(rows)
        .map_err(|err| CoreError::Storage(format!("{}: {}", path.display(), err)))?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

//! Customer records referenced by invoices.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub credit_cards: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bank_accounts: Vec<Value>,
}

impl Customer {
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            company: String::new(),
            mobile: String::new(),
            address: String::new(),
            credit_cards: Vec::new(),
            bank_accounts: Vec::new(),
        }
    }

    /// Name shown in rankings: first and last name joined by a single space.
    /// A missing part is left out rather than leaving a stray space.
    pub fn display_name(&self) -> String {
        [self.first_name.trim(), self.last_name.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// True when either name part is blank.
    pub fn has_incomplete_name(&self) -> bool {
        self.first_name.trim().is_empty() || self.last_name.trim().is_empty()
    }
}

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Remote table holding the store directory.
pub const STORES_TABLE: &str = "stores";

/// Human-facing short key for a store (e.g. `ST001`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StoreCode(pub String);

impl StoreCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StoreCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

/// Operational status of a store. Anything other than `Active` reads as inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreStatus {
    Active,
    #[serde(other)]
    Inactive,
}

impl StoreStatus {
    /// Value stored in the `status` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

/// A retail location that can receive messages.
///
/// Stores are maintained outside this application; the console only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: String,
    pub code: StoreCode,
    pub name: String,
    pub area: Option<String>,
    pub status: StoreStatus,
    pub postcode: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Store {
    pub fn is_active(&self) -> bool {
        self.status == StoreStatus::Active
    }

    /// Picker row label: `CODE - Name (Area)`.
    pub fn label(&self) -> String {
        match self.area.as_deref() {
            Some(area) if !area.trim().is_empty() => {
                format!("{} - {} ({})", self.code, self.name, area)
            }
            _ => format!("{} - {}", self.code, self.name),
        }
    }

    /// Case-insensitive substring match over code, name and area.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.code.as_str().to_lowercase().contains(&query)
            || self.name.to_lowercase().contains(&query)
            || self
                .area
                .as_deref()
                .is_some_and(|area| area.to_lowercase().contains(&query))
    }
}

/// Active stores fetched once for a single screen instance.
///
/// Entries keep the order they were supplied in (the gateway returns them
/// sorted by name). Inactive rows are dropped on construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreDirectory {
    stores: Vec<Store>,
}

impl StoreDirectory {
    pub fn new(stores: Vec<Store>) -> Self {
        Self {
            stores: stores.into_iter().filter(Store::is_active).collect(),
        }
    }

    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    pub fn get(&self, code: &StoreCode) -> Option<&Store> {
        self.stores.iter().find(|s| &s.code == code)
    }

    /// Codes of every active store, first occurrence wins.
    pub fn active_codes(&self) -> Vec<StoreCode> {
        let mut seen = HashSet::new();
        self.stores
            .iter()
            .filter(|s| seen.insert(s.code.clone()))
            .map(|s| s.code.clone())
            .collect()
    }

    /// Stores matching a free-text picker query.
    pub fn search(&self, query: &str) -> Vec<&Store> {
        self.stores.iter().filter(|s| s.matches(query)).collect()
    }
}

//! Data-access capability.
//!
//! Screens never fetch; this interface is for shared logic that reads
//! host-provided data at the point of use (feature flags, cached records).

use std::collections::BTreeMap;

use anyhow::{anyhow, Result};
use serde_json::Value;

use crate::registry::Capability;

pub trait DataSource: Send + Sync {
    /// Read the record stored under `key`.
    fn get(&self, key: &str) -> Result<Value>;
}

impl Capability for dyn DataSource {
    const NAME: &'static str = "data-source";
}

/// Fixed key/value data, e.g. props computed at build time.
#[derive(Debug, Clone, Default)]
pub struct StaticData {
    entries: BTreeMap<String, Value>,
}

impl StaticData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.entries.insert(key.into(), value);
        self
    }
}

impl DataSource for StaticData {
    fn get(&self, key: &str) -> Result<Value> {
        self.entries
            .get(key)
            .cloned()
            .ok_or_else(|| anyhow!("no record for key `{}`", key))
    }
}

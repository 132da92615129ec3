// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Case-insensitive keyed lookup over reference tables.

use std::collections::HashMap;

use crate::error::IngestError;

/// A record that is addressed by a unique string key.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// Miss on a table lookup. Carries every valid key so callers can report them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFound {
    pub key: String,
    pub valid_keys: Vec<String>,
}

fn normalize(key: &str) -> String {
    key.trim().to_uppercase()
}

/// Read-only table indexed by the uppercased record key.
#[derive(Debug, Clone)]
pub struct KeyedTable<T> {
    records: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for KeyedTable<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Keyed> KeyedTable<T> {
    /// Builds the table, rejecting keys that collide once uppercased.
    pub fn new(records: Vec<T>) -> Result<Self, IngestError> {
        let mut index = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            if let Some(first) = index.insert(normalize(record.key()), i) {
                return Err(IngestError::DuplicateKey {
                    key: record.key().to_string(),
                    existing: records[first].key().to_string(),
                });
            }
        }
        Ok(Self { records, index })
    }

    /// Exact, case-insensitive match on the record key.
    pub fn resolve(&self, key: &str) -> Result<&T, NotFound> {
        self.index
            .get(&normalize(key))
            .map(|&i| &self.records[i])
            .ok_or_else(|| NotFound {
                key: key.to_string(),
                valid_keys: self.keys(),
            })
    }

    /// Keys in table order.
    pub fn keys(&self) -> Vec<String> {
        self.records.iter().map(|r| r.key().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.records.iter()
    }
}

//! # storage-adapters
//!
//! In-memory implementation of the `RecordStore` port: a concurrent map
//! keyed by record id. No validation, no cross-entity knowledge, no
//! ordering guarantees. The facade layers business rules and stable
//! ordering on top.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use domains::ports::{Predicate, Record, RecordStore};

/// DashMap-backed record store, one instance per entity type.
pub struct MemoryStore<T: Record> {
    records: DashMap<Uuid, T>,
}

impl<T: Record> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T: Record> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> RecordStore<T> for MemoryStore<T> {
    async fn add(&self, record: T) -> anyhow::Result<()> {
        self.records.insert(record.id(), record);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<T>> {
        Ok(self.records.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list(&self) -> anyhow::Result<Vec<T>> {
        Ok(self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn replace(&self, record: T) -> anyhow::Result<bool> {
        match self.records.get_mut(&record.id()) {
            Some(mut entry) => {
                *entry = record;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.records.remove(&id).is_some())
    }

    async fn find_first(&self, pred: Predicate<T>) -> anyhow::Result<Option<T>> {
        Ok(self
            .records
            .iter()
            .find(|entry| pred(entry.value()))
            .map(|entry| entry.value().clone()))
    }
}

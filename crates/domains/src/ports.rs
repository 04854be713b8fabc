//! # Core Ports
//!
//! Any adapter must implement these traits to be used by the facade.
//! The record store is a dumb keyed container: no validation, no
//! cross-entity knowledge. Serializing access around business rules is
//! the facade's job, never the store's.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Implemented by every storable entity.
pub trait Record: Clone + Send + Sync + 'static {
    /// Human-readable entity kind, used in not-found reports ("User", "Place", ...)
    const KIND: &'static str;

    fn id(&self) -> Uuid;

    /// Creation instant, used by the facade to give listings a stable order.
    fn created_at(&self) -> DateTime<Utc>;
}

/// Boxed predicate for first-match lookups (the typed form of find-by-field).
pub type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Data persistence contract, one store per entity type.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait RecordStore<T: Record>: Send + Sync {
    async fn add(&self, record: T) -> anyhow::Result<()>;

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<T>>;

    async fn list(&self) -> anyhow::Result<Vec<T>>;

    /// Swaps the stored record for an already-validated replacement.
    /// Returns false when the id is unknown.
    async fn replace(&self, record: T) -> anyhow::Result<bool>;

    /// Returns false when the id is unknown.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;

    /// First record matching the predicate, in unspecified order.
    async fn find_first(&self, pred: Predicate<T>) -> anyhow::Result<Option<T>>;
}

/// Password hashing contract. The domain only ever sees opaque hashes;
/// the primitive lives behind this port (see the auth-adapters crate).
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, password: &str) -> anyhow::Result<String>;

    fn verify(&self, password: &str, hash: &str) -> bool;
}

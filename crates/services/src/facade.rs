//! Facade construction and the shared resolution/ordering helpers used by
//! every operation group.

use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use domains::error::{DomainError, Result};
use domains::models::{Amenity, Booking, Host, Place, PricingPolicy, Review, User};
use domains::ports::{CredentialHasher, Record, RecordStore};

/// The six per-entity store handles the facade orchestrates. The facade is
/// the only component that ever touches these; callers hold entity values,
/// never store handles.
pub struct FacadeStores {
    pub users: Arc<dyn RecordStore<User>>,
    pub hosts: Arc<dyn RecordStore<Host>>,
    pub places: Arc<dyn RecordStore<Place>>,
    pub amenities: Arc<dyn RecordStore<Amenity>>,
    pub bookings: Arc<dyn RecordStore<Booking>>,
    pub reviews: Arc<dyn RecordStore<Review>>,
}

/// Explicitly constructed context object; no ambient global instance.
///
/// Each check-then-act invariant gets its own gate so that two concurrent
/// calls cannot both pass the check: `accounts` covers the email namespace,
/// `listings` the per-host title namespace, `calendar` the booking overlap
/// scan, `review_gate` the one-review-per-booking slot.
pub struct StayFacade {
    pub(crate) users: Arc<dyn RecordStore<User>>,
    pub(crate) hosts: Arc<dyn RecordStore<Host>>,
    pub(crate) places: Arc<dyn RecordStore<Place>>,
    pub(crate) amenities: Arc<dyn RecordStore<Amenity>>,
    pub(crate) bookings: Arc<dyn RecordStore<Booking>>,
    pub(crate) reviews: Arc<dyn RecordStore<Review>>,
    pub(crate) hasher: Arc<dyn CredentialHasher>,
    pub(crate) pricing: PricingPolicy,
    pub(crate) accounts_gate: Mutex<()>,
    pub(crate) listings_gate: Mutex<()>,
    pub(crate) calendar_gate: Mutex<()>,
    pub(crate) review_gate: Mutex<()>,
}

impl StayFacade {
    pub fn new(
        stores: FacadeStores,
        hasher: Arc<dyn CredentialHasher>,
        pricing: PricingPolicy,
    ) -> Self {
        Self {
            users: stores.users,
            hosts: stores.hosts,
            places: stores.places,
            amenities: stores.amenities,
            bookings: stores.bookings,
            reviews: stores.reviews,
            hasher,
            pricing,
            accounts_gate: Mutex::new(()),
            listings_gate: Mutex::new(()),
            calendar_gate: Mutex::new(()),
            review_gate: Mutex::new(()),
        }
    }

    pub fn pricing(&self) -> PricingPolicy {
        self.pricing
    }

    // ---- reference resolution (mutation paths fail NotFound) ----

    pub(crate) async fn require_user(&self, id: Uuid) -> Result<User> {
        self.users
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(User::KIND, id))
    }

    pub(crate) async fn require_host(&self, id: Uuid) -> Result<Host> {
        self.hosts
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(Host::KIND, id))
    }

    pub(crate) async fn require_place(&self, id: Uuid) -> Result<Place> {
        self.places
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(Place::KIND, id))
    }

    pub(crate) async fn require_amenity(&self, id: Uuid) -> Result<Amenity> {
        self.amenities
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(Amenity::KIND, id))
    }

    pub(crate) async fn require_booking(&self, id: Uuid) -> Result<Booking> {
        self.bookings
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(Booking::KIND, id))
    }

    pub(crate) async fn require_review(&self, id: Uuid) -> Result<Review> {
        self.reviews
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(Review::KIND, id))
    }
}

/// Stores make no ordering promise; every listing the facade returns is
/// sorted by creation time (id as tiebreak) so results are stable.
pub(crate) fn sorted<T: Record>(mut records: Vec<T>) -> Vec<T> {
    records.sort_by_key(|record| (record.created_at(), record.id()));
    records
}

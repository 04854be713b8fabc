//! Shared fixtures: a facade over fresh in-memory stores, a deterministic
//! hasher, and input-record builders.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{Days, NaiveDate, Utc};
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use uuid::Uuid;

use domains::models::{
    Amenity, Booking, Host, NewBooking, NewPlace, NewUser, Place, PricingPolicy, Review, User,
};
use domains::ports::CredentialHasher;
use services::{FacadeStores, StayFacade};
use storage_adapters::MemoryStore;

/// Transparent stand-in for the Argon2 adapter; facade tests only care
/// that the hash round-trips, not how it is derived.
pub struct PlainHasher;

impl CredentialHasher for PlainHasher {
    fn hash(&self, password: &str) -> anyhow::Result<String> {
        Ok(format!("hashed::{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        hash == format!("hashed::{password}")
    }
}

pub fn facade() -> StayFacade {
    facade_with_pricing(PricingPolicy::PerGuest)
}

pub fn facade_with_pricing(pricing: PricingPolicy) -> StayFacade {
    facade_with_hasher(Arc::new(PlainHasher), pricing)
}

pub fn facade_with_hasher(
    hasher: Arc<dyn CredentialHasher>,
    pricing: PricingPolicy,
) -> StayFacade {
    StayFacade::new(
        FacadeStores {
            users: Arc::new(MemoryStore::<User>::new()),
            hosts: Arc::new(MemoryStore::<Host>::new()),
            places: Arc::new(MemoryStore::<Place>::new()),
            amenities: Arc::new(MemoryStore::<Amenity>::new()),
            bookings: Arc::new(MemoryStore::<Booking>::new()),
            reviews: Arc::new(MemoryStore::<Review>::new()),
        },
        hasher,
        pricing,
    )
}

/// Monotonic so no two fixture accounts ever collide on the unique-email rule.
pub fn unique_email(tag: &str) -> String {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{tag}{n}@example.com")
}

pub fn new_account(tag: &str) -> NewUser {
    NewUser {
        first_name: FirstName().fake(),
        last_name: LastName().fake(),
        email: unique_email(tag),
        password: "s3cret-password".into(),
        is_admin: false,
    }
}

pub fn new_place(host_id: Uuid, title: &str, capacity: u32, price: f64) -> NewPlace {
    NewPlace {
        title: title.into(),
        description: "A perfectly serviceable test listing".into(),
        capacity,
        price,
        latitude: 52.37,
        longitude: 4.89,
        host_id,
        amenity_ids: vec![],
    }
}

/// Date `n` days from today; overlap scenarios are phrased as offsets so
/// the not-in-the-past rule never interferes.
pub fn in_days(n: u64) -> NaiveDate {
    Utc::now().date_naive() + Days::new(n)
}

pub fn new_booking(
    user_id: Uuid,
    place_id: Uuid,
    guest_count: u32,
    checkin_offset_days: u64,
    night_count: u32,
) -> NewBooking {
    NewBooking {
        user_id,
        place_id,
        guest_count,
        checkin_date: in_days(checkin_offset_days),
        night_count,
    }
}

/// host + guest + one place, the baseline for most booking scenarios.
pub async fn seeded_marketplace(facade: &StayFacade) -> (Host, User, Place) {
    let host = facade.create_host(new_account("host")).await.expect("host");
    let guest = facade
        .create_user(new_account("guest"))
        .await
        .expect("guest");
    let place = facade
        .create_place(new_place(host.id(), "Canal Loft", 4, 100.0))
        .await
        .expect("place");
    (host, guest, place)
}

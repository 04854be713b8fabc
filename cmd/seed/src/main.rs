//! # Rusty-Stay Seed Binary
//!
//! Assembles the full stack (settings, stores, hasher, facade) and loads
//! a demonstration data set through the facade's public operations. Doubles
//! as the end-to-end smoke run for the workspace.

use std::sync::Arc;

use chrono::{Days, Utc};
use secrecy::ExposeSecret;
use tracing_subscriber::EnvFilter;

use auth_adapters::ArgonCredentialHasher;
use configs::Settings;
use domains::models::{
    Amenity, Booking, BookingStatus, Host, NewAmenity, NewBooking, NewPlace, NewReview, NewUser,
    Place, PricingPolicy, Review, User,
};
use services::{FacadeStores, StayFacade};
use storage_adapters::MemoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // 1. Settings first; the log filter comes from them.
    let settings = Settings::load()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log.filter))
        .init();

    let pricing: PricingPolicy = settings.pricing.policy.parse()?;

    // 2. Assemble the facade over fresh in-memory stores.
    let facade = StayFacade::new(
        FacadeStores {
            users: Arc::new(MemoryStore::<User>::new()),
            hosts: Arc::new(MemoryStore::<Host>::new()),
            places: Arc::new(MemoryStore::<Place>::new()),
            amenities: Arc::new(MemoryStore::<Amenity>::new()),
            bookings: Arc::new(MemoryStore::<Booking>::new()),
            reviews: Arc::new(MemoryStore::<Review>::new()),
        },
        Arc::new(ArgonCredentialHasher::new()),
        pricing,
    );

    tracing::info!(policy = ?pricing, "🚀 Rusty-Stay facade ready, seeding demo data");
    seed(&facade, &settings).await?;
    Ok(())
}

async fn seed(facade: &StayFacade, settings: &Settings) -> anyhow::Result<()> {
    // The very first account in an empty directory gets the admin flag.
    let make_admin = facade.is_first_account().await?;
    let admin = facade
        .create_user(NewUser {
            first_name: "Avery".into(),
            last_name: "Quinn".into(),
            email: settings.seed.admin_email.clone(),
            password: settings.seed.admin_password.expose_secret().to_string(),
            is_admin: make_admin,
        })
        .await?;

    let host = facade
        .create_host(NewUser {
            first_name: "Hanna".into(),
            last_name: "Berg".into(),
            email: "hanna@rusty-stay.local".into(),
            password: "hunter2hunter2".into(),
            is_admin: false,
        })
        .await?;

    let wifi = facade
        .create_amenity(NewAmenity { name: "Wifi".into() })
        .await?;
    let sauna = facade
        .create_amenity(NewAmenity {
            name: "Sauna".into(),
        })
        .await?;

    let loft = facade
        .create_place(NewPlace {
            title: "Canal Loft".into(),
            description: "Bright two-room loft overlooking the canal".into(),
            capacity: 4,
            price: 100.0,
            latitude: 52.37,
            longitude: 4.89,
            host_id: host.id(),
            amenity_ids: vec![wifi.id()],
        })
        .await?;
    facade.attach_amenity(loft.id(), sauna.id()).await?;

    facade
        .create_place(NewPlace {
            title: "Forest Cabin".into(),
            description: "Quiet cabin at the edge of the national park".into(),
            capacity: 2,
            price: 75.0,
            latitude: 60.39,
            longitude: 5.32,
            host_id: host.id(),
            amenity_ids: vec![],
        })
        .await?;

    let checkin = Utc::now().date_naive() + Days::new(7);
    let booking = facade
        .create_booking(NewBooking {
            user_id: admin.id(),
            place_id: loft.id(),
            guest_count: 2,
            checkin_date: checkin,
            night_count: 3,
        })
        .await?;
    facade
        .set_booking_status(booking.id(), BookingStatus::Confirmed)
        .await?;

    facade
        .create_review(NewReview {
            booking_id: booking.id(),
            text: "Great light, great location.".into(),
            rating: 5,
        })
        .await?;

    let host_rating = facade.host_rating(host.id()).await?;
    tracing::info!(
        users = facade.list_users().await?.len(),
        hosts = facade.list_hosts().await?.len(),
        places = facade.list_places().await?.len(),
        bookings = facade.list_bookings().await?.len(),
        reviews = facade.list_reviews().await?.len(),
        total_price = booking.total_price(),
        host_rating = ?host_rating,
        "seed complete"
    );
    Ok(())
}

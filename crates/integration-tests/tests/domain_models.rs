//! Model-level contracts that matter to callers: derived values, rating
//! arithmetic, and the validate-on-assignment rule.

use chrono::{Days, Utc};
use uuid::Uuid;

use domains::error::DomainError;
use domains::models::{Amenity, Booking, Host, Place, Review, User};
use domains::ports::Record;

#[test]
fn place_average_rating_is_the_mean() {
    let booking = Uuid::new_v4();
    let reviews = vec![
        Review::new(booking, "spacious", 4).unwrap(),
        Review::new(Uuid::new_v4(), "noisy", 2).unwrap(),
    ];
    assert_eq!(Place::average_rating(&reviews), Some(3.0));
    assert_eq!(Place::average_rating(&[]), None);
}

#[test]
fn host_rating_skips_unrated_places_but_needs_at_least_one() {
    assert_eq!(Host::rating(&[Some(3.0), None]), Some(3.0));
    assert_eq!(Host::rating(&[None]), None);
}

#[test]
fn average_rating_stays_within_review_bounds() {
    let reviews: Vec<Review> = (1..=5)
        .map(|r| Review::new(Uuid::new_v4(), "text", r).unwrap())
        .collect();
    let average = Place::average_rating(&reviews).unwrap();
    assert!((0.0..=5.0).contains(&average));
}

#[test]
fn booking_derives_checkout_and_keeps_it_in_sync() {
    let checkin = Utc::now().date_naive() + Days::new(4);
    let mut booking =
        Booking::new(Uuid::new_v4(), Uuid::new_v4(), 2, checkin, 2, 100.0).unwrap();
    assert_eq!(booking.checkout_date(), checkin + Days::new(2));

    booking.set_night_count(5).unwrap();
    assert_eq!(booking.checkout_date(), checkin + Days::new(5));

    let moved = checkin + Days::new(1);
    booking.set_checkin_date(moved).unwrap();
    assert_eq!(booking.checkout_date(), moved + Days::new(5));
}

#[test]
fn invalid_assignment_leaves_the_record_untouched() {
    let mut user = User::new("Ada", "Lovelace", "ada@example.com", "$h", false).unwrap();
    let err = user.set_email("not an email").unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
    assert_eq!(user.email(), "ada@example.com");

    let mut amenity = Amenity::new("Wifi").unwrap();
    assert!(amenity.set_name("x".repeat(33)).is_err());
    assert_eq!(amenity.name(), "Wifi");
}

#[test]
fn timestamps_start_equal_and_diverge_on_mutation() {
    let mut amenity = Amenity::new("Pool").unwrap();
    assert_eq!(amenity.created_at(), amenity.updated_at());
    amenity.set_name("Heated pool").unwrap();
    assert!(amenity.updated_at() >= amenity.created_at());
}

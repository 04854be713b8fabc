//! Booking model: a user's stay at a place over a half-open date interval
//! `[checkin, checkout)`, with derived checkout date and total price, and a
//! small lifecycle state machine. Overlap enforcement across bookings lives
//! in the facade; this model owns every single-record constraint.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{DomainError, Result};
use crate::ports::Record;

/// Lifecycle of a booking. Only `Pending` and `Confirmed` occupy the
/// place's calendar; `Declined` and `Cancelled` are terminal and free
/// their interval for re-booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Declined,
    Cancelled,
}

impl BookingStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Declined | Self::Cancelled)
    }

    /// Whether a booking in this state blocks the dates it spans.
    pub fn occupies_calendar(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// Legal transitions: pending may be confirmed, declined or cancelled;
    /// a confirmed stay may still be cancelled by the guest.
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending, Self::Declined)
                | (Self::Pending, Self::Cancelled)
                | (Self::Confirmed, Self::Cancelled)
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Declined => "declined",
            Self::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

/// Total-price convention. The nightly price always multiplies the night
/// count; whether the guest count participates differed between historical
/// drafts of this system, so the choice is explicit configuration rather
/// than a silent pick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PricingPolicy {
    /// nights × nightly price
    PerStay,
    /// nights × nightly price × guests
    #[default]
    PerGuest,
}

impl PricingPolicy {
    pub fn total(self, night_count: u32, nightly_price: f64, guest_count: u32) -> f64 {
        let base = f64::from(night_count) * nightly_price;
        match self {
            Self::PerStay => base,
            Self::PerGuest => base * f64::from(guest_count),
        }
    }
}

impl FromStr for PricingPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "per-stay" => Ok(Self::PerStay),
            "per-guest" => Ok(Self::PerGuest),
            other => Err(DomainError::validation(format!(
                "Unknown pricing policy '{other}' (expected 'per-stay' or 'per-guest')"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Booking {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    /// Who booked; frozen at booking time, even if the account goes away.
    user_id: Uuid,
    place_id: Uuid,
    guest_count: u32,
    checkin_date: NaiveDate,
    night_count: u32,
    checkout_date: NaiveDate,
    total_price: f64,
    status: BookingStatus,
    review_id: Option<Uuid>,
}

impl Booking {
    pub fn new(
        user_id: Uuid,
        place_id: Uuid,
        guest_count: u32,
        checkin_date: NaiveDate,
        night_count: u32,
        total_price: f64,
    ) -> Result<Self> {
        validate_guest_count(guest_count)?;
        validate_checkin_date(checkin_date)?;
        validate_night_count(night_count)?;
        validate_total_price(total_price)?;
        let checkout_date = derive_checkout(checkin_date, night_count)?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            user_id,
            place_id,
            guest_count,
            checkin_date,
            night_count,
            checkout_date,
            total_price,
            status: BookingStatus::Pending,
            review_id: None,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn place_id(&self) -> Uuid {
        self.place_id
    }

    pub fn guest_count(&self) -> u32 {
        self.guest_count
    }

    pub fn checkin_date(&self) -> NaiveDate {
        self.checkin_date
    }

    pub fn night_count(&self) -> u32 {
        self.night_count
    }

    /// Derived: `checkin_date + night_count` days.
    pub fn checkout_date(&self) -> NaiveDate {
        self.checkout_date
    }

    pub fn total_price(&self) -> f64 {
        self.total_price
    }

    pub fn status(&self) -> BookingStatus {
        self.status
    }

    pub fn review_id(&self) -> Option<Uuid> {
        self.review_id
    }

    /// Half-open interval test against `[start, end)`.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start < self.checkout_date && self.checkin_date < end
    }

    pub fn set_guest_count(&mut self, guest_count: u32) -> Result<()> {
        validate_guest_count(guest_count)?;
        self.guest_count = guest_count;
        self.touch();
        Ok(())
    }

    pub fn set_checkin_date(&mut self, checkin_date: NaiveDate) -> Result<()> {
        validate_checkin_date(checkin_date)?;
        self.checkout_date = derive_checkout(checkin_date, self.night_count)?;
        self.checkin_date = checkin_date;
        self.touch();
        Ok(())
    }

    pub fn set_night_count(&mut self, night_count: u32) -> Result<()> {
        validate_night_count(night_count)?;
        self.checkout_date = derive_checkout(self.checkin_date, night_count)?;
        self.night_count = night_count;
        self.touch();
        Ok(())
    }

    /// Installs the re-derived total after a date/guest/price change.
    pub fn set_total_price(&mut self, total_price: f64) -> Result<()> {
        validate_total_price(total_price)?;
        self.total_price = total_price;
        self.touch();
        Ok(())
    }

    /// Advances the state machine, rejecting illegal moves.
    pub fn transition_to(&mut self, next: BookingStatus) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::conflict(format!(
                "Booking {} is {} and cannot become {next}",
                self.id, self.status
            )));
        }
        self.status = next;
        self.touch();
        Ok(())
    }

    /// Links the booking's single review; returns false when one exists.
    pub fn attach_review(&mut self, review_id: Uuid) -> bool {
        if self.review_id.is_some() {
            return false;
        }
        self.review_id = Some(review_id);
        self.touch();
        true
    }

    pub fn clear_review(&mut self) {
        self.review_id = None;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Record for Booking {
    const KIND: &'static str = "Booking";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

fn validate_guest_count(guest_count: u32) -> Result<()> {
    if guest_count < 1 {
        return Err(DomainError::validation("Guest count must be at least 1"));
    }
    Ok(())
}

fn validate_checkin_date(checkin_date: NaiveDate) -> Result<()> {
    if checkin_date < Utc::now().date_naive() {
        return Err(DomainError::validation(
            "Checkin date must not be in the past",
        ));
    }
    Ok(())
}

fn validate_night_count(night_count: u32) -> Result<()> {
    if night_count < 1 {
        return Err(DomainError::validation(
            "Number of nights stayed must be greater than 0",
        ));
    }
    Ok(())
}

fn validate_total_price(total_price: f64) -> Result<()> {
    if !total_price.is_finite() || total_price < 0.0 {
        return Err(DomainError::validation(
            "Total price must be a positive number",
        ));
    }
    Ok(())
}

fn derive_checkout(checkin_date: NaiveDate, night_count: u32) -> Result<NaiveDate> {
    checkin_date
        .checked_add_days(Days::new(u64::from(night_count)))
        .ok_or_else(|| DomainError::validation("Checkout date is out of range"))
}

/// Inbound record for booking creation.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBooking {
    pub user_id: Uuid,
    pub place_id: Uuid,
    pub guest_count: u32,
    pub checkin_date: NaiveDate,
    pub night_count: u32,
}

/// Partial update. Status changes go through the dedicated transition
/// operation, not the patch path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingPatch {
    pub guest_count: Option<u32>,
    pub checkin_date: Option<NaiveDate>,
    pub night_count: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_days(n: u64) -> NaiveDate {
        Utc::now().date_naive() + Days::new(n)
    }

    fn sample(checkin: NaiveDate, nights: u32) -> Booking {
        Booking::new(Uuid::new_v4(), Uuid::new_v4(), 2, checkin, nights, 200.0)
            .expect("valid booking")
    }

    #[test]
    fn checkout_is_checkin_plus_nights() {
        let booking = sample(in_days(10), 3);
        assert_eq!(booking.checkout_date(), in_days(13));
    }

    #[test]
    fn rejects_past_checkin() {
        let yesterday = Utc::now().date_naive() - Days::new(1);
        let err = Booking::new(Uuid::new_v4(), Uuid::new_v4(), 1, yesterday, 1, 10.0);
        assert!(err.is_err());
    }

    #[test]
    fn today_is_a_valid_checkin() {
        assert!(Booking::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            1,
            Utc::now().date_naive(),
            1,
            10.0
        )
        .is_ok());
    }

    #[test]
    fn half_open_overlap() {
        let booking = sample(in_days(10), 3); // occupies [10, 13)
        assert!(booking.overlaps(in_days(12), in_days(14)));
        assert!(!booking.overlaps(in_days(13), in_days(15)));
        assert!(!booking.overlaps(in_days(8), in_days(10)));
    }

    #[test]
    fn state_machine_transitions() {
        let mut booking = sample(in_days(5), 2);
        assert!(booking.transition_to(BookingStatus::Confirmed).is_ok());
        assert!(booking.transition_to(BookingStatus::Cancelled).is_ok());
        let err = booking.transition_to(BookingStatus::Confirmed).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn declined_is_terminal() {
        let mut booking = sample(in_days(5), 2);
        booking.transition_to(BookingStatus::Declined).unwrap();
        assert!(booking.status().is_terminal());
        assert!(!booking.status().occupies_calendar());
        assert!(booking.transition_to(BookingStatus::Cancelled).is_err());
    }

    #[test]
    fn pricing_policies_differ_on_guests() {
        assert_eq!(PricingPolicy::PerStay.total(3, 100.0, 4), 300.0);
        assert_eq!(PricingPolicy::PerGuest.total(3, 100.0, 4), 1200.0);
    }

    #[test]
    fn single_review_slot() {
        let mut booking = sample(in_days(5), 2);
        let review = Uuid::new_v4();
        assert!(booking.attach_review(review));
        assert!(!booking.attach_review(Uuid::new_v4()));
        assert_eq!(booking.review_id(), Some(review));
    }
}

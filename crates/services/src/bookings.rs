//! Booking operations. The overlap scan plus insertion is the classic
//! check-then-act race; it runs under the calendar gate so two concurrent
//! requests for the same interval can never both succeed.

use chrono::NaiveDate;
use tracing::{debug, info};
use uuid::Uuid;

use domains::error::{DomainError, Result};
use domains::models::{Booking, BookingPatch, BookingStatus, NewBooking};
use domains::ports::Record;

use crate::facade::{sorted, StayFacade};

impl StayFacade {
    pub async fn create_booking(&self, input: NewBooking) -> Result<Booking> {
        // 1. Resolve the actors; a dangling reference is NotFound, not Conflict.
        self.require_user(input.user_id).await?;
        let place = self.require_place(input.place_id).await?;

        // 2. The capacity bound needs the live place; every single-record
        //    constraint (dates, counts) is enforced by the model itself.
        if input.guest_count > place.capacity() {
            return Err(DomainError::validation(format!(
                "Guest count exceeds the capacity of {} ({} guests)",
                place.title(),
                place.capacity()
            )));
        }

        // 3. Derive price and checkout; construction validates the rest.
        let total_price = self
            .pricing
            .total(input.night_count, place.price(), input.guest_count);
        let booking = Booking::new(
            input.user_id,
            input.place_id,
            input.guest_count,
            input.checkin_date,
            input.night_count,
            total_price,
        )?;

        // 4. Overlap scan + insertion, atomic under the calendar gate.
        let _gate = self.calendar_gate.lock().await;
        self.ensure_interval_free(
            place.id(),
            booking.checkin_date(),
            booking.checkout_date(),
            None,
        )
        .await?;
        self.bookings.add(booking.clone()).await?;

        // 5. Register the back-reference on the booking user. Re-fetched
        //    under the gate so parallel bookings cannot clobber the list.
        if let Some(mut user) = self.users.get(input.user_id).await? {
            user.add_booking(booking.id());
            self.users.replace(user).await?;
        }

        debug!(
            booking_id = %booking.id(),
            place_id = %place.id(),
            checkin = %booking.checkin_date(),
            nights = booking.night_count(),
            "booking created"
        );
        Ok(booking)
    }

    pub async fn get_booking(&self, id: Uuid) -> Result<Option<Booking>> {
        Ok(self.bookings.get(id).await?)
    }

    pub async fn list_bookings(&self) -> Result<Vec<Booking>> {
        Ok(sorted(self.bookings.list().await?))
    }

    /// Patches dates/counts through the model's validating setters, then
    /// re-checks capacity and the no-overlap invariant for the moved
    /// interval and re-derives the total price.
    pub async fn update_booking(&self, id: Uuid, patch: BookingPatch) -> Result<Booking> {
        let _gate = self.calendar_gate.lock().await;
        let mut booking = self.require_booking(id).await?;
        let place = self.require_place(booking.place_id()).await?;

        if let Some(guest_count) = patch.guest_count {
            if guest_count > place.capacity() {
                return Err(DomainError::validation(format!(
                    "Guest count exceeds the capacity of {} ({} guests)",
                    place.title(),
                    place.capacity()
                )));
            }
            booking.set_guest_count(guest_count)?;
        }
        if let Some(checkin_date) = patch.checkin_date {
            booking.set_checkin_date(checkin_date)?;
        }
        if let Some(night_count) = patch.night_count {
            booking.set_night_count(night_count)?;
        }

        self.ensure_interval_free(
            booking.place_id(),
            booking.checkin_date(),
            booking.checkout_date(),
            Some(id),
        )
        .await?;
        booking.set_total_price(self.pricing.total(
            booking.night_count(),
            place.price(),
            booking.guest_count(),
        ))?;

        if !self.bookings.replace(booking.clone()).await? {
            return Err(DomainError::not_found(Booking::KIND, id));
        }
        Ok(booking)
    }

    /// Removes the booking, its review (if any), and the back-references
    /// held by the user and the place.
    pub async fn delete_booking(&self, id: Uuid) -> Result<()> {
        let booking = self.require_booking(id).await?;
        self.purge_booking(&booking).await
    }

    /// Bookings made by the user, oldest first.
    pub async fn user_bookings(&self, user_id: Uuid) -> Result<Vec<Booking>> {
        self.require_user(user_id).await?;
        let bookings = self.bookings.list().await?;
        Ok(sorted(
            bookings
                .into_iter()
                .filter(|booking| booking.user_id() == user_id)
                .collect(),
        ))
    }

    /// Bookings against the place, oldest first.
    pub async fn place_bookings(&self, place_id: Uuid) -> Result<Vec<Booking>> {
        self.require_place(place_id).await?;
        let bookings = self.bookings.list().await?;
        Ok(sorted(
            bookings
                .into_iter()
                .filter(|booking| booking.place_id() == place_id)
                .collect(),
        ))
    }

    /// Advances the booking's state machine. Terminal transitions free the
    /// interval and emit the notification events the delivery layer (out of
    /// scope here) would fan out.
    pub async fn set_booking_status(&self, id: Uuid, status: BookingStatus) -> Result<Booking> {
        let mut booking = self.require_booking(id).await?;
        booking.transition_to(status)?;
        if !self.bookings.replace(booking.clone()).await? {
            return Err(DomainError::not_found(Booking::KIND, id));
        }
        match status {
            BookingStatus::Cancelled => info!(
                booking_id = %id,
                place_id = %booking.place_id(),
                "booking cancelled, host to be notified"
            ),
            BookingStatus::Confirmed | BookingStatus::Declined => info!(
                booking_id = %id,
                user_id = %booking.user_id(),
                status = %status,
                "booking status changed, guest to be notified"
            ),
            BookingStatus::Pending => {}
        }
        Ok(booking)
    }

    // ---- shared internals ----

    /// Half-open `[start, end)` overlap scan over the place's calendar;
    /// declined/cancelled bookings do not occupy it.
    pub(crate) async fn ensure_interval_free(
        &self,
        place_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<Uuid>,
    ) -> Result<()> {
        for existing in self.bookings.list().await? {
            if existing.place_id() != place_id || Some(existing.id()) == exclude {
                continue;
            }
            if !existing.status().occupies_calendar() {
                continue;
            }
            if existing.overlaps(start, end) {
                return Err(DomainError::conflict(format!(
                    "Place {place_id} is already booked from {} to {}",
                    existing.checkin_date(),
                    existing.checkout_date()
                )));
            }
        }
        Ok(())
    }

    /// Cascade removal of one booking: its review, the place's review
    /// back-reference, and the user's booking back-reference.
    pub(crate) async fn purge_booking(&self, booking: &Booking) -> Result<()> {
        if let Some(review_id) = booking.review_id() {
            self.reviews.delete(review_id).await?;
            if let Some(mut place) = self.places.get(booking.place_id()).await? {
                place.remove_review(review_id);
                self.places.replace(place).await?;
            }
        }
        if let Some(mut user) = self.users.get(booking.user_id()).await? {
            user.remove_booking(booking.id());
            self.users.replace(user).await?;
        }
        self.bookings.delete(booking.id()).await?;
        Ok(())
    }
}

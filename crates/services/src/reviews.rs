//! Review operations. A booking carries at most one review for its entire
//! lifetime; the check and the attachment run under the review gate so a
//! second writer can never slip between them.

use uuid::Uuid;

use domains::error::{DomainError, Result};
use domains::models::{NewReview, Review, ReviewPatch};
use domains::ports::Record;

use crate::facade::{sorted, StayFacade};

impl StayFacade {
    pub async fn create_review(&self, input: NewReview) -> Result<Review> {
        let _gate = self.review_gate.lock().await;
        let mut booking = self.require_booking(input.booking_id).await?;
        if booking.review_id().is_some() {
            return Err(DomainError::conflict(format!(
                "Booking {} already has a review",
                booking.id()
            )));
        }

        let review = Review::new(input.booking_id, input.text, input.rating)?;
        self.reviews.add(review.clone()).await?;

        if !booking.attach_review(review.id()) {
            // the slot was checked empty under the gate; this is a defect
            return Err(DomainError::Internal(anyhow::anyhow!(
                "review slot on booking {} changed mid-operation",
                booking.id()
            )));
        }
        self.bookings.replace(booking.clone()).await?;

        let Some(mut place) = self.places.get(booking.place_id()).await? else {
            return Err(DomainError::Internal(anyhow::anyhow!(
                "place {} referenced by booking {} is missing from the store",
                booking.place_id(),
                booking.id()
            )));
        };
        place.add_review(review.id());
        self.places.replace(place).await?;

        Ok(review)
    }

    pub async fn get_review(&self, id: Uuid) -> Result<Option<Review>> {
        Ok(self.reviews.get(id).await?)
    }

    pub async fn list_reviews(&self) -> Result<Vec<Review>> {
        Ok(sorted(self.reviews.list().await?))
    }

    /// Text and rating may change; the booking link never does.
    pub async fn update_review(&self, id: Uuid, patch: ReviewPatch) -> Result<Review> {
        let mut review = self.require_review(id).await?;
        if let Some(text) = patch.text {
            review.set_text(text)?;
        }
        if let Some(rating) = patch.rating {
            review.set_rating(rating)?;
        }
        if !self.reviews.replace(review.clone()).await? {
            return Err(DomainError::not_found(Review::KIND, id));
        }
        Ok(review)
    }

    /// Removes the review and clears both back-references (the booking's
    /// slot and the place's review list), re-opening the booking for a
    /// fresh review.
    pub async fn delete_review(&self, id: Uuid) -> Result<()> {
        let review = self.require_review(id).await?;
        if let Some(mut booking) = self.bookings.get(review.booking_id()).await? {
            booking.clear_review();
            let place_id = booking.place_id();
            self.bookings.replace(booking).await?;
            if let Some(mut place) = self.places.get(place_id).await? {
                place.remove_review(id);
                self.places.replace(place).await?;
            }
        }
        self.reviews.delete(id).await?;
        Ok(())
    }
}

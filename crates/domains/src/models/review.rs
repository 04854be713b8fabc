//! Review model: guest feedback tied 1:1 to a booking. The booking link is
//! set at creation and immutable; the one-review-per-booking rule is held on
//! the booking side and enforced by the facade.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, Result};
use crate::ports::Record;

const TEXT_MIN: usize = 1;
const TEXT_MAX: usize = 1024;
const RATING_MIN: u8 = 1;
const RATING_MAX: u8 = 5;

#[derive(Debug, Clone, Serialize)]
pub struct Review {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    booking_id: Uuid,
    text: String,
    rating: u8,
}

impl Review {
    pub fn new(booking_id: Uuid, text: impl Into<String>, rating: u8) -> Result<Self> {
        let text = text.into();
        validate_text(&text)?;
        validate_rating(rating)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            booking_id,
            text,
            rating,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn booking_id(&self) -> Uuid {
        self.booking_id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        validate_text(&text)?;
        self.text = text;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn set_rating(&mut self, rating: u8) -> Result<()> {
        validate_rating(rating)?;
        self.rating = rating;
        self.updated_at = Utc::now();
        Ok(())
    }
}

impl Record for Review {
    const KIND: &'static str = "Review";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

fn validate_text(text: &str) -> Result<()> {
    let len = text.chars().count();
    if !(TEXT_MIN..=TEXT_MAX).contains(&len) {
        return Err(DomainError::validation(format!(
            "Review text length must be between {TEXT_MIN} and {TEXT_MAX} characters"
        )));
    }
    Ok(())
}

fn validate_rating(rating: u8) -> Result<()> {
    if !(RATING_MIN..=RATING_MAX).contains(&rating) {
        return Err(DomainError::validation(format!(
            "Rating must be a value between {RATING_MIN} and {RATING_MAX}"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewReview {
    pub booking_id: Uuid,
    pub text: String,
    pub rating: u8,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewPatch {
    pub text: Option<String>,
    pub rating: Option<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds() {
        assert!(Review::new(Uuid::new_v4(), "fine", 0).is_err());
        assert!(Review::new(Uuid::new_v4(), "fine", 6).is_err());
        assert!(Review::new(Uuid::new_v4(), "fine", 5).is_ok());
    }

    #[test]
    fn empty_text_rejected() {
        assert!(Review::new(Uuid::new_v4(), "", 3).is_err());
    }
}

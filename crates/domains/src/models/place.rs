//! Place model: a bookable listing owned by a host, with amenities and the
//! review back-references that feed its average rating.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, Result};
use crate::models::review::Review;
use crate::ports::Record;

const TITLE_MAX: usize = 100;
const DESCRIPTION_MIN: usize = 2;
const DESCRIPTION_MAX: usize = 1024;
const CAPACITY_MIN: u32 = 1;
const CAPACITY_MAX: u32 = 64;

#[derive(Debug, Clone, Serialize)]
pub struct Place {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    title: String,
    description: String,
    capacity: u32,
    price: f64,
    latitude: f64,
    longitude: f64,
    /// Owning host, set once at creation.
    host_id: Uuid,
    /// Many-to-many amenity links, attachment order preserved.
    amenity_ids: Vec<Uuid>,
    review_ids: Vec<Uuid>,
}

impl Place {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        capacity: u32,
        price: f64,
        latitude: f64,
        longitude: f64,
        host_id: Uuid,
    ) -> Result<Self> {
        let title = title.into();
        let description = description.into();
        validate_title(&title)?;
        validate_description(&description)?;
        validate_capacity(capacity)?;
        validate_price(price)?;
        validate_latitude(latitude)?;
        validate_longitude(longitude)?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            title,
            description,
            capacity,
            price,
            latitude,
            longitude,
            host_id,
            amenity_ids: Vec::new(),
            review_ids: Vec::new(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Nightly price.
    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn host_id(&self) -> Uuid {
        self.host_id
    }

    pub fn amenity_ids(&self) -> &[Uuid] {
        &self.amenity_ids
    }

    pub fn review_ids(&self) -> &[Uuid] {
        &self.review_ids
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<()> {
        let title = title.into();
        validate_title(&title)?;
        self.title = title;
        self.touch();
        Ok(())
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> Result<()> {
        let description = description.into();
        validate_description(&description)?;
        self.description = description;
        self.touch();
        Ok(())
    }

    pub fn set_capacity(&mut self, capacity: u32) -> Result<()> {
        validate_capacity(capacity)?;
        self.capacity = capacity;
        self.touch();
        Ok(())
    }

    pub fn set_price(&mut self, price: f64) -> Result<()> {
        validate_price(price)?;
        self.price = price;
        self.touch();
        Ok(())
    }

    pub fn set_latitude(&mut self, latitude: f64) -> Result<()> {
        validate_latitude(latitude)?;
        self.latitude = latitude;
        self.touch();
        Ok(())
    }

    pub fn set_longitude(&mut self, longitude: f64) -> Result<()> {
        validate_longitude(longitude)?;
        self.longitude = longitude;
        self.touch();
        Ok(())
    }

    /// Appends an amenity link; returns false when it is already attached.
    pub fn add_amenity(&mut self, amenity_id: Uuid) -> bool {
        if self.amenity_ids.contains(&amenity_id) {
            return false;
        }
        self.amenity_ids.push(amenity_id);
        self.touch();
        true
    }

    /// Returns false when the amenity was not attached.
    pub fn remove_amenity(&mut self, amenity_id: Uuid) -> bool {
        let before = self.amenity_ids.len();
        self.amenity_ids.retain(|id| *id != amenity_id);
        let removed = self.amenity_ids.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    pub fn add_review(&mut self, review_id: Uuid) {
        if !self.review_ids.contains(&review_id) {
            self.review_ids.push(review_id);
            self.touch();
        }
    }

    pub fn remove_review(&mut self, review_id: Uuid) {
        self.review_ids.retain(|id| *id != review_id);
        self.touch();
    }

    /// Arithmetic mean over the resolved reviews; `None` when there are none.
    pub fn average_rating(reviews: &[Review]) -> Option<f64> {
        if reviews.is_empty() {
            return None;
        }
        let total: u32 = reviews.iter().map(|r| u32::from(r.rating())).sum();
        Some(f64::from(total) / reviews.len() as f64)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Record for Place {
    const KIND: &'static str = "Place";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.is_empty() {
        return Err(DomainError::validation("Title must not be empty"));
    }
    if title.chars().count() > TITLE_MAX {
        return Err(DomainError::validation(format!(
            "Title length must not exceed {TITLE_MAX} characters"
        )));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<()> {
    let len = description.chars().count();
    if !(DESCRIPTION_MIN..=DESCRIPTION_MAX).contains(&len) {
        return Err(DomainError::validation(format!(
            "Description length must be between {DESCRIPTION_MIN} and {DESCRIPTION_MAX} characters"
        )));
    }
    Ok(())
}

fn validate_capacity(capacity: u32) -> Result<()> {
    if !(CAPACITY_MIN..=CAPACITY_MAX).contains(&capacity) {
        return Err(DomainError::validation(format!(
            "Capacity must be between {CAPACITY_MIN} and {CAPACITY_MAX}"
        )));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(DomainError::validation("Price must be a positive number"));
    }
    Ok(())
}

fn validate_latitude(latitude: f64) -> Result<()> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(DomainError::validation(
            "Latitude must be between -90 and 90 degrees",
        ));
    }
    Ok(())
}

fn validate_longitude(longitude: f64) -> Result<()> {
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(DomainError::validation(
            "Longitude must be between -180 and 180 degrees",
        ));
    }
    Ok(())
}

/// Inbound record for listing creation.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPlace {
    pub title: String,
    pub description: String,
    pub capacity: u32,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub host_id: Uuid,
    #[serde(default)]
    pub amenity_ids: Vec<Uuid>,
}

/// Partial update; the owning host can never change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlacePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub capacity: Option<u32>,
    pub price: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

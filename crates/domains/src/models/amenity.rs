//! Amenity model. Independent entity; referenced by places, never owned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, Result};
use crate::ports::Record;

const NAME_MIN: usize = 1;
const NAME_MAX: usize = 32;

#[derive(Debug, Clone, Serialize)]
pub struct Amenity {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    name: String,
}

impl Amenity {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            name,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        validate_name(&name)?;
        self.name = name;
        self.updated_at = Utc::now();
        Ok(())
    }
}

impl Record for Amenity {
    const KIND: &'static str = "Amenity";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

fn validate_name(name: &str) -> Result<()> {
    let len = name.chars().count();
    if !(NAME_MIN..=NAME_MAX).contains(&len) {
        return Err(DomainError::validation(format!(
            "Name length must be between {NAME_MIN} and {NAME_MAX} characters"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAmenity {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AmenityPatch {
    pub name: Option<String>,
}

//! Host model. Not an inheritance relationship: a Host is a plain [`User`]
//! profile composed with an ownership capability (the listing ids it owns).
//! Hosts share the user email namespace; uniqueness across both is enforced
//! by the facade.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::Result;
use crate::models::user::User;
use crate::ports::Record;

/// A user profile plus the listings it owns and a derived rating.
#[derive(Debug, Clone, Serialize)]
pub struct Host {
    #[serde(flatten)]
    profile: User,
    place_ids: Vec<Uuid>,
}

impl Host {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        is_admin: bool,
    ) -> Result<Self> {
        Ok(Self {
            profile: User::new(first_name, last_name, email, password_hash, is_admin)?,
            place_ids: Vec::new(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.profile.id()
    }

    pub fn profile(&self) -> &User {
        &self.profile
    }

    /// Mutable profile access; all field writes still pass through the
    /// user's validating setters.
    pub fn profile_mut(&mut self) -> &mut User {
        &mut self.profile
    }

    /// Listings owned by this host, oldest first.
    pub fn place_ids(&self) -> &[Uuid] {
        &self.place_ids
    }

    pub fn add_place(&mut self, place_id: Uuid) {
        if !self.place_ids.contains(&place_id) {
            self.place_ids.push(place_id);
        }
    }

    pub fn remove_place(&mut self, place_id: Uuid) {
        self.place_ids.retain(|id| *id != place_id);
    }

    /// Mean over the per-place average ratings. Places without reviews carry
    /// no signal and are skipped; `None` means no owned place has been rated
    /// yet (or the host owns no places at all).
    pub fn rating(place_averages: &[Option<f64>]) -> Option<f64> {
        let rated: Vec<f64> = place_averages.iter().flatten().copied().collect();
        if rated.is_empty() {
            return None;
        }
        Some(rated.iter().sum::<f64>() / rated.len() as f64)
    }
}

impl Record for Host {
    const KIND: &'static str = "Host";

    fn id(&self) -> Uuid {
        self.profile.id()
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.profile.created_at()
    }
}

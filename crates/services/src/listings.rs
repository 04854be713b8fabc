//! Listing operations: places and amenities. Owns the title-per-host
//! uniqueness rule, the amenity many-to-many links, the rating aggregation,
//! and the cascade that keeps nothing dangling when a place goes away.

use tracing::{debug, info};
use uuid::Uuid;

use domains::error::{DomainError, Result};
use domains::models::{Amenity, AmenityPatch, NewAmenity, NewPlace, Place, PlacePatch};
use domains::ports::Record;

use crate::facade::{sorted, StayFacade};

impl StayFacade {
    // ---- Places ----

    pub async fn create_place(&self, input: NewPlace) -> Result<Place> {
        let mut host = self.require_host(input.host_id).await?;
        for amenity_id in &input.amenity_ids {
            self.require_amenity(*amenity_id).await?;
        }
        let mut place = Place::new(
            input.title,
            input.description,
            input.capacity,
            input.price,
            input.latitude,
            input.longitude,
            input.host_id,
        )?;
        for amenity_id in input.amenity_ids {
            place.add_amenity(amenity_id);
        }

        let _gate = self.listings_gate.lock().await;
        self.ensure_title_free(host.id(), place.title(), None).await?;
        self.places.add(place.clone()).await?;
        host.add_place(place.id());
        self.hosts.replace(host).await?;
        debug!(place_id = %place.id(), host_id = %place.host_id(), "place created");
        Ok(place)
    }

    pub async fn get_place(&self, id: Uuid) -> Result<Option<Place>> {
        Ok(self.places.get(id).await?)
    }

    pub async fn list_places(&self) -> Result<Vec<Place>> {
        Ok(sorted(self.places.list().await?))
    }

    pub async fn update_place(&self, id: Uuid, patch: PlacePatch) -> Result<Place> {
        let _gate = self.listings_gate.lock().await;
        let mut place = self.require_place(id).await?;
        if let Some(title) = patch.title {
            self.ensure_title_free(place.host_id(), &title, Some(id))
                .await?;
            place.set_title(title)?;
        }
        if let Some(description) = patch.description {
            place.set_description(description)?;
        }
        if let Some(capacity) = patch.capacity {
            place.set_capacity(capacity)?;
        }
        if let Some(price) = patch.price {
            place.set_price(price)?;
        }
        if let Some(latitude) = patch.latitude {
            place.set_latitude(latitude)?;
        }
        if let Some(longitude) = patch.longitude {
            place.set_longitude(longitude)?;
        }
        if !self.places.replace(place.clone()).await? {
            return Err(DomainError::not_found(Place::KIND, id));
        }
        Ok(place)
    }

    /// Removes the place, detaches it from its host, and cascade-deletes
    /// its bookings together with their reviews.
    pub async fn delete_place(&self, id: Uuid) -> Result<()> {
        self.require_place(id).await?;
        self.purge_place(id, true).await?;
        info!(place_id = %id, "place deleted with its bookings and reviews");
        Ok(())
    }

    /// Mean review rating for the place; `None` while unreviewed.
    pub async fn place_rating(&self, id: Uuid) -> Result<Option<f64>> {
        let place = self.require_place(id).await?;
        self.rating_of(&place).await
    }

    /// Amenities attached to the place, in attachment order.
    pub async fn place_amenities(&self, id: Uuid) -> Result<Vec<Amenity>> {
        let place = self.require_place(id).await?;
        let mut amenities = Vec::with_capacity(place.amenity_ids().len());
        for amenity_id in place.amenity_ids() {
            let Some(amenity) = self.amenities.get(*amenity_id).await? else {
                return Err(DomainError::Internal(anyhow::anyhow!(
                    "amenity {amenity_id} linked to place {id} is missing from the store"
                )));
            };
            amenities.push(amenity);
        }
        Ok(amenities)
    }

    pub async fn attach_amenity(&self, place_id: Uuid, amenity_id: Uuid) -> Result<Place> {
        let mut place = self.require_place(place_id).await?;
        let amenity = self.require_amenity(amenity_id).await?;
        if !place.add_amenity(amenity_id) {
            return Err(DomainError::conflict(format!(
                "Amenity '{}' is already attached to {}",
                amenity.name(),
                place.title()
            )));
        }
        if !self.places.replace(place.clone()).await? {
            return Err(DomainError::not_found(Place::KIND, place_id));
        }
        Ok(place)
    }

    pub async fn detach_amenity(&self, place_id: Uuid, amenity_id: Uuid) -> Result<Place> {
        let mut place = self.require_place(place_id).await?;
        if !place.remove_amenity(amenity_id) {
            return Err(DomainError::conflict(format!(
                "Amenity {amenity_id} is not attached to {}",
                place.title()
            )));
        }
        if !self.places.replace(place.clone()).await? {
            return Err(DomainError::not_found(Place::KIND, place_id));
        }
        Ok(place)
    }

    // ---- Amenities ----

    pub async fn create_amenity(&self, input: NewAmenity) -> Result<Amenity> {
        let amenity = Amenity::new(input.name)?;
        self.amenities.add(amenity.clone()).await?;
        Ok(amenity)
    }

    pub async fn get_amenity(&self, id: Uuid) -> Result<Option<Amenity>> {
        Ok(self.amenities.get(id).await?)
    }

    pub async fn list_amenities(&self) -> Result<Vec<Amenity>> {
        Ok(sorted(self.amenities.list().await?))
    }

    pub async fn update_amenity(&self, id: Uuid, patch: AmenityPatch) -> Result<Amenity> {
        let mut amenity = self.require_amenity(id).await?;
        if let Some(name) = patch.name {
            amenity.set_name(name)?;
        }
        if !self.amenities.replace(amenity.clone()).await? {
            return Err(DomainError::not_found(Amenity::KIND, id));
        }
        Ok(amenity)
    }

    /// Removes the amenity and detaches it from every place referencing it.
    pub async fn delete_amenity(&self, id: Uuid) -> Result<()> {
        self.require_amenity(id).await?;
        for mut place in self.places.list().await? {
            if place.remove_amenity(id) {
                self.places.replace(place).await?;
            }
        }
        self.amenities.delete(id).await?;
        Ok(())
    }

    // ---- shared internals ----

    pub(crate) async fn rating_of(&self, place: &Place) -> Result<Option<f64>> {
        let mut reviews = Vec::with_capacity(place.review_ids().len());
        for review_id in place.review_ids() {
            let Some(review) = self.reviews.get(*review_id).await? else {
                return Err(DomainError::Internal(anyhow::anyhow!(
                    "review {review_id} linked to place {} is missing from the store",
                    place.id()
                )));
            };
            reviews.push(review);
        }
        Ok(Place::average_rating(&reviews))
    }

    pub(crate) async fn ensure_title_free(
        &self,
        host_id: Uuid,
        title: &str,
        exclude: Option<Uuid>,
    ) -> Result<()> {
        for place in self.places.list().await? {
            if Some(place.id()) == exclude {
                continue;
            }
            if place.host_id() == host_id && place.title() == title {
                return Err(DomainError::conflict(format!(
                    "Host already has a place titled '{title}'"
                )));
            }
        }
        Ok(())
    }

    /// Deletes a place together with its bookings and their reviews.
    /// `detach_from_host` is false when the host itself is being removed.
    pub(crate) async fn purge_place(&self, place_id: Uuid, detach_from_host: bool) -> Result<()> {
        let Some(place) = self.places.get(place_id).await? else {
            return Ok(());
        };
        for booking in self.bookings.list().await? {
            if booking.place_id() == place_id {
                self.purge_booking(&booking).await?;
            }
        }
        if detach_from_host {
            if let Some(mut host) = self.hosts.get(place.host_id()).await? {
                host.remove_place(place_id);
                self.hosts.replace(host).await?;
            }
        }
        self.places.delete(place_id).await?;
        Ok(())
    }
}

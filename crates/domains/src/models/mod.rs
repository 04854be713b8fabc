//! # Domain Models
//!
//! The core entities of the Rusty-Stay marketplace. Every entity keeps its
//! fields private and funnels all mutation through validating setters, so no
//! code path can produce an invalid record. Cross-entity links are stored as
//! ids and resolved through the facade (arena + index), never as object
//! references.

pub mod amenity;
pub mod booking;
pub mod host;
pub mod place;
pub mod review;
pub mod user;

pub use amenity::{Amenity, AmenityPatch, NewAmenity};
pub use booking::{Booking, BookingPatch, BookingStatus, NewBooking, PricingPolicy};
pub use host::Host;
pub use place::{NewPlace, Place, PlacePatch};
pub use review::{NewReview, Review, ReviewPatch};
pub use user::{NewUser, User, UserPatch};

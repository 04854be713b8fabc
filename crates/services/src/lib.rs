//! rusty-stay/crates/services/src/lib.rs
//!
//! The Consistency Facade: the single point of truth for every rule that
//! spans more than one entity (email uniqueness across the user/host
//! namespace, title uniqueness per host, booking overlap, one review per
//! booking, and the cascade policy for destructive operations). Transport
//! layers talk to [`StayFacade`] and nothing else.

mod accounts;
mod bookings;
mod facade;
mod listings;
mod reviews;

pub use accounts::Account;
pub use facade::{FacadeStores, StayFacade};

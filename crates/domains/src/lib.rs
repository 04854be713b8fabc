//! rusty-stay/crates/domains/src/lib.rs
//!
//! The central domain logic and interface definitions for Rusty-Stay:
//! entity models with validating setters, the error taxonomy, and the
//! storage/credential ports every adapter implements.

pub mod error;
pub mod models;
pub mod ports;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use ports::*;

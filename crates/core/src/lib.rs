//! `kart-core`: shared building blocks for the order placement crates.
//!
//! This crate contains **pure domain** primitives (no IO, no HTTP).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::ErrorKind;
pub use id::OrderId;

//! Persona domain module.
//!
//! # Module Structure
//!
//! - `model`: council member and observer seat models
//! - `preset`: the built-in council and observer seats
//! - `catalog`: the read-only, ordered `PersonaCatalog`

mod catalog;
mod model;
mod preset;

// Re-export public API
pub use catalog::PersonaCatalog;
pub use model::{ModelLabel, ObserverSeat, Persona, SeatAttributes, Temperament};
pub use preset::{DISSENTER_ID, MEDIATOR_ID, SCHOLAR_ID, council_presets, observer_seats};

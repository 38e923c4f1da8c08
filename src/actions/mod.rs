//! Action catalog
//!
//! Immutable, process-wide definitions: identifiers, categories, eligibility
//! and base effects. Nothing here mutates a subject.

pub mod catalog;
pub mod effects;
pub mod table;

pub use catalog::{
    ActionAvailability, ActionCategory, ActionDefinition, ActionId, ActionListing, Catalog,
    CatalogView,
};
pub use effects::{Aftereffect, Channel, DeltaVector, Effect, Magnitude, RawDelta, Requirement};

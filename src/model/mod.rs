//! Core data model: component types, typed spec values and code decoding.
//!
//! Everything a family calculator extracts from a part number ends up as a
//! [`SpecValue`] inside a [`SpecBag`]; the taxonomy in [`ComponentType`]
//! decides which calculator gets to do the extracting.

pub mod codes;
mod component_type;
mod spec;

pub use component_type::{ComponentType, UnknownComponentType, SUBTYPE_BASES};
pub use spec::{SpecBag, SpecData, SpecUnit, SpecValue};

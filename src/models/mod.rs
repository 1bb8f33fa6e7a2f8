//! Data models for dashboard directory entities.
//!
//! This module contains the firm and company records supplied by the data
//! sources, plus the derived entity types produced by the search index.

pub mod company;
pub mod entity;
pub mod firm;

pub use company::Company;
pub use entity::{EntityKind, EntityRecord, IndexedEntity, IndexedEntityRef};
pub use firm::Firm;

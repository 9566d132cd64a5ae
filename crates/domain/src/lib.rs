//! Domain layer for the geo gateway
//!
//! Contains the value objects and result entities shared by the upstream
//! integration and the tool layer. Entities are plain value objects: they are
//! decoded once per request and never persisted.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;

//! `realmkit-core` — pure building blocks shared by the realm crates.
//!
//! No infrastructure concerns live here: identifiers, the domain error model
//! and the self-describing enumeration capability.

pub mod describable;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use describable::DescribableEnum;
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{OrgId, UserId};
pub use value_object::ValueObject;

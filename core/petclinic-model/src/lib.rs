//! Domain model for PetClinic.
//!
//! Defines the clinic's entities and the rules every layer relies on:
//! - [`Owner`] owns its [`Pet`]s, a [`Pet`] owns its [`Visit`]s
//! - back-references (pet → owner, visit → pet) are bare identifiers
//! - owned collections are kept in a fixed order (see [`ordering`])
//! - [`Validate`] reports field-level constraint violations
//!
//! Owner, Pet and Visit carry no serde derive; their wire shape is
//! the nested projection in `petclinic-projection`. The reference data types
//! ([`PetType`], [`Specialty`], [`Vet`]) serialize with plain serde.

mod entity;
mod named;
mod owner;
mod pet;
mod vet;
mod visit;

pub mod ordering;
pub mod validation;

pub use entity::{Entity, Named, Person};
pub use named::{PetType, Specialty};
pub use owner::Owner;
pub use pet::Pet;
pub use validation::{FieldError, Validate, ValidationErrors};
pub use vet::Vet;
pub use visit::Visit;

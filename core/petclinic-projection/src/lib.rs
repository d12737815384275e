//! Nested JSON projection of the PetClinic aggregate.
//!
//! The [`Projector`] turns an owner (with pets and visits), a standalone pet
//! or a standalone visit into canonical JSON text and back:
//! - dates travel as `yyyy/MM/dd`
//! - an unassigned identity is written as an explicit `null`
//! - a child's reference to its parent is a bare identifier, never the
//!   parent object again, so documents are acyclic
//! - collections are written in the order the model keeps them
//!
//! Standalone pets and visits need their parents, which the model holds only
//! by identifier. Callers look those up and pass them in through
//! [`PetView`] / [`VisitView`]; decoding hands them back through
//! [`DecodedPet`] / [`DecodedVisit`]. The projector itself performs no I/O
//! and keeps no state beyond its [`ProjectorConfig`].

mod config;
mod decode;
mod encode;
mod error;
mod projector;
mod view;
mod wire;

pub use config::{DEFAULT_MAX_DOCUMENT_BYTES, ProjectorConfig};
pub use error::{ErrorCategory, ProjectionError, ProjectionResult};
pub use projector::Projector;
pub use view::{DecodedPet, DecodedVisit, PetView, VisitView};

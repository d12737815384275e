//! Core type definitions for PetClinic.
//!
//! This crate defines the primitives shared by the model, the JSON projector
//! and the store:
//! - Integer identifiers, one type per entity table
//! - The `yyyy/MM/dd` day format used on the wire
//!
//! Entities themselves live in `petclinic-model`.

mod date;
mod ids;

pub use date::{DATE_FORMAT, MAX_YEAR, MIN_YEAR, format_date, is_wire_date, parse_date};
pub use ids::{
    Identity, OwnerId, PetId, PetTypeId, SpecialtyId, VetId, VisitId, deserialize_optional_id,
};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid date {value:?}: expected yyyy/MM/dd")]
    InvalidDate { value: String },

    #[error("date {date} has no yyyy/MM/dd form: year must be 0000..=9999")]
    DateOutOfRange { date: chrono::NaiveDate },

    #[error("invalid identifier: {0}")]
    InvalidId(#[from] std::num::ParseIntError),
}

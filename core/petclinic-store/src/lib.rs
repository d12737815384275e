//! In-memory persistence for the clinic.
//!
//! Owners are stored as whole aggregates (owner → pets → visits); pets and
//! visits are reachable by their own identity through indexes kept beside
//! the aggregates. Pet types, specialties and vets live in their own tables.
//!
//! Identities are assigned on first save from per-table sequences and are
//! never handed out twice. Every save validates its input before touching
//! the tables, and every multi-step change happens under one write lock.

mod error;
mod record;
mod sample;
mod store;
mod tables;

pub use error::{StoreError, StoreResult};
pub use record::{OwnedPet, PetVisit};
pub use store::ClinicStore;

//! Entities read together with the aggregate that holds them.
//!
//! Each record is copied out under a single read lock, so the parents always
//! match the child even while other requests are deleting owners or pets.

use petclinic_model::{Owner, Pet, Visit};

/// A pet and the owner holding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedPet {
    pub pet: Pet,
    pub owner: Owner,
}

/// A visit, its pet and that pet's owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetVisit {
    pub visit: Visit,
    pub pet: Pet,
    pub owner: Owner,
}

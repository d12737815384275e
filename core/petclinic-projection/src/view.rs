use petclinic_model::{Owner, Pet, Visit};

/// A pet together with its explicitly looked-up owner.
#[derive(Debug, Clone, Copy)]
pub struct PetView<'a> {
    pub pet: &'a Pet,
    pub owner: Option<&'a Owner>,
}

impl<'a> PetView<'a> {
    pub fn new(pet: &'a Pet) -> Self {
        Self { pet, owner: None }
    }

    #[must_use]
    pub fn with_owner(mut self, owner: &'a Owner) -> Self {
        self.owner = Some(owner);
        self
    }
}

/// A visit together with its explicitly looked-up pet and that pet's owner.
#[derive(Debug, Clone, Copy)]
pub struct VisitView<'a> {
    pub visit: &'a Visit,
    pub pet: Option<&'a Pet>,
    pub owner: Option<&'a Owner>,
}

impl<'a> VisitView<'a> {
    pub fn new(visit: &'a Visit) -> Self {
        Self {
            visit,
            pet: None,
            owner: None,
        }
    }

    #[must_use]
    pub fn with_pet(mut self, pet: &'a Pet) -> Self {
        self.pet = Some(pet);
        self
    }

    #[must_use]
    pub fn with_owner(mut self, owner: &'a Owner) -> Self {
        self.owner = Some(owner);
        self
    }
}

/// A decoded pet document.
///
/// `owner` holds the contact details from the nested owner node and no pets;
/// `pet.owner_id()` matches `owner.id()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPet {
    pub pet: Pet,
    pub owner: Owner,
}

/// A decoded visit document.
///
/// `pet` carries no visits and `owner` carries no pets; the back-references
/// line up (`visit.pet_id()` = `pet.id()`, `pet.owner_id()` = `owner.id()`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedVisit {
    pub visit: Visit,
    pub pet: Pet,
    pub owner: Owner,
}

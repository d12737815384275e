use crate::ordering::{insert_sorted, pet_order};
use crate::validation::{Validate, ValidationErrors, check_telephone};
use crate::{Entity, Person, Pet};
use petclinic_types::{OwnerId, PetId};

/// A pet owner: contact details plus the pets they own.
///
/// Pets are kept sorted by name, ignoring case. Adding a pet points its
/// owner back-reference at this owner; assigning an identity later re-points
/// every pet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Owner {
    id: Option<OwnerId>,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
    pets: Vec<Pet>,
}

impl Owner {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        telephone: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            address: address.into(),
            city: city.into(),
            telephone: telephone.into(),
            pets: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: OwnerId) -> Self {
        self.assign_id(id);
        self
    }

    /// Sets the identity and re-points every owned pet at it.
    pub fn assign_id(&mut self, id: OwnerId) {
        self.id = Some(id);
        for pet in &mut self.pets {
            pet.set_owner_id(Some(id));
        }
    }

    /// Pets, sorted by name ignoring case.
    pub fn pets(&self) -> &[Pet] {
        &self.pets
    }

    /// Takes ownership of `pet`, pointing it at this owner.
    pub fn add_pet(&mut self, mut pet: Pet) {
        pet.set_owner_id(self.id);
        insert_sorted(&mut self.pets, pet, pet_order);
    }

    /// Replaces every pet.
    pub fn set_pets(&mut self, pets: impl IntoIterator<Item = Pet>) {
        self.pets.clear();
        for pet in pets {
            self.add_pet(pet);
        }
    }

    pub fn pet(&self, id: PetId) -> Option<&Pet> {
        self.pets.iter().find(|p| p.id() == Some(id))
    }

    /// Finds a pet by name, ignoring case.
    ///
    /// With `ignore_new`, pets that have not been saved yet are skipped.
    pub fn get_pet(&self, name: &str, ignore_new: bool) -> Option<&Pet> {
        let wanted = name.to_lowercase();
        self.pets
            .iter()
            .find(|p| (!ignore_new || !p.is_new()) && p.name.to_lowercase() == wanted)
    }

    pub fn remove_pet(&mut self, id: PetId) -> Option<Pet> {
        let pos = self.pets.iter().position(|p| p.id() == Some(id))?;
        Some(self.pets.remove(pos))
    }

    /// Takes this owner's pets, leaving it with none.
    pub fn take_pets(&mut self) -> Vec<Pet> {
        std::mem::take(&mut self.pets)
    }

    /// A copy of the identity and contact details, without pets.
    #[must_use]
    pub fn without_pets(&self) -> Owner {
        Owner {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            telephone: self.telephone.clone(),
            pets: Vec::new(),
        }
    }

    /// Overwrites name and contact details from `other`; identity and pets
    /// are left alone.
    pub fn copy_details_from(&mut self, other: &Owner) {
        self.first_name.clone_from(&other.first_name);
        self.last_name.clone_from(&other.last_name);
        self.address.clone_from(&other.address);
        self.city.clone_from(&other.city);
        self.telephone.clone_from(&other.telephone);
    }
}

impl Entity for Owner {
    type Id = OwnerId;

    fn id(&self) -> Option<OwnerId> {
        self.id
    }
}

impl Person for Owner {
    fn first_name(&self) -> &str {
        &self.first_name
    }

    fn last_name(&self) -> &str {
        &self.last_name
    }
}

impl Validate for Owner {
    fn collect_errors(&self, errors: &mut ValidationErrors) {
        errors.require_text("owner", "firstName", &self.first_name);
        errors.require_text("owner", "lastName", &self.last_name);
        errors.require_text("owner", "address", &self.address);
        errors.require_text("owner", "city", &self.city);
        check_telephone(errors, "owner", &self.telephone);
        for (i, pet) in self.pets.iter().enumerate() {
            let mut nested = ValidationErrors::new();
            pet.collect_errors(&mut nested);
            errors.absorb(&format!("pets[{i}]"), nested);
        }
    }
}

use crate::error::{StoreError, StoreResult};
use crate::record::{OwnedPet, PetVisit};
use crate::tables::Tables;
use petclinic_model::{Entity, Owner, Pet, PetType, Specialty, Validate, Vet, Visit};
use petclinic_types::{OwnerId, PetId, PetTypeId, SpecialtyId, VetId, VisitId};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Thread-safe in-memory clinic store.
///
/// Reads return owned copies; nothing handed out aliases the tables.
#[derive(Debug, Default)]
pub struct ClinicStore {
    tables: RwLock<Tables>,
}

impl ClinicStore {
    /// Opens an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|_| StoreError::LockPoisoned)
    }

    // ── Owners ───────────────────────────────────────────────────

    /// The full owner aggregate.
    pub fn find_owner_by_id(&self, id: OwnerId) -> StoreResult<Owner> {
        self.read()?
            .owners
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Owner", id))
    }

    pub fn find_all_owners(&self) -> StoreResult<Vec<Owner>> {
        Ok(self.read()?.owners.values().cloned().collect())
    }

    /// Owners whose last name starts with `prefix` (case-sensitive). An
    /// empty prefix matches everyone.
    pub fn find_owners_by_last_name(&self, prefix: &str) -> StoreResult<Vec<Owner>> {
        Ok(self
            .read()?
            .owners
            .values()
            .filter(|owner| owner.last_name.starts_with(prefix))
            .cloned()
            .collect())
    }

    /// Saves an owner together with its pets and their visits.
    ///
    /// The stored aggregate is replaced wholesale: pets and visits missing
    /// from `owner` are deleted, new ones get identities. Pets and visits
    /// that carry an identity must already belong to this owner.
    pub fn save_owner(&self, mut owner: Owner) -> StoreResult<Owner> {
        owner.validate()?;
        let mut guard = self.write()?;
        let tables = &mut *guard;

        if let Some(id) = owner.id() {
            if !tables.owners.contains_key(&id) {
                return Err(StoreError::not_found("Owner", id));
            }
        }
        let mut pet_types = Vec::with_capacity(owner.pets().len());
        for pet in owner.pets() {
            if let Some(pet_id) = pet.id() {
                if owner.id().is_none() || tables.pet_owner.get(&pet_id) != owner.id().as_ref() {
                    return Err(StoreError::unknown("Pet", pet_id));
                }
            }
            tables.check_visit_ids(pet)?;
            pet_types.push(tables.resolve_pet_type(pet.pet_type.as_ref())?);
        }

        let id = match owner.id() {
            Some(id) => id,
            None => tables.next_owner_id(),
        };
        if let Some(previous) = tables.owners.remove(&id) {
            for pet in previous.pets() {
                tables.unindex_pet(pet);
            }
        }
        let pets = owner.take_pets();
        owner.assign_id(id);
        for (pet, pet_type) in pets.into_iter().zip(pet_types) {
            let pet = tables.index_pet(pet, id, pet_type);
            owner.add_pet(pet);
        }
        tables.owners.insert(id, owner.clone());
        debug!(owner = %id, pets = owner.pets().len(), "saved owner");
        Ok(owner)
    }

    /// Deletes an owner with all of its pets and visits.
    pub fn delete_owner(&self, id: OwnerId) -> StoreResult<()> {
        let mut guard = self.write()?;
        let tables = &mut *guard;
        let owner = tables
            .owners
            .remove(&id)
            .ok_or_else(|| StoreError::not_found("Owner", id))?;
        for pet in owner.pets() {
            tables.unindex_pet(pet);
        }
        debug!(owner = %id, "deleted owner");
        Ok(())
    }

    // ── Pets ─────────────────────────────────────────────────────

    pub fn find_pet_by_id(&self, id: PetId) -> StoreResult<Pet> {
        self.read()?
            .pet(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Pet", id))
    }

    /// Every pet, in identity order.
    pub fn find_all_pets(&self) -> StoreResult<Vec<Pet>> {
        let tables = self.read()?;
        Ok(tables
            .pet_owner
            .keys()
            .filter_map(|id| tables.pet(*id))
            .cloned()
            .collect())
    }

    /// A pet with the owner holding it.
    pub fn find_pet_with_owner(&self, id: PetId) -> StoreResult<OwnedPet> {
        self.read()?
            .owned_pet(id)
            .ok_or_else(|| StoreError::not_found("Pet", id))
    }

    /// Every pet with its owner, in pet identity order.
    pub fn find_all_pets_with_owners(&self) -> StoreResult<Vec<OwnedPet>> {
        let tables = self.read()?;
        Ok(tables
            .pet_owner
            .keys()
            .filter_map(|id| tables.owned_pet(*id))
            .collect())
    }

    /// The pets of one owner, in name order.
    pub fn find_pets_by_owner(&self, owner_id: OwnerId) -> StoreResult<Vec<Pet>> {
        self.read()?
            .owners
            .get(&owner_id)
            .map(|owner| owner.pets().to_vec())
            .ok_or_else(|| StoreError::not_found("Owner", owner_id))
    }

    /// Saves a pet under the owner its back-reference names.
    ///
    /// The owner and the pet type must exist. A saved pet may move to
    /// another owner. The pet's visits are replaced by the ones it carries.
    pub fn save_pet(&self, pet: Pet) -> StoreResult<Pet> {
        pet.validate()?;
        let owner_id = pet
            .owner_id()
            .ok_or_else(|| StoreError::missing("pet", "owner"))?;
        let mut guard = self.write()?;
        let tables = &mut *guard;

        if !tables.owners.contains_key(&owner_id) {
            return Err(StoreError::unknown("Owner", owner_id));
        }
        if let Some(id) = pet.id() {
            if !tables.pet_owner.contains_key(&id) {
                return Err(StoreError::not_found("Pet", id));
            }
        }
        tables.check_visit_ids(&pet)?;
        let pet_type = tables.resolve_pet_type(pet.pet_type.as_ref())?;

        if let Some(id) = pet.id() {
            tables.remove_pet(id);
        }
        let pet = tables.index_pet(pet, owner_id, pet_type);
        let Some(owner) = tables.owners.get_mut(&owner_id) else {
            return Err(StoreError::unknown("Owner", owner_id));
        };
        owner.add_pet(pet.clone());
        debug!(pet = ?pet.id(), owner = %owner_id, "saved pet");
        Ok(pet)
    }

    /// Deletes a pet with its visits.
    pub fn delete_pet(&self, id: PetId) -> StoreResult<()> {
        self.write()?
            .remove_pet(id)
            .ok_or_else(|| StoreError::not_found("Pet", id))?;
        debug!(pet = %id, "deleted pet");
        Ok(())
    }

    // ── Visits ───────────────────────────────────────────────────

    pub fn find_visit_by_id(&self, id: VisitId) -> StoreResult<Visit> {
        self.read()?
            .visit(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Visit", id))
    }

    /// Every visit, in identity order.
    pub fn find_all_visits(&self) -> StoreResult<Vec<Visit>> {
        let tables = self.read()?;
        Ok(tables
            .visit_pet
            .keys()
            .filter_map(|id| tables.visit(*id))
            .cloned()
            .collect())
    }

    /// A visit with its pet and that pet's owner.
    pub fn find_visit_with_parents(&self, id: VisitId) -> StoreResult<PetVisit> {
        self.read()?
            .pet_visit(id)
            .ok_or_else(|| StoreError::not_found("Visit", id))
    }

    /// Every visit with its pet and owner, in visit identity order.
    pub fn find_all_visits_with_parents(&self) -> StoreResult<Vec<PetVisit>> {
        let tables = self.read()?;
        Ok(tables
            .visit_pet
            .keys()
            .filter_map(|id| tables.pet_visit(*id))
            .collect())
    }

    /// The visits of one pet, oldest first.
    pub fn find_visits_by_pet_id(&self, pet_id: PetId) -> StoreResult<Vec<Visit>> {
        self.read()?
            .pet(pet_id)
            .map(|pet| pet.visits().to_vec())
            .ok_or_else(|| StoreError::not_found("Pet", pet_id))
    }

    /// Saves a visit under the pet its back-reference names.
    pub fn save_visit(&self, mut visit: Visit) -> StoreResult<Visit> {
        visit.validate()?;
        let pet_id = visit
            .pet_id()
            .ok_or_else(|| StoreError::missing("visit", "pet"))?;
        let mut guard = self.write()?;
        let tables = &mut *guard;

        let owner_id = tables
            .pet_owner
            .get(&pet_id)
            .copied()
            .ok_or_else(|| StoreError::unknown("Pet", pet_id))?;
        let id = match visit.id() {
            Some(id) => {
                tables
                    .remove_visit(id)
                    .ok_or_else(|| StoreError::not_found("Visit", id))?;
                id
            }
            None => tables.next_visit_id(),
        };
        visit.assign_id(id);

        let Some(owner) = tables.owners.get_mut(&owner_id) else {
            return Err(StoreError::unknown("Owner", owner_id));
        };
        let Some(mut pet) = owner.remove_pet(pet_id) else {
            return Err(StoreError::unknown("Pet", pet_id));
        };
        pet.add_visit(visit.clone());
        owner.add_pet(pet);
        tables.visit_pet.insert(id, pet_id);
        debug!(visit = %id, pet = %pet_id, "saved visit");
        Ok(visit)
    }

    pub fn delete_visit(&self, id: VisitId) -> StoreResult<()> {
        self.write()?
            .remove_visit(id)
            .ok_or_else(|| StoreError::not_found("Visit", id))?;
        debug!(visit = %id, "deleted visit");
        Ok(())
    }

    // ── Pet types ────────────────────────────────────────────────

    pub fn find_pet_type_by_id(&self, id: PetTypeId) -> StoreResult<PetType> {
        self.read()?
            .pet_types
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("PetType", id))
    }

    pub fn find_all_pet_types(&self) -> StoreResult<Vec<PetType>> {
        Ok(self.read()?.pet_types.values().cloned().collect())
    }

    /// Saves a pet type. Renaming a saved type renames it on every pet.
    pub fn save_pet_type(&self, mut pet_type: PetType) -> StoreResult<PetType> {
        pet_type.validate()?;
        let mut tables = self.write()?;
        let id = match pet_type.id() {
            Some(id) if tables.pet_types.contains_key(&id) => id,
            Some(id) => return Err(StoreError::not_found("PetType", id)),
            None => tables.next_pet_type_id(),
        };
        pet_type.assign_id(id);
        tables.pet_types.insert(id, pet_type.clone());
        tables.refresh_pet_type(&pet_type);
        debug!(pet_type = %id, name = %pet_type.name, "saved pet type");
        Ok(pet_type)
    }

    /// Deletes a pet type no pet uses.
    pub fn delete_pet_type(&self, id: PetTypeId) -> StoreResult<()> {
        let mut tables = self.write()?;
        if !tables.pet_types.contains_key(&id) {
            return Err(StoreError::not_found("PetType", id));
        }
        if tables
            .pets()
            .any(|pet| pet.pet_type.as_ref().and_then(Entity::id) == Some(id))
        {
            return Err(StoreError::InUse {
                entity: "PetType",
                id: id.get(),
            });
        }
        tables.pet_types.remove(&id);
        debug!(pet_type = %id, "deleted pet type");
        Ok(())
    }

    // ── Specialties ──────────────────────────────────────────────

    pub fn find_specialty_by_id(&self, id: SpecialtyId) -> StoreResult<Specialty> {
        self.read()?
            .specialties
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Specialty", id))
    }

    pub fn find_all_specialties(&self) -> StoreResult<Vec<Specialty>> {
        Ok(self.read()?.specialties.values().cloned().collect())
    }

    /// Saves a specialty. Renaming a saved specialty renames it on every vet.
    pub fn save_specialty(&self, mut specialty: Specialty) -> StoreResult<Specialty> {
        specialty.validate()?;
        let mut tables = self.write()?;
        let id = match specialty.id() {
            Some(id) if tables.specialties.contains_key(&id) => id,
            Some(id) => return Err(StoreError::not_found("Specialty", id)),
            None => tables.next_specialty_id(),
        };
        specialty.assign_id(id);
        tables.specialties.insert(id, specialty.clone());
        tables.refresh_specialty(id, Some(&specialty));
        debug!(specialty = %id, name = %specialty.name, "saved specialty");
        Ok(specialty)
    }

    /// Deletes a specialty and removes it from every vet holding it.
    pub fn delete_specialty(&self, id: SpecialtyId) -> StoreResult<()> {
        let mut tables = self.write()?;
        tables
            .specialties
            .remove(&id)
            .ok_or_else(|| StoreError::not_found("Specialty", id))?;
        tables.refresh_specialty(id, None);
        debug!(specialty = %id, "deleted specialty");
        Ok(())
    }

    // ── Vets ─────────────────────────────────────────────────────

    pub fn find_vet_by_id(&self, id: VetId) -> StoreResult<Vet> {
        self.read()?
            .vets
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Vet", id))
    }

    pub fn find_all_vets(&self) -> StoreResult<Vec<Vet>> {
        Ok(self.read()?.vets.values().cloned().collect())
    }

    /// Saves a vet. Every specialty must already be saved.
    pub fn save_vet(&self, mut vet: Vet) -> StoreResult<Vet> {
        vet.validate()?;
        let mut tables = self.write()?;
        let specialties = tables.resolve_specialties(&vet)?;
        let id = match vet.id() {
            Some(id) if tables.vets.contains_key(&id) => id,
            Some(id) => return Err(StoreError::not_found("Vet", id)),
            None => tables.next_vet_id(),
        };
        vet.assign_id(id);
        vet.clear_specialties();
        for specialty in specialties {
            vet.add_specialty(specialty);
        }
        tables.vets.insert(id, vet.clone());
        debug!(vet = %id, specialties = vet.nr_of_specialties(), "saved vet");
        Ok(vet)
    }

    pub fn delete_vet(&self, id: VetId) -> StoreResult<()> {
        self.write()?
            .vets
            .remove(&id)
            .ok_or_else(|| StoreError::not_found("Vet", id))?;
        debug!(vet = %id, "deleted vet");
        Ok(())
    }
}

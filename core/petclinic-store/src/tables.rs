use crate::error::{StoreError, StoreResult};
use crate::record::{OwnedPet, PetVisit};
use petclinic_model::{Entity, Owner, Pet, PetType, Specialty, Vet, Visit};
use petclinic_types::{OwnerId, PetId, PetTypeId, SpecialtyId, VetId, VisitId};
use std::collections::BTreeMap;

/// Last identity handed out per table.
#[derive(Debug, Default)]
struct Sequences {
    owner: i32,
    pet: i32,
    visit: i32,
    pet_type: i32,
    specialty: i32,
    vet: i32,
}

/// Everything the store holds, guarded by a single lock.
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub owners: BTreeMap<OwnerId, Owner>,
    pub pet_owner: BTreeMap<PetId, OwnerId>,
    pub visit_pet: BTreeMap<VisitId, PetId>,
    pub pet_types: BTreeMap<PetTypeId, PetType>,
    pub specialties: BTreeMap<SpecialtyId, Specialty>,
    pub vets: BTreeMap<VetId, Vet>,
    seq: Sequences,
}

impl Tables {
    // ── Sequences ────────────────────────────────────────────────

    pub fn next_owner_id(&mut self) -> OwnerId {
        self.seq.owner += 1;
        OwnerId::new(self.seq.owner)
    }

    pub fn next_pet_id(&mut self) -> PetId {
        self.seq.pet += 1;
        PetId::new(self.seq.pet)
    }

    pub fn next_visit_id(&mut self) -> VisitId {
        self.seq.visit += 1;
        VisitId::new(self.seq.visit)
    }

    pub fn next_pet_type_id(&mut self) -> PetTypeId {
        self.seq.pet_type += 1;
        PetTypeId::new(self.seq.pet_type)
    }

    pub fn next_specialty_id(&mut self) -> SpecialtyId {
        self.seq.specialty += 1;
        SpecialtyId::new(self.seq.specialty)
    }

    pub fn next_vet_id(&mut self) -> VetId {
        self.seq.vet += 1;
        VetId::new(self.seq.vet)
    }

    // ── Lookups ──────────────────────────────────────────────────

    pub fn pet(&self, id: PetId) -> Option<&Pet> {
        let owner_id = self.pet_owner.get(&id)?;
        self.owners.get(owner_id)?.pet(id)
    }

    pub fn visit(&self, id: VisitId) -> Option<&Visit> {
        let pet_id = self.visit_pet.get(&id)?;
        self.pet(*pet_id)?.visit(id)
    }

    pub fn pets(&self) -> impl Iterator<Item = &Pet> {
        self.owners.values().flat_map(Owner::pets)
    }

    pub fn owned_pet(&self, id: PetId) -> Option<OwnedPet> {
        let owner = self.owners.get(self.pet_owner.get(&id)?)?;
        let pet = owner.pet(id)?;
        Some(OwnedPet {
            pet: pet.clone(),
            owner: owner.clone(),
        })
    }

    pub fn pet_visit(&self, id: VisitId) -> Option<PetVisit> {
        let pet_id = *self.visit_pet.get(&id)?;
        let owner = self.owners.get(self.pet_owner.get(&pet_id)?)?;
        let pet = owner.pet(pet_id)?;
        let visit = pet.visit(id)?;
        Some(PetVisit {
            visit: visit.clone(),
            pet: pet.clone(),
            owner: owner.clone(),
        })
    }

    // ── Reference checks (no mutation) ───────────────────────────

    /// The stored copy of the pet's type.
    pub fn resolve_pet_type(&self, pet_type: Option<&PetType>) -> StoreResult<PetType> {
        let id = pet_type
            .and_then(Entity::id)
            .ok_or_else(|| StoreError::missing("pet", "type"))?;
        self.pet_types
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::unknown("PetType", id))
    }

    /// Visit identities carried by `pet` must already belong to it.
    pub fn check_visit_ids(&self, pet: &Pet) -> StoreResult<()> {
        for visit in pet.visits() {
            if let Some(id) = visit.id() {
                if pet.id().is_none() || self.visit_pet.get(&id) != pet.id().as_ref() {
                    return Err(StoreError::unknown("Visit", id));
                }
            }
        }
        Ok(())
    }

    /// The stored copies of the vet's specialties.
    pub fn resolve_specialties(&self, vet: &Vet) -> StoreResult<Vec<Specialty>> {
        vet.specialties()
            .iter()
            .map(|specialty| {
                let id = specialty
                    .id()
                    .ok_or_else(|| StoreError::missing("vet", "specialty"))?;
                self.specialties
                    .get(&id)
                    .cloned()
                    .ok_or_else(|| StoreError::unknown("Specialty", id))
            })
            .collect()
    }

    // ── Index maintenance ────────────────────────────────────────

    /// Assigns identities to `pet` and its visits and indexes them under
    /// `owner_id`. The caller adds the returned pet to the owner.
    pub fn index_pet(&mut self, mut pet: Pet, owner_id: OwnerId, pet_type: PetType) -> Pet {
        let id = match pet.id() {
            Some(id) => id,
            None => self.next_pet_id(),
        };
        let visits = pet.take_visits();
        pet.assign_id(id);
        pet.set_owner_id(Some(owner_id));
        pet.pet_type = Some(pet_type);
        for mut visit in visits {
            let visit_id = match visit.id() {
                Some(visit_id) => visit_id,
                None => self.next_visit_id(),
            };
            visit.assign_id(visit_id);
            self.visit_pet.insert(visit_id, id);
            pet.add_visit(visit);
        }
        self.pet_owner.insert(id, owner_id);
        pet
    }

    pub fn unindex_pet(&mut self, pet: &Pet) {
        if let Some(id) = pet.id() {
            self.pet_owner.remove(&id);
        }
        for visit in pet.visits() {
            if let Some(id) = visit.id() {
                self.visit_pet.remove(&id);
            }
        }
    }

    /// Detaches a pet from its owner and drops its index entries.
    pub fn remove_pet(&mut self, id: PetId) -> Option<Pet> {
        let owner_id = self.pet_owner.get(&id).copied()?;
        let pet = self.owners.get_mut(&owner_id)?.remove_pet(id)?;
        self.unindex_pet(&pet);
        Some(pet)
    }

    /// Detaches a visit from its pet and drops its index entry.
    pub fn remove_visit(&mut self, id: VisitId) -> Option<Visit> {
        let pet_id = self.visit_pet.remove(&id)?;
        let owner_id = self.pet_owner.get(&pet_id).copied()?;
        let owner = self.owners.get_mut(&owner_id)?;
        let mut pet = owner.remove_pet(pet_id)?;
        let visit = pet.remove_visit(id);
        owner.add_pet(pet);
        visit
    }

    // ── Propagation of shared values ─────────────────────────────

    /// Replaces every pet's copy of a pet type.
    pub fn refresh_pet_type(&mut self, pet_type: &PetType) {
        let id = pet_type.id();
        for owner in self.owners.values_mut() {
            let mut pets = owner.take_pets();
            for pet in &mut pets {
                if pet.pet_type.as_ref().and_then(Entity::id) == id {
                    pet.pet_type = Some(pet_type.clone());
                }
            }
            owner.set_pets(pets);
        }
    }

    /// Replaces every vet's copy of a specialty, or drops it when `replacement`
    /// is `None`.
    pub fn refresh_specialty(&mut self, id: SpecialtyId, replacement: Option<&Specialty>) {
        for vet in self.vets.values_mut() {
            if !vet.specialties().iter().any(|s| s.id() == Some(id)) {
                continue;
            }
            let held: Vec<Specialty> = vet.specialties().to_vec();
            vet.clear_specialties();
            for specialty in held {
                if specialty.id() != Some(id) {
                    vet.add_specialty(specialty);
                } else if let Some(replacement) = replacement {
                    vet.add_specialty(replacement.clone());
                }
            }
        }
    }
}

use crate::ordering::{insert_sorted, visit_order};
use crate::validation::{MUST_NOT_BE_NULL, Validate, ValidationErrors};
use crate::{Entity, Named, PetType, Visit};
use chrono::NaiveDate;
use petclinic_types::{OwnerId, PetId, VisitId};
use std::fmt;

/// A pet, owned by exactly one owner once valid.
///
/// Visits are kept in date order. The owner is referenced by identifier; the
/// owner itself owns the pet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pet {
    id: Option<PetId>,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub pet_type: Option<PetType>,
    owner_id: Option<OwnerId>,
    visits: Vec<Visit>,
}

impl Pet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            birth_date: None,
            pet_type: None,
            owner_id: None,
            visits: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: PetId) -> Self {
        self.assign_id(id);
        self
    }

    #[must_use]
    pub fn with_birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }

    #[must_use]
    pub fn with_type(mut self, pet_type: PetType) -> Self {
        self.pet_type = Some(pet_type);
        self
    }

    #[must_use]
    pub fn with_owner_id(mut self, owner_id: OwnerId) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    /// Sets the identity and re-points every owned visit at it.
    pub fn assign_id(&mut self, id: PetId) {
        self.id = Some(id);
        for visit in &mut self.visits {
            visit.set_pet_id(Some(id));
        }
    }

    /// The owner this pet belongs to.
    pub fn owner_id(&self) -> Option<OwnerId> {
        self.owner_id
    }

    pub fn set_owner_id(&mut self, owner_id: Option<OwnerId>) {
        self.owner_id = owner_id;
    }

    /// Visits, oldest first.
    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    /// Takes ownership of `visit`, pointing it at this pet.
    pub fn add_visit(&mut self, mut visit: Visit) {
        visit.set_pet_id(self.id);
        insert_sorted(&mut self.visits, visit, visit_order);
    }

    /// Replaces every visit.
    pub fn set_visits(&mut self, visits: impl IntoIterator<Item = Visit>) {
        self.visits.clear();
        for visit in visits {
            self.add_visit(visit);
        }
    }

    pub fn visit(&self, id: VisitId) -> Option<&Visit> {
        self.visits.iter().find(|v| v.id() == Some(id))
    }

    pub fn remove_visit(&mut self, id: VisitId) -> Option<Visit> {
        let pos = self.visits.iter().position(|v| v.id() == Some(id))?;
        Some(self.visits.remove(pos))
    }

    /// A copy of this pet without its visits.
    #[must_use]
    pub fn without_visits(&self) -> Pet {
        Pet {
            id: self.id,
            name: self.name.clone(),
            birth_date: self.birth_date,
            pet_type: self.pet_type.clone(),
            owner_id: self.owner_id,
            visits: Vec::new(),
        }
    }

    /// Takes this pet's visits, leaving it with none.
    pub fn take_visits(&mut self) -> Vec<Visit> {
        std::mem::take(&mut self.visits)
    }
}

impl Entity for Pet {
    type Id = PetId;

    fn id(&self) -> Option<PetId> {
        self.id
    }
}

impl Named for Pet {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Validate for Pet {
    fn collect_errors(&self, errors: &mut ValidationErrors) {
        errors.require_text("pet", "name", &self.name);
        if let Some(birth_date) = self.birth_date {
            errors.require_wire_date("pet", "birthDate", birth_date);
        }
        match &self.pet_type {
            Some(pet_type) => {
                let mut nested = ValidationErrors::new();
                pet_type.collect_errors(&mut nested);
                errors.absorb("type", nested);
            }
            None => errors.push("pet", "type", None, MUST_NOT_BE_NULL),
        }
        for (i, visit) in self.visits.iter().enumerate() {
            let mut nested = ValidationErrors::new();
            visit.collect_errors(&mut nested);
            errors.absorb(&format!("visits[{i}]"), nested);
        }
    }
}

impl fmt::Display for Pet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

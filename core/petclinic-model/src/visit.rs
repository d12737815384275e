use crate::Entity;
use crate::validation::{Validate, ValidationErrors};
use chrono::{Local, NaiveDate};
use petclinic_types::{PetId, VisitId};

/// A visit of a pet to the clinic.
///
/// The pet is referenced by identifier only; the pet owns its visits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    id: Option<VisitId>,
    pub date: NaiveDate,
    pub description: String,
    pet_id: Option<PetId>,
}

impl Visit {
    /// A visit dated today.
    pub fn new(description: impl Into<String>) -> Self {
        Self::on(Local::now().date_naive(), description)
    }

    /// A visit on a given day.
    pub fn on(date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            id: None,
            date,
            description: description.into(),
            pet_id: None,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: VisitId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn for_pet(mut self, pet_id: PetId) -> Self {
        self.pet_id = Some(pet_id);
        self
    }

    pub fn assign_id(&mut self, id: VisitId) {
        self.id = Some(id);
    }

    /// The pet this visit belongs to.
    pub fn pet_id(&self) -> Option<PetId> {
        self.pet_id
    }

    pub fn set_pet_id(&mut self, pet_id: Option<PetId>) {
        self.pet_id = pet_id;
    }
}

impl Entity for Visit {
    type Id = VisitId;

    fn id(&self) -> Option<VisitId> {
        self.id
    }
}

impl Validate for Visit {
    fn collect_errors(&self, errors: &mut ValidationErrors) {
        errors.require_wire_date("visit", "date", self.date);
        errors.require_text("visit", "description", &self.description);
    }
}

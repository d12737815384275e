use crate::validation::{Validate, ValidationErrors};
use crate::{Entity, Named};
use petclinic_types::{PetTypeId, SpecialtyId, deserialize_optional_id};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A kind of animal the clinic treats ("cat", "dog", ...).
///
/// Referenced, not owned, by pets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetType {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    id: Option<PetTypeId>,
    pub name: String,
}

impl PetType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: PetTypeId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn assign_id(&mut self, id: PetTypeId) {
        self.id = Some(id);
    }
}

impl Entity for PetType {
    type Id = PetTypeId;

    fn id(&self) -> Option<PetTypeId> {
        self.id
    }
}

impl Named for PetType {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Validate for PetType {
    fn collect_errors(&self, errors: &mut ValidationErrors) {
        errors.require_text("petType", "name", &self.name);
    }
}

impl fmt::Display for PetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A vet's area of expertise ("radiology", "surgery", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specialty {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    id: Option<SpecialtyId>,
    pub name: String,
}

impl Specialty {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: SpecialtyId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn assign_id(&mut self, id: SpecialtyId) {
        self.id = Some(id);
    }
}

impl Entity for Specialty {
    type Id = SpecialtyId;

    fn id(&self) -> Option<SpecialtyId> {
        self.id
    }
}

impl Named for Specialty {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Validate for Specialty {
    fn collect_errors(&self, errors: &mut ValidationErrors) {
        errors.require_text("specialty", "name", &self.name);
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

use crate::ordering::{insert_sorted, specialty_order};
use crate::validation::{Validate, ValidationErrors};
use crate::{Entity, Person, Specialty};
use petclinic_types::{VetId, deserialize_optional_id};
use serde::{Deserialize, Deserializer, Serialize};

/// A veterinarian and the specialties they hold.
///
/// Specialties behave as a set (no duplicates) presented in name order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vet {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    id: Option<VetId>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, deserialize_with = "deserialize_specialty_set")]
    specialties: Vec<Specialty>,
}

impl Vet {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            specialties: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: VetId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn assign_id(&mut self, id: VetId) {
        self.id = Some(id);
    }

    /// Specialties, sorted by name ignoring case.
    pub fn specialties(&self) -> &[Specialty] {
        &self.specialties
    }

    pub fn nr_of_specialties(&self) -> usize {
        self.specialties.len()
    }

    /// Adds a specialty unless the vet already holds it.
    ///
    /// Saved specialties are matched by identity, unsaved ones by value.
    pub fn add_specialty(&mut self, specialty: Specialty) {
        add_to_set(&mut self.specialties, specialty);
    }

    pub fn clear_specialties(&mut self) {
        self.specialties.clear();
    }
}

fn add_to_set(specialties: &mut Vec<Specialty>, specialty: Specialty) {
    let held = specialties.iter().any(|s| match (s.id(), specialty.id()) {
        (Some(a), Some(b)) => a == b,
        _ => *s == specialty,
    });
    if !held {
        insert_sorted(specialties, specialty, specialty_order);
    }
}

/// Reads a specialty list into name order, dropping repeats.
fn deserialize_specialty_set<'de, D>(deserializer: D) -> Result<Vec<Specialty>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut specialties = Vec::new();
    for specialty in Vec::<Specialty>::deserialize(deserializer)? {
        add_to_set(&mut specialties, specialty);
    }
    Ok(specialties)
}

impl Entity for Vet {
    type Id = VetId;

    fn id(&self) -> Option<VetId> {
        self.id
    }
}

impl Person for Vet {
    fn first_name(&self) -> &str {
        &self.first_name
    }

    fn last_name(&self) -> &str {
        &self.last_name
    }
}

impl Validate for Vet {
    fn collect_errors(&self, errors: &mut ValidationErrors) {
        errors.require_text("vet", "firstName", &self.first_name);
        errors.require_text("vet", "lastName", &self.last_name);
        for (i, specialty) in self.specialties.iter().enumerate() {
            let mut nested = ValidationErrors::new();
            specialty.collect_errors(&mut nested);
            errors.absorb(&format!("specialties[{i}]"), nested);
        }
    }
}

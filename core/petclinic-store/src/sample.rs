//! The classic clinic data set.

use crate::error::StoreResult;
use crate::store::ClinicStore;
use chrono::NaiveDate;
use petclinic_model::{Entity, Owner, Pet, PetType, Specialty, Vet, Visit};
use petclinic_types::{OwnerId, PetId, PetTypeId};
use tracing::info;

const PET_TYPES: [&str; 6] = ["cat", "dog", "lizard", "snake", "bird", "hamster"];

const SPECIALTIES: [&str; 3] = ["radiology", "surgery", "dentistry"];

/// (first name, last name, specialty ids)
const VETS: [(&str, &str, &[usize]); 6] = [
    ("James", "Carter", &[]),
    ("Helen", "Leary", &[1]),
    ("Linda", "Douglas", &[2, 3]),
    ("Rafael", "Ortega", &[2]),
    ("Henry", "Stevens", &[1]),
    ("Sharon", "Jenkins", &[]),
];

const OWNERS: [[&str; 5]; 10] = [
    ["George", "Franklin", "110 W. Liberty St.", "Madison", "6085551023"],
    ["Betty", "Davis", "638 Cardinal Ave.", "Sun Prairie", "6085551749"],
    ["Eduardo", "Rodriquez", "2693 Commerce St.", "McFarland", "6085558763"],
    ["Harold", "Davis", "563 Friendly St.", "Windsor", "6085553198"],
    ["Peter", "McTavish", "2387 S. Fair Way", "Madison", "6085552765"],
    ["Jean", "Coleman", "105 N. Lake St.", "Monona", "6085552654"],
    ["Jeff", "Black", "1450 Oak Blvd.", "Monona", "6085555387"],
    ["Maria", "Escobito", "345 Maple St.", "Madison", "6085557683"],
    ["David", "Schroeder", "2749 Blackhawk Trail", "Madison", "6085559435"],
    ["Carlos", "Estaban", "2335 Independence La.", "Waunakee", "6085555487"],
];

/// A calendar day fixed at compile time; an impossible date fails the build.
const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("sample date does not exist"),
    }
}

/// (name, birth date, pet type id, owner id)
const PETS: [(&str, NaiveDate, i32, i32); 13] = [
    ("Leo", ymd(2010, 9, 7), 1, 1),
    ("Basil", ymd(2012, 8, 6), 6, 2),
    ("Rosy", ymd(2011, 4, 17), 2, 3),
    ("Jewel", ymd(2010, 3, 7), 2, 3),
    ("Iggy", ymd(2010, 11, 30), 3, 4),
    ("George", ymd(2010, 1, 20), 4, 5),
    ("Samantha", ymd(2012, 9, 4), 1, 6),
    ("Max", ymd(2012, 9, 4), 1, 6),
    ("Lucky", ymd(2011, 8, 6), 5, 7),
    ("Mulligan", ymd(2007, 2, 24), 2, 8),
    ("Freddy", ymd(2010, 3, 9), 5, 9),
    ("Lucky", ymd(2010, 6, 24), 2, 10),
    ("Sly", ymd(2012, 6, 8), 1, 10),
];

/// (pet id, date, description)
const VISITS: [(i32, NaiveDate, &str); 4] = [
    (7, ymd(2013, 1, 1), "rabies shot"),
    (8, ymd(2013, 1, 2), "rabies shot"),
    (8, ymd(2013, 1, 3), "neutered"),
    (7, ymd(2013, 1, 4), "spayed"),
];

impl ClinicStore {
    /// A store seeded with the classic clinic: six pet types, three
    /// specialties, six vets, ten owners, thirteen pets and four visits.
    ///
    /// Identities follow insertion order, so George Franklin is owner 1 and
    /// his cat Leo is pet 1.
    pub fn with_sample_data() -> StoreResult<Self> {
        let store = Self::new();

        let mut pet_types = Vec::with_capacity(PET_TYPES.len());
        for name in PET_TYPES {
            pet_types.push(store.save_pet_type(PetType::new(name))?);
        }

        let mut specialties = Vec::with_capacity(SPECIALTIES.len());
        for name in SPECIALTIES {
            specialties.push(store.save_specialty(Specialty::new(name))?);
        }

        for (first_name, last_name, held) in VETS {
            let mut vet = Vet::new(first_name, last_name);
            for index in held {
                if let Some(specialty) = specialties.get(index - 1) {
                    vet.add_specialty(specialty.clone());
                }
            }
            store.save_vet(vet)?;
        }

        for [first_name, last_name, address, city, telephone] in OWNERS {
            store.save_owner(Owner::new(first_name, last_name, address, city, telephone))?;
        }

        for (name, birth_date, type_id, owner_id) in PETS {
            let pet_type = pet_types
                .iter()
                .find(|t| t.id() == Some(PetTypeId::new(type_id)))
                .cloned();
            let mut pet = Pet::new(name).with_owner_id(OwnerId::new(owner_id));
            pet.birth_date = Some(birth_date);
            pet.pet_type = pet_type;
            store.save_pet(pet)?;
        }

        for (pet_id, date, description) in VISITS {
            store.save_visit(Visit::on(date, description).for_pet(PetId::new(pet_id)))?;
        }

        info!(
            owners = OWNERS.len(),
            pets = PETS.len(),
            vets = VETS.len(),
            "seeded sample data"
        );
        Ok(store)
    }
}

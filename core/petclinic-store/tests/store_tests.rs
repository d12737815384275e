use chrono::NaiveDate;
use petclinic_model::{Entity, Owner, Pet, PetType, Specialty, Vet, Visit};
use petclinic_store::{ClinicStore, StoreError};
use petclinic_types::{OwnerId, PetId, PetTypeId, SpecialtyId, VetId, VisitId};
use pretty_assertions::assert_eq;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn george() -> Owner {
    Owner::new("George", "Franklin", "110 W. Liberty St.", "Madison", "6085551023")
}

/// A store holding one pet type ("cat", id 1) and one owner (id 1).
fn store_with_owner() -> (ClinicStore, PetType, Owner) {
    let store = ClinicStore::new();
    let cat = store.save_pet_type(PetType::new("cat")).unwrap();
    let owner = store.save_owner(george()).unwrap();
    (store, cat, owner)
}

fn leo(cat: &PetType, owner: &Owner) -> Pet {
    Pet::new("Leo")
        .with_birth_date(day(2010, 9, 7))
        .with_type(cat.clone())
        .with_owner_id(owner.id().unwrap())
}

// ── Owners ────────────────────────────────────────────────────────

#[test]
fn save_owner_assigns_identity() {
    let store = ClinicStore::new();
    let saved = store.save_owner(george()).unwrap();
    assert_eq!(saved.id(), Some(OwnerId::new(1)));
    assert_eq!(store.find_owner_by_id(OwnerId::new(1)).unwrap(), saved);
}

#[test]
fn identities_are_never_reused() {
    let store = ClinicStore::new();
    let first = store.save_owner(george()).unwrap();
    store.delete_owner(first.id().unwrap()).unwrap();
    let second = store.save_owner(george()).unwrap();
    assert_eq!(second.id(), Some(OwnerId::new(2)));
}

#[test]
fn save_owner_rejects_invalid_fields() {
    let store = ClinicStore::new();
    let owner = Owner::new("", "Franklin", "a", "b", "12ab");
    match store.save_owner(owner) {
        Err(StoreError::Validation(errors)) => {
            let fields: Vec<_> = errors.errors().iter().map(|e| e.field_name.as_str()).collect();
            assert_eq!(fields, vec!["firstName", "telephone"]);
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
    assert!(store.find_all_owners().unwrap().is_empty());
}

#[test]
fn save_owner_with_unknown_id_is_not_found() {
    let store = ClinicStore::new();
    let err = store.save_owner(george().with_id(OwnerId::new(42))).unwrap_err();
    assert!(matches!(err, StoreError::NotFound { entity: "Owner", id: 42 }));
}

#[test]
fn save_owner_cascades_to_pets_and_visits() {
    let store = ClinicStore::new();
    let cat = store.save_pet_type(PetType::new("cat")).unwrap();
    let mut owner = george();
    let mut pet = Pet::new("Leo").with_type(cat);
    pet.add_visit(Visit::on(day(2013, 1, 1), "rabies shot"));
    owner.add_pet(pet);

    let saved = store.save_owner(owner).unwrap();
    let pet = &saved.pets()[0];
    assert_eq!(pet.id(), Some(PetId::new(1)));
    assert_eq!(pet.owner_id(), saved.id());
    assert_eq!(pet.visits()[0].id(), Some(VisitId::new(1)));
    assert_eq!(pet.visits()[0].pet_id(), Some(PetId::new(1)));

    assert_eq!(store.find_pet_by_id(PetId::new(1)).unwrap().name, "Leo");
    assert_eq!(
        store.find_visit_by_id(VisitId::new(1)).unwrap().description,
        "rabies shot"
    );
}

#[test]
fn resaving_owner_drops_missing_pets() {
    let (store, cat, owner) = store_with_owner();
    store.save_pet(leo(&cat, &owner)).unwrap();

    let mut updated = store.find_owner_by_id(owner.id().unwrap()).unwrap();
    updated.take_pets();
    store.save_owner(updated).unwrap();

    assert!(store.find_all_pets().unwrap().is_empty());
    assert!(matches!(
        store.find_pet_by_id(PetId::new(1)),
        Err(StoreError::NotFound { entity: "Pet", .. })
    ));
}

#[test]
fn owner_cannot_claim_a_foreign_pet() {
    let (store, cat, owner) = store_with_owner();
    store.save_pet(leo(&cat, &owner)).unwrap();
    let mut other = Owner::new("Betty", "Davis", "638 Cardinal Ave.", "Sun Prairie", "6085551749");
    other.add_pet(Pet::new("Leo").with_id(PetId::new(1)).with_type(cat));

    let err = store.save_owner(other).unwrap_err();
    assert!(matches!(err, StoreError::UnknownReference { entity: "Pet", id: 1 }));
}

#[test]
fn find_owners_by_last_name_prefix() {
    let store = ClinicStore::new();
    store.save_owner(george()).unwrap();
    store
        .save_owner(Owner::new("Betty", "Davis", "638 Cardinal Ave.", "Sun Prairie", "6085551749"))
        .unwrap();
    store
        .save_owner(Owner::new("Harold", "Davis", "563 Friendly St.", "Windsor", "6085553198"))
        .unwrap();

    let davises: Vec<_> = store
        .find_owners_by_last_name("Dav")
        .unwrap()
        .into_iter()
        .map(|o| o.first_name)
        .collect();
    assert_eq!(davises, vec!["Betty", "Harold"]);
    assert!(store.find_owners_by_last_name("dav").unwrap().is_empty());
    assert_eq!(store.find_owners_by_last_name("").unwrap().len(), 3);
}

#[test]
fn delete_owner_cascades() {
    let (store, cat, owner) = store_with_owner();
    let pet = store.save_pet(leo(&cat, &owner)).unwrap();
    store
        .save_visit(Visit::on(day(2013, 1, 1), "rabies shot").for_pet(pet.id().unwrap()))
        .unwrap();

    store.delete_owner(owner.id().unwrap()).unwrap();
    assert!(store.find_all_pets().unwrap().is_empty());
    assert!(store.find_all_visits().unwrap().is_empty());
    assert!(matches!(
        store.delete_owner(owner.id().unwrap()),
        Err(StoreError::NotFound { .. })
    ));
}

// ── Pets ──────────────────────────────────────────────────────────

#[test]
fn save_pet_attaches_to_owner() {
    let (store, cat, owner) = store_with_owner();
    let pet = store.save_pet(leo(&cat, &owner)).unwrap();

    let pets = store.find_pets_by_owner(owner.id().unwrap()).unwrap();
    assert_eq!(pets, vec![pet.clone()]);
    assert_eq!(
        store.find_owner_by_id(owner.id().unwrap()).unwrap().pets(),
        &[pet][..]
    );
}

#[test]
fn save_pet_requires_owner() {
    let (store, cat, _) = store_with_owner();
    let err = store.save_pet(Pet::new("Leo").with_type(cat)).unwrap_err();
    assert!(matches!(
        err,
        StoreError::MissingReference {
            entity: "pet",
            association: "owner"
        }
    ));
}

#[test]
fn save_pet_rejects_unknown_owner_and_type() {
    let (store, cat, _) = store_with_owner();
    let err = store
        .save_pet(Pet::new("Leo").with_type(cat.clone()).with_owner_id(OwnerId::new(9)))
        .unwrap_err();
    assert!(matches!(err, StoreError::UnknownReference { entity: "Owner", id: 9 }));

    let dragon = PetType::new("dragon").with_id(PetTypeId::new(99));
    let err = store
        .save_pet(Pet::new("Puff").with_type(dragon).with_owner_id(OwnerId::new(1)))
        .unwrap_err();
    assert!(matches!(err, StoreError::UnknownReference { entity: "PetType", id: 99 }));
}

#[test]
fn save_pet_uses_stored_type() {
    let (store, cat, owner) = store_with_owner();
    let stale = PetType::new("kitty").with_id(cat.id().unwrap());
    let pet = store
        .save_pet(Pet::new("Leo").with_type(stale).with_owner_id(owner.id().unwrap()))
        .unwrap();
    assert_eq!(pet.pet_type, Some(cat));
}

#[test]
fn pet_can_move_to_another_owner() {
    let (store, cat, owner) = store_with_owner();
    let betty = store
        .save_owner(Owner::new("Betty", "Davis", "638 Cardinal Ave.", "Sun Prairie", "6085551749"))
        .unwrap();
    let mut pet = store.save_pet(leo(&cat, &owner)).unwrap();

    pet.set_owner_id(betty.id());
    store.save_pet(pet).unwrap();

    assert!(store.find_pets_by_owner(owner.id().unwrap()).unwrap().is_empty());
    assert_eq!(store.find_pets_by_owner(betty.id().unwrap()).unwrap().len(), 1);
}

#[test]
fn delete_pet_cascades_visits() {
    let (store, cat, owner) = store_with_owner();
    let pet = store.save_pet(leo(&cat, &owner)).unwrap();
    let visit = store
        .save_visit(Visit::on(day(2013, 1, 1), "rabies shot").for_pet(pet.id().unwrap()))
        .unwrap();

    store.delete_pet(pet.id().unwrap()).unwrap();
    assert!(matches!(
        store.find_visit_by_id(visit.id().unwrap()),
        Err(StoreError::NotFound { entity: "Visit", .. })
    ));
    assert!(store.find_owner_by_id(owner.id().unwrap()).unwrap().pets().is_empty());
}

#[test]
fn pet_with_owner_reads_both_together() {
    let (store, cat, owner) = store_with_owner();
    let pet = store.save_pet(leo(&cat, &owner)).unwrap();

    let record = store.find_pet_with_owner(pet.id().unwrap()).unwrap();
    assert_eq!(record.pet, pet);
    assert_eq!(record.owner.id(), owner.id());
    assert_eq!(record.owner.pets(), std::slice::from_ref(&pet));

    store.delete_owner(owner.id().unwrap()).unwrap();
    assert!(matches!(
        store.find_pet_with_owner(pet.id().unwrap()),
        Err(StoreError::NotFound { entity: "Pet", .. })
    ));
    assert!(store.find_all_pets_with_owners().unwrap().is_empty());
}

#[test]
fn save_pet_rejects_birth_date_without_four_digit_year() {
    let (store, cat, owner) = store_with_owner();
    let pet = leo(&cat, &owner).with_birth_date(day(10000, 1, 1));
    let err = store.save_pet(pet).unwrap_err();
    let StoreError::Validation(errors) = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(errors.errors()[0].field_name, "birthDate");
}

#[test]
fn parent_reads_never_tear_under_concurrent_deletes() {
    let (store, cat, _) = store_with_owner();
    let store = std::sync::Arc::new(store);
    let done = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));

    let readers: Vec<_> = (0..3)
        .map(|_| {
            let store = std::sync::Arc::clone(&store);
            let done = std::sync::Arc::clone(&done);
            std::thread::spawn(move || {
                while !done.load(std::sync::atomic::Ordering::Relaxed) {
                    for record in store.find_all_pets_with_owners().unwrap() {
                        assert_eq!(record.pet.owner_id(), record.owner.id());
                        assert!(record.owner.pet(record.pet.id().unwrap()).is_some());
                    }
                    for record in store.find_all_visits_with_parents().unwrap() {
                        assert_eq!(record.visit.pet_id(), record.pet.id());
                        assert_eq!(record.pet.owner_id(), record.owner.id());
                    }
                }
            })
        })
        .collect();

    for _ in 0..500 {
        let owner = store.save_owner(george()).unwrap();
        let pet = store.save_pet(leo(&cat, &owner)).unwrap();
        store
            .save_visit(Visit::on(day(2013, 1, 1), "rabies shot").for_pet(pet.id().unwrap()))
            .unwrap();
        store.delete_owner(owner.id().unwrap()).unwrap();
    }
    done.store(true, std::sync::atomic::Ordering::Relaxed);

    for reader in readers {
        reader.join().unwrap();
    }
}

// ── Visits ────────────────────────────────────────────────────────

#[test]
fn visit_with_parents_reads_all_three() {
    let (store, cat, owner) = store_with_owner();
    let pet_id = store.save_pet(leo(&cat, &owner)).unwrap().id().unwrap();
    let visit = store
        .save_visit(Visit::on(day(2013, 1, 1), "rabies shot").for_pet(pet_id))
        .unwrap();

    let record = store.find_visit_with_parents(visit.id().unwrap()).unwrap();
    assert_eq!(record.visit, visit);
    assert_eq!(record.pet.id(), Some(pet_id));
    assert_eq!(record.owner.id(), owner.id());
    assert_eq!(store.find_all_visits_with_parents().unwrap(), vec![record]);

    assert!(matches!(
        store.find_visit_with_parents(VisitId::new(99)),
        Err(StoreError::NotFound { entity: "Visit", id: 99 })
    ));
}

#[test]
fn visits_are_kept_in_date_order() {
    let (store, cat, owner) = store_with_owner();
    let pet_id = store.save_pet(leo(&cat, &owner)).unwrap().id().unwrap();
    store
        .save_visit(Visit::on(day(2013, 1, 4), "spayed").for_pet(pet_id))
        .unwrap();
    store
        .save_visit(Visit::on(day(2013, 1, 1), "rabies shot").for_pet(pet_id))
        .unwrap();

    let dates: Vec<_> = store
        .find_visits_by_pet_id(pet_id)
        .unwrap()
        .iter()
        .map(|v| v.date)
        .collect();
    assert_eq!(dates, vec![day(2013, 1, 1), day(2013, 1, 4)]);
}

#[test]
fn save_visit_updates_in_place() {
    let (store, cat, owner) = store_with_owner();
    let pet_id = store.save_pet(leo(&cat, &owner)).unwrap().id().unwrap();
    let mut visit = store
        .save_visit(Visit::on(day(2013, 1, 1), "rabies shot").for_pet(pet_id))
        .unwrap();

    visit.description = "booster".into();
    store.save_visit(visit.clone()).unwrap();

    assert_eq!(store.find_all_visits().unwrap(), vec![visit]);
}

#[test]
fn save_visit_requires_known_pet() {
    let store = ClinicStore::new();
    let err = store
        .save_visit(Visit::on(day(2013, 1, 1), "rabies shot"))
        .unwrap_err();
    assert!(matches!(err, StoreError::MissingReference { entity: "visit", .. }));

    let err = store
        .save_visit(Visit::on(day(2013, 1, 1), "rabies shot").for_pet(PetId::new(5)))
        .unwrap_err();
    assert!(matches!(err, StoreError::UnknownReference { entity: "Pet", id: 5 }));
}

#[test]
fn delete_visit_removes_it_from_pet() {
    let (store, cat, owner) = store_with_owner();
    let pet_id = store.save_pet(leo(&cat, &owner)).unwrap().id().unwrap();
    let visit = store
        .save_visit(Visit::on(day(2013, 1, 1), "rabies shot").for_pet(pet_id))
        .unwrap();

    store.delete_visit(visit.id().unwrap()).unwrap();
    assert!(store.find_pet_by_id(pet_id).unwrap().visits().is_empty());
}

// ── Pet types ─────────────────────────────────────────────────────

#[test]
fn renaming_a_pet_type_renames_it_on_pets() {
    let (store, cat, owner) = store_with_owner();
    let pet_id = store.save_pet(leo(&cat, &owner)).unwrap().id().unwrap();

    let mut renamed = cat;
    renamed.name = "feline".into();
    store.save_pet_type(renamed).unwrap();

    let pet = store.find_pet_by_id(pet_id).unwrap();
    assert_eq!(pet.pet_type.unwrap().name, "feline");
}

#[test]
fn pet_type_in_use_cannot_be_deleted() {
    let (store, cat, owner) = store_with_owner();
    store.save_pet(leo(&cat, &owner)).unwrap();

    let err = store.delete_pet_type(cat.id().unwrap()).unwrap_err();
    assert!(matches!(err, StoreError::InUse { entity: "PetType", id: 1 }));

    let dog = store.save_pet_type(PetType::new("dog")).unwrap();
    store.delete_pet_type(dog.id().unwrap()).unwrap();
    assert_eq!(store.find_all_pet_types().unwrap(), vec![cat]);
}

// ── Specialties and vets ──────────────────────────────────────────

#[test]
fn save_vet_resolves_specialties() {
    let store = ClinicStore::new();
    let surgery = store.save_specialty(Specialty::new("surgery")).unwrap();
    let dentistry = store.save_specialty(Specialty::new("dentistry")).unwrap();

    let mut vet = Vet::new("Linda", "Douglas");
    vet.add_specialty(surgery);
    vet.add_specialty(dentistry);
    let vet = store.save_vet(vet).unwrap();

    assert_eq!(vet.id(), Some(VetId::new(1)));
    let names: Vec<_> = vet.specialties().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["dentistry", "surgery"]);
}

#[test]
fn save_vet_rejects_unsaved_specialty() {
    let store = ClinicStore::new();
    let mut vet = Vet::new("Linda", "Douglas");
    vet.add_specialty(Specialty::new("surgery"));
    assert!(matches!(
        store.save_vet(vet),
        Err(StoreError::MissingReference { entity: "vet", .. })
    ));

    let mut vet = Vet::new("Linda", "Douglas");
    vet.add_specialty(Specialty::new("surgery").with_id(SpecialtyId::new(3)));
    assert!(matches!(
        store.save_vet(vet),
        Err(StoreError::UnknownReference { entity: "Specialty", id: 3 })
    ));
}

#[test]
fn deleting_a_specialty_detaches_it_from_vets() {
    let store = ClinicStore::new();
    let radiology = store.save_specialty(Specialty::new("radiology")).unwrap();
    let mut vet = Vet::new("Helen", "Leary");
    vet.add_specialty(radiology.clone());
    let vet = store.save_vet(vet).unwrap();

    store.delete_specialty(radiology.id().unwrap()).unwrap();
    let vet = store.find_vet_by_id(vet.id().unwrap()).unwrap();
    assert_eq!(vet.nr_of_specialties(), 0);
}

#[test]
fn renaming_a_specialty_renames_it_on_vets() {
    let store = ClinicStore::new();
    let mut radiology = store.save_specialty(Specialty::new("radiology")).unwrap();
    let mut vet = Vet::new("Helen", "Leary");
    vet.add_specialty(radiology.clone());
    let vet = store.save_vet(vet).unwrap();

    radiology.name = "imaging".into();
    store.save_specialty(radiology).unwrap();
    let vet = store.find_vet_by_id(vet.id().unwrap()).unwrap();
    assert_eq!(vet.specialties()[0].name, "imaging");
}

#[test]
fn delete_vet() {
    let store = ClinicStore::new();
    let vet = store.save_vet(Vet::new("James", "Carter")).unwrap();
    store.delete_vet(vet.id().unwrap()).unwrap();
    assert!(store.find_all_vets().unwrap().is_empty());
    assert!(matches!(
        store.find_vet_by_id(vet.id().unwrap()),
        Err(StoreError::NotFound { entity: "Vet", id: 1 })
    ));
}

use chrono::NaiveDate;
use petclinic_model::{Owner, Pet, PetType, Visit};
use petclinic_projection::{
    ErrorCategory, PetView, ProjectionError, Projector, ProjectorConfig, VisitView,
};
use petclinic_types::{OwnerId, PetId, PetTypeId, VisitId};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn cat() -> PetType {
    PetType::new("cat").with_id(PetTypeId::new(1))
}

fn george() -> Owner {
    Owner::new("George", "Franklin", "110 W. Liberty St.", "Madison", "6085551023")
        .with_id(OwnerId::new(1))
}

fn leo() -> Pet {
    Pet::new("Leo")
        .with_id(PetId::new(1))
        .with_birth_date(day(2010, 9, 7))
        .with_type(cat())
}

fn to_value(text: &str) -> Value {
    serde_json::from_str(text).unwrap()
}

// ── Owner ─────────────────────────────────────────────────────────

#[test]
fn george_franklin_end_to_end() {
    let mut owner = george();
    owner.add_pet(leo());

    let text = Projector::default().serialize_owner(&owner).unwrap();
    let value = to_value(&text);

    assert_eq!(value["pets"][0]["owner"], json!(1));
    assert_eq!(value["pets"][0]["type"]["name"], json!("cat"));
    assert_eq!(
        value,
        json!({
            "id": 1,
            "firstName": "George",
            "lastName": "Franklin",
            "address": "110 W. Liberty St.",
            "city": "Madison",
            "telephone": "6085551023",
            "pets": [{
                "id": 1,
                "name": "Leo",
                "birthDate": "2010/09/07",
                "type": {"id": 1, "name": "cat"},
                "owner": 1,
                "visits": []
            }]
        })
    );
}

#[test]
fn owner_fields_are_written_in_declared_order() {
    let text = Projector::default().serialize_owner(&george()).unwrap();
    assert_eq!(
        text,
        r#"{"id":1,"firstName":"George","lastName":"Franklin","address":"110 W. Liberty St.","city":"Madison","telephone":"6085551023","pets":[]}"#
    );
}

#[test]
fn new_owner_writes_explicit_null_id() {
    let owner = Owner::new("Jean", "Coleman", "105 N. Lake St.", "Monona", "6085552654");
    let value = to_value(&Projector::default().serialize_owner(&owner).unwrap());
    assert_eq!(value["id"], Value::Null);
    assert!(value.as_object().unwrap().contains_key("id"));
}

#[test]
fn persisted_owner_writes_numeric_id() {
    let owner = Owner::new("Jean", "Coleman", "105 N. Lake St.", "Monona", "6085552654")
        .with_id(OwnerId::new(7));
    let value = to_value(&Projector::default().serialize_owner(&owner).unwrap());
    assert_eq!(value["id"], json!(7));
}

#[test]
fn pets_follow_model_order() {
    let mut owner = george();
    owner.add_pet(Pet::new("Max").with_type(cat()));
    owner.add_pet(Pet::new("amy").with_type(cat()));
    owner.add_pet(Pet::new("Bob").with_type(cat()));

    let value = to_value(&Projector::default().serialize_owner(&owner).unwrap());
    let names: Vec<_> = value["pets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["amy", "Bob", "Max"]);
}

#[test]
fn visits_nest_under_pet_with_bare_pet_id() {
    let mut pet = leo();
    pet.add_visit(Visit::on(day(2013, 1, 2), "rabies shot").with_id(VisitId::new(2)));
    pet.add_visit(Visit::on(day(2013, 1, 1), "neutered").with_id(VisitId::new(1)));
    let mut owner = george();
    owner.add_pet(pet);

    let value = to_value(&Projector::default().serialize_owner(&owner).unwrap());
    assert_eq!(
        value["pets"][0]["visits"],
        json!([
            {"id": 1, "date": "2013/01/01", "description": "neutered", "pet": 1},
            {"id": 2, "date": "2013/01/02", "description": "rabies shot", "pet": 1}
        ])
    );
}

#[test]
fn birth_date_boundary() {
    let mut owner = george();
    owner.add_pet(Pet::new("Leo").with_birth_date(day(2020, 1, 1)));
    let value = to_value(&Projector::default().serialize_owner(&owner).unwrap());
    assert_eq!(value["pets"][0]["birthDate"], json!("2020/01/01"));
}

#[test]
fn birth_date_without_four_digit_year_is_refused() {
    for year in [10000, -1] {
        let mut owner = george();
        owner.add_pet(Pet::new("Leo").with_birth_date(day(year, 1, 1)).with_type(cat()));
        let err = Projector::default().serialize_owner(&owner).unwrap_err();
        assert!(
            matches!(
                err,
                ProjectionError::UnwritableDate { entity: "pet", field: "birthDate", .. }
            ),
            "year {year}: {err}"
        );
        assert_eq!(err.category(), ErrorCategory::Invariant);
    }
}

#[test]
fn visit_date_without_four_digit_year_is_refused() {
    let mut pet = leo();
    pet.add_visit(Visit::on(day(10000, 1, 1), "rabies shot"));
    let mut owner = george();
    owner.add_pet(pet);
    let pet = owner.pets()[0].clone();
    let visit = pet.visits()[0].clone();

    let projector = Projector::default();
    assert!(matches!(
        projector.serialize_owner(&owner),
        Err(ProjectionError::UnwritableDate { entity: "visit", field: "date", .. })
    ));
    assert!(matches!(
        projector.serialize_visit(VisitView::new(&visit).with_pet(&pet).with_owner(&owner)),
        Err(ProjectionError::UnwritableDate { .. })
    ));
}

#[test]
fn unset_birth_date_is_null() {
    let mut owner = george();
    owner.add_pet(Pet::new("Leo").with_type(cat()));
    let value = to_value(&Projector::default().serialize_owner(&owner).unwrap());
    assert_eq!(value["pets"][0]["birthDate"], Value::Null);
}

#[test]
fn absent_type_is_omitted() {
    let mut owner = george();
    owner.add_pet(Pet::new("Leo"));
    let value = to_value(&Projector::default().serialize_owner(&owner).unwrap());
    assert!(!value["pets"][0].as_object().unwrap().contains_key("type"));
}

#[test]
fn serialize_owners_writes_an_array() {
    let owners = vec![george(), Owner::new("Betty", "Davis", "638 Cardinal Ave.", "Sun Prairie", "6085551749")];
    let value = to_value(&Projector::default().serialize_owners(&owners).unwrap());
    assert_eq!(value.as_array().unwrap().len(), 2);
    assert_eq!(value[1]["firstName"], json!("Betty"));
    assert_eq!(value[1]["id"], Value::Null);
}

#[test]
fn serialize_owners_empty() {
    assert_eq!(Projector::default().serialize_owners(&[]).unwrap(), "[]");
}

// ── Pet ───────────────────────────────────────────────────────────

#[test]
fn pet_expands_owner_without_pets() {
    let mut owner = george();
    owner.add_pet(leo());
    let pet = owner.pets()[0].clone();

    let text = Projector::default()
        .serialize_pet(PetView::new(&pet).with_owner(&owner))
        .unwrap();
    assert_eq!(
        to_value(&text),
        json!({
            "id": 1,
            "name": "Leo",
            "birthDate": "2010/09/07",
            "type": {"id": 1, "name": "cat"},
            "owner": {
                "id": 1,
                "firstName": "George",
                "lastName": "Franklin",
                "address": "110 W. Liberty St.",
                "city": "Madison",
                "telephone": "6085551023"
            },
            "visits": []
        })
    );
}

#[test]
fn pet_without_owner_is_rejected() {
    let pet = leo();
    let err = Projector::default()
        .serialize_pet(PetView::new(&pet))
        .unwrap_err();
    assert!(matches!(
        err,
        ProjectionError::MissingRequiredAssociation {
            entity: "pet",
            association: "owner"
        }
    ));
    assert_eq!(err.category(), ErrorCategory::Invariant);
}

#[test]
fn serialize_pets_fails_as_a_whole() {
    let owner = george();
    let with_owner = leo();
    let orphan = Pet::new("Basil");
    let views = [
        PetView::new(&with_owner).with_owner(&owner),
        PetView::new(&orphan),
    ];
    assert!(Projector::default().serialize_pets(&views).is_err());
}

// ── Visit ─────────────────────────────────────────────────────────

#[test]
fn visit_expands_pet_and_owner() {
    let owner = george();
    let pet = leo().with_owner_id(OwnerId::new(1));
    let visit = Visit::on(day(2013, 1, 1), "rabies shot")
        .with_id(VisitId::new(1))
        .for_pet(PetId::new(1));

    let text = Projector::default()
        .serialize_visit(VisitView::new(&visit).with_pet(&pet).with_owner(&owner))
        .unwrap();
    assert_eq!(
        to_value(&text),
        json!({
            "id": 1,
            "date": "2013/01/01",
            "description": "rabies shot",
            "pet": {
                "id": 1,
                "name": "Leo",
                "birthDate": "2010/09/07",
                "type": {"id": 1, "name": "cat"},
                "owner": {
                    "id": 1,
                    "firstName": "George",
                    "lastName": "Franklin",
                    "address": "110 W. Liberty St.",
                    "city": "Madison",
                    "telephone": "6085551023"
                }
            }
        })
    );
}

#[test]
fn visit_without_pet_emits_nothing() {
    let visit = Visit::on(day(2013, 1, 1), "rabies shot");
    let result = Projector::default().serialize_visit(VisitView::new(&visit));
    match result {
        Err(ProjectionError::MissingRequiredAssociation { entity, association }) => {
            assert_eq!((entity, association), ("visit", "pet"));
        }
        other => panic!("expected missing association, got {other:?}"),
    }
}

#[test]
fn visit_without_pet_owner_is_rejected() {
    let pet = leo();
    let visit = Visit::on(day(2013, 1, 1), "rabies shot");
    let err = Projector::default()
        .serialize_visit(VisitView::new(&visit).with_pet(&pet))
        .unwrap_err();
    assert!(matches!(
        err,
        ProjectionError::MissingRequiredAssociation {
            entity: "pet",
            association: "owner"
        }
    ));
}

// ── Config ────────────────────────────────────────────────────────

#[test]
fn pretty_output_is_indented() {
    let projector = Projector::new(ProjectorConfig::default().with_pretty(true));
    let text = projector.serialize_owner(&george()).unwrap();
    assert!(text.contains("\n  \"firstName\": \"George\""));
    assert_eq!(to_value(&text)["id"], json!(1));
}

// ── Acyclic output ────────────────────────────────────────────────

fn contains_key(value: &Value, key: &str) -> bool {
    match value {
        Value::Object(map) => map.contains_key(key) || map.values().any(|v| contains_key(v, key)),
        Value::Array(items) => items.iter().any(|v| contains_key(v, key)),
        _ => false,
    }
}

#[test]
fn owner_document_never_reembeds_the_owner() {
    let mut pet = leo();
    pet.add_visit(Visit::on(day(2013, 1, 1), "rabies shot"));
    let mut owner = george();
    owner.add_pet(pet);

    let value = to_value(&Projector::default().serialize_owner(&owner).unwrap());
    for pet in value["pets"].as_array().unwrap() {
        assert!(pet["owner"].is_number());
        assert!(!contains_key(&pet["owner"], "pets"));
        for visit in pet["visits"].as_array().unwrap() {
            assert!(visit["pet"].is_number());
        }
    }
}

#[test]
fn visit_document_has_no_back_edges() {
    let owner = george();
    let pet = leo();
    let visit = Visit::on(day(2013, 1, 1), "rabies shot");
    let value = to_value(
        &Projector::default()
            .serialize_visit(VisitView::new(&visit).with_pet(&pet).with_owner(&owner))
            .unwrap(),
    );
    assert!(!contains_key(&value["pet"], "visits"));
    assert!(!contains_key(&value["pet"]["owner"], "pets"));
}

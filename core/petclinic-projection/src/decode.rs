//! Wire nodes → model.
//!
//! Every failure carries the dotted path of the offending node, e.g.
//! `pets[0].visits[2].date` or `pet.owner`.

use crate::error::{ProjectionError, ProjectionResult};
use crate::view::{DecodedPet, DecodedVisit};
use crate::wire::{OwnedPetNode, OwnerNode, PetNode, PetTypeNode, PetVisitNode, VisitNode};
use chrono::NaiveDate;
use petclinic_model::{Entity, Owner, Pet, PetType, Visit};
use petclinic_types::{Identity, OwnerId, PetId, PetTypeId, VisitId, parse_date};

fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}.{name}")
    }
}

fn required_text(value: Option<String>, path: &str, name: &str) -> ProjectionResult<String> {
    value.ok_or_else(|| ProjectionError::malformed(join(path, name), "required field is missing"))
}

fn date(value: String, path: String) -> ProjectionResult<NaiveDate> {
    parse_date(&value).map_err(|_| ProjectionError::DateFormat { path, value })
}

fn optional_date(value: Option<String>, path: &str, name: &str) -> ProjectionResult<Option<NaiveDate>> {
    value.map(|v| date(v, join(path, name))).transpose()
}

fn required_date(value: Option<String>, path: &str, name: &str) -> ProjectionResult<NaiveDate> {
    let value = value
        .ok_or_else(|| ProjectionError::malformed(join(path, name), "required field is missing"))?;
    date(value, join(path, name))
}

/// A child's bare parent id must agree with the enclosing parent.
///
/// Absent/null/0 is accepted: the enclosing parent is authoritative.
fn check_back_reference<I: Identity>(
    found: Option<i32>,
    parent: Option<I>,
    path: &str,
    name: &str,
) -> ProjectionResult<()> {
    match (I::from_wire(found), parent) {
        (Some(found), Some(parent)) if found == parent => Ok(()),
        (None, _) => Ok(()),
        (Some(found), parent) => Err(ProjectionError::malformed(
            join(path, name),
            format!(
                "back-reference {found} does not match the enclosing {name} ({})",
                parent.map_or_else(|| "new".to_string(), |p| p.to_string())
            ),
        )),
    }
}

fn pet_type(node: PetTypeNode, path: &str) -> ProjectionResult<PetType> {
    let mut pet_type = PetType::new(required_text(node.name, path, "name")?);
    if let Some(id) = PetTypeId::from_wire(node.id) {
        pet_type.assign_id(id);
    }
    Ok(pet_type)
}

fn optional_pet_type(node: Option<PetTypeNode>, path: &str) -> ProjectionResult<Option<PetType>> {
    node.map(|n| pet_type(n, &join(path, "type"))).transpose()
}

/// Owner contact details. Any nested `pets` are not part of a summary.
fn owner_summary(node: OwnerNode, path: &str) -> ProjectionResult<Owner> {
    let mut owner = Owner::new(
        required_text(node.first_name, path, "firstName")?,
        required_text(node.last_name, path, "lastName")?,
        required_text(node.address, path, "address")?,
        required_text(node.city, path, "city")?,
        required_text(node.telephone, path, "telephone")?,
    );
    if let Some(id) = OwnerId::from_wire(node.id) {
        owner.assign_id(id);
    }
    Ok(owner)
}

fn pet_visits(
    pet: &mut Pet,
    nodes: Option<Vec<PetVisitNode>>,
    path: &str,
) -> ProjectionResult<()> {
    for (i, node) in nodes.unwrap_or_default().into_iter().enumerate() {
        let here = join(path, &format!("visits[{i}]"));
        check_back_reference(node.pet, pet.id(), &here, "pet")?;
        let mut visit = Visit::on(
            required_date(node.date, &here, "date")?,
            required_text(node.description, &here, "description")?,
        );
        if let Some(id) = VisitId::from_wire(node.id) {
            visit.assign_id(id);
        }
        pet.add_visit(visit);
    }
    Ok(())
}

fn owned_pet(node: OwnedPetNode, owner: &Owner, path: &str) -> ProjectionResult<Pet> {
    check_back_reference(node.owner, owner.id(), path, "owner")?;
    let mut pet = Pet::new(required_text(node.name, path, "name")?);
    if let Some(id) = PetId::from_wire(node.id) {
        pet.assign_id(id);
    }
    pet.birth_date = optional_date(node.birth_date, path, "birthDate")?;
    pet.pet_type = optional_pet_type(node.pet_type, path)?;
    pet_visits(&mut pet, node.visits, path)?;
    Ok(pet)
}

/// A full owner aggregate.
pub(crate) fn owner(node: OwnerNode) -> ProjectionResult<Owner> {
    let pets = node.pets.unwrap_or_default();
    let mut owner = owner_summary(
        OwnerNode {
            pets: None,
            ..node
        },
        "",
    )?;
    for (i, pet_node) in pets.into_iter().enumerate() {
        let pet = owned_pet(pet_node, &owner, &format!("pets[{i}]"))?;
        owner.add_pet(pet);
    }
    Ok(owner)
}

/// A pet with its nested owner. `with_visits` is false for the pet nested
/// in a visit document, whose shape has no visit list.
fn pet_with_owner(node: PetNode, path: &str, with_visits: bool) -> ProjectionResult<(Pet, Owner)> {
    let owner_node = node
        .owner
        .ok_or_else(|| ProjectionError::malformed(join(path, "owner"), "required node is missing"))?;
    let owner = owner_summary(owner_node, &join(path, "owner"))?;

    let mut pet = Pet::new(required_text(node.name, path, "name")?);
    if let Some(id) = PetId::from_wire(node.id) {
        pet.assign_id(id);
    }
    pet.birth_date = optional_date(node.birth_date, path, "birthDate")?;
    pet.pet_type = optional_pet_type(node.pet_type, path)?;
    pet.set_owner_id(owner.id());
    if with_visits {
        pet_visits(&mut pet, node.visits, path)?;
    }
    Ok((pet, owner))
}

pub(crate) fn pet(node: PetNode) -> ProjectionResult<DecodedPet> {
    let (pet, owner) = pet_with_owner(node, "", true)?;
    Ok(DecodedPet { pet, owner })
}

pub(crate) fn visit(node: VisitNode) -> ProjectionResult<DecodedVisit> {
    let pet_node = node
        .pet
        .ok_or_else(|| ProjectionError::malformed("pet", "required node is missing"))?;
    let (pet, owner) = pet_with_owner(pet_node, "pet", false)?;

    let mut visit = Visit::on(
        required_date(node.date, "", "date")?,
        required_text(node.description, "", "description")?,
    );
    if let Some(id) = VisitId::from_wire(node.id) {
        visit.assign_id(id);
    }
    visit.set_pet_id(pet.id());
    Ok(DecodedVisit { visit, pet, owner })
}

//! Model → wire documents.

use crate::error::{ProjectionError, ProjectionResult};
use crate::view::{PetView, VisitView};
use crate::wire::{
    OwnedPetDoc, OwnerDoc, OwnerSummaryDoc, PetDoc, PetTypeDoc, PetVisitDoc, VisitDoc,
    VisitPetDoc,
};
use petclinic_model::{Entity, Owner, Pet, PetType, Visit};
use chrono::NaiveDate;
use petclinic_types::format_date;

fn date(entity: &'static str, field: &'static str, date: NaiveDate) -> ProjectionResult<String> {
    format_date(date).map_err(|_| ProjectionError::UnwritableDate {
        entity,
        field,
        date,
    })
}

fn birth_date(pet: &Pet) -> ProjectionResult<Option<String>> {
    pet.birth_date
        .map(|day| date("pet", "birthDate", day))
        .transpose()
}

pub(crate) fn owner_doc(owner: &Owner) -> ProjectionResult<OwnerDoc<'_>> {
    Ok(OwnerDoc {
        id: owner.id(),
        first_name: &owner.first_name,
        last_name: &owner.last_name,
        address: &owner.address,
        city: &owner.city,
        telephone: &owner.telephone,
        pets: owner
            .pets()
            .iter()
            .map(|pet| owned_pet_doc(owner, pet))
            .collect::<ProjectionResult<_>>()?,
    })
}

/// The back-reference is the enclosing owner's identity.
fn owned_pet_doc<'a>(owner: &'a Owner, pet: &'a Pet) -> ProjectionResult<OwnedPetDoc<'a>> {
    Ok(OwnedPetDoc {
        id: pet.id(),
        name: &pet.name,
        birth_date: birth_date(pet)?,
        pet_type: pet.pet_type.as_ref().map(pet_type_doc),
        owner: owner.id(),
        visits: visit_docs(pet)?,
    })
}

fn visit_docs(pet: &Pet) -> ProjectionResult<Vec<PetVisitDoc<'_>>> {
    pet.visits()
        .iter()
        .map(|visit| pet_visit_doc(pet, visit))
        .collect()
}

fn pet_visit_doc<'a>(pet: &'a Pet, visit: &'a Visit) -> ProjectionResult<PetVisitDoc<'a>> {
    Ok(PetVisitDoc {
        id: visit.id(),
        date: date("visit", "date", visit.date)?,
        description: &visit.description,
        pet: pet.id(),
    })
}

fn pet_type_doc(pet_type: &PetType) -> PetTypeDoc<'_> {
    PetTypeDoc {
        id: pet_type.id(),
        name: &pet_type.name,
    }
}

fn owner_summary_doc(owner: &Owner) -> OwnerSummaryDoc<'_> {
    OwnerSummaryDoc {
        id: owner.id(),
        first_name: &owner.first_name,
        last_name: &owner.last_name,
        address: &owner.address,
        city: &owner.city,
        telephone: &owner.telephone,
    }
}

pub(crate) fn pet_doc<'a>(view: PetView<'a>) -> ProjectionResult<PetDoc<'a>> {
    let pet = view.pet;
    let owner = view
        .owner
        .ok_or_else(|| ProjectionError::missing("pet", "owner"))?;

    Ok(PetDoc {
        id: pet.id(),
        name: &pet.name,
        birth_date: birth_date(pet)?,
        pet_type: pet.pet_type.as_ref().map(pet_type_doc),
        owner: owner_summary_doc(owner),
        visits: visit_docs(pet)?,
    })
}

pub(crate) fn visit_doc<'a>(view: VisitView<'a>) -> ProjectionResult<VisitDoc<'a>> {
    let visit = view.visit;
    let pet = view
        .pet
        .ok_or_else(|| ProjectionError::missing("visit", "pet"))?;
    let owner = view
        .owner
        .ok_or_else(|| ProjectionError::missing("pet", "owner"))?;

    Ok(VisitDoc {
        id: visit.id(),
        date: date("visit", "date", visit.date)?,
        description: &visit.description,
        pet: VisitPetDoc {
            id: pet.id(),
            name: &pet.name,
            birth_date: birth_date(pet)?,
            pet_type: pet.pet_type.as_ref().map(pet_type_doc),
            owner: owner_summary_doc(owner),
        },
    })
}

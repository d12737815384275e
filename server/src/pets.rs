use crate::document::Document;
use crate::error::{ApiError, ApiResult};
use crate::response::{JsonText, created};
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use petclinic_model::Entity;
use petclinic_projection::{PetView, VisitView};
use petclinic_store::OwnedPet;
use petclinic_types::PetId;
use tracing::info;

fn view(record: &OwnedPet) -> PetView<'_> {
    PetView::new(&record.pet).with_owner(&record.owner)
}

pub(crate) async fn list_pets(State(state): State<AppState>) -> ApiResult<JsonText> {
    let records = state.store.find_all_pets_with_owners()?;
    let views: Vec<_> = records.iter().map(view).collect();
    Ok(JsonText(state.projector.serialize_pets(&views)?))
}

pub(crate) async fn get_pet(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<JsonText> {
    let record = state.store.find_pet_with_owner(PetId::new(id))?;
    Ok(JsonText(state.projector.serialize_pet(view(&record))?))
}

pub(crate) async fn list_pet_visits(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<JsonText> {
    let OwnedPet { pet, owner } = state.store.find_pet_with_owner(PetId::new(id))?;
    let views: Vec<_> = pet
        .visits()
        .iter()
        .map(|visit| VisitView::new(visit).with_pet(&pet).with_owner(&owner))
        .collect();
    Ok(JsonText(state.projector.serialize_visits(&views)?))
}

/// Creates a pet under the owner nested in the body.
pub(crate) async fn create_pet(
    State(state): State<AppState>,
    Document(body): Document,
) -> ApiResult<Response> {
    let decoded = state.projector.deserialize_pet(&body)?;
    ApiError::check_new("pet", decoded.pet.id().map(i32::from))?;
    let pet = state.store.save_pet(decoded.pet)?;
    let id = pet.id().map(i32::from).unwrap_or_default();
    info!(pet = id, "created pet");
    let record = state.store.find_pet_with_owner(PetId::new(id))?;
    let body = JsonText(state.projector.serialize_pet(view(&record))?);
    Ok(created(format!("/api/pets/{id}"), body))
}

/// Updates name, birth date and type; owner and visits are left alone.
pub(crate) async fn update_pet(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Document(body): Document,
) -> ApiResult<StatusCode> {
    let update = state.projector.deserialize_pet(&body)?.pet;
    ApiError::check_path_id(id, update.id().map(i32::from))?;
    let mut pet = state.store.find_pet_by_id(PetId::new(id))?;
    pet.name = update.name;
    pet.birth_date = update.birth_date;
    pet.pet_type = update.pet_type;
    state.store.save_pet(pet)?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn delete_pet(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    state.store.delete_pet(PetId::new(id))?;
    info!(pet = id, "deleted pet");
    Ok(StatusCode::NO_CONTENT)
}

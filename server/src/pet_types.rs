use crate::error::{ApiError, ApiResult};
use crate::response::created;
use crate::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use petclinic_model::{Entity, PetType};
use petclinic_types::PetTypeId;
use tracing::info;

pub(crate) async fn list_pet_types(State(state): State<AppState>) -> ApiResult<Json<Vec<PetType>>> {
    Ok(Json(state.store.find_all_pet_types()?))
}

pub(crate) async fn get_pet_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<PetType>> {
    Ok(Json(state.store.find_pet_type_by_id(PetTypeId::new(id))?))
}

pub(crate) async fn create_pet_type(
    State(state): State<AppState>,
    Json(pet_type): Json<PetType>,
) -> ApiResult<Response> {
    ApiError::check_new("pet type", pet_type.id().map(i32::from))?;
    let pet_type = state.store.save_pet_type(pet_type)?;
    let id = pet_type.id().map(i32::from).unwrap_or_default();
    info!(pet_type = id, name = %pet_type.name, "created pet type");
    Ok(created(format!("/api/pettypes/{id}"), Json(pet_type)))
}

pub(crate) async fn update_pet_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(update): Json<PetType>,
) -> ApiResult<StatusCode> {
    ApiError::check_path_id(id, update.id().map(i32::from))?;
    let id = PetTypeId::new(id);
    state.store.find_pet_type_by_id(id)?;
    state
        .store
        .save_pet_type(PetType::new(update.name).with_id(id))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Refused with 409 while any pet still has this type.
pub(crate) async fn delete_pet_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    state.store.delete_pet_type(PetTypeId::new(id))?;
    info!(pet_type = id, "deleted pet type");
    Ok(StatusCode::NO_CONTENT)
}

use crate::error::{ApiError, ApiResult};
use crate::response::created;
use crate::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use petclinic_model::{Entity, Specialty};
use petclinic_types::SpecialtyId;
use tracing::info;

pub(crate) async fn list_specialties(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Specialty>>> {
    Ok(Json(state.store.find_all_specialties()?))
}

pub(crate) async fn get_specialty(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Specialty>> {
    Ok(Json(state.store.find_specialty_by_id(SpecialtyId::new(id))?))
}

pub(crate) async fn create_specialty(
    State(state): State<AppState>,
    Json(specialty): Json<Specialty>,
) -> ApiResult<Response> {
    ApiError::check_new("specialty", specialty.id().map(i32::from))?;
    let specialty = state.store.save_specialty(specialty)?;
    let id = specialty.id().map(i32::from).unwrap_or_default();
    info!(specialty = id, name = %specialty.name, "created specialty");
    Ok(created(format!("/api/specialties/{id}"), Json(specialty)))
}

pub(crate) async fn update_specialty(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(update): Json<Specialty>,
) -> ApiResult<StatusCode> {
    ApiError::check_path_id(id, update.id().map(i32::from))?;
    let id = SpecialtyId::new(id);
    state.store.find_specialty_by_id(id)?;
    state
        .store
        .save_specialty(Specialty::new(update.name).with_id(id))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Vets holding the specialty lose it.
pub(crate) async fn delete_specialty(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    state.store.delete_specialty(SpecialtyId::new(id))?;
    info!(specialty = id, "deleted specialty");
    Ok(StatusCode::NO_CONTENT)
}

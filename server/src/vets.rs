use crate::error::{ApiError, ApiResult};
use crate::response::created;
use crate::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use petclinic_model::{Entity, Vet};
use petclinic_types::VetId;
use tracing::info;

pub(crate) async fn list_vets(State(state): State<AppState>) -> ApiResult<Json<Vec<Vet>>> {
    Ok(Json(state.store.find_all_vets()?))
}

pub(crate) async fn get_vet(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Vet>> {
    Ok(Json(state.store.find_vet_by_id(VetId::new(id))?))
}

pub(crate) async fn create_vet(
    State(state): State<AppState>,
    Json(vet): Json<Vet>,
) -> ApiResult<Response> {
    ApiError::check_new("vet", vet.id().map(i32::from))?;
    let vet = state.store.save_vet(vet)?;
    let id = vet.id().map(i32::from).unwrap_or_default();
    info!(vet = id, "created vet");
    Ok(created(format!("/api/vets/{id}"), Json(vet)))
}

/// Replaces name and specialties.
pub(crate) async fn update_vet(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(mut vet): Json<Vet>,
) -> ApiResult<StatusCode> {
    ApiError::check_path_id(id, vet.id().map(i32::from))?;
    let id = VetId::new(id);
    state.store.find_vet_by_id(id)?;
    vet.assign_id(id);
    state.store.save_vet(vet)?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn delete_vet(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    state.store.delete_vet(VetId::new(id))?;
    info!(vet = id, "deleted vet");
    Ok(StatusCode::NO_CONTENT)
}

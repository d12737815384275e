use crate::document::Document;
use crate::error::{ApiError, ApiResult};
use crate::response::{JsonText, created};
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use petclinic_model::Entity;
use petclinic_projection::PetView;
use petclinic_types::OwnerId;
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OwnerQuery {
    last_name: Option<String>,
}

pub(crate) async fn list_owners(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> ApiResult<JsonText> {
    let owners = match query.last_name.as_deref() {
        Some(prefix) => state.store.find_owners_by_last_name(prefix)?,
        None => state.store.find_all_owners()?,
    };
    Ok(JsonText(state.projector.serialize_owners(&owners)?))
}

pub(crate) async fn get_owner(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<JsonText> {
    let owner = state.store.find_owner_by_id(OwnerId::new(id))?;
    Ok(JsonText(state.projector.serialize_owner(&owner)?))
}

pub(crate) async fn list_owner_pets(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<JsonText> {
    let owner = state.store.find_owner_by_id(OwnerId::new(id))?;
    let views: Vec<_> = owner
        .pets()
        .iter()
        .map(|pet| PetView::new(pet).with_owner(&owner))
        .collect();
    Ok(JsonText(state.projector.serialize_pets(&views)?))
}

/// Creates an owner, with any pets and visits the body nests.
pub(crate) async fn create_owner(
    State(state): State<AppState>,
    Document(body): Document,
) -> ApiResult<Response> {
    let owner = state.projector.deserialize_owner(&body)?;
    ApiError::check_new("owner", owner.id().map(i32::from))?;
    let owner = state.store.save_owner(owner)?;
    let id = owner.id().map(i32::from).unwrap_or_default();
    info!(owner = id, "created owner");
    let body = JsonText(state.projector.serialize_owner(&owner)?);
    Ok(created(format!("/api/owners/{id}"), body))
}

/// Updates name and contact details; pets are left alone.
pub(crate) async fn update_owner(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Document(body): Document,
) -> ApiResult<StatusCode> {
    let update = state.projector.deserialize_owner(&body)?;
    ApiError::check_path_id(id, update.id().map(i32::from))?;
    let mut owner = state.store.find_owner_by_id(OwnerId::new(id))?;
    owner.copy_details_from(&update);
    state.store.save_owner(owner)?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn delete_owner(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    state.store.delete_owner(OwnerId::new(id))?;
    info!(owner = id, "deleted owner");
    Ok(StatusCode::NO_CONTENT)
}

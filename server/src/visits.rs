use crate::document::Document;
use crate::error::{ApiError, ApiResult};
use crate::response::{JsonText, created};
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use petclinic_model::Entity;
use petclinic_projection::VisitView;
use petclinic_store::PetVisit;
use petclinic_types::VisitId;
use tracing::info;

fn view(record: &PetVisit) -> VisitView<'_> {
    VisitView::new(&record.visit)
        .with_pet(&record.pet)
        .with_owner(&record.owner)
}

fn serialize_one(state: &AppState, id: VisitId) -> ApiResult<JsonText> {
    let record = state.store.find_visit_with_parents(id)?;
    Ok(JsonText(state.projector.serialize_visit(view(&record))?))
}

pub(crate) async fn list_visits(State(state): State<AppState>) -> ApiResult<JsonText> {
    let records = state.store.find_all_visits_with_parents()?;
    let views: Vec<_> = records.iter().map(view).collect();
    Ok(JsonText(state.projector.serialize_visits(&views)?))
}

pub(crate) async fn get_visit(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<JsonText> {
    serialize_one(&state, VisitId::new(id))
}

/// Creates a visit for the pet nested in the body.
pub(crate) async fn create_visit(
    State(state): State<AppState>,
    Document(body): Document,
) -> ApiResult<Response> {
    let decoded = state.projector.deserialize_visit(&body)?;
    ApiError::check_new("visit", decoded.visit.id().map(i32::from))?;
    let visit = state.store.save_visit(decoded.visit)?;
    let id = visit.id().map(i32::from).unwrap_or_default();
    info!(visit = id, "created visit");
    Ok(created(
        format!("/api/visits/{id}"),
        serialize_one(&state, VisitId::new(id))?,
    ))
}

/// Updates date and description; the pet is left alone.
pub(crate) async fn update_visit(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Document(body): Document,
) -> ApiResult<StatusCode> {
    let update = state.projector.deserialize_visit(&body)?.visit;
    ApiError::check_path_id(id, update.id().map(i32::from))?;
    let mut visit = state.store.find_visit_by_id(VisitId::new(id))?;
    visit.date = update.date;
    visit.description = update.description;
    state.store.save_visit(visit)?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn delete_visit(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    state.store.delete_visit(VisitId::new(id))?;
    info!(visit = id, "deleted visit");
    Ok(StatusCode::NO_CONTENT)
}

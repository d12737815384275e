//! HTTP API for the clinic.
//!
//! Owner, pet and visit bodies go through the [`Projector`]; pet types,
//! specialties and vets use their plain serde shapes. Every handler works
//! against one shared [`ClinicStore`].

mod document;
mod error;
mod owners;
mod pet_types;
mod pets;
mod response;
mod specialties;
mod vets;
mod visits;

pub use error::{ApiError, ApiResult};

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use petclinic_projection::Projector;
use petclinic_store::ClinicStore;
use std::sync::Arc;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ClinicStore>,
    pub projector: Arc<Projector>,
}

impl AppState {
    pub fn new(store: ClinicStore, projector: Projector) -> Self {
        Self {
            store: Arc::new(store),
            projector: Arc::new(projector),
        }
    }
}

/// Build the HTTP API router with the given state.
///
/// Request bodies are capped at the projector's `max_document_bytes`.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.projector.config().max_document_bytes;
    Router::new()
        .route(
            "/api/owners",
            get(owners::list_owners).post(owners::create_owner),
        )
        .route(
            "/api/owners/{id}",
            get(owners::get_owner)
                .put(owners::update_owner)
                .delete(owners::delete_owner),
        )
        .route("/api/owners/{id}/pets", get(owners::list_owner_pets))
        .route("/api/pets", get(pets::list_pets).post(pets::create_pet))
        .route(
            "/api/pets/{id}",
            get(pets::get_pet)
                .put(pets::update_pet)
                .delete(pets::delete_pet),
        )
        .route("/api/pets/{id}/visits", get(pets::list_pet_visits))
        .route(
            "/api/visits",
            get(visits::list_visits).post(visits::create_visit),
        )
        .route(
            "/api/visits/{id}",
            get(visits::get_visit)
                .put(visits::update_visit)
                .delete(visits::delete_visit),
        )
        .route(
            "/api/pettypes",
            get(pet_types::list_pet_types).post(pet_types::create_pet_type),
        )
        .route(
            "/api/pettypes/{id}",
            get(pet_types::get_pet_type)
                .put(pet_types::update_pet_type)
                .delete(pet_types::delete_pet_type),
        )
        .route(
            "/api/specialties",
            get(specialties::list_specialties).post(specialties::create_specialty),
        )
        .route(
            "/api/specialties/{id}",
            get(specialties::get_specialty)
                .put(specialties::update_specialty)
                .delete(specialties::delete_specialty),
        )
        .route("/api/vets", get(vets::list_vets).post(vets::create_vet))
        .route(
            "/api/vets/{id}",
            get(vets::get_vet)
                .put(vets::update_vet)
                .delete(vets::delete_vet),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

//! Wire shapes of the projection.
//!
//! Outgoing documents borrow from the model and serialize in declaration
//! order. Incoming nodes make every field optional so that absence can be
//! reported with a path instead of a bare serde message.

use petclinic_types::{OwnerId, PetId, PetTypeId, VisitId};
use serde::{Deserialize, Serialize};

// ── Outgoing ─────────────────────────────────────────────────────

/// `{id, firstName, lastName, address, city, telephone, pets}`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OwnerDoc<'a> {
    pub id: Option<OwnerId>,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub address: &'a str,
    pub city: &'a str,
    pub telephone: &'a str,
    pub pets: Vec<OwnedPetDoc<'a>>,
}

/// A pet inside an owner document; `owner` is the bare owner id.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OwnedPetDoc<'a> {
    pub id: Option<PetId>,
    pub name: &'a str,
    pub birth_date: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub pet_type: Option<PetTypeDoc<'a>>,
    pub owner: Option<OwnerId>,
    pub visits: Vec<PetVisitDoc<'a>>,
}

/// A visit inside a pet; `pet` is the bare pet id.
#[derive(Debug, Serialize)]
pub(crate) struct PetVisitDoc<'a> {
    pub id: Option<VisitId>,
    pub date: String,
    pub description: &'a str,
    pub pet: Option<PetId>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PetTypeDoc<'a> {
    pub id: Option<PetTypeId>,
    pub name: &'a str,
}

/// Owner contact details without pets.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OwnerSummaryDoc<'a> {
    pub id: Option<OwnerId>,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub address: &'a str,
    pub city: &'a str,
    pub telephone: &'a str,
}

/// A standalone pet: the owner is expanded, visits are nested.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PetDoc<'a> {
    pub id: Option<PetId>,
    pub name: &'a str,
    pub birth_date: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub pet_type: Option<PetTypeDoc<'a>>,
    pub owner: OwnerSummaryDoc<'a>,
    pub visits: Vec<PetVisitDoc<'a>>,
}

/// A standalone visit: pet and the pet's owner are expanded.
#[derive(Debug, Serialize)]
pub(crate) struct VisitDoc<'a> {
    pub id: Option<VisitId>,
    pub date: String,
    pub description: &'a str,
    pub pet: VisitPetDoc<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VisitPetDoc<'a> {
    pub id: Option<PetId>,
    pub name: &'a str,
    pub birth_date: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub pet_type: Option<PetTypeDoc<'a>>,
    pub owner: OwnerSummaryDoc<'a>,
}

// ── Incoming ─────────────────────────────────────────────────────

/// An owner node. `pets` is ignored where the node is a summary.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OwnerNode {
    pub id: Option<i32>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub telephone: Option<String>,
    pub pets: Option<Vec<OwnedPetNode>>,
}

/// A pet inside an owner node; `owner` is a bare id.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OwnedPetNode {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub birth_date: Option<String>,
    #[serde(rename = "type")]
    pub pet_type: Option<PetTypeNode>,
    pub owner: Option<i32>,
    pub visits: Option<Vec<PetVisitNode>>,
}

/// A visit inside a pet node; `pet` is a bare id.
#[derive(Debug, Deserialize)]
pub(crate) struct PetVisitNode {
    pub id: Option<i32>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub pet: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PetTypeNode {
    pub id: Option<i32>,
    pub name: Option<String>,
}

/// A standalone pet node, also used for the pet nested in a visit (where
/// `visits` is not expected and ignored).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PetNode {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub birth_date: Option<String>,
    #[serde(rename = "type")]
    pub pet_type: Option<PetTypeNode>,
    pub owner: Option<OwnerNode>,
    pub visits: Option<Vec<PetVisitNode>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VisitNode {
    pub id: Option<i32>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub pet: Option<PetNode>,
}

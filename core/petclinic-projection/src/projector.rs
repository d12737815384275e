use crate::config::ProjectorConfig;
use crate::error::{ProjectionError, ProjectionResult};
use crate::view::{DecodedPet, DecodedVisit, PetView, VisitView};
use crate::{decode, encode};
use petclinic_model::Owner;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Converts the clinic aggregate to and from canonical JSON text.
///
/// Holds only its configuration; every call is independent, so one instance
/// can be shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct Projector {
    config: ProjectorConfig,
}

impl Projector {
    pub fn new(config: ProjectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectorConfig {
        &self.config
    }

    // ── Owner ────────────────────────────────────────────────────

    /// Writes an owner with every pet and every visit nested inside.
    pub fn serialize_owner(&self, owner: &Owner) -> ProjectionResult<String> {
        self.write(&encode::owner_doc(owner)?)
    }

    pub fn serialize_owners(&self, owners: &[Owner]) -> ProjectionResult<String> {
        let docs = owners
            .iter()
            .map(encode::owner_doc)
            .collect::<ProjectionResult<Vec<_>>>()?;
        self.write(&docs)
    }

    /// Reads an owner aggregate. Pets and visits come back in model order
    /// with their back-references pointing at the decoded parents.
    pub fn deserialize_owner(&self, text: &str) -> ProjectionResult<Owner> {
        self.read(text, decode::owner)
    }

    // ── Pet ──────────────────────────────────────────────────────

    /// Writes a pet with its owner expanded (without the owner's pets).
    ///
    /// Fails with [`ProjectionError::MissingRequiredAssociation`] when the
    /// view carries no owner.
    pub fn serialize_pet(&self, view: PetView<'_>) -> ProjectionResult<String> {
        self.write(&encode::pet_doc(view)?)
    }

    pub fn serialize_pets(&self, views: &[PetView<'_>]) -> ProjectionResult<String> {
        let docs = views
            .iter()
            .map(|view| encode::pet_doc(*view))
            .collect::<ProjectionResult<Vec<_>>>()?;
        self.write(&docs)
    }

    pub fn deserialize_pet(&self, text: &str) -> ProjectionResult<DecodedPet> {
        self.read(text, decode::pet)
    }

    // ── Visit ────────────────────────────────────────────────────

    /// Writes a visit with its pet and the pet's owner expanded.
    ///
    /// Nothing is emitted unless both the pet and its owner are present.
    pub fn serialize_visit(&self, view: VisitView<'_>) -> ProjectionResult<String> {
        self.write(&encode::visit_doc(view)?)
    }

    pub fn serialize_visits(&self, views: &[VisitView<'_>]) -> ProjectionResult<String> {
        let docs = views
            .iter()
            .map(|view| encode::visit_doc(*view))
            .collect::<ProjectionResult<Vec<_>>>()?;
        self.write(&docs)
    }

    pub fn deserialize_visit(&self, text: &str) -> ProjectionResult<DecodedVisit> {
        self.read(text, decode::visit)
    }

    // ── Plumbing ─────────────────────────────────────────────────

    fn write<T: Serialize + ?Sized>(&self, doc: &T) -> ProjectionResult<String> {
        let text = if self.config.pretty {
            serde_json::to_string_pretty(doc)?
        } else {
            serde_json::to_string(doc)?
        };
        Ok(text)
    }

    fn read<N, T>(&self, text: &str, convert: fn(N) -> ProjectionResult<T>) -> ProjectionResult<T>
    where
        N: DeserializeOwned,
    {
        let limit = self.config.max_document_bytes;
        if text.len() > limit {
            debug!(size = text.len(), limit, "rejecting oversized document");
            return Err(ProjectionError::DocumentTooLarge {
                size: text.len(),
                limit,
            });
        }

        let result = serde_json::from_str::<N>(text)
            .map_err(ProjectionError::from)
            .and_then(convert);
        if let Err(e) = &result {
            debug!(error = %e, "rejecting document");
        }
        result
    }
}

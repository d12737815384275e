use serde::{Deserialize, Serialize};

/// Default cap on incoming document size (1 MiB).
pub const DEFAULT_MAX_DOCUMENT_BYTES: usize = 1024 * 1024;

/// Settings shared by every projection call.
///
/// Built once and handed to [`crate::Projector::new`]. The date format is
/// fixed by the wire contract and deliberately not part of this struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectorConfig {
    /// Documents longer than this many bytes are rejected before parsing.
    pub max_document_bytes: usize,
    /// Emit indented JSON.
    pub pretty: bool,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
            pretty: false,
        }
    }
}

impl ProjectorConfig {
    #[must_use]
    pub fn with_max_document_bytes(mut self, max_document_bytes: usize) -> Self {
        self.max_document_bytes = max_document_bytes;
        self
    }

    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

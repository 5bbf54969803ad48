use thiserror::Error;

/// Failure reported by an HTTP collaborator (GeoServer, Overpass, the
/// assistant backend). Carried across the boundary as a value, shown to
/// the user as a toast, and never allowed to propagate into the panel or
/// selection state machines.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("capabilities request failed: {0}")]
    Capabilities(String),

    #[error("feature query failed: {0}")]
    FeatureQuery(String),

    #[error("assistant request failed: {0}")]
    Assistant(String),

    #[error("service returned a malformed response: {0}")]
    Malformed(String),
}

//! Errors raised while turning an OpenAPI document into hooks.
//!
//! Everything here is fatal for the document being generated. Two soft
//! failures never show up as a `GenError`: a repeated operation identifier is
//! skipped, and an unsupported parameter shape is rendered into the output
//! (see [`crate::synth::Unsupported`]).

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, GenError>;

#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// A `$ref` that does not point into one of the four component namespaces.
    #[error(
        "unsupported reference `{reference}`: only `#/components/{{schemas,responses,parameters,requestBodies}}/*` can be resolved"
    )]
    UnsupportedReference { reference: String },

    #[error("array schema{} has no `items` definition", location_suffix(.location))]
    MissingArrayItems { location: Option<String> },

    #[error("the path param `{parameter}` can't be found in parameters ({operation_id})")]
    UnresolvedPathParameter {
        parameter: String,
        operation_id: String,
    },

    #[error("invalid operationId `{operation_id}` for {verb} {route}")]
    InvalidOperationId {
        operation_id: String,
        verb: String,
        route: String,
    },

    /// Only surfaced by [`crate::registry::OperationIdRegistry::try_register`];
    /// the synthesizer turns it into a skip.
    #[error("duplicate operationId `{operation_id}`")]
    DuplicateOperationId { operation_id: String },

    #[error("invalid override for `{operation_id}`: {reason}")]
    InvalidOverride {
        operation_id: String,
        reason: String,
    },

    #[error("unsupported document version {found}: convert it to OpenAPI 3 first")]
    UnsupportedVersion { found: String },

    #[error("failed to parse OpenAPI document: {0}")]
    Parse(String),
}

fn location_suffix(location: &Option<String>) -> String {
    location
        .as_ref()
        .map(|l| format!(" at `{l}`"))
        .unwrap_or_default()
}

impl From<serde_json::Error> for GenError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<serde_yaml::Error> for GenError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

use declpack_core::Symbol;
use declpack_format::{DeclId, StreamError};

/// Boxed error returned by external collaborators.
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync>;

/// Fatal serialization error. Any of these ends the session.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("{kind} declarations cannot be serialized")]
    UnsupportedKind { kind: &'static str },
    #[error("no record code produced for {kind} declaration")]
    MissingRecordCode { kind: &'static str },
    #[error("invalid {kind} declaration: {reason}")]
    InvariantViolation {
        kind: &'static str,
        reason: &'static str,
    },
    #[error("declaration {id} was referenced but never written")]
    UnwrittenDecl { id: DeclId },
    #[error("identifier {0:?} not found in interner")]
    UnknownSymbol(Symbol),
    #[error("record stream: {0}")]
    Stream(#[from] StreamError),
    #[error("collaborator failed: {0}")]
    Collaborator(#[source] CollaboratorError),
}

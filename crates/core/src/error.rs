use crate::entities::CommunicationKind;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unknown communication kind: {0}")]
    UnknownKind(String),
    #[error("unknown encounter state: {0}")]
    UnknownEncounterState(String),
    #[error("{kind} not found: {id}")]
    NotFound { kind: CommunicationKind, id: String },
    #[error("failed to read fixture file {}: {source}", .path.display())]
    FixtureRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse fixture {name}: {source}")]
    FixtureParse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to deserialize call payload: {0}")]
    CallPayload(serde_json::Error),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;

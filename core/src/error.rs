use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("claim_id is required and must be non-empty")]
    MissingClaimId,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;

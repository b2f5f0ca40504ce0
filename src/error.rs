use crate::extract::ExtractError;
use crate::load::LoadError;
use crate::transform::TransformError;
use crate::validate::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Validate(#[from] ValidationError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}

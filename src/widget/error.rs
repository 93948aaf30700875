//! Widget construction errors.

use thiserror::Error;

use crate::render::SurfaceError;

#[derive(Debug, Error)]
pub enum ConstructError {
    #[error("could not create widget window: {0}")]
    Surface(#[from] SurfaceError),

    #[error("widget needs {needed} cells but only {available} are available")]
    TooSmall { needed: i32, available: i32 },

    #[error("dialog needs at least one button")]
    EmptyButtons,
}

pub type ConstructResult<T> = Result<T, ConstructError>;

use cr_core::{CoreError, PersonId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid dimensions {width}x{height} must both be positive")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("person {0} already exists")]
    DuplicatePerson(PersonId),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type GridResult<T> = Result<T, GridError>;

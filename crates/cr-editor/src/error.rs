use cr_core::{CoreError, Point};
use cr_grid::GridError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("walls must be axis-aligned: {first} and {second} share no axis")]
    InvalidGeometry { first: Point, second: Point },

    #[error("{point} is out of bounds")]
    OutOfBounds { point: Point },

    #[error("grid error: {0}")]
    Grid(GridError),
}

impl From<CoreError> for EditError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidGeometry { first, second } => EditError::InvalidGeometry { first, second },
            CoreError::OutOfBounds { point }             => EditError::OutOfBounds { point },
            other                                        => EditError::Grid(GridError::Core(other)),
        }
    }
}

impl From<GridError> for EditError {
    fn from(e: GridError) -> Self {
        match e {
            GridError::Core(core) => core.into(),
            other                 => EditError::Grid(other),
        }
    }
}

pub type EditResult<T> = Result<T, EditError>;

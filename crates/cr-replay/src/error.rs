use cr_core::PersonId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    #[error("replay configuration error: {0}")]
    Config(String),

    #[error("replay still running after {limit} ticks")]
    TickLimit { limit: u64 },

    #[error("route supplied for {0}, which is not on the grid")]
    UnknownPerson(PersonId),
}

pub type ReplayResult<T> = Result<T, ReplayError>;

use thiserror::Error;

use crate::journey_tracker::TrackerState;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("`{operation}` is not allowed while the tracker is {state}")]
    InvalidState {
        operation: &'static str,
        state: TrackerState,
    },
    #[error("{0} is required to start tracking")]
    MissingInput(&'static str),
}

use celery_link::LinkError;

use crate::state::DriverState;

/// Errors that stop the driver
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("transport failure: {0}")]
    Link(#[from] LinkError),

    #[error("invalid driver state transition from {from:?} to {to:?}")]
    InvalidTransition { from: DriverState, to: DriverState },
}

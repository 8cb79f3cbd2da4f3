use aupa_driver::error::AUPAInternalError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulatorError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("Simulator did not respond in time")]
    Timeout,
    #[error("Connection to simulator is closed")]
    Closed,
}

impl From<SimulatorError> for AUPAInternalError {
    fn from(e: SimulatorError) -> Self {
        AUPAInternalError::LinkError(e.to_string())
    }
}

use aupa_driver::error::AUPAInternalError;
use thiserror::Error;

/// Per-device result of a firmware information read
#[derive(PartialEq, Clone)]
pub struct ReadFirmwareInfoState(pub Vec<bool>);

impl std::fmt::Display for ReadFirmwareInfoState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Read firmware info failed: {}",
            self.0
                .iter()
                .enumerate()
                .filter(|(_, &b)| !b)
                .map(|(i, _)| i.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::fmt::Debug for ReadFirmwareInfoState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Display>::fmt(self, f)
    }
}

#[derive(Error, Debug, PartialEq, Clone)]
pub enum AUPAError {
    #[error("{0}")]
    ReadFirmwareInfoFailed(ReadFirmwareInfoState),
    #[error("Read FPGA state failed")]
    ReadFPGAStateFailed,
    #[error("Software STM failed: {0}")]
    SoftwareSTM(String),
    #[error("Background task failed: {0}")]
    TaskFailed(String),
    #[error("{0}")]
    Internal(AUPAInternalError),
}

impl From<AUPAInternalError> for AUPAError {
    fn from(e: AUPAInternalError) -> Self {
        AUPAError::Internal(e)
    }
}

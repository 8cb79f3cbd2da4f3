use std::time::Duration;

use aupa_driver::error::AUPAInternalError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtherCATError {
    #[error("PDU storage can only be split once per process")]
    PduStorageError,
    #[error("No AUTD3 device found")]
    DeviceNotFound,
    #[error("Device {0} is not an AUTD3 device")]
    NotAUTD3Device(usize),
    #[error("One or more devices are not responding")]
    NotResponding,
    #[error("Number of devices specified ({0}) does not match the number found ({1})")]
    DeviceNumberMismatch(usize, usize),
    #[error("Failed to synchronize devices (max deviation: {0:?})")]
    SyncTimeout(Duration),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    EtherCrab(#[from] ethercrab::error::Error),
    #[error("Failed to spawn thread: {0}")]
    Thread(String),
}

impl From<EtherCATError> for AUPAInternalError {
    fn from(e: EtherCATError) -> Self {
        AUPAInternalError::LinkError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[test]
    #[case("No AUTD3 device found", EtherCATError::DeviceNotFound)]
    #[case("Device 2 is not an AUTD3 device", EtherCATError::NotAUTD3Device(2))]
    #[case(
        "Number of devices specified (2) does not match the number found (1)",
        EtherCATError::DeviceNumberMismatch(2, 1)
    )]
    #[case(
        "Failed to synchronize devices (max deviation: 5µs)",
        EtherCATError::SyncTimeout(Duration::from_micros(5))
    )]
    fn display(#[case] expect: &str, #[case] err: EtherCATError) {
        assert_eq!(expect, err.to_string());
    }

    #[test]
    fn into_internal() {
        assert_eq!(
            AUPAInternalError::LinkError("No AUTD3 device found".to_owned()),
            AUPAInternalError::from(EtherCATError::DeviceNotFound)
        );
    }
}

use aupa_driver::error::AUPAInternalError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AudioFileError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Wav(#[from] hound::Error),
    #[error("Only mono audio is supported, but the file has {0} channels")]
    NotMono(u16),
    #[error("Sample rate must not be zero")]
    ZeroSampleRate,
}

impl From<AudioFileError> for AUPAInternalError {
    fn from(value: AudioFileError) -> Self {
        AUPAInternalError::ModulationError(value.to_string())
    }
}

//! Modulations from audio files.

mod error;
mod rawpcm;
mod resampler;
mod wav;

pub use error::AudioFileError;
pub use rawpcm::RawPCM;
pub use resampler::SincInterpolation;
pub use wav::Wav;

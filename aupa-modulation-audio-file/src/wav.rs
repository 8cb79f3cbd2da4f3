use std::path::{Path, PathBuf};

use aupa_driver::derive::*;
use hound::SampleFormat;

use crate::{error::AudioFileError, resampler::SincInterpolation};

/// Modulation from a mono WAV file
#[derive(Modulation, Clone, PartialEq, Debug)]
pub struct Wav {
    path: PathBuf,
    resampler: SincInterpolation,
    config: SamplingConfig,
}

impl Wav {
    /// constructor
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the WAV file
    ///
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            resampler: SincInterpolation::default(),
            config: SamplingConfig::FREQ_4K_HZ,
        }
    }

    pub fn with_resampler(self, resampler: SincInterpolation) -> Self {
        Self { resampler, ..self }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Samples normalized to [0, 1] and the sample rate of the file
    fn read_buf(&self) -> Result<(Vec<f64>, u32), AudioFileError> {
        let mut reader = hound::WavReader::open(&self.path)?;
        let spec = reader.spec();
        if spec.channels != 1 {
            return Err(AudioFileError::NotMono(spec.channels));
        }
        let buf = match (spec.sample_format, spec.bits_per_sample) {
            (SampleFormat::Int, bits @ (8 | 16 | 24 | 32)) => {
                let min = -(1i64 << (bits - 1));
                let range = ((1i64 << bits) - 1) as f64;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|s| (s as i64 - min) as f64 / range))
                    .collect::<Result<Vec<_>, _>>()?
            }
            (SampleFormat::Float, 32) => reader
                .samples::<f32>()
                .map(|s| s.map(|s| (s as f64 + 1.0) / 2.0))
                .collect::<Result<Vec<_>, _>>()?,
            _ => return Err(AudioFileError::Wav(hound::Error::Unsupported)),
        };
        if spec.sample_rate == 0 {
            return Err(AudioFileError::ZeroSampleRate);
        }
        Ok((buf, spec.sample_rate))
    }
}

impl Modulation for Wav {
    fn calc(&self) -> Result<Vec<f64>, AUPAInternalError> {
        let (buf, sample_rate) = self.read_buf()?;
        tracing::debug!(
            "read {} samples at {} Hz from {}",
            buf.len(),
            sample_rate,
            self.path.display()
        );
        Ok(self
            .resampler
            .resample(&buf, sample_rate as f64, self.config.frequency())
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0))
            .collect())
    }
}

use std::path::{Path, PathBuf};

use aupa_driver::derive::*;

use crate::{error::AudioFileError, resampler::SincInterpolation};

/// Modulation from headerless unsigned 8-bit PCM data
#[derive(Modulation, Clone, PartialEq, Debug)]
pub struct RawPCM {
    path: PathBuf,
    sample_rate: u32,
    resampler: SincInterpolation,
    config: SamplingConfig,
}

impl RawPCM {
    /// constructor
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the PCM data
    /// * `sample_rate` - Sample rate of the data \[Hz\]
    ///
    pub fn new(path: impl AsRef<Path>, sample_rate: u32) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            sample_rate,
            resampler: SincInterpolation::default(),
            config: SamplingConfig::FREQ_4K_HZ,
        }
    }

    pub fn with_resampler(self, resampler: SincInterpolation) -> Self {
        Self { resampler, ..self }
    }

    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn read_buf(&self) -> Result<Vec<f64>, AudioFileError> {
        if self.sample_rate == 0 {
            return Err(AudioFileError::ZeroSampleRate);
        }
        Ok(std::fs::read(&self.path)?
            .into_iter()
            .map(|v| v as f64 / u8::MAX as f64)
            .collect())
    }
}

impl Modulation for RawPCM {
    fn calc(&self) -> Result<Vec<f64>, AUPAInternalError> {
        let buf = self.read_buf()?;
        Ok(self
            .resampler
            .resample(&buf, self.sample_rate as f64, self.config.frequency())
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn create_dat(path: impl AsRef<Path>, data: &[u8]) -> anyhow::Result<()> {
        std::fs::write(path, data)?;
        Ok(())
    }

    #[test]
    fn rawpcm() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("tmp.dat");
        create_dat(&path, &[0xFF, 0x00, 0x33])?;

        let m = RawPCM::new(&path, 4000);
        assert_eq!(4000, m.sample_rate());
        assert_eq!(vec![1.0, 0.0, 0.2], m.calc()?);
        Ok(())
    }

    #[rstest::rstest]
    #[test]
    #[case(4, 2000)]
    #[case(16, 8000)]
    fn rawpcm_resample(#[case] expected_len: usize, #[case] target: u32) -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("tmp.dat");
        create_dat(&path, &[0x80; 8])?;

        let m = RawPCM::new(&path, 4000)
            .with_resampler(SincInterpolation::new(4096))
            .with_sampling_config(SamplingConfig::from_frequency(target as f64)?);
        let buf = m.calc()?;
        assert_eq!(expected_len, buf.len());
        buf.iter()
            .for_each(|&v| assert_abs_diff_eq!(128. / 255., v, epsilon = 0.01));
        Ok(())
    }

    #[test]
    fn zero_sample_rate() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("tmp.dat");
        create_dat(&path, &[0x80])?;

        assert_eq!(
            Err(AUPAInternalError::ModulationError(
                "Sample rate must not be zero".to_owned()
            )),
            RawPCM::new(&path, 0).calc()
        );
        Ok(())
    }

    #[test]
    fn not_exist() {
        assert!(RawPCM::new("not_exists.dat", 4000).calc().is_err());
    }
}

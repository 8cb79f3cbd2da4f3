use aupa_driver::derive::*;

use super::Sine;

/// Sine wave modulation of the squared amplitude
///
/// Each sample is the square root of [`Sine`], so the radiation pressure follows a sine wave.
#[derive(Modulation, Clone, Copy, PartialEq, Debug)]
pub struct SineSquared {
    sine: Sine,
    #[no_change]
    config: SamplingConfig,
}

impl SineSquared {
    /// constructor
    ///
    /// # Arguments
    ///
    /// * `freq` - Frequency of the sine wave \[Hz\]
    ///
    pub const fn new(freq: usize) -> Self {
        Self {
            sine: Sine::new(freq),
            config: SamplingConfig::FREQ_4K_HZ,
        }
    }

    pub const fn with_amp(self, amp: f64) -> Self {
        Self {
            sine: self.sine.with_amp(amp),
            ..self
        }
    }

    pub const fn with_offset(self, offset: f64) -> Self {
        Self {
            sine: self.sine.with_offset(offset),
            ..self
        }
    }

    pub const fn with_phase(self, phase: f64) -> Self {
        Self {
            sine: self.sine.with_phase(phase),
            ..self
        }
    }

    pub fn with_sampling_config(self, config: SamplingConfig) -> Self {
        Self {
            sine: self.sine.with_sampling_config(config),
            config,
        }
    }

    pub const fn freq(&self) -> usize {
        self.sine.freq()
    }
}

impl Modulation for SineSquared {
    fn calc(&self) -> Result<Vec<f64>, AUPAInternalError> {
        Ok(self.sine.calc()?.into_iter().map(f64::sqrt).collect())
    }
}

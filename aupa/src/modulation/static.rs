use aupa_driver::derive::*;

/// Without modulation
#[derive(Modulation, Clone, Copy, PartialEq, Debug)]
pub struct Static {
    amp: f64,
    #[no_change]
    config: SamplingConfig,
}

impl Static {
    pub const fn new() -> Self {
        Self::with_amp(1.0)
    }

    /// constructor with amplitude
    ///
    /// # Arguments
    ///
    /// * `amp` - normalized amplitude in `[0, 1]`
    ///
    pub const fn with_amp(amp: f64) -> Self {
        Self {
            amp,
            config: SamplingConfig::FREQ_4K_HZ,
        }
    }

    pub const fn amp(&self) -> f64 {
        self.amp
    }
}

impl Modulation for Static {
    fn calc(&self) -> Result<Vec<f64>, AUPAInternalError> {
        if !(0.0..=1.0).contains(&self.amp) {
            return Err(AUPAInternalError::AmplitudeOutOfRange(self.amp));
        }
        Ok(vec![self.amp; 2])
    }
}

impl Default for Static {
    fn default() -> Self {
        Self::new()
    }
}

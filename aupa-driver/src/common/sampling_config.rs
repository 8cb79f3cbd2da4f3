use std::time::Duration;

use crate::{
    error::AUPAInternalError,
    fpga::{DEFAULT_MOD_SAMPLING_FREQ_DIV, FPGA_CLK_FREQ},
};

/// Sampling configuration as a division of the FPGA clock
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SamplingConfig {
    div: u32,
}

impl SamplingConfig {
    pub const BASE_FREQUENCY: f64 = FPGA_CLK_FREQ as f64;

    pub const FREQ_MIN: f64 = Self::BASE_FREQUENCY / u32::MAX as f64;
    pub const FREQ_MAX: f64 = Self::BASE_FREQUENCY;

    /// 4 kHz
    pub const FREQ_4K_HZ: Self = Self {
        div: DEFAULT_MOD_SAMPLING_FREQ_DIV,
    };

    pub const fn from_frequency_division(div: u32) -> Result<Self, AUPAInternalError> {
        if div == 0 {
            return Err(AUPAInternalError::SamplingFreqDivOutOfRange(
                div,
                1,
                u32::MAX,
            ));
        }
        Ok(Self { div })
    }

    pub fn from_frequency(f: f64) -> Result<Self, AUPAInternalError> {
        let div = (Self::BASE_FREQUENCY / f).round();
        if !div.is_finite() || !(1.0..=u32::MAX as f64).contains(&div) {
            return Err(AUPAInternalError::SamplingFreqOutOfRange(
                f,
                Self::FREQ_MIN,
                Self::FREQ_MAX,
            ));
        }
        Self::from_frequency_division(div as u32)
    }

    pub fn from_period(p: Duration) -> Result<Self, AUPAInternalError> {
        let div = (Self::BASE_FREQUENCY * p.as_secs_f64()).round();
        if !(1.0..=u32::MAX as f64).contains(&div) {
            return Err(AUPAInternalError::SamplingPeriodOutOfRange(p));
        }
        Self::from_frequency_division(div as u32)
    }

    pub const fn frequency_division(&self) -> u32 {
        self.div
    }

    pub fn frequency(&self) -> f64 {
        Self::BASE_FREQUENCY / self.div as f64
    }

    pub fn period(&self) -> Duration {
        Duration::from_nanos((1_000_000_000. / Self::BASE_FREQUENCY * self.div as f64).round() as u64)
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self::FREQ_4K_HZ
    }
}

mod focus;
mod gain;

pub use focus::FocusSTM;
pub use gain::GainSTM;

use std::time::Duration;

use crate::{common::SamplingConfig, error::AUPAInternalError, fpga::FPGA_CLK_FREQ};

#[derive(Clone, Copy, Debug, PartialEq)]
enum STMSampling {
    Frequency(f64),
    Period(Duration),
    SamplingConfig(SamplingConfig),
}

/// Sampling and index properties shared by FocusSTM and GainSTM
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct STMProps {
    sampling: STMSampling,
    start_idx: Option<u16>,
    finish_idx: Option<u16>,
}

impl STMProps {
    /// STM repeating at `freq` Hz
    pub const fn from_freq(freq: f64) -> Self {
        Self::new(STMSampling::Frequency(freq))
    }

    /// STM repeating every `period`
    pub const fn from_period(period: Duration) -> Self {
        Self::new(STMSampling::Period(period))
    }

    /// STM switching at the given sampling configuration
    pub const fn from_sampling_config(config: SamplingConfig) -> Self {
        Self::new(STMSampling::SamplingConfig(config))
    }

    const fn new(sampling: STMSampling) -> Self {
        Self {
            sampling,
            start_idx: None,
            finish_idx: None,
        }
    }

    /// Index at which the STM starts when it is (re)started
    pub const fn with_start_idx(self, start_idx: Option<u16>) -> Self {
        Self { start_idx, ..self }
    }

    /// Index at which the STM stops when it is switched off
    pub const fn with_finish_idx(self, finish_idx: Option<u16>) -> Self {
        Self { finish_idx, ..self }
    }

    pub const fn start_idx(&self) -> Option<u16> {
        self.start_idx
    }

    pub const fn finish_idx(&self) -> Option<u16> {
        self.finish_idx
    }

    /// Sampling configuration for `size` points per period
    pub fn sampling_config(&self, size: usize) -> Result<SamplingConfig, AUPAInternalError> {
        match self.sampling {
            STMSampling::Frequency(f) => {
                let div = (FPGA_CLK_FREQ as f64 / (f * size as f64)).round();
                if !div.is_finite() || !(1.0..=u32::MAX as f64).contains(&div) {
                    return Err(AUPAInternalError::SamplingFreqOutOfRange(
                        f * size as f64,
                        SamplingConfig::FREQ_MIN,
                        SamplingConfig::FREQ_MAX,
                    ));
                }
                SamplingConfig::from_frequency_division(div as u32)
            }
            STMSampling::Period(p) => {
                let div = (FPGA_CLK_FREQ as f64 * p.as_secs_f64() / size as f64).round();
                if !div.is_finite() || !(1.0..=u32::MAX as f64).contains(&div) {
                    return Err(AUPAInternalError::SamplingPeriodOutOfRange(p));
                }
                SamplingConfig::from_frequency_division(div as u32)
            }
            STMSampling::SamplingConfig(c) => Ok(c),
        }
    }

    /// Frequency of one STM period
    pub fn frequency(&self, size: usize) -> Result<f64, AUPAInternalError> {
        let div = self.sampling_config(size)?.frequency_division() as u64;
        Ok(FPGA_CLK_FREQ as f64 / (div * size as u64) as f64)
    }

    /// Length of one STM period
    pub fn period(&self, size: usize) -> Result<Duration, AUPAInternalError> {
        let div = self.sampling_config(size)?.frequency_division() as u64;
        Ok(Duration::from_nanos(
            ((div * size as u64) as f64 * 1_000_000_000. / FPGA_CLK_FREQ as f64).round() as u64,
        ))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[rstest::rstest]
    #[test]
    #[case(1.0, 163_840_000 / 10, 10)]
    #[case(10.0, 163_840_000 / 1000, 1000)]
    #[case(7.0, 23405714, 1)]
    fn from_freq(#[case] f: f64, #[case] div: u32, #[case] n: usize) -> anyhow::Result<()> {
        let props = STMProps::from_freq(f);
        assert_eq!(div, props.sampling_config(n)?.frequency_division());
        assert_abs_diff_eq!(f, props.frequency(n)?, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn from_period() -> anyhow::Result<()> {
        let props = STMProps::from_period(Duration::from_millis(1));
        assert_eq!(16384, props.sampling_config(10)?.frequency_division());
        assert_eq!(Duration::from_millis(1), props.period(10)?);
        assert_abs_diff_eq!(1000., props.frequency(10)?);
        Ok(())
    }

    #[test]
    fn from_sampling_config() -> anyhow::Result<()> {
        let config = SamplingConfig::from_frequency_division(1612)?;
        let props = STMProps::from_sampling_config(config);
        assert_eq!(config, props.sampling_config(3)?);
        assert_eq!(163_840_000. / (1612. * 3.), props.frequency(3)?);
        Ok(())
    }

    #[test]
    fn out_of_range() {
        assert!(matches!(
            STMProps::from_freq(0.).sampling_config(1),
            Err(AUPAInternalError::SamplingFreqOutOfRange(..))
        ));
        assert_eq!(
            Err(AUPAInternalError::SamplingPeriodOutOfRange(Duration::ZERO)),
            STMProps::from_period(Duration::ZERO).sampling_config(1)
        );
    }

    #[test]
    fn indices() {
        let props = STMProps::from_freq(1.);
        assert_eq!(None, props.start_idx());
        assert_eq!(None, props.finish_idx());
        let props = props.with_start_idx(Some(1)).with_finish_idx(Some(2));
        assert_eq!(Some(1), props.start_idx());
        assert_eq!(Some(2), props.finish_idx());
    }
}

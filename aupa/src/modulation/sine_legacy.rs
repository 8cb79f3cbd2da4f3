use aupa_driver::{defined::PI, derive::*, fpga::MOD_BUF_SIZE_MAX};

/// Sine wave modulation with a non-integer frequency
///
/// One period is approximated with `round(fs / f)` samples.
#[derive(Modulation, Clone, Copy, PartialEq, Debug)]
pub struct SineLegacy {
    freq: f64,
    amp: f64,
    offset: f64,
    config: SamplingConfig,
}

impl SineLegacy {
    /// constructor
    ///
    /// # Arguments
    ///
    /// * `freq` - Frequency of the sine wave \[Hz\]
    ///
    pub const fn new(freq: f64) -> Self {
        Self {
            freq,
            amp: 1.0,
            offset: 0.5,
            config: SamplingConfig::FREQ_4K_HZ,
        }
    }

    pub const fn with_amp(self, amp: f64) -> Self {
        Self { amp, ..self }
    }

    pub const fn with_offset(self, offset: f64) -> Self {
        Self { offset, ..self }
    }

    pub const fn freq(&self) -> f64 {
        self.freq
    }

    pub const fn amp(&self) -> f64 {
        self.amp
    }

    pub const fn offset(&self) -> f64 {
        self.offset
    }
}

impl Modulation for SineLegacy {
    fn calc(&self) -> Result<Vec<f64>, AUPAInternalError> {
        let sf = self.config.frequency();
        let freq = self.freq.clamp(sf / MOD_BUF_SIZE_MAX as f64, sf / 2.0);
        let n = (sf / freq).round() as usize;
        Ok((0..n)
            .map(|i| {
                (self.amp / 2.0 * (2.0 * PI * i as f64 / n as f64).sin() + self.offset)
                    .clamp(0.0, 1.0)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[rstest::rstest]
    #[test]
    #[case(27, 150.)]
    #[case(40, 100.)]
    #[case(2, 5000.)]
    #[case(65536, 0.01)]
    fn sine_legacy_len(#[case] expected: usize, #[case] freq: f64) -> anyhow::Result<()> {
        assert_eq!(expected, SineLegacy::new(freq).calc()?.len());
        Ok(())
    }

    #[test]
    fn sine_legacy() -> anyhow::Result<()> {
        let m = SineLegacy::new(100.).with_amp(0.5).with_offset(0.5);
        assert_eq!(100., m.freq());
        assert_eq!(0.5, m.amp());
        assert_eq!(0.5, m.offset());
        let buf = m.calc()?;
        assert_abs_diff_eq!(0.5, buf[0]);
        assert_abs_diff_eq!(0.75, buf[10], epsilon = 1e-12);
        assert_abs_diff_eq!(0.25, buf[30], epsilon = 1e-12);
        Ok(())
    }
}

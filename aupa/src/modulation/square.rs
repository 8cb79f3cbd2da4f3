use aupa_driver::derive::*;

use num::integer::gcd;

use super::integer_sampling_freq;

/// Square wave modulation
#[derive(Modulation, Clone, Copy, PartialEq, Debug)]
pub struct Square {
    freq: usize,
    low: f64,
    high: f64,
    duty: f64,
    config: SamplingConfig,
}

impl Square {
    /// constructor
    ///
    /// # Arguments
    ///
    /// * `freq` - Frequency of the square wave \[Hz\]
    ///
    pub const fn new(freq: usize) -> Self {
        Self {
            freq,
            low: 0.0,
            high: 1.0,
            duty: 0.5,
            config: SamplingConfig::FREQ_4K_HZ,
        }
    }

    /// set low level amplitude
    pub const fn with_low(self, low: f64) -> Self {
        Self { low, ..self }
    }

    /// set high level amplitude
    pub const fn with_high(self, high: f64) -> Self {
        Self { high, ..self }
    }

    /// set duty ratio, the fraction of a period spent at the high level
    pub const fn with_duty(self, duty: f64) -> Self {
        Self { duty, ..self }
    }

    pub const fn freq(&self) -> usize {
        self.freq
    }

    pub const fn low(&self) -> f64 {
        self.low
    }

    pub const fn high(&self) -> f64 {
        self.high
    }

    pub const fn duty(&self) -> f64 {
        self.duty
    }
}

impl Modulation for Square {
    fn calc(&self) -> Result<Vec<f64>, AUPAInternalError> {
        if !(0.0..=1.0).contains(&self.duty) {
            return Err(AUPAInternalError::ModulationError(format!(
                "Duty ratio ({}) must be in range [0, 1]",
                self.duty
            )));
        }

        let sf = integer_sampling_freq(self.config)?;
        let freq = self.freq.clamp(1, sf / 2);
        let k = gcd(sf, freq);
        let (d, n) = (freq / k, sf / k);

        Ok((0..d)
            .map(|i| (n + i) / d)
            .flat_map(|size| {
                let n_high = (size as f64 * self.duty) as usize;
                std::iter::repeat(self.high)
                    .take(n_high)
                    .chain(std::iter::repeat(self.low).take(size - n_high))
            })
            .collect())
    }
}

use aupa_driver::{defined::PI, derive::*};

use num::integer::gcd;

use super::integer_sampling_freq;

/// Sine wave modulation
///
/// The waveform is `amp / 2 * sin(2 pi f t + phase) + offset` sampled over exactly one period.
#[derive(Modulation, Clone, Copy, PartialEq, Debug)]
pub struct Sine {
    freq: usize,
    amp: f64,
    phase: f64,
    offset: f64,
    config: SamplingConfig,
}

impl Sine {
    /// constructor
    ///
    /// # Arguments
    ///
    /// * `freq` - Frequency of the sine wave \[Hz\]
    ///
    pub const fn new(freq: usize) -> Self {
        Self {
            freq,
            amp: 1.0,
            phase: 0.0,
            offset: 0.5,
            config: SamplingConfig::FREQ_4K_HZ,
        }
    }

    /// set amplitude
    ///
    /// # Arguments
    ///
    /// * `amp` - peek to peek amplitude
    ///
    pub const fn with_amp(self, amp: f64) -> Self {
        Self { amp, ..self }
    }

    /// set offset
    ///
    /// # Arguments
    ///
    /// * `offset` - Offset of the wave
    ///
    pub const fn with_offset(self, offset: f64) -> Self {
        Self { offset, ..self }
    }

    /// set phase
    ///
    /// # Arguments
    ///
    /// * `phase` - Phase of the wave in radians
    ///
    pub const fn with_phase(self, phase: f64) -> Self {
        Self { phase, ..self }
    }

    pub const fn freq(&self) -> usize {
        self.freq
    }

    pub const fn amp(&self) -> f64 {
        self.amp
    }

    pub const fn offset(&self) -> f64 {
        self.offset
    }

    pub const fn phase(&self) -> f64 {
        self.phase
    }
}

impl Modulation for Sine {
    fn calc(&self) -> Result<Vec<f64>, AUPAInternalError> {
        let sf = integer_sampling_freq(self.config)?;
        let freq = self.freq.clamp(1, sf / 2);
        let k = gcd(sf, freq);
        let n = sf / k;
        let rep = freq / k;
        Ok((0..n)
            .map(|i| {
                (self.amp / 2.0 * (2.0 * PI * (rep * i) as f64 / n as f64 + self.phase).sin()
                    + self.offset)
                    .clamp(0.0, 1.0)
            })
            .collect())
    }
}

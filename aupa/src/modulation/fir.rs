use aupa_driver::{defined::PI, derive::*};

#[derive(Clone, Copy, PartialEq, Debug)]
enum FilterKind {
    LowPass(f64),
    HighPass(f64),
    BandPass(f64, f64),
    BandStop(f64, f64),
}

/// Modulation filtered by a Blackman-windowed sinc FIR filter
///
/// The filter is applied as a circular convolution over one period of the source samples.
#[derive(Modulation)]
pub struct Fir<M: Modulation> {
    m: M,
    n_taps: usize,
    kind: FilterKind,
    #[no_change]
    config: SamplingConfig,
}

pub trait IntoFir<M: Modulation> {
    /// Apply a low pass filter
    ///
    /// # Arguments
    ///
    /// * `n_taps` - number of taps, must be odd
    /// * `cutoff` - cutoff frequency \[Hz\]
    ///
    fn with_low_pass(self, n_taps: usize, cutoff: f64) -> Fir<M>;
    /// Apply a high pass filter
    fn with_high_pass(self, n_taps: usize, cutoff: f64) -> Fir<M>;
    /// Apply a band pass filter passing `[f_low, f_high]`
    fn with_band_pass(self, n_taps: usize, f_low: f64, f_high: f64) -> Fir<M>;
    /// Apply a band stop filter rejecting `[f_low, f_high]`
    fn with_band_stop(self, n_taps: usize, f_low: f64, f_high: f64) -> Fir<M>;
}

impl<M: Modulation> Fir<M> {
    fn new(m: M, n_taps: usize, kind: FilterKind) -> Self {
        Self {
            config: m.sampling_config(),
            m,
            n_taps,
            kind,
        }
    }

    pub const fn n_taps(&self) -> usize {
        self.n_taps
    }

    /// Filter coefficients
    pub fn coef(&self) -> Result<Vec<f64>, AUPAInternalError> {
        if self.n_taps % 2 == 0 {
            return Err(AUPAInternalError::ModulationError(format!(
                "Number of taps ({}) must be odd",
                self.n_taps
            )));
        }
        let fs = self.config.frequency();
        let check = |f: f64| {
            if 0.0 < f && f < fs / 2.0 {
                Ok(f / fs)
            } else {
                Err(AUPAInternalError::ModulationError(format!(
                    "Cutoff frequency ({}) must be in range (0, {})",
                    f,
                    fs / 2.0
                )))
            }
        };
        let check_band = |f_low: f64, f_high: f64| {
            if f_low >= f_high {
                return Err(AUPAInternalError::ModulationError(format!(
                    "Lower cutoff ({}) must be less than upper cutoff ({})",
                    f_low, f_high
                )));
            }
            Ok((check(f_low)?, check(f_high)?))
        };
        let n = self.n_taps;
        Ok(match self.kind {
            FilterKind::LowPass(f) => low_pass(n, check(f)?),
            FilterKind::HighPass(f) => invert(low_pass(n, check(f)?)),
            FilterKind::BandPass(l, h) => {
                let (l, h) = check_band(l, h)?;
                band_pass(n, l, h)
            }
            FilterKind::BandStop(l, h) => {
                let (l, h) = check_band(l, h)?;
                invert(band_pass(n, l, h))
            }
        })
    }
}

fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        (PI * x).sin() / (PI * x)
    }
}

fn blackman(i: usize, n: usize) -> f64 {
    if n <= 1 {
        return 1.0;
    }
    let m = (n - 1) as f64;
    let x = i as f64;
    0.42 - 0.5 * (2.0 * PI * x / m).cos() + 0.08 * (4.0 * PI * x / m).cos()
}

/// Unity DC gain low pass taps for the normalized cutoff `fc` (cycles per sample)
fn low_pass(n: usize, fc: f64) -> Vec<f64> {
    let center = (n / 2) as f64;
    let h = (0..n)
        .map(|i| 2.0 * fc * sinc(2.0 * fc * (i as f64 - center)) * blackman(i, n))
        .collect::<Vec<_>>();
    let sum = h.iter().sum::<f64>();
    h.into_iter().map(|v| v / sum).collect()
}

fn band_pass(n: usize, fc_low: f64, fc_high: f64) -> Vec<f64> {
    low_pass(n, fc_high)
        .into_iter()
        .zip(low_pass(n, fc_low))
        .map(|(h, l)| h - l)
        .collect()
}

/// Spectral inversion: `delta - h`
fn invert(h: Vec<f64>) -> Vec<f64> {
    let center = h.len() / 2;
    h.into_iter()
        .enumerate()
        .map(|(i, v)| if i == center { 1.0 - v } else { -v })
        .collect()
}

impl<M: Modulation> IntoFir<M> for M {
    fn with_low_pass(self, n_taps: usize, cutoff: f64) -> Fir<M> {
        Fir::new(self, n_taps, FilterKind::LowPass(cutoff))
    }

    fn with_high_pass(self, n_taps: usize, cutoff: f64) -> Fir<M> {
        Fir::new(self, n_taps, FilterKind::HighPass(cutoff))
    }

    fn with_band_pass(self, n_taps: usize, f_low: f64, f_high: f64) -> Fir<M> {
        Fir::new(self, n_taps, FilterKind::BandPass(f_low, f_high))
    }

    fn with_band_stop(self, n_taps: usize, f_low: f64, f_high: f64) -> Fir<M> {
        Fir::new(self, n_taps, FilterKind::BandStop(f_low, f_high))
    }
}

impl<M: Modulation> Modulation for Fir<M> {
    fn calc(&self) -> Result<Vec<f64>, AUPAInternalError> {
        let coef = self.coef()?;
        let src = self.m.calc()?;
        let src_len = src.len() as isize;
        let filter_len = coef.len() as isize;
        Ok((0..src_len)
            .map(|i| {
                (0..filter_len)
                    .map(|j| {
                        src[(i + j - filter_len / 2).rem_euclid(src_len) as usize] * coef[j as usize]
                    })
                    .sum::<f64>()
                    .clamp(0.0, 1.0)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::modulation::{Fourier, Sine, Static};

    #[test]
    fn low_pass_keeps_dc() -> anyhow::Result<()> {
        let m = Static::with_amp(0.7).with_low_pass(31, 100.);
        assert_eq!(31, m.n_taps());
        assert_abs_diff_eq!(1.0, m.coef()?.iter().sum::<f64>(), epsilon = 1e-9);
        m.calc()?
            .iter()
            .for_each(|&v| assert_abs_diff_eq!(0.7, v, epsilon = 1e-9));
        Ok(())
    }

    #[test]
    fn high_pass_removes_dc() -> anyhow::Result<()> {
        let m = Static::with_amp(0.7).with_high_pass(31, 100.);
        assert_abs_diff_eq!(0.0, m.coef()?.iter().sum::<f64>(), epsilon = 1e-9);
        m.calc()?
            .iter()
            .for_each(|&v| assert_abs_diff_eq!(0.0, v, epsilon = 1e-9));
        Ok(())
    }

    #[test]
    fn low_pass_attenuates_high_component() -> anyhow::Result<()> {
        let src = Fourier::new(Sine::new(10)).add_component(Sine::new(1000));
        let low = Sine::new(10).calc()?;
        let filtered = src.with_low_pass(199, 100.).calc()?;
        assert_eq!(400, filtered.len());

        let residual = filtered
            .iter()
            .zip(low.iter().cycle())
            .map(|(&f, &l)| (f - (l + 0.5) / 2.0).abs())
            .fold(0.0, f64::max);
        assert!(residual < 0.05);
        Ok(())
    }

    #[test]
    fn band_stop_is_inverted_band_pass() -> anyhow::Result<()> {
        let pass = Sine::new(100).with_band_pass(51, 200., 400.).coef()?;
        let stop = Sine::new(100).with_band_stop(51, 200., 400.).coef()?;
        pass.iter().zip(stop.iter()).enumerate().for_each(|(i, (&p, &s))| {
            let delta = if i == 25 { 1.0 } else { 0.0 };
            assert_abs_diff_eq!(delta, p + s, epsilon = 1e-12);
        });
        Ok(())
    }

    #[test]
    fn coef_symmetric() -> anyhow::Result<()> {
        let coef = Sine::new(100).with_low_pass(101, 300.).coef()?;
        (0..coef.len() / 2).for_each(|i| {
            assert_abs_diff_eq!(coef[i], coef[coef.len() - 1 - i], epsilon = 1e-12)
        });
        Ok(())
    }

    #[rstest::rstest]
    #[test]
    #[case(Static::new().with_low_pass(30, 100.))]
    #[case(Static::new().with_low_pass(31, 0.))]
    #[case(Static::new().with_low_pass(31, 2000.))]
    #[case(Static::new().with_band_pass(31, 400., 200.))]
    fn invalid_filter(#[case] m: Fir<Static>) {
        assert!(matches!(
            m.calc(),
            Err(AUPAInternalError::ModulationError(_))
        ));
    }

    #[test]
    fn sampling_config_follows_source() -> anyhow::Result<()> {
        let config = SamplingConfig::from_frequency(8000.)?;
        let m = Sine::new(100)
            .with_sampling_config(config)
            .with_low_pass(31, 100.);
        assert_eq!(config, m.sampling_config());
        Ok(())
    }
}

use aupa_driver::defined::PI;

/// Sinc interpolation with a Blackman window
///
/// The source buffer is treated as one period of a periodic signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SincInterpolation {
    window_size: usize,
}

impl Default for SincInterpolation {
    fn default() -> Self {
        Self { window_size: 32 }
    }
}

fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        (x * PI).sin() / (x * PI)
    }
}

impl SincInterpolation {
    pub const fn new(window_size: usize) -> Self {
        Self { window_size }
    }

    pub const fn window_size(&self) -> usize {
        self.window_size
    }

    fn window(&self, k: usize) -> f64 {
        let x = k as f64 / self.window_size as f64;
        0.42 - 0.5 * (2.0 * PI * x).cos() + 0.08 * (4.0 * PI * x).cos()
    }

    /// Resample `buffer` sampled at `source` Hz to `target` Hz
    pub fn resample(&self, buffer: &[f64], source: f64, target: f64) -> Vec<f64> {
        if buffer.is_empty() || source == target || self.window_size == 0 {
            return buffer.to_vec();
        }
        let ratio = target / source;
        let target_size = buffer.len() as f64 * ratio;
        if target_size.fract() != 0.0 {
            tracing::warn!(
                "Resampled size ({}) is not an integer, ceiling to {}",
                target_size,
                target_size.ceil()
            );
        }
        // cutoff at the lower Nyquist frequency
        let scale = ratio.min(1.0);
        let len = buffer.len() as isize;
        let half = self.window_size as isize / 2;
        (0..target_size.ceil() as usize)
            .map(|m| {
                let t = m as f64 / ratio;
                let n = t.floor() as isize;
                let frac = t - n as f64;
                (0..self.window_size)
                    .map(|k| {
                        let kk = k as isize - half;
                        let idx = (n + kk).rem_euclid(len) as usize;
                        scale * buffer[idx] * sinc((kk as f64 - frac) * scale) * self.window(k)
                    })
                    .sum::<f64>()
            })
            .collect()
    }
}

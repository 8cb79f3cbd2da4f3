use std::ops::Deref;

use aupa_driver::derive::*;

use num::integer::lcm;

use super::Sine;

/// Multi-frequency sine wave modulation
///
/// The components are summed over the least common multiple of their periods and averaged.
#[derive(Modulation, Clone, PartialEq, Debug)]
pub struct Fourier {
    #[no_change]
    config: SamplingConfig,
    components: Vec<Sine>,
}

impl Fourier {
    pub fn new(sine: Sine) -> Self {
        Self {
            config: sine.sampling_config(),
            components: vec![sine],
        }
    }

    /// Add a sine wave component
    ///
    /// All components share the finest sampling configuration among them.
    pub fn add_component(self, sine: Sine) -> Self {
        self.add_components_from_iter([sine])
    }

    /// Add sine wave components from iterator
    pub fn add_components_from_iter(self, iter: impl IntoIterator<Item = impl Into<Sine>>) -> Self {
        let Self {
            mut components,
            config,
        } = self;
        let append = iter.into_iter().map(Into::into).collect::<Vec<_>>();
        let config = append
            .iter()
            .map(|m| m.sampling_config())
            .fold(config, SamplingConfig::min);
        components.extend(append);
        Self {
            components: components
                .into_iter()
                .map(|m| m.with_sampling_config(config))
                .collect(),
            config,
        }
    }
}

impl From<Sine> for Fourier {
    fn from(sine: Sine) -> Self {
        Self::new(sine)
    }
}

impl Deref for Fourier {
    type Target = [Sine];

    fn deref(&self) -> &Self::Target {
        &self.components
    }
}

impl std::ops::Add<Sine> for Fourier {
    type Output = Self;

    fn add(self, rhs: Sine) -> Self::Output {
        self.add_component(rhs)
    }
}

impl std::ops::Add<Sine> for Sine {
    type Output = Fourier;

    fn add(self, rhs: Sine) -> Self::Output {
        Fourier::new(self).add_component(rhs)
    }
}

impl Modulation for Fourier {
    fn calc(&self) -> Result<Vec<f64>, AUPAInternalError> {
        let buffers = self
            .components
            .iter()
            .map(|c| c.calc())
            .collect::<Result<Vec<_>, _>>()?;
        let len = buffers.iter().fold(1, |acc, x| lcm(acc, x.len()));
        let num = buffers.len() as f64;
        Ok((0..len)
            .map(|i| buffers.iter().map(|b| b[i % b.len()]).sum::<f64>() / num)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn fourier() -> anyhow::Result<()> {
        let f0 = Sine::new(50).with_phase(0.5);
        let f1 = Sine::new(100);
        let f2 = Sine::new(150).with_amp(0.5);

        let f = (f0 + f1).add_component(f2) + Sine::new(200);
        assert_eq!(4, f.len());
        assert_eq!(150, f[2].freq());

        let buf = f.calc()?;
        let bufs = [f0.calc()?, f1.calc()?, f2.calc()?, Sine::new(200).calc()?];
        assert_eq!(80, buf.len());
        buf.iter().enumerate().for_each(|(i, &v)| {
            let expected = bufs.iter().map(|b| b[i % b.len()]).sum::<f64>() / 4.;
            assert_abs_diff_eq!(expected, v, epsilon = 1e-12);
            assert!((0.0..=1.0).contains(&v));
        });

        Ok(())
    }

    #[test]
    fn fourier_lcm_length() -> anyhow::Result<()> {
        let f = Fourier::new(Sine::new(150)).add_components_from_iter([Sine::new(200)]);
        assert_eq!(80, f.calc()?.len());
        let f = Fourier::from(Sine::new(3)).add_component(Sine::new(7));
        assert_eq!(4000, f.calc()?.len());
        Ok(())
    }

    #[test]
    fn fourier_sampling_config() -> anyhow::Result<()> {
        let fine = SamplingConfig::from_frequency(8000.)?;
        let f = Fourier::new(Sine::new(100)).add_component(Sine::new(200).with_sampling_config(fine));
        assert_eq!(fine, f.sampling_config());
        assert!(f.iter().all(|c| c.sampling_config() == fine));
        Ok(())
    }
}

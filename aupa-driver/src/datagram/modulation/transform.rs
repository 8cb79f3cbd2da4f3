use crate::derive::*;

/// Modulation to transform modulation data
#[derive(Modulation)]
pub struct Transform<M: Modulation, F: Fn(usize, f64) -> f64> {
    m: M,
    #[no_change]
    config: SamplingConfig,
    f: F,
}

pub trait IntoTransform<M: Modulation> {
    /// Transform modulation data
    ///
    /// # Arguments
    ///
    /// * `f` - transform function. The first argument is index of the element, and the second argument is the value of the element of the original modulation data.
    ///
    fn with_transform<F: Fn(usize, f64) -> f64>(self, f: F) -> Transform<M, F>;
}

impl<M: Modulation> IntoTransform<M> for M {
    fn with_transform<F: Fn(usize, f64) -> f64>(self, f: F) -> Transform<M, F> {
        Transform {
            config: self.sampling_config(),
            f,
            m: self,
        }
    }
}

impl<M: Modulation, F: Fn(usize, f64) -> f64> Modulation for Transform<M, F> {
    fn calc(&self) -> Result<Vec<f64>, AUPAInternalError> {
        Ok(self
            .m
            .calc()?
            .into_iter()
            .enumerate()
            .map(|(i, x)| (self.f)(i, x))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datagram::modulation::tests::TestModulation;

    #[test]
    fn transform() -> anyhow::Result<()> {
        let m = TestModulation::new(vec![1.0, 1.0, 0.5]).with_transform(|i, x| match i {
            0 => x / 2.,
            _ => x,
        });
        assert_eq!(vec![0.5, 1.0, 0.5], m.calc()?);
        assert_eq!(SamplingConfig::default(), m.sampling_config());
        Ok(())
    }
}

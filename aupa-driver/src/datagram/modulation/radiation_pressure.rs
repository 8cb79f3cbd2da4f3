use crate::derive::*;

/// Modulation for modulating radiation pressure instead of amplitude
#[derive(Modulation)]
pub struct RadiationPressure<M: Modulation> {
    m: M,
    #[no_change]
    config: SamplingConfig,
}

pub trait IntoRadiationPressure<M: Modulation> {
    /// Apply modulation to radiation pressure instead of amplitude
    fn with_radiation_pressure(self) -> RadiationPressure<M>;
}

impl<M: Modulation> IntoRadiationPressure<M> for M {
    fn with_radiation_pressure(self) -> RadiationPressure<M> {
        RadiationPressure {
            config: self.sampling_config(),
            m: self,
        }
    }
}

impl<M: Modulation> Modulation for RadiationPressure<M> {
    fn calc(&self) -> Result<Vec<f64>, AUPAInternalError> {
        Ok(self.m.calc()?.into_iter().map(f64::sqrt).collect())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::datagram::modulation::tests::TestModulation;

    #[test]
    fn radiation_pressure() -> anyhow::Result<()> {
        let buf = vec![0.0, 0.25, 0.81, 1.0];
        let m = TestModulation::new(buf.clone()).with_radiation_pressure();
        m.calc()?
            .iter()
            .zip(buf.iter())
            .for_each(|(&y, &x)| assert_abs_diff_eq!(x.sqrt(), y));
        assert_eq!(SamplingConfig::default(), m.sampling_config());
        Ok(())
    }
}

use crate::derive::*;

/// Gain to transform gain data
#[derive(Gain)]
pub struct Transform<G: Gain + 'static, F: Fn(&Device, &Transducer, &Drive) -> Drive + 'static> {
    gain: G,
    f: F,
}

pub trait IntoTransform<G: Gain> {
    /// Transform gain data
    ///
    /// # Arguments
    ///
    /// * `f` - transform function. The first argument is the device, the second is transducer, and the third is the original drive data.
    ///
    fn with_transform<F: Fn(&Device, &Transducer, &Drive) -> Drive>(self, f: F) -> Transform<G, F>;
}

impl<G: Gain> IntoTransform<G> for G {
    fn with_transform<F: Fn(&Device, &Transducer, &Drive) -> Drive>(self, f: F) -> Transform<G, F> {
        Transform { gain: self, f }
    }
}

impl<G: Gain + 'static, F: Fn(&Device, &Transducer, &Drive) -> Drive + 'static> Gain
    for Transform<G, F>
{
    fn calc(
        &self,
        geometry: &Geometry,
        filter: GainFilter,
    ) -> Result<HashMap<usize, Vec<Drive>>, AUPAInternalError> {
        Ok(self
            .gain
            .calc(geometry, filter)?
            .into_iter()
            .map(|(k, v)| {
                let dev = &geometry[k];
                (
                    k,
                    v.iter()
                        .zip(dev.iter())
                        .map(|(d, tr)| (self.f)(dev, tr, d))
                        .collect::<Vec<_>>(),
                )
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{datagram::gain::tests::TestGain, fpga::TransMode, geometry::tests::create_autd3_geometry};

    #[test]
    fn gain_transform() -> anyhow::Result<()> {
        let geometry = create_autd3_geometry(2, TransMode::Legacy);
        let d = Drive::new(Phase::from_legacy(0x10), EmitIntensity::new(0x20));

        let gain = TestGain::new(d).with_transform(|dev, tr, d| Drive {
            phase: Phase::from_legacy(tr.idx() as u8),
            intensity: EmitIntensity::new(d.intensity.value() + dev.idx() as u8),
        });

        let drives = gain.calc(&geometry, GainFilter::All)?;
        geometry.devices().for_each(|dev| {
            drives[&dev.idx()].iter().enumerate().for_each(|(i, x)| {
                assert_eq!(Phase::from_legacy(i as u8).to_legacy(), x.phase.to_legacy());
                assert_eq!(0x20 + dev.idx() as u8, x.intensity.value());
            })
        });
        Ok(())
    }
}

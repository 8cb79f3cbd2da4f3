use aupa_driver::derive::*;

/// Gain to drive only specified transducers
///
/// Transducers for which the closure returns `None` are not driven.
#[derive(Gain)]
pub struct TransducerTest<F: Fn(&Device, &Transducer) -> Option<Drive> + Send + Sync> {
    f: F,
}

impl<F: Fn(&Device, &Transducer) -> Option<Drive> + Send + Sync> TransducerTest<F> {
    pub const fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F: Fn(&Device, &Transducer) -> Option<Drive> + Send + Sync> Gain for TransducerTest<F> {
    fn calc(
        &self,
        geometry: &Geometry,
        filter: GainFilter,
    ) -> Result<HashMap<usize, Vec<Drive>>, AUPAInternalError> {
        Ok(Self::transform(geometry, filter, |dev, tr| {
            (self.f)(dev, tr).unwrap_or(Drive::null())
        }))
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use crate::tests::create_geometry;

    use super::*;

    #[test]
    fn transducer_test() -> anyhow::Result<()> {
        let mut rng = rand::rng();

        let geometry = create_geometry(2);

        let test_id = rng.random_range(0..geometry[0].num_transducers());
        let test_drive = Drive::new(
            Phase::from_legacy(rng.random()),
            EmitIntensity::new(rng.random()),
        );
        let transducer_test = TransducerTest::new(move |dev, tr| {
            ((dev.idx() == 0) && (tr.idx() == test_id)).then_some(test_drive)
        });

        let drives = transducer_test.calc(&geometry, GainFilter::All)?;
        assert_eq!(2, drives.len());
        drives[&0].iter().enumerate().for_each(|(idx, &drive)| {
            if idx == test_id {
                assert_eq!(test_drive, drive);
            } else {
                assert_eq!(Drive::null(), drive);
            }
        });
        drives[&1]
            .iter()
            .for_each(|&drive| assert_eq!(Drive::null(), drive));

        Ok(())
    }

    #[test]
    fn transducer_test_derive() -> anyhow::Result<()> {
        let gain = TransducerTest::new(|_, _| None);
        let _ = gain.operation()?;
        Ok(())
    }
}

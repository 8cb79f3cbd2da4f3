mod cache;
mod transform;

pub use cache::{Cache as GainCache, IntoCache as IntoGainCache};
pub use transform::{IntoTransform as IntoGainTransform, Transform as GainTransform};

use std::collections::HashMap;

use bit_vec::BitVec;
use rayon::prelude::*;

use crate::{
    common::Drive,
    datagram::{BodyDatagram, Datagram},
    error::AUPAInternalError,
    geometry::{Device, Geometry, Transducer},
    operation::{GainOp, NullOp},
};

/// Selects the transducers a gain is evaluated for
pub enum GainFilter<'a> {
    All,
    /// Per-device mask; transducers whose bit is off get `Drive::null()`
    Filter(&'a HashMap<usize, BitVec<u32>>),
}

/// Gain controls amplitude and phase of each transducer
pub trait Gain {
    fn calc(
        &self,
        geometry: &Geometry,
        filter: GainFilter,
    ) -> Result<HashMap<usize, Vec<Drive>>, AUPAInternalError>;

    /// Evaluate `f` for every transducer of every enabled device in parallel
    fn transform<F: Fn(&Device, &Transducer) -> Drive + Sync + Send>(
        geometry: &Geometry,
        filter: GainFilter,
        f: F,
    ) -> HashMap<usize, Vec<Drive>>
    where
        Self: Sized,
    {
        let devices = geometry.devices().collect::<Vec<_>>();
        match filter {
            GainFilter::All => devices
                .par_iter()
                .map(|dev| (dev.idx(), dev.iter().map(|tr| f(dev, tr)).collect()))
                .collect(),
            GainFilter::Filter(filter) => devices
                .par_iter()
                .map(|dev| {
                    let mask = filter.get(&dev.idx());
                    (
                        dev.idx(),
                        dev.iter()
                            .map(|tr| {
                                if mask
                                    .and_then(|m| m.get(tr.idx()))
                                    .unwrap_or(false)
                                {
                                    f(dev, tr)
                                } else {
                                    Drive::null()
                                }
                            })
                            .collect(),
                    )
                })
                .collect(),
        }
    }

    #[tracing::instrument(skip(self, _geometry))]
    fn trace(&self, _geometry: &Geometry) {
        tracing::debug!("{}", tynm::type_name::<Self>());
    }
}

impl<'a> Gain for Box<dyn Gain + 'a> {
    fn calc(
        &self,
        geometry: &Geometry,
        filter: GainFilter,
    ) -> Result<HashMap<usize, Vec<Drive>>, AUPAInternalError> {
        self.as_ref().calc(geometry, filter)
    }

    #[tracing::instrument(skip(self, geometry))]
    fn trace(&self, geometry: &Geometry) {
        self.as_ref().trace(geometry);
    }
}

impl<'a> Datagram for Box<dyn Gain + 'a> {
    type O1 = NullOp;
    type O2 = GainOp<Self>;

    fn operation(self) -> Result<(Self::O1, Self::O2), AUPAInternalError> {
        Ok((Self::O1::default(), Self::O2::new(self)))
    }
}

impl<'a> BodyDatagram for Box<dyn Gain + 'a> {}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::{
        common::{EmitIntensity, Phase},
        derive::*,
        fpga::TransMode,
        geometry::tests::create_autd3_geometry,
    };

    #[derive(Gain, Clone, PartialEq, Debug)]
    pub struct TestGain {
        pub d: Drive,
    }

    impl TestGain {
        pub fn new(d: Drive) -> Self {
            Self { d }
        }
    }

    impl Gain for TestGain {
        fn calc(
            &self,
            geometry: &Geometry,
            filter: GainFilter,
        ) -> Result<HashMap<usize, Vec<Drive>>, AUPAInternalError> {
            let d = self.d;
            Ok(Self::transform(geometry, filter, move |_, _| d))
        }
    }

    #[test]
    fn gain_transform_all() -> anyhow::Result<()> {
        let mut geometry = create_autd3_geometry(3, TransMode::Legacy);
        geometry[1].enable = false;
        let d = Drive::new(Phase::from_legacy(0x80), EmitIntensity::new(0x40));

        let drives = TestGain::new(d).calc(&geometry, GainFilter::All)?;
        assert_eq!(2, drives.len());
        assert!(!drives.contains_key(&1));
        [0, 2].iter().for_each(|i| {
            assert_eq!(249, drives[i].len());
            assert!(drives[i].iter().all(|&x| x == d));
        });
        Ok(())
    }

    #[test]
    fn gain_transform_filter() -> anyhow::Result<()> {
        let geometry = create_autd3_geometry(2, TransMode::Legacy);
        let d = Drive::new(Phase::from_legacy(0x80), EmitIntensity::new(0x40));

        let mut mask = BitVec::from_elem(249, false);
        mask.set(0, true);
        mask.set(10, true);
        let filter = [(0, mask)].into_iter().collect::<HashMap<_, _>>();

        let drives = TestGain::new(d).calc(&geometry, GainFilter::Filter(&filter))?;
        drives[&0].iter().enumerate().for_each(|(i, &x)| {
            if i == 0 || i == 10 {
                assert_eq!(d, x);
            } else {
                assert_eq!(Drive::null(), x);
            }
        });
        assert!(drives[&1].iter().all(|&x| x == Drive::null()));
        Ok(())
    }

    #[test]
    fn boxed_gain() -> anyhow::Result<()> {
        let geometry = create_autd3_geometry(1, TransMode::Legacy);
        let d = Drive::new(Phase::from_legacy(0x10), EmitIntensity::MAX);
        let g: Box<dyn Gain> = Box::new(TestGain::new(d));
        assert!(g.calc(&geometry, GainFilter::All)?[&0].iter().all(|&x| x == d));

        let (_, mut op) = g.operation()?;
        op.init(&geometry)?;
        assert_eq!(1, op.remains(&geometry[0]));
        Ok(())
    }
}

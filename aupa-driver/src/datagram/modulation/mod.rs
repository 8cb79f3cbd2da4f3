mod cache;
mod radiation_pressure;
mod transform;

pub use cache::{Cache as ModulationCache, IntoCache as IntoModulationCache};
pub use radiation_pressure::{IntoRadiationPressure, RadiationPressure};
pub use transform::{IntoTransform as IntoModulationTransform, Transform as ModulationTransform};

use std::time::Duration;

use crate::{
    common::SamplingConfig,
    datagram::{Datagram, HeaderDatagram},
    defined::DEFAULT_TIMEOUT,
    error::AUPAInternalError,
    operation::{ModulationOp, NullOp},
};

pub trait ModulationProperty {
    fn sampling_config(&self) -> SamplingConfig;
}

/// Modulation controls the amplitude envelope of ultrasound
///
/// `calc` returns normalized amplitudes in `[0, 1]`.
pub trait Modulation: ModulationProperty {
    fn calc(&self) -> Result<Vec<f64>, AUPAInternalError>;

    #[tracing::instrument(skip(self))]
    fn trace(&self) {
        tracing::debug!(
            "{} ({:?})",
            tynm::type_name::<Self>(),
            self.sampling_config()
        );
    }
}

impl<'a> ModulationProperty for Box<dyn Modulation + 'a> {
    fn sampling_config(&self) -> SamplingConfig {
        self.as_ref().sampling_config()
    }
}

impl<'a> Modulation for Box<dyn Modulation + 'a> {
    fn calc(&self) -> Result<Vec<f64>, AUPAInternalError> {
        self.as_ref().calc()
    }

    #[tracing::instrument(skip(self))]
    fn trace(&self) {
        self.as_ref().trace();
    }
}

impl<'a> Datagram for Box<dyn Modulation + 'a> {
    type O1 = ModulationOp;
    type O2 = NullOp;

    fn operation(self) -> Result<(Self::O1, Self::O2), AUPAInternalError> {
        let freq_div = self.sampling_config().frequency_division();
        Ok((Self::O1::new(self.calc()?, freq_div), Self::O2::default()))
    }

    fn timeout(&self) -> Option<Duration> {
        Some(DEFAULT_TIMEOUT)
    }
}

impl<'a> HeaderDatagram for Box<dyn Modulation + 'a> {}

use super::{BodyDatagram, Datagram};
use crate::{
    common::EmitIntensity,
    error::AUPAInternalError,
    operation::{AmplitudesOp, NullOp},
};

/// Uniform duty for every transducer, AdvancedPhase mode only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amplitudes {
    intensity: EmitIntensity,
}

impl Amplitudes {
    pub fn uniform(intensity: impl Into<EmitIntensity>) -> Self {
        Self {
            intensity: intensity.into(),
        }
    }

    /// Maximum intensity
    pub const fn none() -> Self {
        Self {
            intensity: EmitIntensity::MAX,
        }
    }

    pub const fn intensity(&self) -> EmitIntensity {
        self.intensity
    }
}

impl Datagram for Amplitudes {
    type O1 = NullOp;
    type O2 = AmplitudesOp;

    fn operation(self) -> Result<(Self::O1, Self::O2), AUPAInternalError> {
        Ok((Self::O1::default(), Self::O2::new(self.intensity)))
    }
}

impl BodyDatagram for Amplitudes {}

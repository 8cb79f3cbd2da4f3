use aupa_driver::derive::*;

/// Gain with the same phase and intensity on every transducer
#[derive(Gain, Clone, Copy, PartialEq, Debug)]
pub struct Uniform {
    intensity: EmitIntensity,
    phase: Phase,
}

impl Uniform {
    pub fn new(intensity: impl Into<EmitIntensity>) -> Self {
        Self {
            intensity: intensity.into(),
            phase: Phase::ZERO,
        }
    }

    pub const fn with_phase(self, phase: Phase) -> Self {
        Self { phase, ..self }
    }

    pub const fn intensity(&self) -> EmitIntensity {
        self.intensity
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }
}

impl Gain for Uniform {
    fn calc(
        &self,
        geometry: &Geometry,
        filter: GainFilter,
    ) -> Result<HashMap<usize, Vec<Drive>>, AUPAInternalError> {
        let d = Drive::new(self.phase, self.intensity);
        Ok(Self::transform(geometry, filter, |_, _| d))
    }
}

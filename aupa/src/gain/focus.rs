use aupa_driver::{derive::*, geometry::Vector3};

/// Gain to produce a focal point
#[derive(Gain, Clone, PartialEq, Debug)]
pub struct Focus {
    intensity: EmitIntensity,
    pos: Vector3,
    phase_offset: Phase,
}

impl Focus {
    /// constructor
    ///
    /// # Arguments
    ///
    /// * `pos` - position of the focal point
    ///
    pub const fn new(pos: Vector3) -> Self {
        Self {
            pos,
            intensity: EmitIntensity::MAX,
            phase_offset: Phase::ZERO,
        }
    }

    /// set emission intensity
    ///
    /// # Arguments
    ///
    /// * `intensity` - emission intensity
    ///
    pub fn with_intensity(self, intensity: impl Into<EmitIntensity>) -> Self {
        Self {
            intensity: intensity.into(),
            ..self
        }
    }

    /// set phase offset
    ///
    /// # Arguments
    ///
    /// * `phase_offset` - phase offset added to every transducer
    ///
    pub const fn with_phase_offset(self, phase_offset: Phase) -> Self {
        Self {
            phase_offset,
            ..self
        }
    }

    pub const fn intensity(&self) -> EmitIntensity {
        self.intensity
    }

    pub const fn pos(&self) -> Vector3 {
        self.pos
    }

    pub const fn phase_offset(&self) -> Phase {
        self.phase_offset
    }
}

impl Gain for Focus {
    fn calc(
        &self,
        geometry: &Geometry,
        filter: GainFilter,
    ) -> Result<HashMap<usize, Vec<Drive>>, AUPAInternalError> {
        Ok(Self::transform(geometry, filter, |dev, tr| {
            Drive::new(
                tr.align_phase_at(self.pos, dev.sound_speed) + self.phase_offset,
                self.intensity,
            )
        }))
    }
}

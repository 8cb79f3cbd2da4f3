use aupa_driver::{derive::*, geometry::Vector3};

/// Gain to produce a plane wave
#[derive(Gain, Clone, PartialEq, Debug)]
pub struct Plane {
    intensity: EmitIntensity,
    dir: Vector3,
}

impl Plane {
    /// constructor
    ///
    /// # Arguments
    ///
    /// * `dir` - direction of the plane wave
    ///
    pub const fn new(dir: Vector3) -> Self {
        Self {
            dir,
            intensity: EmitIntensity::MAX,
        }
    }

    pub fn with_intensity(self, intensity: impl Into<EmitIntensity>) -> Self {
        Self {
            intensity: intensity.into(),
            ..self
        }
    }

    pub const fn intensity(&self) -> EmitIntensity {
        self.intensity
    }

    pub const fn dir(&self) -> Vector3 {
        self.dir
    }
}

impl Gain for Plane {
    fn calc(
        &self,
        geometry: &Geometry,
        filter: GainFilter,
    ) -> Result<HashMap<usize, Vec<Drive>>, AUPAInternalError> {
        Ok(Self::transform(geometry, filter, |dev, tr| {
            let dist = self.dir.dot(tr.position());
            Drive::new(
                Phase::from_rad(dist * tr.wavenumber(dev.sound_speed)),
                self.intensity,
            )
        }))
    }
}

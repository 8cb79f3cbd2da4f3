use aupa_driver::{
    derive::*,
    geometry::{UnitQuaternion, Vector3},
};

/// Gain to produce a Bessel beam
///
/// The beam is generated by a virtual cone with the apex `pos`, the axis `dir`
/// and the angle `theta` between the cone side and the plane perpendicular to the axis.
#[derive(Gain, Clone, PartialEq, Debug)]
pub struct Bessel {
    intensity: EmitIntensity,
    pos: Vector3,
    dir: Vector3,
    theta: f64,
}

impl Bessel {
    /// constructor
    ///
    /// # Arguments
    ///
    /// * `pos` - apex of the beam
    /// * `dir` - direction of the beam
    /// * `theta` - angle of the virtual cone in radians
    ///
    pub const fn new(pos: Vector3, dir: Vector3, theta: f64) -> Self {
        Self {
            pos,
            dir,
            theta,
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

    pub const fn pos(&self) -> Vector3 {
        self.pos
    }

    pub const fn dir(&self) -> Vector3 {
        self.dir
    }

    pub const fn theta(&self) -> f64 {
        self.theta
    }

    /// Rotation mapping `dir` onto the z-axis
    fn rotation(&self) -> UnitQuaternion {
        let dir = self.dir.normalize();
        let v = Vector3::new(dir.y, -dir.x, 0.);
        let theta_v = v.norm().asin();
        v.try_normalize(1.0e-6)
            .map(|v| UnitQuaternion::from_scaled_axis(v * theta_v))
            .unwrap_or_else(UnitQuaternion::identity)
    }
}

impl Gain for Bessel {
    fn calc(
        &self,
        geometry: &Geometry,
        filter: GainFilter,
    ) -> Result<HashMap<usize, Vec<Drive>>, AUPAInternalError> {
        let rot = self.rotation();
        Ok(Self::transform(geometry, filter, |dev, tr| {
            let r = rot * (tr.position() - self.pos);
            let dist = self.theta.sin() * (r.x * r.x + r.y * r.y).sqrt() - self.theta.cos() * r.z;
            Drive::new(
                Phase::from_rad(dist * tr.wavenumber(dev.sound_speed)),
                self.intensity,
            )
        }))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use rand::Rng;

    use crate::tests::{create_geometry, random_vector3};

    use super::*;

    #[test]
    fn bessel() -> anyhow::Result<()> {
        let mut rng = rand::rng();

        let geometry = create_geometry(2);

        let pos = random_vector3(-100.0..100.0, -100.0..100.0, 100.0..200.0);
        let dir = random_vector3(-1.0..1.0, -1.0..1.0, 0.5..1.0).normalize();
        let theta = rng.random_range(0.0..1.0);
        let intensity = EmitIntensity::new(rng.random());
        let g = Bessel::new(pos, dir, theta).with_intensity(intensity);
        assert_eq!(pos, g.pos());
        assert_eq!(dir, g.dir());
        assert_eq!(theta, g.theta());

        let rot = g.rotation();
        let b = g.calc(&geometry, GainFilter::All)?;
        assert_eq!(geometry.num_devices(), b.len());
        b.iter().for_each(|(&idx, d)| {
            assert_eq!(d.len(), geometry[idx].num_transducers());
            d.iter().zip(geometry[idx].iter()).for_each(|(d, tr)| {
                let r = rot * (tr.position() - pos);
                let dist = theta.sin() * r.xy().norm() - theta.cos() * r.z;
                assert_abs_diff_eq!(
                    dist * tr.wavenumber(geometry[idx].sound_speed),
                    d.phase.radian(),
                    epsilon = 1e-9
                );
                assert_eq!(intensity, d.intensity);
            });
        });

        Ok(())
    }

    #[test]
    fn rotation_maps_dir_to_z() {
        let dir = Vector3::new(1., 1., 1.).normalize();
        let g = Bessel::new(Vector3::zeros(), dir, 0.1);
        let z = g.rotation() * dir;
        assert_abs_diff_eq!(0., z.x, epsilon = 1e-9);
        assert_abs_diff_eq!(0., z.y, epsilon = 1e-9);
        assert_abs_diff_eq!(1., z.z, epsilon = 1e-9);
    }

    #[test]
    fn rotation_identity_along_z() {
        let g = Bessel::new(Vector3::zeros(), Vector3::z(), 0.1);
        assert_eq!(UnitQuaternion::identity(), g.rotation());
    }
}

use getset::CopyGetters;

use crate::geometry::{Device, Transducer, UnitQuaternion, Vector3};

/// Pose of an AUTD3 device
#[derive(Clone, Copy, Debug, PartialEq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct AUTD3 {
    position: Vector3,
    rotation: UnitQuaternion,
}

impl AUTD3 {
    /// Number of transducer in an AUTD3 device
    pub const NUM_TRANS_IN_UNIT: usize = 249;
    /// Number of transducer in x-axis of AUTD3 device
    pub const NUM_TRANS_X: usize = 18;
    /// Number of transducer in y-axis of AUTD3 device
    pub const NUM_TRANS_Y: usize = 14;
    /// Spacing between transducers in mm
    pub const TRANS_SPACING: f64 = 10.16;
    /// Device width including substrate
    pub const DEVICE_WIDTH: f64 = 192.0;
    /// Device height including substrate
    pub const DEVICE_HEIGHT: f64 = 151.4;

    /// Constructor
    ///
    /// # Arguments
    ///
    /// * `position` - Global position of the first transducer
    ///
    pub fn new(position: Vector3) -> Self {
        Self {
            position,
            rotation: UnitQuaternion::identity(),
        }
    }

    /// Set rotation
    ///
    /// # Arguments
    ///
    /// * `rotation` - `EulerAngle` or `UnitQuaternion`
    ///
    pub fn with_rotation<Q: Into<UnitQuaternion>>(self, rotation: Q) -> Self {
        Self {
            rotation: rotation.into(),
            ..self
        }
    }

    pub const fn is_missing_transducer(x: usize, y: usize) -> bool {
        if Self::NUM_TRANS_X <= x || Self::NUM_TRANS_Y <= y {
            return true;
        }
        y == 1 && (x == 1 || x == 2 || x == 16)
    }

    /// Get the grid position (x, y) of a local transducer index
    pub const fn grid_id(idx: usize) -> (usize, usize) {
        let local_id = idx % Self::NUM_TRANS_IN_UNIT;
        let uid = match local_id {
            0..19 => local_id,
            19..32 => local_id + 2,
            _ => local_id + 3,
        };
        (uid % Self::NUM_TRANS_X, uid / Self::NUM_TRANS_X)
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.position.iter().all(|v| v.is_finite())
            && self.rotation.coords.iter().all(|v| v.is_finite())
    }

    pub(crate) fn into_device(self, dev_idx: usize, global_offset: usize) -> Device {
        let rot = self.rotation;
        Device::new(
            dev_idx,
            itertools::iproduct!(0..Self::NUM_TRANS_Y, 0..Self::NUM_TRANS_X)
                .filter(|&(y, x)| !Self::is_missing_transducer(x, y))
                .map(|(y, x)| {
                    self.position
                        + rot
                            * Vector3::new(
                                x as f64 * Self::TRANS_SPACING,
                                y as f64 * Self::TRANS_SPACING,
                                0.,
                            )
                })
                .enumerate()
                .map(|(i, p)| Transducer::new(i, dev_idx, global_offset + i, p, rot))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{defined::PI, geometry::EulerAngle};

    macro_rules! assert_approx_eq_vec3 {
        ($a:expr, $b:expr) => {
            assert_abs_diff_eq!($a.x, $b.x, epsilon = 1e-3);
            assert_abs_diff_eq!($a.y, $b.y, epsilon = 1e-3);
            assert_abs_diff_eq!($a.z, $b.z, epsilon = 1e-3);
        };
    }

    #[test]
    fn num_transducers() {
        let dev = AUTD3::new(Vector3::zeros()).into_device(0, 0);
        assert_eq!(AUTD3::NUM_TRANS_IN_UNIT, dev.num_transducers());
        assert_eq!(
            AUTD3::NUM_TRANS_X * AUTD3::NUM_TRANS_Y - 3,
            AUTD3::NUM_TRANS_IN_UNIT
        );
    }

    #[rstest::rstest]
    #[test]
    #[case(Vector3::new(0., 0., 0.), 0, Vector3::zeros(), UnitQuaternion::identity())]
    #[case(Vector3::new(AUTD3::TRANS_SPACING, 0., 0.), 1, Vector3::zeros(), UnitQuaternion::identity())]
    #[case(Vector3::new(0., AUTD3::TRANS_SPACING, 0.), 18, Vector3::zeros(), UnitQuaternion::identity())]
    #[case(Vector3::new(3. * AUTD3::TRANS_SPACING, AUTD3::TRANS_SPACING, 0.), 19, Vector3::zeros(), UnitQuaternion::identity())]
    #[case(Vector3::new(17. * AUTD3::TRANS_SPACING, 13. * AUTD3::TRANS_SPACING, 0.), 248, Vector3::zeros(), UnitQuaternion::identity())]
    #[case(Vector3::new(1., 2., 3.), 0, Vector3::new(1., 2., 3.), UnitQuaternion::identity())]
    #[case(Vector3::new(0., AUTD3::TRANS_SPACING, 0.), 1, Vector3::zeros(), UnitQuaternion::from_axis_angle(&Vector3::z_axis(), PI / 2.))]
    fn position(
        #[case] expected: Vector3,
        #[case] idx: usize,
        #[case] pos: Vector3,
        #[case] rot: UnitQuaternion,
    ) {
        let dev = AUTD3::new(pos).with_rotation(rot).into_device(0, 0);
        assert_approx_eq_vec3!(expected, dev[idx].position());
    }

    #[rstest::rstest]
    #[test]
    #[case((0, 0), 0)]
    #[case((1, 0), 1)]
    #[case((0, 1), 18)]
    #[case((3, 1), 19)]
    #[case((14, 1), 30)]
    #[case((15, 1), 31)]
    #[case((17, 1), 32)]
    #[case((0, 2), 33)]
    #[case((17, 13), 248)]
    #[case((0, 0), 249)]
    fn grid_id(#[case] expected: (usize, usize), #[case] idx: usize) {
        assert_eq!(expected, AUTD3::grid_id(idx));
    }

    #[test]
    fn grid_id_matches_position() {
        let dev = AUTD3::new(Vector3::zeros()).into_device(0, 0);
        dev.iter().for_each(|tr| {
            let (x, y) = AUTD3::grid_id(tr.idx());
            assert_approx_eq_vec3!(
                Vector3::new(
                    x as f64 * AUTD3::TRANS_SPACING,
                    y as f64 * AUTD3::TRANS_SPACING,
                    0.
                ),
                tr.position()
            );
        });
    }

    #[test]
    fn with_euler_angle() {
        let dev = AUTD3::new(Vector3::zeros())
            .with_rotation(EulerAngle::ZYZ(PI / 2., 0., 0.))
            .into_device(0, 0);
        assert_approx_eq_vec3!(Vector3::new(0., 1., 0.), dev[0].x_direction());
    }
}

use super::{UnitQuaternion, Vector3};

/// Intrinsic Euler angles in radians
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EulerAngle {
    XYZ(f64, f64, f64),
    ZYZ(f64, f64, f64),
}

impl From<EulerAngle> for UnitQuaternion {
    fn from(angle: EulerAngle) -> Self {
        match angle {
            EulerAngle::XYZ(x, y, z) => {
                UnitQuaternion::from_axis_angle(&Vector3::x_axis(), x)
                    * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), y)
                    * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), z)
            }
            EulerAngle::ZYZ(z1, y, z2) => {
                UnitQuaternion::from_axis_angle(&Vector3::z_axis(), z1)
                    * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), y)
                    * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), z2)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defined::PI;

    macro_rules! assert_approx_eq_quat {
        ($a:expr, $b:expr) => {
            approx::assert_abs_diff_eq!($a.w, $b.w, epsilon = 1e-3);
            approx::assert_abs_diff_eq!($a.i, $b.i, epsilon = 1e-3);
            approx::assert_abs_diff_eq!($a.j, $b.j, epsilon = 1e-3);
            approx::assert_abs_diff_eq!($a.k, $b.k, epsilon = 1e-3);
        };
    }

    #[rstest::rstest]
    #[test]
    #[case(UnitQuaternion::from_axis_angle(&Vector3::x_axis(), PI / 2.), EulerAngle::XYZ(PI / 2., 0., 0.))]
    #[case(UnitQuaternion::from_axis_angle(&Vector3::y_axis(), PI / 2.), EulerAngle::XYZ(0., PI / 2., 0.))]
    #[case(UnitQuaternion::from_axis_angle(&Vector3::z_axis(), PI / 2.), EulerAngle::XYZ(0., 0., PI / 2.))]
    #[case(UnitQuaternion::from_axis_angle(&Vector3::x_axis(), PI / 2.) * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), PI / 2.), EulerAngle::XYZ(PI / 2., PI / 2., 0.))]
    fn rotation_xyz(#[case] expected: UnitQuaternion, #[case] angle: EulerAngle) {
        let angle: UnitQuaternion = angle.into();
        assert_approx_eq_quat!(expected, angle);
    }

    #[rstest::rstest]
    #[test]
    #[case(UnitQuaternion::from_axis_angle(&Vector3::z_axis(), PI / 2.), EulerAngle::ZYZ(PI / 2., 0., 0.))]
    #[case(UnitQuaternion::from_axis_angle(&Vector3::y_axis(), PI / 2.), EulerAngle::ZYZ(0., PI / 2., 0.))]
    #[case(UnitQuaternion::from_axis_angle(&Vector3::z_axis(), PI / 2.), EulerAngle::ZYZ(0., 0., PI / 2.))]
    #[case(UnitQuaternion::from_axis_angle(&Vector3::z_axis(), PI / 2.) * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), PI / 2.), EulerAngle::ZYZ(PI / 2., PI / 2., 0.))]
    fn rotation_zyz(#[case] expected: UnitQuaternion, #[case] angle: EulerAngle) {
        let angle: UnitQuaternion = angle.into();
        assert_approx_eq_quat!(expected, angle);
    }
}

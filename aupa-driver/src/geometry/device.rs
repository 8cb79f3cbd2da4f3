use std::ops::{Deref, DerefMut};

use super::{Matrix3, Transducer, Vector3};
use crate::{
    defined::{ABSOLUTE_ZERO_CELSIUS, DEFAULT_SOUND_SPEED, METER},
    error::AUPAInternalError,
};

pub struct Device {
    idx: usize,
    transducers: Vec<Transducer>,
    pub enable: bool,
    /// Speed of sound in mm/s
    pub sound_speed: f64,
    pub attenuation: f64,
    pub force_fan: bool,
    pub reads_fpga_info: bool,
    inv: Matrix3,
}

impl Device {
    #[doc(hidden)]
    pub fn new(idx: usize, transducers: Vec<Transducer>) -> Self {
        let inv = Matrix3::from_columns(&[
            transducers[0].x_direction(),
            transducers[0].y_direction(),
            transducers[0].z_direction(),
        ])
        .transpose();
        Self {
            idx,
            transducers,
            enable: true,
            sound_speed: DEFAULT_SOUND_SPEED,
            attenuation: 0.0,
            force_fan: false,
            reads_fpga_info: false,
            inv,
        }
    }

    pub const fn idx(&self) -> usize {
        self.idx
    }

    pub fn num_transducers(&self) -> usize {
        self.transducers.len()
    }

    /// Get center position
    pub fn center(&self) -> Vector3 {
        self.transducers
            .iter()
            .map(|tr| tr.position())
            .sum::<Vector3>()
            / self.transducers.len() as f64
    }

    /// Convert a point in the world frame into the device frame
    pub fn to_local(&self, p: &Vector3) -> Vector3 {
        self.inv * (p - self.transducers[0].position())
    }

    pub fn get(&self, idx: usize) -> Result<&Transducer, AUPAInternalError> {
        self.transducers
            .get(idx)
            .ok_or(AUPAInternalError::TransducerIndexOutOfRange(
                idx,
                self.transducers.len(),
            ))
    }

    pub fn get_mut(&mut self, idx: usize) -> Result<&mut Transducer, AUPAInternalError> {
        let n = self.transducers.len();
        self.transducers
            .get_mut(idx)
            .ok_or(AUPAInternalError::TransducerIndexOutOfRange(idx, n))
    }

    /// Set speed of sound from temperature
    /// This is equivalent to `set_sound_speed_from_temp_with(temp, 1.4, 8.314463, 28.9647e-3)`
    ///
    /// # Arguments
    ///
    /// * `temp` - Temperature in Celsius
    ///
    pub fn set_sound_speed_from_temp(&mut self, temp: f64) {
        self.set_sound_speed_from_temp_with(temp, 1.4, 8.314_463, 28.9647e-3);
    }

    /// Set speed of sound from temperature with air parameter
    ///
    /// # Arguments
    ///
    /// * `temp` - Temperature in Celsius
    /// * `k` - Ratio of specific heat
    /// * `r` - Gas constant
    /// * `m` - Molar mass
    ///
    pub fn set_sound_speed_from_temp_with(&mut self, temp: f64, k: f64, r: f64, m: f64) {
        self.sound_speed = (k * r * (ABSOLUTE_ZERO_CELSIUS + temp) / m).sqrt() * METER;
    }
}

impl Deref for Device {
    type Target = [Transducer];

    fn deref(&self) -> &Self::Target {
        &self.transducers
    }
}

impl DerefMut for Device {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.transducers
    }
}

impl<'a> IntoIterator for &'a Device {
    type Item = &'a Transducer;
    type IntoIter = std::slice::Iter<'a, Transducer>;

    fn into_iter(self) -> Self::IntoIter {
        self.transducers.iter()
    }
}

impl<'a> IntoIterator for &'a mut Device {
    type Item = &'a mut Transducer;
    type IntoIter = std::slice::IterMut<'a, Transducer>;

    fn into_iter(self) -> Self::IntoIter {
        self.transducers.iter_mut()
    }
}

#[cfg(test)]
pub mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{
        defined::PI,
        geometry::{UnitQuaternion, Vector3},
    };

    macro_rules! assert_approx_eq_vec3 {
        ($a:expr, $b:expr) => {
            assert_abs_diff_eq!($a.x, $b.x, epsilon = 1e-3);
            assert_abs_diff_eq!($a.y, $b.y, epsilon = 1e-3);
            assert_abs_diff_eq!($a.z, $b.z, epsilon = 1e-3);
        };
    }

    pub fn create_device(idx: usize, n: usize) -> Device {
        Device::new(
            idx,
            (0..n)
                .map(|i| {
                    Transducer::new(
                        i,
                        idx,
                        idx * n + i,
                        Vector3::zeros(),
                        UnitQuaternion::identity(),
                    )
                })
                .collect(),
        )
    }

    fn create_grid_device(origin: Vector3, rot: UnitQuaternion) -> Device {
        Device::new(
            0,
            itertools::iproduct!((0..14), (0..18))
                .enumerate()
                .map(|(i, (y, x))| {
                    Transducer::new(
                        i,
                        0,
                        i,
                        origin + rot * (10.16 * Vector3::new(x as f64, y as f64, 0.)),
                        rot,
                    )
                })
                .collect(),
        )
    }

    #[rstest::rstest]
    #[test]
    #[case(0)]
    #[case(1)]
    fn idx(#[case] expect: usize) {
        assert_eq!(expect, create_device(expect, 249).idx());
    }

    #[rstest::rstest]
    #[test]
    #[case(1)]
    #[case(249)]
    fn num_transducers(#[case] n: usize) {
        assert_eq!(n, create_device(0, n).num_transducers());
    }

    #[test]
    fn center() {
        let device = create_grid_device(Vector3::zeros(), UnitQuaternion::identity());
        let expected = Vector3::new(10.16 * 17. / 2., 10.16 * 13. / 2., 0.);
        assert_approx_eq_vec3!(expected, device.center());
    }

    #[rstest::rstest]
    #[test]
    #[case(
        Vector3::new(10., 20., 30.),
        Vector3::new(10., 20., 30.),
        Vector3::zeros(),
        UnitQuaternion::identity()
    )]
    #[case(
        Vector3::zeros(),
        Vector3::new(10., 20., 30.),
        Vector3::new(10., 20., 30.),
        UnitQuaternion::identity()
    )]
    #[case(
        Vector3::new(20., -10., 30.),
        Vector3::new(10., 20., 30.),
        Vector3::zeros(),
        UnitQuaternion::from_axis_angle(&Vector3::z_axis(), PI / 2.)
    )]
    #[case(
        Vector3::new(30., 30., -30.),
        Vector3::new(40., 50., 60.),
        Vector3::new(10., 20., 30.),
        UnitQuaternion::from_axis_angle(&Vector3::x_axis(), PI / 2.)
    )]
    fn to_local(
        #[case] expected: Vector3,
        #[case] target: Vector3,
        #[case] origin: Vector3,
        #[case] quat: UnitQuaternion,
    ) {
        let device = create_grid_device(origin, quat);
        assert_approx_eq_vec3!(expected, device.to_local(&target));
    }

    #[rstest::rstest]
    #[test]
    #[case(340.29527186788846e3, 15.)]
    #[case(343.23498846612807e3, 20.)]
    #[case(349.0401521469255e3, 30.)]
    fn set_sound_speed_from_temp(#[case] expected: f64, #[case] temp: f64) {
        let mut device = create_device(0, 249);
        device.set_sound_speed_from_temp(temp);
        assert_abs_diff_eq!(expected, device.sound_speed, epsilon = 1e-3);
    }

    #[test]
    fn get() {
        let device = create_device(0, 249);
        assert!(device.get(248).is_ok());
        assert_eq!(
            Some(AUPAInternalError::TransducerIndexOutOfRange(249, 249)),
            device.get(249).err()
        );
    }

    #[test]
    fn defaults() {
        let device = create_device(0, 1);
        assert!(device.enable);
        assert!(!device.force_fan);
        assert!(!device.reads_fpga_info);
        assert_eq!(DEFAULT_SOUND_SPEED, device.sound_speed);
        assert_eq!(0., device.attenuation);
    }
}

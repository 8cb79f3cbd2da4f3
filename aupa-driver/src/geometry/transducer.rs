use getset::CopyGetters;

use super::{Quaternion, UnitQuaternion, Vector3};
use crate::{
    common::Phase,
    defined::PI,
    error::AUPAInternalError,
    fpga::{CYCLE_MIN, DEFAULT_CYCLE, FPGA_CLK_FREQ, MAX_CYCLE},
};

#[derive(Clone, Debug, PartialEq, CopyGetters)]
pub struct Transducer {
    /// Local index in the device
    #[getset(get_copy = "pub")]
    idx: usize,
    #[getset(get_copy = "pub")]
    dev_idx: usize,
    /// Index in the whole geometry
    #[getset(get_copy = "pub")]
    global_idx: usize,
    pos: Vector3,
    rot: UnitQuaternion,
    /// Ultrasound period in FPGA clock counts
    #[getset(get_copy = "pub")]
    cycle: u16,
    /// Modulation delay in modulation samples
    #[getset(get_copy = "pub")]
    mod_delay: u16,
}

impl Transducer {
    pub(crate) const fn new(
        idx: usize,
        dev_idx: usize,
        global_idx: usize,
        pos: Vector3,
        rot: UnitQuaternion,
    ) -> Self {
        Self {
            idx,
            dev_idx,
            global_idx,
            pos,
            rot,
            cycle: DEFAULT_CYCLE,
            mod_delay: 0,
        }
    }

    /// Calculate the phase of the transducer to align the phase at the specified position
    pub fn align_phase_at(&self, pos: Vector3, sound_speed: f64) -> Phase {
        Phase::from_rad((pos - self.position()).norm() * self.wavenumber(sound_speed))
    }

    pub const fn position(&self) -> &Vector3 {
        &self.pos
    }

    pub const fn rotation(&self) -> &UnitQuaternion {
        &self.rot
    }

    fn get_direction(dir: Vector3, rotation: &UnitQuaternion) -> Vector3 {
        let dir: UnitQuaternion = UnitQuaternion::from_quaternion(Quaternion::from_imag(dir));
        (rotation * dir * rotation.conjugate()).imag().normalize()
    }

    pub fn x_direction(&self) -> Vector3 {
        Self::get_direction(Vector3::x(), self.rotation())
    }

    pub fn y_direction(&self) -> Vector3 {
        Self::get_direction(Vector3::y(), self.rotation())
    }

    pub fn z_direction(&self) -> Vector3 {
        Self::get_direction(Vector3::z(), self.rotation())
    }

    /// Set the ultrasound period
    ///
    /// # Arguments
    ///
    /// * `cycle` - Period in FPGA clock counts, must be in `[2048, 8191]`
    ///
    pub fn set_cycle(&mut self, cycle: u16) -> Result<(), AUPAInternalError> {
        if !(CYCLE_MIN..=MAX_CYCLE).contains(&cycle) {
            return Err(AUPAInternalError::CycleOutOfRange(cycle));
        }
        self.cycle = cycle;
        Ok(())
    }

    pub fn set_mod_delay(&mut self, delay: u16) {
        self.mod_delay = delay;
    }

    /// Ultrasound frequency in Hz
    pub fn frequency(&self) -> f64 {
        FPGA_CLK_FREQ as f64 / self.cycle as f64
    }

    pub fn wavelength(&self, sound_speed: f64) -> f64 {
        sound_speed / self.frequency()
    }

    pub fn wavenumber(&self, sound_speed: f64) -> f64 {
        2.0 * PI * self.frequency() / sound_speed
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::defined::ULTRASOUND_FREQUENCY;

    macro_rules! assert_vec3_approx_eq {
        ($a:expr, $b:expr) => {
            assert_abs_diff_eq!($a.x, $b.x, epsilon = 1e-3);
            assert_abs_diff_eq!($a.y, $b.y, epsilon = 1e-3);
            assert_abs_diff_eq!($a.z, $b.z, epsilon = 1e-3);
        };
    }

    fn create_transducer() -> Transducer {
        Transducer::new(0, 0, 0, Vector3::zeros(), UnitQuaternion::identity())
    }

    #[rstest::rstest]
    #[test]
    #[case(0, 1, 249)]
    #[case(248, 2, 746)]
    fn indices(#[case] idx: usize, #[case] dev_idx: usize, #[case] global_idx: usize) {
        let tr = Transducer::new(
            idx,
            dev_idx,
            global_idx,
            Vector3::zeros(),
            UnitQuaternion::identity(),
        );
        assert_eq!(idx, tr.idx());
        assert_eq!(dev_idx, tr.dev_idx());
        assert_eq!(global_idx, tr.global_idx());
    }

    #[test]
    fn directions() {
        let tr = Transducer::new(
            0,
            0,
            0,
            Vector3::zeros(),
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), PI / 2.),
        );
        assert_vec3_approx_eq!(Vector3::new(0., 1., 0.), tr.x_direction());
        assert_vec3_approx_eq!(Vector3::new(-1., 0., 0.), tr.y_direction());
        assert_vec3_approx_eq!(Vector3::new(0., 0., 1.), tr.z_direction());
    }

    #[rstest::rstest]
    #[test]
    #[case(Ok(()), 2048)]
    #[case(Ok(()), 8191)]
    #[case(Err(AUPAInternalError::CycleOutOfRange(2047)), 2047)]
    #[case(Err(AUPAInternalError::CycleOutOfRange(8192)), 8192)]
    fn set_cycle(#[case] expected: Result<(), AUPAInternalError>, #[case] cycle: u16) {
        let mut tr = create_transducer();
        assert_eq!(expected, tr.set_cycle(cycle));
        if expected.is_ok() {
            assert_eq!(cycle, tr.cycle());
        } else {
            assert_eq!(DEFAULT_CYCLE, tr.cycle());
        }
    }

    #[test]
    fn frequency() -> anyhow::Result<()> {
        let mut tr = create_transducer();
        assert_eq!(ULTRASOUND_FREQUENCY, tr.frequency());
        tr.set_cycle(8000)?;
        assert_eq!(20480., tr.frequency());
        Ok(())
    }

    #[rstest::rstest]
    #[test]
    #[case(340e3)]
    #[case(400e3)]
    fn wavelength(#[case] c: f64) {
        let tr = create_transducer();
        assert_abs_diff_eq!(c / ULTRASOUND_FREQUENCY, tr.wavelength(c));
    }

    #[rstest::rstest]
    #[test]
    #[case(340e3)]
    #[case(400e3)]
    fn wavenumber(#[case] c: f64) {
        let tr = create_transducer();
        assert_abs_diff_eq!(2. * PI * ULTRASOUND_FREQUENCY / c, tr.wavenumber(c));
    }

    #[test]
    fn align_phase_at() {
        let tr = create_transducer();
        let c = 340e3;
        let p = Vector3::new(0., 0., 150.);
        assert_abs_diff_eq!(150. * tr.wavenumber(c), tr.align_phase_at(p, c).radian());
    }

    #[test]
    fn mod_delay() {
        let mut tr = create_transducer();
        assert_eq!(0, tr.mod_delay());
        tr.set_mod_delay(3);
        assert_eq!(3, tr.mod_delay());
    }
}

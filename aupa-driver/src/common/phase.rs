use crate::defined::PI;

pub struct Rad;

/// Phase of ultrasound in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Phase {
    value: f64,
}

impl Phase {
    pub const ZERO: Self = Self { value: 0.0 };

    pub const fn from_rad(value: f64) -> Self {
        Self { value }
    }

    pub const fn radian(&self) -> f64 {
        self.value
    }

    /// 8-bit wire form used in Legacy mode
    pub fn to_legacy(&self) -> u8 {
        ((self.value / (2.0 * PI) * 256.0).round() as i64 & 0xFF) as u8
    }

    pub fn from_legacy(value: u8) -> Self {
        Self::from_rad(value as f64 / 256.0 * 2.0 * PI)
    }

    /// Wire form in cycle resolution used in Advanced modes
    pub fn to_advanced(&self, cycle: u16) -> u16 {
        (self.value / (2.0 * PI) * cycle as f64)
            .round()
            .rem_euclid(cycle as f64) as u16
    }

    pub fn from_advanced(value: u16, cycle: u16) -> Self {
        Self::from_rad(value as f64 / cycle as f64 * 2.0 * PI)
    }
}

impl std::ops::Mul<Rad> for f64 {
    type Output = Phase;

    fn mul(self, _rhs: Rad) -> Self::Output {
        Self::Output::from_rad(self)
    }
}

impl std::ops::Add<Phase> for Phase {
    type Output = Phase;

    fn add(self, rhs: Phase) -> Self::Output {
        Self::Output::from_rad(self.value + rhs.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[test]
    #[case(0, 0.)]
    #[case(128, PI)]
    #[case(255, PI * 510.0 / 256.0)]
    #[case(0, 2. * PI)]
    #[case(192, -PI / 2.)]
    fn to_legacy(#[case] expected: u8, #[case] rad: f64) {
        assert_eq!(expected, Phase::from_rad(rad).to_legacy());
    }

    #[rstest::rstest]
    #[test]
    #[case(0, 0., 4096)]
    #[case(2048, PI, 4096)]
    #[case(0, 2. * PI, 4096)]
    #[case(3072, -PI / 2., 4096)]
    #[case(1000, PI, 2000)]
    fn to_advanced(#[case] expected: u16, #[case] rad: f64, #[case] cycle: u16) {
        assert_eq!(expected, Phase::from_rad(rad).to_advanced(cycle));
    }

    #[test]
    fn legacy_roundtrip() {
        (0..=255u8).for_each(|v| assert_eq!(v, Phase::from_legacy(v).to_legacy()));
    }

    #[test]
    fn mul_rad() {
        assert_eq!(Phase::from_rad(PI), PI * Rad);
        assert_eq!(Phase::from_rad(1.5), Phase::from_rad(1.0) + Phase::from_rad(0.5));
    }
}

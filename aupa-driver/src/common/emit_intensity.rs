use crate::{defined::PI, error::AUPAInternalError};

const DUTY_DENOMINATOR: f64 = 510.0;

/// Emission intensity as an 8-bit duty code
///
/// The duty ratio of a code `d` is `d / 510`, so `EmitIntensity::MAX` is a 50% duty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct EmitIntensity {
    value: u8,
}

impl EmitIntensity {
    pub const MAX: Self = Self { value: 255 };
    pub const MIN: Self = Self { value: 0 };

    pub const fn new(value: u8) -> Self {
        Self { value }
    }

    pub const fn value(&self) -> u8 {
        self.value
    }

    pub fn from_normalized(amp: f64) -> Result<Self, AUPAInternalError> {
        if !(0.0..=1.0).contains(&amp) {
            return Err(AUPAInternalError::AmplitudeOutOfRange(amp));
        }
        Ok(Self::new(
            (amp.asin() * DUTY_DENOMINATOR / PI).round().clamp(0., 255.) as u8,
        ))
    }

    /// Normalized amplitude `sin(pi * d / 510)`
    pub fn normalized(&self) -> f64 {
        (PI * self.value as f64 / DUTY_DENOMINATOR).sin()
    }

    pub fn from_duty_ratio(ratio: f64) -> Result<Self, AUPAInternalError> {
        if !(0.0..=0.5).contains(&ratio) {
            return Err(AUPAInternalError::DutyRatioOutOfRange(ratio));
        }
        Ok(Self::new((ratio * DUTY_DENOMINATOR).round() as u8))
    }

    pub fn duty_ratio(&self) -> f64 {
        self.value as f64 / DUTY_DENOMINATOR
    }

    pub fn from_pulse_width(pulse_width: u16, cycle: u16) -> Result<Self, AUPAInternalError> {
        let value = (pulse_width as f64 * DUTY_DENOMINATOR / cycle as f64).round();
        if cycle == 0 || value > 255. {
            return Err(AUPAInternalError::PulseWidthOutOfRange(pulse_width, cycle));
        }
        Ok(Self::new(value as u8))
    }

    /// Pulse width in FPGA clock counts for the given cycle
    pub fn pulse_width(&self, cycle: u16) -> u16 {
        (self.value as f64 * cycle as f64 / DUTY_DENOMINATOR).round() as u16
    }
}

impl From<u8> for EmitIntensity {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::fpga::{CYCLE_MIN, DEFAULT_CYCLE, MAX_CYCLE};

    #[test]
    fn normalized_roundtrip() -> anyhow::Result<()> {
        for v in 0..=255u8 {
            let intensity = EmitIntensity::new(v);
            assert_eq!(intensity, EmitIntensity::from_normalized(intensity.normalized())?);
        }
        Ok(())
    }

    #[test]
    fn duty_ratio_roundtrip() -> anyhow::Result<()> {
        for v in 0..=255u8 {
            let intensity = EmitIntensity::new(v);
            assert_eq!(intensity, EmitIntensity::from_duty_ratio(intensity.duty_ratio())?);
        }
        Ok(())
    }

    #[rstest::rstest]
    #[test]
    #[case(DEFAULT_CYCLE)]
    #[case(CYCLE_MIN)]
    #[case(MAX_CYCLE)]
    #[case(510)]
    fn pulse_width_roundtrip(#[case] cycle: u16) -> anyhow::Result<()> {
        for v in 0..=255u8 {
            let intensity = EmitIntensity::new(v);
            assert_eq!(
                intensity,
                EmitIntensity::from_pulse_width(intensity.pulse_width(cycle), cycle)?
            );
        }
        Ok(())
    }

    #[test]
    fn max_is_half_duty() {
        assert_abs_diff_eq!(1.0, EmitIntensity::MAX.normalized());
        assert_abs_diff_eq!(0.5, EmitIntensity::MAX.duty_ratio());
        assert_eq!(2048, EmitIntensity::MAX.pulse_width(DEFAULT_CYCLE));
    }

    #[rstest::rstest]
    #[test]
    #[case(Err(AUPAInternalError::AmplitudeOutOfRange(-0.1)), -0.1)]
    #[case(Err(AUPAInternalError::AmplitudeOutOfRange(1.1)), 1.1)]
    #[case(Ok(EmitIntensity::MAX), 1.0)]
    #[case(Ok(EmitIntensity::MIN), 0.0)]
    fn from_normalized(
        #[case] expected: Result<EmitIntensity, AUPAInternalError>,
        #[case] amp: f64,
    ) {
        assert_eq!(expected, EmitIntensity::from_normalized(amp));
    }

    #[test]
    fn from_pulse_width_out_of_range() {
        assert_eq!(
            Err(AUPAInternalError::PulseWidthOutOfRange(4096, 4096)),
            EmitIntensity::from_pulse_width(4096, 4096)
        );
    }
}

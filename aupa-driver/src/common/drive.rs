use super::{EmitIntensity, Phase};

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Drive {
    /// Phase of ultrasound
    pub phase: Phase,
    /// Emission intensity
    pub intensity: EmitIntensity,
}

impl Drive {
    pub const fn new(phase: Phase, intensity: EmitIntensity) -> Self {
        Self { phase, intensity }
    }

    pub const fn null() -> Self {
        Self {
            phase: Phase::ZERO,
            intensity: EmitIntensity::MIN,
        }
    }
}

#[cfg(test)]
impl Drive {
    pub fn random() -> Self {
        use rand::Rng;
        let mut rng = rand::rng();
        Self {
            phase: Phase::from_legacy(rng.random()),
            intensity: EmitIntensity::new(rng.random()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null() {
        let d = Drive::null();
        assert_eq!(0., d.phase.radian());
        assert_eq!(EmitIntensity::MIN, d.intensity);
        assert_eq!(Drive::default(), d);
    }
}

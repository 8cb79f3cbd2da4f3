mod focus;
mod gain;

pub use focus::*;
pub use gain::*;

/// Encoding of the gain data sent by GainSTM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GainSTMMode {
    #[default]
    PhaseDutyFull,
    PhaseFull,
    /// 4-bit phase, Legacy mode only
    PhaseHalf,
}

impl GainSTMMode {
    pub(crate) const fn wire_value(&self) -> u16 {
        match self {
            GainSTMMode::PhaseDutyFull => 0x0001,
            GainSTMMode::PhaseFull => 0x0002,
            GainSTMMode::PhaseHalf => 0x0004,
        }
    }
}

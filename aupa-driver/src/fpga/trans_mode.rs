use super::{GAIN_STM_BUF_SIZE_MAX, GAIN_STM_LEGACY_BUF_SIZE_MAX};

/// Transducer drive mode
///
/// * `Legacy` - 8-bit phase and duty, fixed 40 kHz cycle
/// * `Advanced` - phase and duty in cycle resolution, sent as separate frames
/// * `AdvancedPhase` - phase only in cycle resolution; duty is set with `Amplitudes`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
pub enum TransMode {
    #[default]
    Legacy,
    Advanced,
    AdvancedPhase,
}

impl TransMode {
    pub const fn is_legacy(&self) -> bool {
        matches!(self, TransMode::Legacy)
    }

    pub const fn gain_stm_buf_size_max(&self) -> usize {
        match self {
            TransMode::Legacy => GAIN_STM_LEGACY_BUF_SIZE_MAX,
            TransMode::Advanced | TransMode::AdvancedPhase => GAIN_STM_BUF_SIZE_MAX,
        }
    }
}

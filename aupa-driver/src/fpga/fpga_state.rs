const THERMAL_ASSERT_BIT: u8 = 1 << 0;
const LEGACY_MODE_BIT: u8 = 1 << 1;
const STM_MODE_BIT: u8 = 1 << 2;
const STM_GAIN_MODE_BIT: u8 = 1 << 3;

/// FPGA state reported in the acknowledgment byte
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FPGAState {
    pub(crate) state: u8,
}

impl FPGAState {
    #[doc(hidden)]
    pub const fn new(state: u8) -> Self {
        Self { state }
    }

    /// Check if thermal sensor is asserted
    pub const fn is_thermal_assert(&self) -> bool {
        (self.state & THERMAL_ASSERT_BIT) != 0
    }

    pub const fn is_legacy_mode(&self) -> bool {
        (self.state & LEGACY_MODE_BIT) != 0
    }

    pub const fn is_stm_mode(&self) -> bool {
        (self.state & STM_MODE_BIT) != 0
    }

    pub const fn is_stm_gain_mode(&self) -> bool {
        self.is_stm_mode() && (self.state & STM_GAIN_MODE_BIT) != 0
    }

    pub const fn state(&self) -> u8 {
        self.state
    }
}

impl std::fmt::Debug for FPGAState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FPGAState")
            .field("is_thermal_assert", &self.is_thermal_assert())
            .field("is_legacy_mode", &self.is_legacy_mode())
            .field("is_stm_mode", &self.is_stm_mode())
            .field("is_stm_gain_mode", &self.is_stm_gain_mode())
            .finish()
    }
}

impl std::fmt::Display for FPGAState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Thermal assert = {}",
            if self.is_thermal_assert() { "ON" } else { "OFF" }
        )
    }
}

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

mod fpga_state;
mod trans_mode;

pub use fpga_state::FPGAState;
pub use trans_mode::TransMode;

pub const FPGA_CLK_FREQ: usize = 163_840_000;

pub const DEFAULT_CYCLE: u16 = 4096;
pub const CYCLE_MIN: u16 = 2048;
pub const MAX_CYCLE: u16 = 8191;

pub const MOD_BUF_SIZE_MAX: usize = 65536;
pub const MOD_SAMPLING_FREQ_DIV_MIN: u32 = 1160;
pub const DEFAULT_MOD_SAMPLING_FREQ_DIV: u32 = 40960;

pub const STM_SAMPLING_FREQ_DIV_MIN: u32 = 1612;
pub const FOCUS_STM_BUF_SIZE_MAX: usize = 65536;
pub const GAIN_STM_BUF_SIZE_MAX: usize = 1024;
pub const GAIN_STM_LEGACY_BUF_SIZE_MAX: usize = 2048;

pub const SILENCER_CYCLE_MIN: u16 = 1044;
pub const DEFAULT_SILENCER_CYCLE: u16 = 4096;
pub const DEFAULT_SILENCER_STEP: u16 = 10;

/// Unit of the fixed-point focus coordinates in mm
pub const FOCUS_STM_FIXED_NUM_UNIT: f64 = 0.025;
pub const FOCUS_STM_FIXED_NUM_WIDTH: u32 = 18;
pub const FOCUS_STM_FIXED_NUM_UPPER: i32 = (1 << (FOCUS_STM_FIXED_NUM_WIDTH - 1)) - 1;
pub const FOCUS_STM_FIXED_NUM_LOWER: i32 = -(1 << (FOCUS_STM_FIXED_NUM_WIDTH - 1));
pub const FOCUS_STM_DUTY_SHIFT_MAX: u8 = 0x0F;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Default, IntoBytes, FromBytes, KnownLayout, Immutable,
)]
#[repr(C)]
pub struct FPGAControlFlags(u8);

bitflags::bitflags! {
    impl FPGAControlFlags: u8 {
        const NONE               = 0;
        const LEGACY_MODE        = 1 << 0;
        const USE_STM_START_IDX  = 1 << 2;
        const USE_STM_FINISH_IDX = 1 << 3;
        const FORCE_FAN          = 1 << 4;
        const STM_MODE           = 1 << 5;
        const STM_GAIN_MODE      = 1 << 6;
        const READS_FPGA_INFO    = 1 << 7;
    }
}

impl std::fmt::Display for FPGAControlFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "NONE");
        }
        let flags = self.iter_names().map(|(name, _)| name).collect::<Vec<_>>();
        write!(f, "{}", flags.join(" | "))
    }
}

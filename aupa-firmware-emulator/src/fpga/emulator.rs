use aupa_driver::{
    fpga::{
        FPGAControlFlags, DEFAULT_CYCLE, DEFAULT_MOD_SAMPLING_FREQ_DIV, DEFAULT_SILENCER_CYCLE,
        DEFAULT_SILENCER_STEP, FOCUS_STM_FIXED_NUM_UNIT,
    },
    geometry::Vector3,
};

const THERMAL_ASSERT_BIT: u8 = 1 << 0;
const LEGACY_MODE_BIT: u8 = 1 << 1;
const STM_MODE_BIT: u8 = 1 << 2;
const STM_GAIN_MODE_BIT: u8 = 1 << 3;

/// Emulated FPGA memory of one device
///
/// Phases and duties are stored as received: 8-bit codes in Legacy mode,
/// cycle counts in Advanced modes.
pub struct FPGAEmulator {
    num_transducers: usize,
    flags: FPGAControlFlags,
    thermal: bool,
    pub(crate) cycles: Vec<u16>,
    pub(crate) mod_delays: Vec<u16>,
    pub(crate) modulation: Vec<u8>,
    pub(crate) mod_freq_div: u32,
    pub(crate) silencer_cycle: u16,
    pub(crate) silencer_step: u16,
    pub(crate) phases: Vec<u16>,
    pub(crate) duties: Vec<u16>,
    pub(crate) stm_freq_div: u32,
    pub(crate) stm_size: usize,
    pub(crate) stm_start_idx: u16,
    pub(crate) stm_finish_idx: u16,
    pub(crate) sound_speed: u32,
    pub(crate) focus_stm: Vec<u64>,
    pub(crate) gain_stm_phases: Vec<Vec<u16>>,
    pub(crate) gain_stm_duties: Vec<Vec<u16>>,
}

impl FPGAEmulator {
    pub(crate) fn new(num_transducers: usize) -> Self {
        let mut fpga = Self {
            num_transducers,
            flags: FPGAControlFlags::NONE,
            thermal: false,
            cycles: Vec::new(),
            mod_delays: Vec::new(),
            modulation: Vec::new(),
            mod_freq_div: 0,
            silencer_cycle: 0,
            silencer_step: 0,
            phases: Vec::new(),
            duties: Vec::new(),
            stm_freq_div: 0,
            stm_size: 0,
            stm_start_idx: 0,
            stm_finish_idx: 0,
            sound_speed: 0,
            focus_stm: Vec::new(),
            gain_stm_phases: Vec::new(),
            gain_stm_duties: Vec::new(),
        };
        fpga.init();
        fpga
    }

    pub(crate) fn init(&mut self) {
        let n = self.num_transducers;
        self.flags = FPGAControlFlags::NONE;
        self.cycles = vec![DEFAULT_CYCLE; n];
        self.mod_delays = vec![0; n];
        self.modulation = vec![0xFF; 2];
        self.mod_freq_div = DEFAULT_MOD_SAMPLING_FREQ_DIV;
        self.silencer_cycle = DEFAULT_SILENCER_CYCLE;
        self.silencer_step = DEFAULT_SILENCER_STEP;
        self.phases = vec![0; n];
        self.duties = vec![0; n];
        self.stm_freq_div = 0;
        self.stm_size = 0;
        self.stm_start_idx = 0;
        self.stm_finish_idx = 0;
        self.sound_speed = 0;
        self.focus_stm.clear();
        self.gain_stm_phases.clear();
        self.gain_stm_duties.clear();
    }

    pub(crate) fn set_ctl_flags(&mut self, flags: FPGAControlFlags) {
        self.flags = flags;
    }

    pub fn num_transducers(&self) -> usize {
        self.num_transducers
    }

    pub fn assert_thermal_sensor(&mut self) {
        self.thermal = true;
    }

    pub fn deassert_thermal_sensor(&mut self) {
        self.thermal = false;
    }

    /// State byte reported in the acknowledgment
    pub fn fpga_state(&self) -> u8 {
        let mut state = 0;
        if self.thermal {
            state |= THERMAL_ASSERT_BIT;
        }
        if self.is_legacy_mode() {
            state |= LEGACY_MODE_BIT;
        }
        if self.is_stm_mode() {
            state |= STM_MODE_BIT;
        }
        if self.is_stm_gain_mode() {
            state |= STM_GAIN_MODE_BIT;
        }
        state
    }

    pub fn is_legacy_mode(&self) -> bool {
        self.flags.contains(FPGAControlFlags::LEGACY_MODE)
    }

    pub fn is_force_fan(&self) -> bool {
        self.flags.contains(FPGAControlFlags::FORCE_FAN)
    }

    pub fn is_stm_mode(&self) -> bool {
        self.flags.contains(FPGAControlFlags::STM_MODE)
    }

    pub fn is_stm_gain_mode(&self) -> bool {
        self.is_stm_mode() && self.flags.contains(FPGAControlFlags::STM_GAIN_MODE)
    }

    pub fn cycles(&self) -> &[u16] {
        &self.cycles
    }

    pub fn mod_delays(&self) -> &[u16] {
        &self.mod_delays
    }

    /// Modulation data as 8-bit intensity codes
    pub fn modulation(&self) -> &[u8] {
        &self.modulation
    }

    pub fn modulation_frequency_division(&self) -> u32 {
        self.mod_freq_div
    }

    pub fn silencer_cycle(&self) -> u16 {
        self.silencer_cycle
    }

    pub fn silencer_step(&self) -> u16 {
        self.silencer_step
    }

    pub fn phases(&self) -> &[u16] {
        &self.phases
    }

    pub fn duties(&self) -> &[u16] {
        &self.duties
    }

    pub fn stm_frequency_division(&self) -> u32 {
        self.stm_freq_div
    }

    /// Number of STM entries announced by the first frame
    pub fn stm_size(&self) -> usize {
        self.stm_size
    }

    pub fn stm_start_idx(&self) -> Option<u16> {
        self.flags
            .contains(FPGAControlFlags::USE_STM_START_IDX)
            .then_some(self.stm_start_idx)
    }

    pub fn stm_finish_idx(&self) -> Option<u16> {
        self.flags
            .contains(FPGAControlFlags::USE_STM_FINISH_IDX)
            .then_some(self.stm_finish_idx)
    }

    /// Sound speed sent with FocusSTM in mm/s
    pub fn sound_speed(&self) -> f64 {
        self.sound_speed as f64 / 1024.0 * 1000.0
    }

    /// FocusSTM points in the device frame with their duty shift
    pub fn focus_stm_points(&self) -> Vec<(Vector3, u8)> {
        let decode = |v: u64| ((((v & 0x3FFFF) << 14) as u32 as i32) >> 14) as f64 * FOCUS_STM_FIXED_NUM_UNIT;
        self.focus_stm
            .iter()
            .map(|&p| {
                (
                    Vector3::new(decode(p), decode(p >> 18), decode(p >> 36)),
                    ((p >> 54) & 0x0F) as u8,
                )
            })
            .collect()
    }

    pub fn gain_stm_phases(&self, idx: usize) -> Option<&[u16]> {
        self.gain_stm_phases.get(idx).map(Vec::as_slice)
    }

    pub fn gain_stm_duties(&self, idx: usize) -> Option<&[u16]> {
        self.gain_stm_duties.get(idx).map(Vec::as_slice)
    }

    pub fn gain_stm_len(&self) -> usize {
        self.gain_stm_phases.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init() {
        let fpga = FPGAEmulator::new(249);
        assert_eq!(249, fpga.num_transducers());
        assert!(fpga.cycles().iter().all(|&c| c == 4096));
        assert!(fpga.mod_delays().iter().all(|&d| d == 0));
        assert_eq!(&[0xFF, 0xFF], fpga.modulation());
        assert_eq!(40960, fpga.modulation_frequency_division());
        assert_eq!(4096, fpga.silencer_cycle());
        assert_eq!(10, fpga.silencer_step());
        assert!(!fpga.is_stm_mode());
        assert_eq!(None, fpga.stm_start_idx());
    }

    #[test]
    fn fpga_state() {
        let mut fpga = FPGAEmulator::new(1);
        assert_eq!(0, fpga.fpga_state());

        fpga.assert_thermal_sensor();
        fpga.set_ctl_flags(
            FPGAControlFlags::LEGACY_MODE
                | FPGAControlFlags::STM_MODE
                | FPGAControlFlags::STM_GAIN_MODE,
        );
        assert_eq!(0x0F, fpga.fpga_state());

        fpga.deassert_thermal_sensor();
        fpga.set_ctl_flags(FPGAControlFlags::STM_GAIN_MODE);
        assert_eq!(0, fpga.fpga_state());
    }
}

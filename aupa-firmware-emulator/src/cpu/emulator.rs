use aupa_driver::{
    cpu::{
        CPUControlFlags, RxMessage, TxDatagram, TxMessage, MSG_CLEAR, MSG_RD_CPU_VERSION,
        MSG_RD_CPU_VERSION_MINOR, MSG_RD_FPGA_FUNCTION, MSG_RD_FPGA_VERSION,
        MSG_RD_FPGA_VERSION_MINOR,
    },
    firmware_version::FirmwareInfo,
    fpga::FPGAControlFlags,
};

use super::{CPU_VERSION_MAJOR, CPU_VERSION_MINOR, FPGA_VERSION_MAJOR, FPGA_VERSION_MINOR};
use crate::fpga::FPGAEmulator;

/// Emulator of the firmware running on the CPU board of one device
pub struct CPUEmulator {
    pub(crate) idx: usize,
    pub(crate) ack: u8,
    pub(crate) msg_id: u8,
    pub(crate) reads_fpga_info: bool,
    pub(crate) mod_cycle: usize,
    pub(crate) stm_cycle: usize,
    pub(crate) gain_stm_mode: u16,
    pub(crate) fpga: FPGAEmulator,
    pub(crate) synchronized: bool,
    pub(crate) num_transducers: usize,
    pub(crate) broken: bool,
}

impl CPUEmulator {
    pub fn new(idx: usize, num_transducers: usize) -> Self {
        let mut s = Self {
            idx,
            ack: 0x00,
            msg_id: 0xFF,
            reads_fpga_info: false,
            mod_cycle: 0,
            stm_cycle: 0,
            gain_stm_mode: 0,
            fpga: FPGAEmulator::new(num_transducers),
            synchronized: false,
            num_transducers,
            broken: false,
        };
        s.init();
        s
    }

    /// Stop processing frames; the last acknowledgment stays as it is
    pub fn break_down(&mut self) {
        self.broken = true;
    }

    pub fn repair(&mut self) {
        self.broken = false;
    }

    pub const fn is_broken(&self) -> bool {
        self.broken
    }

    pub const fn idx(&self) -> usize {
        self.idx
    }

    pub const fn num_transducers(&self) -> usize {
        self.num_transducers
    }

    pub const fn msg_id(&self) -> u8 {
        self.msg_id
    }

    pub const fn ack(&self) -> u8 {
        self.ack
    }

    pub const fn synchronized(&self) -> bool {
        self.synchronized
    }

    pub const fn reads_fpga_info(&self) -> bool {
        self.reads_fpga_info
    }

    pub const fn fpga(&self) -> &FPGAEmulator {
        &self.fpga
    }

    pub fn fpga_mut(&mut self) -> &mut FPGAEmulator {
        &mut self.fpga
    }

    pub const fn rx(&self) -> RxMessage {
        RxMessage::new(self.ack, self.msg_id)
    }

    /// Process the frame addressed to this device
    pub fn send(&mut self, tx: &TxDatagram) {
        if self.broken {
            return;
        }
        if let Some(msg) = tx.get(self.idx) {
            self.ecat_recv(msg);
        }
    }

    pub fn init(&mut self) {
        self.fpga.init();
        self.clear();
    }

    /// Refresh the acknowledgment with the current FPGA state
    pub fn update(&mut self) {
        if self.reads_fpga_info {
            self.ack = self.fpga.fpga_state();
        }
    }

    pub(crate) fn clear(&mut self) {
        self.reads_fpga_info = false;
        self.synchronized = false;
        self.mod_cycle = 0;
        self.stm_cycle = 0;
        self.gain_stm_mode = 0;
        self.fpga.init();
    }

    fn read_info(&mut self, msg_id: u8) -> u8 {
        match msg_id {
            MSG_RD_CPU_VERSION => CPU_VERSION_MAJOR,
            MSG_RD_CPU_VERSION_MINOR => CPU_VERSION_MINOR,
            MSG_RD_FPGA_VERSION => FPGA_VERSION_MAJOR,
            MSG_RD_FPGA_VERSION_MINOR => FPGA_VERSION_MINOR,
            MSG_RD_FPGA_FUNCTION => FirmwareInfo::ENABLED_EMULATOR_BIT,
            _ => 0x00,
        }
    }

    fn ecat_recv(&mut self, msg: &TxMessage) {
        let header = &msg.header;
        if self.msg_id == header.msg_id {
            return;
        }
        self.msg_id = header.msg_id;

        match header.msg_id {
            MSG_CLEAR => {
                self.clear();
                self.ack = 0x00;
                return;
            }
            MSG_RD_CPU_VERSION
            | MSG_RD_CPU_VERSION_MINOR
            | MSG_RD_FPGA_VERSION
            | MSG_RD_FPGA_VERSION_MINOR
            | MSG_RD_FPGA_FUNCTION => {
                self.ack = self.read_info(header.msg_id);
                return;
            }
            _ => {}
        }

        self.reads_fpga_info = header
            .fpga_flag
            .contains(FPGAControlFlags::READS_FPGA_INFO);
        self.fpga.set_ctl_flags(header.fpga_flag);

        if header.cpu_flag.contains(CPUControlFlags::MOD) {
            self.write_mod(msg);
        } else if header.cpu_flag.contains(CPUControlFlags::CONFIG_SILENCER) {
            self.config_silencer(msg);
        } else if header.cpu_flag.contains(CPUControlFlags::CONFIG_SYNC) {
            self.synchronize(msg);
        }

        if header.cpu_flag.contains(CPUControlFlags::MOD_DELAY) {
            self.write_mod_delay(msg);
        }

        if header.cpu_flag.contains(CPUControlFlags::WRITE_BODY) {
            if !header.fpga_flag.contains(FPGAControlFlags::STM_MODE) {
                self.write_gain(msg);
            } else if header.fpga_flag.contains(FPGAControlFlags::STM_GAIN_MODE) {
                self.write_gain_stm(msg);
            } else {
                self.write_focus_stm(msg);
            }
        }

        self.ack = if self.reads_fpga_info {
            self.fpga.fpga_state()
        } else {
            0x00
        };
    }
}

#[cfg(test)]
mod tests {
    use aupa_driver::{cpu::MSG_BEGIN, fpga::FPGAState};
    use rand::Rng;

    use super::*;

    #[test]
    fn cpu_idx() {
        let mut rng = rand::rng();
        let idx: u16 = rng.random();
        let cpu = CPUEmulator::new(idx as _, 249);
        assert_eq!(idx as usize, cpu.idx());
        assert_eq!(249, cpu.num_transducers());
    }

    #[test]
    fn send_acknowledges() {
        let mut cpu = CPUEmulator::new(1, 249);
        let mut tx = TxDatagram::new(2);
        tx[1].header.msg_id = MSG_BEGIN;

        cpu.send(&tx);
        assert_eq!(RxMessage::new(0x00, MSG_BEGIN), cpu.rx());
    }

    #[test]
    fn broken_does_not_acknowledge() {
        let mut cpu = CPUEmulator::new(0, 249);
        let mut tx = TxDatagram::new(1);
        tx[0].header.msg_id = MSG_BEGIN;

        cpu.break_down();
        assert!(cpu.is_broken());
        cpu.send(&tx);
        assert_ne!(MSG_BEGIN, cpu.rx().msg_id());

        cpu.repair();
        cpu.send(&tx);
        assert_eq!(MSG_BEGIN, cpu.rx().msg_id());
    }

    #[test]
    fn skip_same_msg_id() {
        let mut cpu = CPUEmulator::new(0, 249);
        let mut tx = TxDatagram::new(1);
        tx[0].header.msg_id = MSG_BEGIN;
        tx[0].header.cpu_flag = CPUControlFlags::WRITE_BODY;
        tx[0].header.fpga_flag = FPGAControlFlags::LEGACY_MODE;
        tx[0].body[0] = 0xFF01;
        cpu.send(&tx);
        assert_eq!(0x01, cpu.fpga().phases()[0]);

        tx[0].body[0] = 0xFF02;
        cpu.send(&tx);
        assert_eq!(0x01, cpu.fpga().phases()[0]);
    }

    #[rstest::rstest]
    #[test]
    #[case(CPU_VERSION_MAJOR, MSG_RD_CPU_VERSION)]
    #[case(CPU_VERSION_MINOR, MSG_RD_CPU_VERSION_MINOR)]
    #[case(FPGA_VERSION_MAJOR, MSG_RD_FPGA_VERSION)]
    #[case(FPGA_VERSION_MINOR, MSG_RD_FPGA_VERSION_MINOR)]
    #[case(FirmwareInfo::ENABLED_EMULATOR_BIT, MSG_RD_FPGA_FUNCTION)]
    fn read_info(#[case] expect: u8, #[case] msg_id: u8) {
        let mut cpu = CPUEmulator::new(0, 249);
        let mut tx = TxDatagram::new(1);
        tx[0].header.msg_id = msg_id;
        cpu.send(&tx);
        assert_eq!(RxMessage::new(expect, msg_id), cpu.rx());
    }

    #[test]
    fn reads_fpga_info() {
        let mut cpu = CPUEmulator::new(0, 249);
        cpu.fpga_mut().assert_thermal_sensor();

        let mut tx = TxDatagram::new(1);
        tx[0].header.msg_id = MSG_BEGIN;
        tx[0].header.fpga_flag = FPGAControlFlags::READS_FPGA_INFO;
        cpu.send(&tx);
        assert!(cpu.reads_fpga_info());
        assert!(FPGAState::from(&cpu.rx()).is_thermal_assert());

        cpu.fpga_mut().deassert_thermal_sensor();
        cpu.update();
        assert!(!FPGAState::from(&cpu.rx()).is_thermal_assert());

        tx[0].header.msg_id = MSG_BEGIN + 1;
        tx[0].header.fpga_flag = FPGAControlFlags::NONE;
        cpu.fpga_mut().assert_thermal_sensor();
        cpu.send(&tx);
        assert_eq!(0x00, cpu.rx().ack());
    }

    #[test]
    fn clear() {
        let mut cpu = CPUEmulator::new(0, 249);
        let mut tx = TxDatagram::new(1);
        tx[0].header.msg_id = MSG_BEGIN;
        tx[0].header.fpga_flag = FPGAControlFlags::FORCE_FAN | FPGAControlFlags::READS_FPGA_INFO;
        cpu.send(&tx);
        assert!(cpu.fpga().is_force_fan());

        tx[0].header.msg_id = MSG_CLEAR;
        cpu.send(&tx);
        assert!(!cpu.fpga().is_force_fan());
        assert!(!cpu.reads_fpga_info());
        assert_eq!(RxMessage::new(0x00, MSG_CLEAR), cpu.rx());
    }
}

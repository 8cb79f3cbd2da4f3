use aupa_driver::cpu::{CPUControlFlags, TxMessage};

use crate::CPUEmulator;

const GAIN_STM_MODE_PHASE_DUTY_FULL: u16 = 0x0001;
const GAIN_STM_MODE_PHASE_FULL: u16 = 0x0002;
const GAIN_STM_MODE_PHASE_HALF: u16 = 0x0004;

const POINT_SIZE: usize = std::mem::size_of::<u64>();

impl CPUEmulator {
    pub(crate) fn write_focus_stm(&mut self, msg: &TxMessage) {
        let body = msg.body_bytes();
        let size = msg.body[0] as usize;

        let offset = if msg.header.cpu_flag.contains(CPUControlFlags::STM_BEGIN) {
            self.stm_cycle = 0;
            self.fpga.focus_stm.clear();
            self.fpga.gain_stm_phases.clear();
            self.fpga.gain_stm_duties.clear();
            self.fpga.stm_freq_div = u32::from_le_bytes([body[2], body[3], body[4], body[5]]);
            self.fpga.sound_speed = u32::from_le_bytes([body[6], body[7], body[8], body[9]]);
            self.fpga.stm_start_idx = msg.body[5];
            self.fpga.stm_finish_idx = msg.body[6];
            14
        } else {
            2
        };

        self.fpga.focus_stm.extend((0..size).map(|i| {
            let o = offset + i * POINT_SIZE;
            let mut p = [0u8; POINT_SIZE];
            p.copy_from_slice(&body[o..o + POINT_SIZE]);
            u64::from_le_bytes(p)
        }));
        self.stm_cycle += size;

        if msg.header.cpu_flag.contains(CPUControlFlags::STM_END) {
            self.fpga.stm_size = self.stm_cycle;
        }
    }

    pub(crate) fn write_gain_stm(&mut self, msg: &TxMessage) {
        if msg.header.cpu_flag.contains(CPUControlFlags::STM_BEGIN) {
            let body = msg.body_bytes();
            self.stm_cycle = 0;
            self.fpga.focus_stm.clear();
            self.fpga.gain_stm_phases.clear();
            self.fpga.gain_stm_duties.clear();
            self.fpga.stm_freq_div = u32::from_le_bytes([body[0], body[1], body[2], body[3]]);
            self.gain_stm_mode = msg.body[2];
            self.fpga.stm_size = msg.body[3] as usize;
            self.fpga.stm_start_idx = msg.body[4];
            self.fpga.stm_finish_idx = msg.body[5];
            return;
        }

        let n = self.num_transducers;
        let body = &msg.body[..n];
        let remaining = self.fpga.stm_size.saturating_sub(self.fpga.gain_stm_phases.len());

        if self.fpga.is_legacy_mode() {
            let (num, bits) = match self.gain_stm_mode {
                GAIN_STM_MODE_PHASE_FULL => (2, 8),
                GAIN_STM_MODE_PHASE_HALF => (4, 4),
                GAIN_STM_MODE_PHASE_DUTY_FULL => {
                    self.push_gain_stm(
                        body.iter().map(|&d| d & 0x00FF).collect(),
                        body.iter().map(|&d| d >> 8).collect(),
                    );
                    return;
                }
                mode => {
                    tracing::error!("device {}: unknown GainSTM mode {:#06X}", self.idx, mode);
                    return;
                }
            };
            let mask = (1u16 << bits) - 1;
            (0..num.min(remaining)).for_each(|k| {
                self.push_gain_stm(
                    body.iter()
                        .map(|&d| ((d >> (bits * k)) & mask) << (8 - bits))
                        .collect(),
                    vec![0xFF; n],
                );
            });
        } else if msg.header.cpu_flag.contains(CPUControlFlags::IS_DUTY) {
            if let Some(duties) = self.fpga.gain_stm_duties.last_mut() {
                duties.copy_from_slice(body);
            }
        } else {
            let duties = self.fpga.cycles.iter().map(|&c| c >> 1).collect();
            self.push_gain_stm(body.to_vec(), duties);
        }
    }

    fn push_gain_stm(&mut self, phases: Vec<u16>, duties: Vec<u16>) {
        self.fpga.gain_stm_phases.push(phases);
        self.fpga.gain_stm_duties.push(duties);
        self.stm_cycle += 1;
    }
}

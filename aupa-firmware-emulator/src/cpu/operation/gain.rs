use aupa_driver::cpu::{CPUControlFlags, TxMessage};

use crate::CPUEmulator;

impl CPUEmulator {
    pub(crate) fn write_gain(&mut self, msg: &TxMessage) {
        let n = self.num_transducers;
        let body = &msg.body[..n];
        if self.fpga.is_legacy_mode() {
            self.fpga.phases = body.iter().map(|&d| d & 0x00FF).collect();
            self.fpga.duties = body.iter().map(|&d| d >> 8).collect();
        } else if msg.header.cpu_flag.contains(CPUControlFlags::IS_DUTY) {
            self.fpga.duties.copy_from_slice(body);
        } else {
            self.fpga.phases.copy_from_slice(body);
        }
    }
}

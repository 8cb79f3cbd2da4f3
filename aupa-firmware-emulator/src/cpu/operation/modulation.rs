use aupa_driver::cpu::{CPUControlFlags, TxMessage};

use crate::CPUEmulator;

impl CPUEmulator {
    pub(crate) fn write_mod(&mut self, msg: &TxMessage) {
        let header = &msg.header;
        let size = header.size as usize;

        let offset = if header.cpu_flag.contains(CPUControlFlags::MOD_BEGIN) {
            self.mod_cycle = 0;
            self.fpga.mod_freq_div = header.read_u32(0);
            self.fpga.modulation.clear();
            std::mem::size_of::<u32>()
        } else {
            0
        };

        self.fpga
            .modulation
            .extend_from_slice(&header.data[offset..offset + size]);
        self.mod_cycle += size;

        if header.cpu_flag.contains(CPUControlFlags::MOD_END) {
            tracing::trace!("device {}: modulation of {} samples", self.idx, self.mod_cycle);
        }
    }
}

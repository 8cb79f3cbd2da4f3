use aupa_driver::cpu::TxMessage;

use crate::CPUEmulator;

impl CPUEmulator {
    pub(crate) fn config_silencer(&mut self, msg: &TxMessage) {
        self.fpga.silencer_cycle = msg.header.read_u16(0);
        self.fpga.silencer_step = msg.header.read_u16(2);
    }

    pub(crate) fn synchronize(&mut self, msg: &TxMessage) {
        let n = self.num_transducers;
        self.fpga.cycles.copy_from_slice(&msg.body[..n]);
        self.synchronized = true;
    }

    pub(crate) fn write_mod_delay(&mut self, msg: &TxMessage) {
        let n = self.num_transducers;
        self.fpga.mod_delays.copy_from_slice(&msg.body[..n]);
    }
}

#[cfg(test)]
mod tests {
    use aupa_driver::{
        fpga::TransMode,
        operation::{ModDelayOp, NullOp, SilencerOp, SyncOp},
    };

    use super::*;
    use crate::cpu::operation::tests::{create_geometry, send_all};

    #[test]
    fn config_silencer() -> anyhow::Result<()> {
        let geometry = create_geometry(TransMode::Legacy);
        let mut cpu = CPUEmulator::new(0, 249);

        send_all(&mut cpu, &geometry, SilencerOp::new(2000, 30), NullOp::default())?;
        assert_eq!(2000, cpu.fpga().silencer_cycle());
        assert_eq!(30, cpu.fpga().silencer_step());
        Ok(())
    }

    #[test]
    fn synchronize() -> anyhow::Result<()> {
        let mut geometry = create_geometry(TransMode::Advanced);
        geometry[0][3].set_cycle(3000)?;
        let mut cpu = CPUEmulator::new(0, 249);
        assert!(!cpu.synchronized());

        send_all(&mut cpu, &geometry, SyncOp::default(), NullOp::default())?;
        assert!(cpu.synchronized());
        assert_eq!(3000, cpu.fpga().cycles()[3]);
        assert_eq!(4096, cpu.fpga().cycles()[0]);
        Ok(())
    }

    #[test]
    fn write_mod_delay() -> anyhow::Result<()> {
        let mut geometry = create_geometry(TransMode::Legacy);
        geometry[0][5].set_mod_delay(7);
        let mut cpu = CPUEmulator::new(0, 249);

        send_all(&mut cpu, &geometry, ModDelayOp::default(), NullOp::default())?;
        assert_eq!(7, cpu.fpga().mod_delays()[5]);
        assert_eq!(0, cpu.fpga().mod_delays()[0]);
        Ok(())
    }
}

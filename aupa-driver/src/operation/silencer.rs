use std::collections::HashMap;

use super::init_remains;
use crate::{
    cpu::{CPUControlFlags, TxMessage},
    error::AUPAInternalError,
    fpga::SILENCER_CYCLE_MIN,
    geometry::{Device, Geometry},
    operation::Operation,
};

pub struct SilencerOp {
    cycle: u16,
    step: u16,
    remains: HashMap<usize, usize>,
}

impl SilencerOp {
    pub fn new(cycle: u16, step: u16) -> Self {
        Self {
            cycle,
            step,
            remains: Default::default(),
        }
    }
}

impl Operation for SilencerOp {
    fn init(&mut self, geometry: &Geometry) -> Result<(), AUPAInternalError> {
        if self.cycle < SILENCER_CYCLE_MIN {
            return Err(AUPAInternalError::SilencerCycleOutOfRange(self.cycle));
        }
        self.remains = init_remains(geometry, 1);
        Ok(())
    }

    fn pack(&mut self, _: &Device, tx: &mut TxMessage) -> Result<(), AUPAInternalError> {
        tx.header.cpu_flag.remove(CPUControlFlags::CONFIG_EN_N);
        tx.header.cpu_flag.insert(CPUControlFlags::CONFIG_SILENCER);
        tx.header.write_u16(0, self.cycle);
        tx.header.write_u16(2, self.step);
        Ok(())
    }

    fn commit(&mut self, device: &Device) {
        self.remains.insert(device.idx(), 0);
    }

    fn remains(&self, device: &Device) -> usize {
        self.remains.get(&device.idx()).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::tests::create_geometry;

    #[test]
    fn silencer_op() -> anyhow::Result<()> {
        let geometry = create_geometry(1, 1);
        let mut tx = TxMessage::new();

        let mut op = SilencerOp::new(1044, 0x1234);
        op.init(&geometry)?;
        assert_eq!(1, op.remains(&geometry[0]));
        op.pack(&geometry[0], &mut tx)?;
        op.commit(&geometry[0]);

        assert_eq!(CPUControlFlags::CONFIG_SILENCER, tx.header.cpu_flag);
        assert_eq!(1044, tx.header.read_u16(0));
        assert_eq!(0x1234, tx.header.read_u16(2));
        assert_eq!(0, op.remains(&geometry[0]));
        Ok(())
    }

    #[test]
    fn silencer_op_cycle_out_of_range() {
        let geometry = create_geometry(1, 1);
        assert_eq!(
            Err(AUPAInternalError::SilencerCycleOutOfRange(1043)),
            SilencerOp::new(1043, 10).init(&geometry)
        );
    }
}

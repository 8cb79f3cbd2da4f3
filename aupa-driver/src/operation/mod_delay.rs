use std::collections::HashMap;

use super::init_remains;
use crate::{
    cpu::{CPUControlFlags, TxMessage},
    error::AUPAInternalError,
    geometry::{Device, Geometry},
    operation::Operation,
};

/// Sends the modulation delay of every transducer
#[derive(Default)]
pub struct ModDelayOp {
    remains: HashMap<usize, usize>,
}

impl Operation for ModDelayOp {
    fn init(&mut self, geometry: &Geometry) -> Result<(), AUPAInternalError> {
        self.remains = init_remains(geometry, 1);
        Ok(())
    }

    fn pack(&mut self, device: &Device, tx: &mut TxMessage) -> Result<(), AUPAInternalError> {
        tx.header.cpu_flag.insert(CPUControlFlags::MOD_DELAY);
        tx.body
            .iter_mut()
            .zip(device.iter())
            .for_each(|(d, tr)| *d = tr.mod_delay());
        Ok(())
    }

    fn commit(&mut self, device: &Device) {
        self.remains.insert(device.idx(), 0);
    }

    fn remains(&self, device: &Device) -> usize {
        self.remains.get(&device.idx()).copied().unwrap_or(0)
    }
}

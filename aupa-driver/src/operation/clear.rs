use std::collections::HashMap;

use super::{init_remains, STM_FLAGS};
use crate::{
    cpu::{TxMessage, MSG_CLEAR},
    error::AUPAInternalError,
    geometry::{Device, Geometry},
    operation::Operation,
};

#[derive(Default)]
pub struct ClearOp {
    remains: HashMap<usize, usize>,
}

impl Operation for ClearOp {
    fn init(&mut self, geometry: &Geometry) -> Result<(), AUPAInternalError> {
        self.remains = init_remains(geometry, 1);
        Ok(())
    }

    fn pack(&mut self, _: &Device, tx: &mut TxMessage) -> Result<(), AUPAInternalError> {
        tx.header.msg_id = MSG_CLEAR;
        tx.header.fpga_flag.remove(STM_FLAGS);
        Ok(())
    }

    fn commit(&mut self, device: &Device) {
        self.remains.insert(device.idx(), 0);
    }

    fn remains(&self, device: &Device) -> usize {
        self.remains.get(&device.idx()).copied().unwrap_or(0)
    }
}

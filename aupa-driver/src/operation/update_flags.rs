use std::collections::HashMap;

use super::init_remains;
use crate::{
    cpu::TxMessage,
    error::AUPAInternalError,
    geometry::{Device, Geometry},
    operation::Operation,
};

/// Sends a frame carrying only the device flags
#[derive(Default)]
pub struct UpdateFlagsOp {
    remains: HashMap<usize, usize>,
}

impl Operation for UpdateFlagsOp {
    fn init(&mut self, geometry: &Geometry) -> Result<(), AUPAInternalError> {
        self.remains = init_remains(geometry, 1);
        Ok(())
    }

    fn pack(&mut self, _: &Device, _: &mut TxMessage) -> Result<(), AUPAInternalError> {
        Ok(())
    }

    fn commit(&mut self, device: &Device) {
        self.remains.insert(device.idx(), 0);
    }

    fn remains(&self, device: &Device) -> usize {
        self.remains.get(&device.idx()).copied().unwrap_or(0)
    }
}

use crate::{
    cpu::TxMessage,
    error::AUPAInternalError,
    geometry::{Device, Geometry},
    operation::Operation,
};

#[derive(Default)]
pub struct NullOp {}

impl Operation for NullOp {
    fn init(&mut self, _: &Geometry) -> Result<(), AUPAInternalError> {
        Ok(())
    }

    fn pack(&mut self, _: &Device, _: &mut TxMessage) -> Result<(), AUPAInternalError> {
        Ok(())
    }

    fn commit(&mut self, _: &Device) {}

    fn remains(&self, _: &Device) -> usize {
        0
    }
}

use std::collections::HashMap;

use super::init_remains;
use crate::{
    cpu::{
        TxMessage, MSG_RD_CPU_VERSION, MSG_RD_CPU_VERSION_MINOR, MSG_RD_FPGA_FUNCTION,
        MSG_RD_FPGA_VERSION, MSG_RD_FPGA_VERSION_MINOR,
    },
    error::AUPAInternalError,
    fpga::FPGAControlFlags,
    geometry::{Device, Geometry},
    operation::Operation,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirmwareInfoType {
    CPUVersionMajor,
    CPUVersionMinor,
    FPGAVersionMajor,
    FPGAVersionMinor,
    FPGAFunctions,
}

impl FirmwareInfoType {
    pub const fn msg_id(&self) -> u8 {
        match self {
            FirmwareInfoType::CPUVersionMajor => MSG_RD_CPU_VERSION,
            FirmwareInfoType::CPUVersionMinor => MSG_RD_CPU_VERSION_MINOR,
            FirmwareInfoType::FPGAVersionMajor => MSG_RD_FPGA_VERSION,
            FirmwareInfoType::FPGAVersionMinor => MSG_RD_FPGA_VERSION_MINOR,
            FirmwareInfoType::FPGAFunctions => MSG_RD_FPGA_FUNCTION,
        }
    }
}

/// Requests a firmware information byte in the acknowledgment
pub struct FirmwareInfoOp {
    ty: FirmwareInfoType,
    remains: HashMap<usize, usize>,
}

impl FirmwareInfoOp {
    pub fn new(ty: FirmwareInfoType) -> Self {
        Self {
            ty,
            remains: Default::default(),
        }
    }
}

impl Operation for FirmwareInfoOp {
    fn init(&mut self, geometry: &Geometry) -> Result<(), AUPAInternalError> {
        self.remains = init_remains(geometry, 1);
        Ok(())
    }

    fn pack(&mut self, _: &Device, tx: &mut TxMessage) -> Result<(), AUPAInternalError> {
        tx.header.msg_id = self.ty.msg_id();
        tx.header.fpga_flag.remove(FPGAControlFlags::READS_FPGA_INFO);
        Ok(())
    }

    fn commit(&mut self, device: &Device) {
        self.remains.insert(device.idx(), 0);
    }

    fn remains(&self, device: &Device) -> usize {
        self.remains.get(&device.idx()).copied().unwrap_or(0)
    }
}

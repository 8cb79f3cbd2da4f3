mod amplitudes;
mod clear;
mod gain;
mod info;
mod mod_delay;
mod modulation;
mod null;
mod silencer;
pub mod stm;
mod sync;
mod update_flags;

pub use amplitudes::*;
pub use clear::*;
pub use gain::*;
pub use info::*;
pub use mod_delay::*;
pub use modulation::*;
pub use null::*;
pub use silencer::*;
pub use stm::*;
pub use sync::*;
pub use update_flags::*;

use crate::{
    cpu::{CPUControlFlags, TxDatagram, TxMessage},
    error::AUPAInternalError,
    fpga::{FPGAControlFlags, TransMode},
    geometry::{Device, Geometry},
};

pub trait Operation {
    fn init(&mut self, geometry: &Geometry) -> Result<(), AUPAInternalError>;
    fn pack(&mut self, device: &Device, tx: &mut TxMessage) -> Result<(), AUPAInternalError>;
    fn commit(&mut self, device: &Device);
    /// Number of frames still to be sent to the device
    fn remains(&self, device: &Device) -> usize;
}

impl Operation for Box<dyn Operation> {
    fn init(&mut self, geometry: &Geometry) -> Result<(), AUPAInternalError> {
        self.as_mut().init(geometry)
    }

    fn pack(&mut self, device: &Device, tx: &mut TxMessage) -> Result<(), AUPAInternalError> {
        self.as_mut().pack(device, tx)
    }

    fn commit(&mut self, device: &Device) {
        self.as_mut().commit(device)
    }

    fn remains(&self, device: &Device) -> usize {
        self.as_ref().remains(device)
    }
}

pub(crate) const STM_FLAGS: FPGAControlFlags = FPGAControlFlags::STM_MODE
    .union(FPGAControlFlags::STM_GAIN_MODE)
    .union(FPGAControlFlags::USE_STM_START_IDX)
    .union(FPGAControlFlags::USE_STM_FINISH_IDX);

pub struct OperationHandler {}

impl OperationHandler {
    pub fn is_finished(
        op1: &mut impl Operation,
        op2: &mut impl Operation,
        geometry: &Geometry,
    ) -> bool {
        geometry
            .devices()
            .all(|dev| op1.remains(dev) == 0 && op2.remains(dev) == 0)
    }

    pub fn init(
        op1: &mut impl Operation,
        op2: &mut impl Operation,
        geometry: &Geometry,
    ) -> Result<(), AUPAInternalError> {
        op1.init(geometry)?;
        op2.init(geometry)
    }

    /// Pack the next frame of every enabled device
    ///
    /// FPGA flags not owned by the device or the geometry are kept from the previous frame.
    pub fn pack(
        op1: &mut impl Operation,
        op2: &mut impl Operation,
        geometry: &Geometry,
        tx: &mut TxDatagram,
        msg_id: u8,
    ) -> Result<(), AUPAInternalError> {
        geometry.devices().try_for_each(|dev| {
            let msg = &mut tx[dev.idx()];
            msg.header.msg_id = msg_id;
            msg.header.cpu_flag = CPUControlFlags::NONE;
            msg.header.size = 0;
            msg.header
                .fpga_flag
                .set(FPGAControlFlags::FORCE_FAN, dev.force_fan);
            msg.header
                .fpga_flag
                .set(FPGAControlFlags::READS_FPGA_INFO, dev.reads_fpga_info);
            msg.header.fpga_flag.set(
                FPGAControlFlags::LEGACY_MODE,
                geometry.mode() == TransMode::Legacy,
            );

            if op1.remains(dev) > 0 {
                op1.pack(dev, msg)?;
                op1.commit(dev);
            }
            if op2.remains(dev) > 0 {
                op2.pack(dev, msg)?;
                op2.commit(dev);
            }
            Ok(())
        })
    }
}

/// Remaining frame counter per device
pub(crate) fn init_remains(geometry: &Geometry, frames: usize) -> std::collections::HashMap<usize, usize> {
    geometry.devices().map(|dev| (dev.idx(), frames)).collect()
}

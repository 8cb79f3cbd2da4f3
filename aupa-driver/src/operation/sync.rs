use std::collections::HashMap;

use super::init_remains;
use crate::{
    cpu::{CPUControlFlags, TxMessage},
    error::AUPAInternalError,
    fpga::{TransMode, DEFAULT_CYCLE},
    geometry::{Device, Geometry},
    operation::Operation,
};

/// Sends the ultrasound cycle of every transducer and synchronizes the devices
#[derive(Default)]
pub struct SyncOp {
    remains: HashMap<usize, usize>,
}

impl Operation for SyncOp {
    fn init(&mut self, geometry: &Geometry) -> Result<(), AUPAInternalError> {
        if geometry.mode() == TransMode::Legacy {
            if let Some(tr) = geometry
                .devices()
                .flat_map(|dev| dev.iter())
                .find(|tr| tr.cycle() != DEFAULT_CYCLE)
            {
                return Err(AUPAInternalError::CycleNotSupportedInLegacyMode(
                    tr.global_idx(),
                    tr.cycle(),
                ));
            }
        }
        self.remains = init_remains(geometry, 1);
        Ok(())
    }

    fn pack(&mut self, device: &Device, tx: &mut TxMessage) -> Result<(), AUPAInternalError> {
        tx.header.cpu_flag.remove(CPUControlFlags::CONFIG_EN_N);
        tx.header.cpu_flag.insert(CPUControlFlags::CONFIG_SYNC);
        tx.body
            .iter_mut()
            .zip(device.iter())
            .for_each(|(d, tr)| *d = tr.cycle());
        Ok(())
    }

    fn commit(&mut self, device: &Device) {
        self.remains.insert(device.idx(), 0);
    }

    fn remains(&self, device: &Device) -> usize {
        self.remains.get(&device.idx()).copied().unwrap_or(0)
    }
}

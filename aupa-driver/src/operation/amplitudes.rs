use std::collections::HashMap;

use super::{init_remains, STM_FLAGS};
use crate::{
    common::EmitIntensity,
    cpu::{CPUControlFlags, TxMessage},
    error::AUPAInternalError,
    fpga::TransMode,
    geometry::{Device, Geometry},
    operation::Operation,
};

/// Duty frame with a uniform intensity
pub struct AmplitudesOp {
    intensity: EmitIntensity,
    remains: HashMap<usize, usize>,
}

impl AmplitudesOp {
    pub fn new(intensity: EmitIntensity) -> Self {
        Self {
            intensity,
            remains: Default::default(),
        }
    }
}

impl Operation for AmplitudesOp {
    fn init(&mut self, geometry: &Geometry) -> Result<(), AUPAInternalError> {
        if geometry.mode() != TransMode::AdvancedPhase {
            return Err(AUPAInternalError::ModeNotSupported(
                "Amplitudes".to_owned(),
                geometry.mode(),
            ));
        }
        self.remains = init_remains(geometry, 1);
        Ok(())
    }

    fn pack(&mut self, device: &Device, tx: &mut TxMessage) -> Result<(), AUPAInternalError> {
        tx.header.fpga_flag.remove(STM_FLAGS);
        tx.header
            .cpu_flag
            .insert(CPUControlFlags::WRITE_BODY | CPUControlFlags::IS_DUTY);
        tx.body
            .iter_mut()
            .zip(device.iter())
            .for_each(|(d, tr)| *d = self.intensity.pulse_width(tr.cycle()));
        Ok(())
    }

    fn commit(&mut self, device: &Device) {
        self.remains.insert(device.idx(), 0);
    }

    fn remains(&self, device: &Device) -> usize {
        self.remains.get(&device.idx()).copied().unwrap_or(0)
    }
}

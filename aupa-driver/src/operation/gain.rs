use std::collections::HashMap;

use super::{init_remains, STM_FLAGS};
use crate::{
    common::Drive,
    cpu::{CPUControlFlags, TxMessage},
    datagram::{Gain, GainFilter},
    error::AUPAInternalError,
    fpga::TransMode,
    geometry::{Device, Geometry},
    operation::Operation,
};

/// Compute drives of a gain and check that every enabled device is fully covered
pub(crate) fn calc_complete<G: Gain>(
    gain: &G,
    geometry: &Geometry,
) -> Result<HashMap<usize, Vec<Drive>>, AUPAInternalError> {
    let drives = gain.calc(geometry, GainFilter::All)?;
    if let Some(dev) = geometry.devices().find(|dev| {
        drives
            .get(&dev.idx())
            .is_none_or(|d| d.len() != dev.num_transducers())
    }) {
        return Err(AUPAInternalError::GainIncomplete(dev.idx()));
    }
    Ok(drives)
}

pub(crate) fn write_legacy_drives(tx: &mut TxMessage, drives: &[Drive]) {
    tx.body.iter_mut().zip(drives).for_each(|(d, drive)| {
        *d = (drive.phase.to_legacy() as u16) | ((drive.intensity.value() as u16) << 8)
    });
}

pub(crate) fn write_advanced_phase(tx: &mut TxMessage, device: &Device, drives: &[Drive]) {
    tx.body
        .iter_mut()
        .zip(drives.iter().zip(device.iter()))
        .for_each(|(d, (drive, tr))| *d = drive.phase.to_advanced(tr.cycle()));
}

pub(crate) fn write_advanced_duty(tx: &mut TxMessage, device: &Device, drives: &[Drive]) {
    tx.header.cpu_flag.insert(CPUControlFlags::IS_DUTY);
    tx.body
        .iter_mut()
        .zip(drives.iter().zip(device.iter()))
        .for_each(|(d, (drive, tr))| *d = drive.intensity.pulse_width(tr.cycle()));
}

pub struct GainOp<G: Gain> {
    gain: G,
    mode: TransMode,
    drives: HashMap<usize, Vec<Drive>>,
    remains: HashMap<usize, usize>,
}

impl<G: Gain> GainOp<G> {
    pub fn new(gain: G) -> Self {
        Self {
            gain,
            mode: TransMode::Legacy,
            drives: Default::default(),
            remains: Default::default(),
        }
    }
}

impl<G: Gain> Operation for GainOp<G> {
    fn init(&mut self, geometry: &Geometry) -> Result<(), AUPAInternalError> {
        self.mode = geometry.mode();
        self.drives = calc_complete(&self.gain, geometry)?;
        self.remains = init_remains(
            geometry,
            match self.mode {
                TransMode::Advanced => 2,
                TransMode::Legacy | TransMode::AdvancedPhase => 1,
            },
        );
        Ok(())
    }

    fn pack(&mut self, device: &Device, tx: &mut TxMessage) -> Result<(), AUPAInternalError> {
        let drives = &self.drives[&device.idx()];

        tx.header.fpga_flag.remove(STM_FLAGS);
        tx.header.cpu_flag.insert(CPUControlFlags::WRITE_BODY);

        match self.mode {
            TransMode::Legacy => write_legacy_drives(tx, drives),
            TransMode::Advanced if self.remains(device) == 1 => {
                write_advanced_duty(tx, device, drives)
            }
            TransMode::Advanced | TransMode::AdvancedPhase => {
                write_advanced_phase(tx, device, drives)
            }
        }
        Ok(())
    }

    fn commit(&mut self, device: &Device) {
        if let Some(n) = self.remains.get_mut(&device.idx()) {
            *n = n.saturating_sub(1);
        }
    }

    fn remains(&self, device: &Device) -> usize {
        self.remains.get(&device.idx()).copied().unwrap_or(0)
    }
}

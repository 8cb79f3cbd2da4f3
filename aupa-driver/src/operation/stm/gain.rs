use std::collections::HashMap;

use super::GainSTMMode;
use crate::{
    common::Drive,
    cpu::{CPUControlFlags, TxMessage},
    datagram::Gain,
    error::AUPAInternalError,
    fpga::{FPGAControlFlags, TransMode, STM_SAMPLING_FREQ_DIV_MIN},
    geometry::{Device, Geometry},
    operation::{
        gain::{calc_complete, write_advanced_duty, write_advanced_phase, write_legacy_drives},
        Operation,
    },
};

pub struct GainSTMOp<G: Gain> {
    gains: Vec<G>,
    mode: GainSTMMode,
    trans_mode: TransMode,
    freq_div: u32,
    start_idx: Option<u16>,
    finish_idx: Option<u16>,
    drives: Vec<HashMap<usize, Vec<Drive>>>,
    sent: HashMap<usize, usize>,
}

impl<G: Gain> GainSTMOp<G> {
    pub fn new(
        gains: Vec<G>,
        mode: GainSTMMode,
        freq_div: u32,
        start_idx: Option<u16>,
        finish_idx: Option<u16>,
    ) -> Self {
        Self {
            gains,
            mode,
            trans_mode: TransMode::Legacy,
            freq_div,
            start_idx,
            finish_idx,
            drives: Vec::new(),
            sent: Default::default(),
        }
    }

    /// Number of frames including the head frame
    fn num_frames(&self) -> usize {
        let n = self.drives.len();
        1 + match (self.trans_mode, self.mode) {
            (TransMode::Legacy, GainSTMMode::PhaseDutyFull) => n,
            (TransMode::Legacy, GainSTMMode::PhaseFull) => n.div_ceil(2),
            (TransMode::Legacy, GainSTMMode::PhaseHalf) => n.div_ceil(4),
            (TransMode::Advanced, GainSTMMode::PhaseDutyFull) => 2 * n,
            _ => n,
        }
    }

    fn pack_head(&self, tx: &mut TxMessage) {
        tx.header.cpu_flag.insert(CPUControlFlags::STM_BEGIN);
        tx.body_bytes_mut()[0..4].copy_from_slice(&self.freq_div.to_le_bytes());
        tx.body[2] = self.mode.wire_value();
        tx.body[3] = self.drives.len() as u16;
        tx.body[4] = self.start_idx.unwrap_or(0);
        tx.body[5] = self.finish_idx.unwrap_or(0);
    }

    fn pack_data(&self, device: &Device, frame: usize, tx: &mut TxMessage) {
        let drives = |i: usize| self.drives[i][&device.idx()].as_slice();
        match (self.trans_mode, self.mode) {
            (TransMode::Legacy, GainSTMMode::PhaseDutyFull) => {
                write_legacy_drives(tx, drives(frame))
            }
            (TransMode::Legacy, GainSTMMode::PhaseFull) => {
                self.pack_legacy_phases(device, frame * 2, 2, 8, tx)
            }
            (TransMode::Legacy, GainSTMMode::PhaseHalf) => {
                self.pack_legacy_phases(device, frame * 4, 4, 4, tx)
            }
            (TransMode::Advanced, GainSTMMode::PhaseDutyFull) if frame % 2 == 1 => {
                write_advanced_duty(tx, device, drives(frame / 2))
            }
            (TransMode::Advanced, GainSTMMode::PhaseDutyFull) => {
                write_advanced_phase(tx, device, drives(frame / 2))
            }
            _ => write_advanced_phase(tx, device, drives(frame)),
        }
    }

    /// Pack up to `num` consecutive gains into each word, `bits` per phase
    fn pack_legacy_phases(
        &self,
        device: &Device,
        begin: usize,
        num: usize,
        bits: usize,
        tx: &mut TxMessage,
    ) {
        tx.body.iter_mut().enumerate().for_each(|(i, d)| {
            *d = self.drives[begin..]
                .iter()
                .take(num)
                .enumerate()
                .filter_map(|(k, drives)| {
                    drives[&device.idx()]
                        .get(i)
                        .map(|drive| ((drive.phase.to_legacy() >> (8 - bits)) as u16) << (bits * k))
                })
                .fold(0, |acc, v| acc | v)
        });
    }
}

impl<G: Gain> Operation for GainSTMOp<G> {
    fn init(&mut self, geometry: &Geometry) -> Result<(), AUPAInternalError> {
        self.trans_mode = geometry.mode();
        let n = self.gains.len();
        let max = self.trans_mode.gain_stm_buf_size_max();
        if !(1..=max).contains(&n) {
            return Err(AUPAInternalError::GainSTMSizeOutOfRange(n, max));
        }
        if self.mode == GainSTMMode::PhaseHalf && !self.trans_mode.is_legacy() {
            return Err(AUPAInternalError::GainSTMModeNotSupported(
                self.mode,
                self.trans_mode,
            ));
        }
        if self.freq_div < STM_SAMPLING_FREQ_DIV_MIN {
            return Err(AUPAInternalError::SamplingFreqDivOutOfRange(
                self.freq_div,
                STM_SAMPLING_FREQ_DIV_MIN,
                u32::MAX,
            ));
        }
        if let Some(idx) = self.start_idx.filter(|&i| i as usize >= n) {
            return Err(AUPAInternalError::STMStartIndexOutOfRange(idx as usize, n));
        }
        if let Some(idx) = self.finish_idx.filter(|&i| i as usize >= n) {
            return Err(AUPAInternalError::STMFinishIndexOutOfRange(idx as usize, n));
        }

        self.drives = self
            .gains
            .iter()
            .map(|g| calc_complete(g, geometry))
            .collect::<Result<_, _>>()?;
        self.sent = geometry.devices().map(|dev| (dev.idx(), 0)).collect();
        Ok(())
    }

    fn pack(&mut self, device: &Device, tx: &mut TxMessage) -> Result<(), AUPAInternalError> {
        let sent = self.sent[&device.idx()];

        tx.header.cpu_flag.insert(CPUControlFlags::WRITE_BODY);
        tx.header
            .fpga_flag
            .insert(FPGAControlFlags::STM_MODE | FPGAControlFlags::STM_GAIN_MODE);
        tx.header
            .fpga_flag
            .set(FPGAControlFlags::USE_STM_START_IDX, self.start_idx.is_some());
        tx.header
            .fpga_flag
            .set(FPGAControlFlags::USE_STM_FINISH_IDX, self.finish_idx.is_some());

        if sent == 0 {
            self.pack_head(tx);
        } else {
            self.pack_data(device, sent - 1, tx);
        }

        if sent + 1 == self.num_frames() {
            tx.header.cpu_flag.insert(CPUControlFlags::STM_END);
        }
        Ok(())
    }

    fn commit(&mut self, device: &Device) {
        if let Some(n) = self.sent.get_mut(&device.idx()) {
            *n += 1;
        }
    }

    fn remains(&self, device: &Device) -> usize {
        self.sent
            .get(&device.idx())
            .map(|sent| self.num_frames() - sent)
            .unwrap_or(0)
    }
}

use std::collections::HashMap;

use super::init_remains;
use crate::{
    common::EmitIntensity,
    cpu::{CPUControlFlags, TxMessage, HEADER_DATA_SIZE},
    error::AUPAInternalError,
    fpga::{MOD_BUF_SIZE_MAX, MOD_SAMPLING_FREQ_DIV_MIN},
    geometry::{Device, Geometry},
    operation::Operation,
};

const MOD_HEAD_DATA_SIZE: usize = HEADER_DATA_SIZE - std::mem::size_of::<u32>();

pub struct ModulationOp {
    samples: Vec<f64>,
    buf: Vec<u8>,
    freq_div: u32,
    sent: HashMap<usize, usize>,
}

impl ModulationOp {
    pub fn new(samples: Vec<f64>, freq_div: u32) -> Self {
        Self {
            samples,
            buf: Vec::new(),
            freq_div,
            sent: Default::default(),
        }
    }

    fn frame_size(&self, sent: usize) -> usize {
        let max = if sent == 0 {
            MOD_HEAD_DATA_SIZE
        } else {
            HEADER_DATA_SIZE
        };
        (self.buf.len() - sent).min(max)
    }
}

impl Operation for ModulationOp {
    fn init(&mut self, geometry: &Geometry) -> Result<(), AUPAInternalError> {
        if !(1..=MOD_BUF_SIZE_MAX).contains(&self.samples.len()) {
            return Err(AUPAInternalError::ModulationSizeOutOfRange(
                self.samples.len(),
            ));
        }
        if self.freq_div < MOD_SAMPLING_FREQ_DIV_MIN {
            return Err(AUPAInternalError::SamplingFreqDivOutOfRange(
                self.freq_div,
                MOD_SAMPLING_FREQ_DIV_MIN,
                u32::MAX,
            ));
        }
        self.buf = self
            .samples
            .iter()
            .map(|&v| EmitIntensity::from_normalized(v).map(|i| i.value()))
            .collect::<Result<_, _>>()?;
        self.sent = init_remains(geometry, 0);
        Ok(())
    }

    fn pack(&mut self, device: &Device, tx: &mut TxMessage) -> Result<(), AUPAInternalError> {
        let sent = self.sent[&device.idx()];
        let size = self.frame_size(sent);

        tx.header.cpu_flag.insert(CPUControlFlags::MOD);
        tx.header
            .cpu_flag
            .remove(CPUControlFlags::MOD_BEGIN | CPUControlFlags::MOD_END);
        tx.header.size = size as u8;

        let offset = if sent == 0 {
            tx.header.cpu_flag.insert(CPUControlFlags::MOD_BEGIN);
            tx.header.write_u32(0, self.freq_div);
            std::mem::size_of::<u32>()
        } else {
            0
        };
        tx.header.data[offset..offset + size].copy_from_slice(&self.buf[sent..sent + size]);

        if sent + size == self.buf.len() {
            tx.header.cpu_flag.insert(CPUControlFlags::MOD_END);
        }
        Ok(())
    }

    fn commit(&mut self, device: &Device) {
        let sent = self.sent[&device.idx()];
        let size = self.frame_size(sent);
        self.sent.insert(device.idx(), sent + size);
    }

    fn remains(&self, device: &Device) -> usize {
        self.sent
            .get(&device.idx())
            .map(|sent| self.buf.len() - sent)
            .unwrap_or(0)
    }
}

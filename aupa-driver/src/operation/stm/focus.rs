use std::collections::HashMap;

use crate::{
    cpu::{CPUControlFlags, TxMessage},
    error::AUPAInternalError,
    fpga::{
        FPGAControlFlags, FOCUS_STM_BUF_SIZE_MAX, FOCUS_STM_DUTY_SHIFT_MAX,
        FOCUS_STM_FIXED_NUM_LOWER, FOCUS_STM_FIXED_NUM_UNIT, FOCUS_STM_FIXED_NUM_UPPER,
        STM_SAMPLING_FREQ_DIV_MIN,
    },
    geometry::{Device, Geometry, Vector3},
    operation::Operation,
};

/// Control point of FocusSTM
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlPoint {
    point: Vector3,
    shift: u8,
}

impl ControlPoint {
    /// Control point with duty shift 0
    pub const fn new(point: Vector3) -> Self {
        Self { point, shift: 0 }
    }

    /// Set duty shift
    ///
    /// The pulse width becomes `cycle >> (shift + 1)`.
    pub const fn with_shift(self, shift: u8) -> Self {
        Self { shift, ..self }
    }

    pub const fn point(&self) -> &Vector3 {
        &self.point
    }

    pub const fn shift(&self) -> u8 {
        self.shift
    }
}

impl From<Vector3> for ControlPoint {
    fn from(point: Vector3) -> Self {
        Self::new(point)
    }
}

impl From<&Vector3> for ControlPoint {
    fn from(point: &Vector3) -> Self {
        Self::new(*point)
    }
}

impl From<(Vector3, u8)> for ControlPoint {
    fn from((point, shift): (Vector3, u8)) -> Self {
        Self::new(point).with_shift(shift)
    }
}

const POINT_SIZE: usize = std::mem::size_of::<u64>();
const HEAD_BODY_OFFSET: usize = 14;
const BODY_OFFSET: usize = 2;

pub(crate) const FOCUS_STM_HEAD_POINTS: usize =
    (crate::cpu::BODY_SIZE - HEAD_BODY_OFFSET) / POINT_SIZE;
pub(crate) const FOCUS_STM_BODY_POINTS: usize = (crate::cpu::BODY_SIZE - BODY_OFFSET) / POINT_SIZE;

fn to_fixed(v: f64) -> Option<u64> {
    let q = (v / FOCUS_STM_FIXED_NUM_UNIT).round();
    (FOCUS_STM_FIXED_NUM_LOWER as f64..=FOCUS_STM_FIXED_NUM_UPPER as f64)
        .contains(&q)
        .then_some((q as i64 as u64) & 0x3FFFF)
}

/// Pack a point given in the device frame
pub(crate) fn encode_point(local: &Vector3, shift: u8) -> Result<u64, AUPAInternalError> {
    if shift > FOCUS_STM_DUTY_SHIFT_MAX {
        return Err(AUPAInternalError::DutyShiftOutOfRange(shift));
    }
    match (to_fixed(local.x), to_fixed(local.y), to_fixed(local.z)) {
        (Some(x), Some(y), Some(z)) => Ok(x | (y << 18) | (z << 36) | ((shift as u64) << 54)),
        _ => Err(AUPAInternalError::FocusSTMPointOutOfRange(
            local.x, local.y, local.z,
        )),
    }
}

pub struct FocusSTMOp {
    points: Vec<ControlPoint>,
    freq_div: u32,
    start_idx: Option<u16>,
    finish_idx: Option<u16>,
    encoded: HashMap<usize, Vec<u64>>,
    sent: HashMap<usize, usize>,
}

impl FocusSTMOp {
    pub fn new(
        points: Vec<ControlPoint>,
        freq_div: u32,
        start_idx: Option<u16>,
        finish_idx: Option<u16>,
    ) -> Self {
        Self {
            points,
            freq_div,
            start_idx,
            finish_idx,
            encoded: Default::default(),
            sent: Default::default(),
        }
    }

    fn frame_size(&self, sent: usize) -> usize {
        let max = if sent == 0 {
            FOCUS_STM_HEAD_POINTS
        } else {
            FOCUS_STM_BODY_POINTS
        };
        (self.points.len() - sent).min(max)
    }
}

impl Operation for FocusSTMOp {
    fn init(&mut self, geometry: &Geometry) -> Result<(), AUPAInternalError> {
        let n = self.points.len();
        if !(1..=FOCUS_STM_BUF_SIZE_MAX).contains(&n) {
            return Err(AUPAInternalError::FocusSTMSizeOutOfRange(n));
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

        self.encoded = geometry
            .devices()
            .map(|dev| {
                self.points
                    .iter()
                    .map(|p| encode_point(&dev.to_local(p.point()), p.shift()))
                    .collect::<Result<Vec<_>, _>>()
                    .map(|v| (dev.idx(), v))
            })
            .collect::<Result<_, _>>()?;
        self.sent = geometry.devices().map(|dev| (dev.idx(), 0)).collect();
        Ok(())
    }

    fn pack(&mut self, device: &Device, tx: &mut TxMessage) -> Result<(), AUPAInternalError> {
        let sent = self.sent[&device.idx()];
        let size = self.frame_size(sent);
        let points = &self.encoded[&device.idx()][sent..sent + size];

        tx.header.cpu_flag.insert(CPUControlFlags::WRITE_BODY);
        tx.header.fpga_flag.insert(FPGAControlFlags::STM_MODE);
        tx.header.fpga_flag.remove(FPGAControlFlags::STM_GAIN_MODE);
        tx.header
            .fpga_flag
            .set(FPGAControlFlags::USE_STM_START_IDX, self.start_idx.is_some());
        tx.header
            .fpga_flag
            .set(FPGAControlFlags::USE_STM_FINISH_IDX, self.finish_idx.is_some());

        tx.body[0] = size as u16;
        let offset = if sent == 0 {
            tx.header.cpu_flag.insert(CPUControlFlags::STM_BEGIN);
            let sound_speed = (device.sound_speed / 1000.0 * 1024.0).round() as u32;
            let body = tx.body_bytes_mut();
            body[2..6].copy_from_slice(&self.freq_div.to_le_bytes());
            body[6..10].copy_from_slice(&sound_speed.to_le_bytes());
            tx.body[5] = self.start_idx.unwrap_or(0);
            tx.body[6] = self.finish_idx.unwrap_or(0);
            HEAD_BODY_OFFSET
        } else {
            BODY_OFFSET
        };

        let body = tx.body_bytes_mut();
        points.iter().enumerate().for_each(|(i, p)| {
            let o = offset + i * POINT_SIZE;
            body[o..o + POINT_SIZE].copy_from_slice(&p.to_le_bytes());
        });

        if sent + size == self.points.len() {
            tx.header.cpu_flag.insert(CPUControlFlags::STM_END);
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
            .map(|sent| self.points.len() - sent)
            .unwrap_or(0)
    }
}

use std::time::Duration;

use thiserror::Error;

use crate::{
    fpga::*,
    operation::stm::GainSTMMode,
};

#[derive(Error, Debug, PartialEq, Clone)]
pub enum AUPAInternalError {
    #[error("Failed to build geometry: {0}")]
    GeometryBuild(String),
    #[error("Device index ({0}) is out of range ([0, {1}))")]
    DeviceIndexOutOfRange(usize, usize),
    #[error("Transducer index ({0}) is out of range ([0, {1}))")]
    TransducerIndexOutOfRange(usize, usize),

    #[error(
        "Modulation buffer size ({0}) is out of range ([1, {max}])",
        max = MOD_BUF_SIZE_MAX
    )]
    ModulationSizeOutOfRange(usize),
    #[error("Sampling frequency division ({0}) is out of range ([{1}, {2}])")]
    SamplingFreqDivOutOfRange(u32, u32, u32),
    #[error("Sampling frequency ({0}) is out of range ([{1}, {2}])")]
    SamplingFreqOutOfRange(f64, f64, f64),
    #[error("Sampling period ({0:?}) is out of range")]
    SamplingPeriodOutOfRange(Duration),

    #[error(
        "Silencer cycle ({0}) is out of range ([{min}, 65535])",
        min = SILENCER_CYCLE_MIN
    )]
    SilencerCycleOutOfRange(u16),
    #[error(
        "Cycle ({0}) is out of range ([{min}, {max}])",
        min = CYCLE_MIN,
        max = MAX_CYCLE
    )]
    CycleOutOfRange(u16),
    #[error(
        "Cycle of transducer {0} is {1}, but must be {cycle} in Legacy mode",
        cycle = DEFAULT_CYCLE
    )]
    CycleNotSupportedInLegacyMode(usize, u16),

    #[error("Amplitude ({0}) is out of range ([0, 1])")]
    AmplitudeOutOfRange(f64),
    #[error("Duty ratio ({0}) is out of range ([0, 0.5])")]
    DutyRatioOutOfRange(f64),
    #[error("Pulse width ({0}) is out of range for cycle {1}")]
    PulseWidthOutOfRange(u16, u16),

    #[error(
        "Point coordinate ({0}, {1}, {2}) is out of range ([{min}, {max}]) in device local frame",
        min = FOCUS_STM_FIXED_NUM_UNIT * FOCUS_STM_FIXED_NUM_LOWER as f64,
        max = FOCUS_STM_FIXED_NUM_UNIT * FOCUS_STM_FIXED_NUM_UPPER as f64,
    )]
    FocusSTMPointOutOfRange(f64, f64, f64),
    #[error(
        "Duty shift ({0}) is out of range ([0, {max}])",
        max = FOCUS_STM_DUTY_SHIFT_MAX
    )]
    DutyShiftOutOfRange(u8),
    #[error(
        "FocusSTM size ({0}) is out of range ([1, {max}])",
        max = FOCUS_STM_BUF_SIZE_MAX
    )]
    FocusSTMSizeOutOfRange(usize),
    #[error("GainSTM size ({0}) is out of range ([1, {1}])")]
    GainSTMSizeOutOfRange(usize, usize),
    #[error("GainSTMMode ({0:?}) is not supported in {1:?} mode")]
    GainSTMModeNotSupported(GainSTMMode, TransMode),
    #[error("STM start index ({0}) is out of range ([0, {1}))")]
    STMStartIndexOutOfRange(usize, usize),
    #[error("STM finish index ({0}) is out of range ([0, {1}))")]
    STMFinishIndexOutOfRange(usize, usize),

    #[error("{0} is not supported in {1:?} mode")]
    ModeNotSupported(String, TransMode),
    #[error("Gain does not cover all transducers of device {0}")]
    GainIncomplete(usize),
    #[error("Unknown group key: {0}")]
    UnknownGroupKey(String),
    #[error("Unspecified group key: {0}")]
    UnspecifiedGroupKey(String),

    #[error("{0}")]
    GainError(String),
    #[error("{0}")]
    ModulationError(String),

    #[error("Link is closed")]
    LinkClosed,
    #[error("Failed to send data")]
    SendDataFailed,
    #[error("{0}")]
    LinkError(String),
}

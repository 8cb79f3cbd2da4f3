use super::{Header, TxMessage};

pub const EC_OUTPUT_FRAME_SIZE: usize = 626;
pub const EC_INPUT_FRAME_SIZE: usize = 2;

pub const EC_CYCLE_TIME_BASE_MICRO_SEC: u64 = 500;
pub const EC_CYCLE_TIME_BASE_NANO_SEC: u64 = EC_CYCLE_TIME_BASE_MICRO_SEC * 1000;

pub const BODY_SIZE: usize = EC_OUTPUT_FRAME_SIZE - std::mem::size_of::<Header>();

const _: () = assert!(std::mem::size_of::<TxMessage>() == EC_OUTPUT_FRAME_SIZE);

use std::time::Duration;

use super::Datagram;
use crate::{
    defined::DEFAULT_TIMEOUT,
    error::AUPAInternalError,
    operation::{NullOp, UpdateFlagsOp},
};

/// Datagram to apply `force_fan` and `reads_fpga_info` of each device
#[derive(Default, Debug)]
pub struct UpdateFlags {}

impl UpdateFlags {
    pub const fn new() -> Self {
        Self {}
    }
}

impl Datagram for UpdateFlags {
    type O1 = UpdateFlagsOp;
    type O2 = NullOp;

    fn operation(self) -> Result<(Self::O1, Self::O2), AUPAInternalError> {
        Ok((Self::O1::default(), Self::O2::default()))
    }

    fn timeout(&self) -> Option<Duration> {
        Some(DEFAULT_TIMEOUT)
    }
}

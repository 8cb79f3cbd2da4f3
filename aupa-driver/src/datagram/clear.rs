use std::time::Duration;

use super::Datagram;
use crate::{
    defined::DEFAULT_TIMEOUT,
    error::AUPAInternalError,
    operation::{ClearOp, NullOp},
};

/// Datagram to clear all data in the devices
#[derive(Default, Debug)]
pub struct Clear {}

impl Clear {
    pub const fn new() -> Self {
        Self {}
    }
}

impl Datagram for Clear {
    type O1 = ClearOp;
    type O2 = NullOp;

    fn operation(self) -> Result<(Self::O1, Self::O2), AUPAInternalError> {
        Ok((Self::O1::default(), Self::O2::default()))
    }

    fn timeout(&self) -> Option<Duration> {
        Some(DEFAULT_TIMEOUT)
    }
}

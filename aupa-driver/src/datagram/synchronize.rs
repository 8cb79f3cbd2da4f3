use std::time::Duration;

use super::Datagram;
use crate::{
    defined::DEFAULT_TIMEOUT,
    error::AUPAInternalError,
    operation::{NullOp, SyncOp},
};

/// Datagram to synchronize devices
///
/// The cycle of every transducer is sent along with the synchronization request.
#[derive(Default, Debug)]
pub struct Synchronize {}

impl Synchronize {
    pub const fn new() -> Self {
        Self {}
    }
}

impl Datagram for Synchronize {
    type O1 = SyncOp;
    type O2 = NullOp;

    fn operation(self) -> Result<(Self::O1, Self::O2), AUPAInternalError> {
        Ok((Self::O1::default(), Self::O2::default()))
    }

    fn timeout(&self) -> Option<Duration> {
        Some(DEFAULT_TIMEOUT)
    }
}

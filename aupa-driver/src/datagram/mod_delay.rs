use std::time::Duration;

use super::Datagram;
use crate::{
    defined::DEFAULT_TIMEOUT,
    error::AUPAInternalError,
    operation::{ModDelayOp, NullOp},
};

/// Datagram to send the modulation delay set by `Transducer::set_mod_delay`
#[derive(Default, Debug)]
pub struct ConfigureModDelay {}

impl ConfigureModDelay {
    pub const fn new() -> Self {
        Self {}
    }
}

impl Datagram for ConfigureModDelay {
    type O1 = ModDelayOp;
    type O2 = NullOp;

    fn operation(self) -> Result<(Self::O1, Self::O2), AUPAInternalError> {
        Ok((Self::O1::default(), Self::O2::default()))
    }

    fn timeout(&self) -> Option<Duration> {
        Some(DEFAULT_TIMEOUT)
    }
}

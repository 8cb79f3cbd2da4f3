use std::time::Duration;

use aupa_driver::{
    datagram::{Datagram, Silencer},
    defined::DEFAULT_TIMEOUT,
    error::AUPAInternalError,
    operation::{GainOp, SilencerOp},
};

use crate::gain::Null;

/// Datagram to stop output
///
/// Restores the default silencer and drives every transducer with [`Null`] in the same frames.
#[derive(Default, Clone, Copy, Debug)]
pub struct Stop {}

impl Stop {
    pub const fn new() -> Self {
        Self {}
    }
}

impl Datagram for Stop {
    type O1 = SilencerOp;
    type O2 = GainOp<Null>;

    fn operation(self) -> Result<(Self::O1, Self::O2), AUPAInternalError> {
        let (silencer, _) = Silencer::default().operation()?;
        Ok((silencer, GainOp::new(Null::new())))
    }

    fn timeout(&self) -> Option<Duration> {
        Some(DEFAULT_TIMEOUT)
    }
}

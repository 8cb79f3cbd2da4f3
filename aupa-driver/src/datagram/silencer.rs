use std::time::Duration;

use super::{Datagram, HeaderDatagram};
use crate::{
    defined::DEFAULT_TIMEOUT,
    error::AUPAInternalError,
    fpga::{DEFAULT_SILENCER_CYCLE, DEFAULT_SILENCER_STEP},
    operation::{NullOp, SilencerOp},
};

/// Datagram to configure the silencer
///
/// The silencer smooths phase and duty changes. A larger `step` means faster changes,
/// `0xFFFF` effectively disables it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Silencer {
    cycle: u16,
    step: u16,
}

impl Silencer {
    /// constructor
    ///
    /// # Arguments
    ///
    /// * `step` - Update step of the silencer
    ///
    pub const fn new(step: u16) -> Self {
        Self {
            cycle: DEFAULT_SILENCER_CYCLE,
            step,
        }
    }

    /// Set the sampling cycle of the silencer, must be at least `SILENCER_CYCLE_MIN`
    pub const fn with_cycle(self, cycle: u16) -> Self {
        Self { cycle, ..self }
    }

    /// Silencer with the maximum step
    pub const fn disable() -> Self {
        Self::new(0xFFFF)
    }

    pub const fn cycle(&self) -> u16 {
        self.cycle
    }

    pub const fn step(&self) -> u16 {
        self.step
    }
}

impl Default for Silencer {
    fn default() -> Self {
        Self::new(DEFAULT_SILENCER_STEP)
    }
}

impl Datagram for Silencer {
    type O1 = SilencerOp;
    type O2 = NullOp;

    fn operation(self) -> Result<(Self::O1, Self::O2), AUPAInternalError> {
        Ok((Self::O1::new(self.cycle, self.step), Self::O2::default()))
    }

    fn timeout(&self) -> Option<Duration> {
        Some(DEFAULT_TIMEOUT)
    }
}

impl HeaderDatagram for Silencer {}

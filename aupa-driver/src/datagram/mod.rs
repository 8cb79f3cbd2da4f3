mod amplitudes;
mod clear;
mod gain;
mod mod_delay;
mod modulation;
mod silencer;
mod stm;
mod synchronize;
mod update_flags;
mod with_timeout;

pub use amplitudes::Amplitudes;
pub use clear::Clear;
pub use gain::{
    Gain, GainCache, GainFilter, GainTransform, IntoGainCache, IntoGainTransform,
};
pub use mod_delay::ConfigureModDelay;
pub use modulation::{
    IntoModulationCache, IntoModulationTransform, IntoRadiationPressure, Modulation,
    ModulationCache, ModulationProperty, ModulationTransform, RadiationPressure,
};
pub use silencer::Silencer;
pub use stm::{FocusSTM, GainSTM, STMProps};
pub use synchronize::Synchronize;
pub use update_flags::UpdateFlags;
pub use with_timeout::{DatagramWithTimeout, IntoDatagramWithTimeout};

use std::time::Duration;

use crate::{error::AUPAInternalError, operation::{NullOp, Operation}};

/// Datagram to be sent to devices
pub trait Datagram {
    type O1: Operation;
    type O2: Operation;

    fn operation(self) -> Result<(Self::O1, Self::O2), AUPAInternalError>;

    /// Time to wait for the acknowledgment, `None` to not wait
    fn timeout(&self) -> Option<Duration> {
        None
    }
}

/// Datagram using only the frame header (modulation, silencer)
pub trait HeaderDatagram: Datagram<O2 = NullOp> {}

/// Datagram using only the frame body (gain, STM, amplitudes)
pub trait BodyDatagram: Datagram<O1 = NullOp> {}

impl<H, B> Datagram for (H, B)
where
    H: HeaderDatagram,
    B: BodyDatagram,
{
    type O1 = H::O1;
    type O2 = B::O2;

    fn operation(self) -> Result<(Self::O1, Self::O2), AUPAInternalError> {
        let (o1, _) = self.0.operation()?;
        let (_, o2) = self.1.operation()?;
        Ok((o1, o2))
    }

    fn timeout(&self) -> Option<Duration> {
        match (self.0.timeout(), self.1.timeout()) {
            (Some(t1), Some(t2)) => Some(t1.max(t2)),
            (Some(t1), None) => Some(t1),
            (None, Some(t2)) => Some(t2),
            (None, None) => None,
        }
    }
}

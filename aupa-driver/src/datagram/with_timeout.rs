use std::time::Duration;

use super::{BodyDatagram, Datagram, HeaderDatagram};
use crate::error::AUPAInternalError;

/// Datagram with an overridden acknowledgment timeout
pub struct DatagramWithTimeout<D: Datagram> {
    datagram: D,
    timeout: Option<Duration>,
}

impl<D: Datagram> Datagram for DatagramWithTimeout<D> {
    type O1 = D::O1;
    type O2 = D::O2;

    fn operation(self) -> Result<(Self::O1, Self::O2), AUPAInternalError> {
        self.datagram.operation()
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl<D: HeaderDatagram> HeaderDatagram for DatagramWithTimeout<D> {}
impl<D: BodyDatagram> BodyDatagram for DatagramWithTimeout<D> {}

pub trait IntoDatagramWithTimeout<D: Datagram> {
    /// Set timeout; `None` sends without waiting for the acknowledgment
    fn with_timeout(self, timeout: Option<Duration>) -> DatagramWithTimeout<D>;
}

impl<D: Datagram> IntoDatagramWithTimeout<D> for D {
    fn with_timeout(self, timeout: Option<Duration>) -> DatagramWithTimeout<D> {
        DatagramWithTimeout {
            datagram: self,
            timeout,
        }
    }
}

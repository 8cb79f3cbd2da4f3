use std::time::Duration;

use itertools::Itertools;

use crate::{
    cpu::{RxMessage, TxDatagram},
    error::AUPAInternalError,
    geometry::Geometry,
};

/// Link is an interface to the devices
pub trait Link: Send {
    /// Close link
    fn close(&mut self) -> Result<(), AUPAInternalError>;
    /// Send data to devices
    fn send(&mut self, tx: &TxDatagram) -> Result<bool, AUPAInternalError>;
    /// Receive data from devices
    fn receive(&mut self, rx: &mut [RxMessage]) -> Result<bool, AUPAInternalError>;
    /// Check if link is open
    #[must_use]
    fn is_open(&self) -> bool;

    #[doc(hidden)]
    fn trace(&mut self, _timeout: Option<Duration>) {}
}

pub trait LinkBuilder {
    type L: Link;

    /// Open link
    fn open(self, geometry: &Geometry) -> Result<Self::L, AUPAInternalError>;
}

impl Link for Box<dyn Link> {
    fn close(&mut self) -> Result<(), AUPAInternalError> {
        self.as_mut().close()
    }

    fn send(&mut self, tx: &TxDatagram) -> Result<bool, AUPAInternalError> {
        self.as_mut().send(tx)
    }

    fn receive(&mut self, rx: &mut [RxMessage]) -> Result<bool, AUPAInternalError> {
        self.as_mut().receive(rx)
    }

    fn is_open(&self) -> bool {
        self.as_ref().is_open()
    }

    fn trace(&mut self, timeout: Option<Duration>) {
        self.as_mut().trace(timeout)
    }
}

/// Send frames and, with a timeout, wait until every enabled device has processed them
///
/// Returns `Ok(false)` when the acknowledgment was not seen within `timeout`.
pub fn send_receive<L: Link>(
    link: &mut L,
    geometry: &Geometry,
    tx: &TxDatagram,
    rx: &mut [RxMessage],
    timeout: Option<Duration>,
) -> Result<bool, AUPAInternalError> {
    if !link.is_open() {
        return Err(AUPAInternalError::LinkClosed);
    }

    link.trace(timeout);

    tracing::trace!(
        "send: {}",
        tx.headers().format_with(", ", |h, f| f(&format_args!(
            "(msg_id: {:#04X}, fpga: {}, cpu: {:#04X}, size: {})",
            h.msg_id,
            h.fpga_flag,
            h.cpu_flag.bits(),
            h.size
        )))
    );

    if !link.send(tx)? {
        return Err(AUPAInternalError::SendDataFailed);
    }
    match timeout {
        None => Ok(true),
        Some(timeout) => wait_msg_processed(link, geometry, tx, rx, timeout),
    }
}

/// Poll every 1 ms until every enabled device has processed the frames
pub fn wait_msg_processed<L: Link>(
    link: &mut L,
    geometry: &Geometry,
    tx: &TxDatagram,
    rx: &mut [RxMessage],
    timeout: Duration,
) -> Result<bool, AUPAInternalError> {
    let start = std::time::Instant::now();
    loop {
        if !link.is_open() {
            return Err(AUPAInternalError::LinkClosed);
        }
        let res = link.receive(rx)?;

        tracing::trace!(
            "receive: {}",
            rx.iter().format_with(", ", |r, f| f(&format_args!(
                "(ack: {:#04X}, msg_id: {:#04X})",
                r.ack(),
                r.msg_id()
            )))
        );

        if res && is_processed(geometry, tx, rx) {
            return Ok(true);
        }
        if start.elapsed() > timeout {
            return Ok(false);
        }
        std::thread::sleep(Duration::from_millis(1));
    }
}

fn is_processed(geometry: &Geometry, tx: &TxDatagram, rx: &[RxMessage]) -> bool {
    geometry.devices().all(|dev| {
        let idx = dev.idx();
        rx.get(idx)
            .is_some_and(|r| tx[idx].header.msg_id == r.msg_id())
    })
}

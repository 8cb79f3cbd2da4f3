#[cfg(feature = "async")]
mod r#async;
mod builder;
mod software_stm;

use std::time::Duration;

use aupa_driver::{
    cpu::{check_if_msg_is_processed, next_msg_id, RxMessage, TxDatagram, MSG_END},
    datagram::Datagram,
    defined::DEFAULT_TIMEOUT,
    error::AUPAInternalError,
    firmware_version::FirmwareInfo,
    fpga::FPGAState,
    geometry::Geometry,
    link::{send_receive, Link},
    operation::{FirmwareInfoOp, FirmwareInfoType, NullOp, Operation, OperationHandler},
};

use crate::{error::AUPAError, link::Nop};

#[cfg(feature = "async")]
pub use r#async::AsyncController;
pub use builder::ControllerBuilder;
pub use software_stm::{SoftwareSTM, SoftwareSTMThreadHandle, SpinSleeper, TimerStrategy};

/// Controller for AUTD3 devices
///
/// Owns the geometry and the link. The link is closed when the controller is dropped.
pub struct Controller<L: Link> {
    link: L,
    geometry: Geometry,
    tx_buf: TxDatagram,
    rx_buf: Vec<RxMessage>,
    msg_id: u8,
}

impl Controller<Nop> {
    /// Create a [`ControllerBuilder`]
    pub fn builder() -> ControllerBuilder {
        ControllerBuilder::new()
    }
}

impl<L: Link> Controller<L> {
    pub(crate) fn new(link: L, geometry: Geometry) -> Self {
        let num_devices = geometry.num_devices();
        Self {
            link,
            geometry,
            tx_buf: TxDatagram::new(num_devices),
            rx_buf: vec![RxMessage::default(); num_devices],
            msg_id: MSG_END,
        }
    }

    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn geometry_mut(&mut self) -> &mut Geometry {
        &mut self.geometry
    }

    pub const fn link(&self) -> &L {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    /// Send data to the devices
    ///
    /// The timeout of the datagram decides whether to wait for the acknowledgment.
    /// Use [`IntoDatagramWithTimeout::with_timeout`] to override it.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - every frame was sent and, with a timeout, acknowledged
    /// * `Ok(false)` - the acknowledgment was not seen within the timeout
    ///
    /// [`IntoDatagramWithTimeout::with_timeout`]: aupa_driver::datagram::IntoDatagramWithTimeout::with_timeout
    pub fn send<D: Datagram>(&mut self, s: D) -> Result<bool, AUPAError> {
        let timeout = s.timeout();
        tracing::debug!(
            "send {} (timeout: {:?})",
            tynm::type_name::<D>(),
            timeout
        );

        let (mut op1, mut op2) = s.operation()?;
        self.send_operations(&mut op1, &mut op2, timeout)
    }

    fn send_operations(
        &mut self,
        op1: &mut impl Operation,
        op2: &mut impl Operation,
        timeout: Option<Duration>,
    ) -> Result<bool, AUPAError> {
        OperationHandler::init(op1, op2, &self.geometry)?;
        loop {
            self.msg_id = next_msg_id(self.msg_id);
            OperationHandler::pack(op1, op2, &self.geometry, &mut self.tx_buf, self.msg_id)?;

            if !send_receive(
                &mut self.link,
                &self.geometry,
                &self.tx_buf,
                &mut self.rx_buf,
                timeout,
            )? {
                return Ok(false);
            }
            if OperationHandler::is_finished(op1, op2, &self.geometry) {
                return Ok(true);
            }
            if timeout.is_none() {
                std::thread::sleep(Duration::from_millis(1));
            }
        }
    }

    /// Close the link
    ///
    /// Closing an already closed controller does nothing.
    pub fn close(&mut self) -> Result<bool, AUPAError> {
        if !self.link.is_open() {
            return Ok(true);
        }
        tracing::debug!("close controller");
        self.link.close()?;
        Ok(true)
    }

    /// Get FPGA state of each device
    ///
    /// The state of a device whose `reads_fpga_info` is off is `None`.
    pub fn fpga_state(&mut self) -> Result<Vec<Option<FPGAState>>, AUPAError> {
        if !self.link.is_open() {
            return Err(AUPAInternalError::LinkClosed.into());
        }
        if !self.link.receive(&mut self.rx_buf)? {
            return Err(AUPAError::ReadFPGAStateFailed);
        }
        Ok(self
            .geometry
            .iter()
            .zip(self.rx_buf.iter())
            .map(|(dev, rx)| dev.reads_fpga_info.then(|| FPGAState::from(rx)))
            .collect())
    }

    fn fetch_firminfo(&mut self, ty: FirmwareInfoType) -> Result<Vec<u8>, AUPAError> {
        let mut op = FirmwareInfoOp::new(ty);
        let mut null = NullOp::default();
        let processed = self.send_operations(&mut op, &mut null, Some(DEFAULT_TIMEOUT))?;
        if !processed {
            return Err(AUPAError::ReadFirmwareInfoFailed(
                crate::error::ReadFirmwareInfoState(
                    check_if_msg_is_processed(&self.tx_buf, &self.rx_buf).collect(),
                ),
            ));
        }
        Ok(self.rx_buf.iter().map(|rx| rx.ack()).collect())
    }

    /// Get firmware information of each enabled device
    pub fn firmware_infos(&mut self) -> Result<Vec<FirmwareInfo>, AUPAError> {
        let cpu_major = self.fetch_firminfo(FirmwareInfoType::CPUVersionMajor)?;
        let cpu_minor = self.fetch_firminfo(FirmwareInfoType::CPUVersionMinor)?;
        let fpga_major = self.fetch_firminfo(FirmwareInfoType::FPGAVersionMajor)?;
        let fpga_minor = self.fetch_firminfo(FirmwareInfoType::FPGAVersionMinor)?;
        let fpga_functions = self.fetch_firminfo(FirmwareInfoType::FPGAFunctions)?;

        Ok(self
            .geometry
            .devices()
            .map(|dev| {
                let i = dev.idx();
                FirmwareInfo::new(
                    i,
                    cpu_major[i],
                    cpu_minor[i],
                    fpga_major[i],
                    fpga_minor[i],
                    fpga_functions[i],
                )
            })
            .collect())
    }
}

impl<L: Link> Drop for Controller<L> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::warn!("failed to close link: {}", e);
        }
    }
}

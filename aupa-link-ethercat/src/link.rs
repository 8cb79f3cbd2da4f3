use aupa_driver::{
    cpu::{RxMessage, TxDatagram},
    error::AUPAInternalError,
    link::Link,
};

use crate::{builder::EtherCATBuilder, error::EtherCATError, inner::EtherCATHandler};

/// Link to AUTD3 devices over EtherCAT
///
/// Frames are queued and written to the devices by a process data loop running on a dedicated
/// thread at the sync0 period.
pub struct EtherCAT {
    runtime: tokio::runtime::Runtime,
    handler: Option<EtherCATHandler>,
}

impl EtherCAT {
    pub fn builder() -> EtherCATBuilder {
        EtherCATBuilder::new()
    }

    pub(crate) fn open(builder: EtherCATBuilder, num_devices: usize) -> Result<Self, EtherCATError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        let handler = runtime.block_on(EtherCATHandler::open(builder, num_devices))?;
        Ok(Self {
            runtime,
            handler: Some(handler),
        })
    }
}

impl Link for EtherCAT {
    fn close(&mut self) -> Result<(), AUPAInternalError> {
        if let Some(mut handler) = self.handler.take() {
            self.runtime.block_on(handler.close());
        }
        Ok(())
    }

    fn send(&mut self, tx: &TxDatagram) -> Result<bool, AUPAInternalError> {
        match self.handler.as_ref() {
            Some(handler) if handler.is_open() => handler.send(tx),
            _ => Err(AUPAInternalError::LinkClosed),
        }
    }

    fn receive(&mut self, rx: &mut [RxMessage]) -> Result<bool, AUPAInternalError> {
        match self.handler.as_ref() {
            Some(handler) if handler.is_open() => {
                handler.receive(rx);
                Ok(true)
            }
            _ => Err(AUPAInternalError::LinkClosed),
        }
    }

    fn is_open(&self) -> bool {
        self.handler.as_ref().is_some_and(EtherCATHandler::is_open)
    }
}

impl Drop for EtherCAT {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

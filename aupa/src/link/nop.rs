use aupa_driver::{
    cpu::{RxMessage, TxDatagram},
    error::AUPAInternalError,
    geometry::Geometry,
    link::{Link, LinkBuilder},
};
use aupa_firmware_emulator::CPUEmulator;

/// Link that does nothing but acknowledging
///
/// This link is mainly used for explanation.
pub struct Nop {
    is_open: bool,
    cpus: Vec<CPUEmulator>,
}

#[derive(Default, Debug, Clone, Copy)]
pub struct NopBuilder {}

impl LinkBuilder for NopBuilder {
    type L = Nop;

    fn open(self, geometry: &Geometry) -> Result<Self::L, AUPAInternalError> {
        Ok(Nop {
            is_open: true,
            cpus: geometry
                .iter()
                .map(|dev| CPUEmulator::new(dev.idx(), dev.num_transducers()))
                .collect(),
        })
    }
}

impl Nop {
    pub const fn builder() -> NopBuilder {
        NopBuilder {}
    }
}

impl Link for Nop {
    fn close(&mut self) -> Result<(), AUPAInternalError> {
        self.is_open = false;
        Ok(())
    }

    fn send(&mut self, tx: &TxDatagram) -> Result<bool, AUPAInternalError> {
        if !self.is_open {
            return Err(AUPAInternalError::LinkClosed);
        }
        self.cpus.iter_mut().for_each(|cpu| cpu.send(tx));
        Ok(true)
    }

    fn receive(&mut self, rx: &mut [RxMessage]) -> Result<bool, AUPAInternalError> {
        if !self.is_open {
            return Err(AUPAInternalError::LinkClosed);
        }
        self.cpus.iter_mut().for_each(|cpu| {
            cpu.update();
            if let Some(r) = rx.get_mut(cpu.idx()) {
                *r = cpu.rx();
            }
        });
        Ok(true)
    }

    fn is_open(&self) -> bool {
        self.is_open
    }
}

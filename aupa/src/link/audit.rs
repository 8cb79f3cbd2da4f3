use std::time::Duration;

use derive_more::{Deref, DerefMut};

use aupa_driver::{
    cpu::{RxMessage, TxDatagram},
    error::AUPAInternalError,
    geometry::Geometry,
    link::{Link, LinkBuilder},
};
use aupa_firmware_emulator::CPUEmulator;

/// Link to in-process firmware emulators for testing
///
/// Dereferences to the per-device [`CPUEmulator`]s.
#[derive(Deref, DerefMut)]
pub struct Audit {
    is_open: bool,
    last_timeout: Option<Duration>,
    #[deref]
    #[deref_mut]
    cpus: Vec<CPUEmulator>,
    down: bool,
    broken: bool,
}

#[derive(Default, Debug, Clone, Copy)]
pub struct AuditBuilder {
    down: bool,
}

impl AuditBuilder {
    /// Open the link without acknowledging any frame until [`Audit::up`]
    pub const fn with_down(self) -> Self {
        Self { down: true }
    }
}

impl LinkBuilder for AuditBuilder {
    type L = Audit;

    fn open(self, geometry: &Geometry) -> Result<Self::L, AUPAInternalError> {
        tracing::debug!("open Audit link with {} devices", geometry.num_devices());
        Ok(Audit {
            is_open: true,
            last_timeout: None,
            cpus: geometry
                .iter()
                .map(|dev| CPUEmulator::new(dev.idx(), dev.num_transducers()))
                .collect(),
            down: self.down,
            broken: false,
        })
    }
}

impl Audit {
    pub const fn builder() -> AuditBuilder {
        AuditBuilder { down: false }
    }

    /// Timeout of the last send
    pub const fn last_timeout(&self) -> Option<Duration> {
        self.last_timeout
    }

    /// Stop acknowledging frames
    pub fn down(&mut self) {
        self.down = true;
    }

    /// Resume acknowledging frames
    pub fn up(&mut self) {
        self.down = false;
    }

    pub const fn is_down(&self) -> bool {
        self.down
    }

    /// Make every send fail
    pub fn break_down(&mut self) {
        self.broken = true;
    }

    pub fn repair(&mut self) {
        self.broken = false;
    }

    pub fn emulators(&self) -> &[CPUEmulator] {
        &self.cpus
    }

    pub fn emulators_mut(&mut self) -> &mut [CPUEmulator] {
        &mut self.cpus
    }
}

impl Link for Audit {
    fn close(&mut self) -> Result<(), AUPAInternalError> {
        self.is_open = false;
        Ok(())
    }

    fn send(&mut self, tx: &TxDatagram) -> Result<bool, AUPAInternalError> {
        if !self.is_open {
            return Err(AUPAInternalError::LinkClosed);
        }
        if self.broken {
            return Ok(false);
        }
        self.cpus.iter_mut().for_each(|cpu| cpu.send(tx));
        Ok(true)
    }

    fn receive(&mut self, rx: &mut [RxMessage]) -> Result<bool, AUPAInternalError> {
        if !self.is_open {
            return Err(AUPAInternalError::LinkClosed);
        }
        if self.broken {
            return Ok(false);
        }
        if !self.down {
            self.cpus.iter_mut().for_each(|cpu| {
                cpu.update();
                if let Some(r) = rx.get_mut(cpu.idx()) {
                    *r = cpu.rx();
                }
            });
        }
        Ok(true)
    }

    fn is_open(&self) -> bool {
        self.is_open
    }

    fn trace(&mut self, timeout: Option<Duration>) {
        self.last_timeout = timeout;
    }
}

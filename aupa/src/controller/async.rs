use std::sync::Arc;

use aupa_driver::{
    datagram::Datagram, firmware_version::FirmwareInfo, fpga::FPGAState, link::Link,
};
use tokio::sync::{Mutex, MutexGuard};

use super::Controller;
use crate::error::AUPAError;

/// Asynchronous handle of a [`Controller`]
///
/// Clones share the same controller. Calls are serialized: a second call waits until the first
/// one has finished, and the blocking link I/O runs on [`tokio::task::spawn_blocking`].
pub struct AsyncController<L: Link + 'static> {
    inner: Arc<Mutex<Controller<L>>>,
}

impl<L: Link + 'static> Clone for AsyncController<L> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<L: Link + 'static> From<Controller<L>> for AsyncController<L> {
    fn from(cnt: Controller<L>) -> Self {
        Self::new(cnt)
    }
}

impl<L: Link + 'static> AsyncController<L> {
    pub fn new(cnt: Controller<L>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cnt)),
        }
    }

    async fn run<R, F>(&self, f: F) -> Result<R, AUPAError>
    where
        R: Send + 'static,
        F: FnOnce(&mut Controller<L>) -> Result<R, AUPAError> + Send + 'static,
    {
        let mut guard = self.inner.clone().lock_owned().await;
        tokio::task::spawn_blocking(move || f(&mut guard))
            .await
            .map_err(|e| AUPAError::TaskFailed(e.to_string()))?
    }

    /// See [`Controller::send`]
    pub async fn send<D: Datagram + Send + 'static>(&self, s: D) -> Result<bool, AUPAError> {
        self.run(move |cnt| cnt.send(s)).await
    }

    /// See [`Controller::close`]
    pub async fn close(&self) -> Result<bool, AUPAError> {
        self.run(|cnt| cnt.close()).await
    }

    /// See [`Controller::fpga_state`]
    pub async fn fpga_state(&self) -> Result<Vec<Option<FPGAState>>, AUPAError> {
        self.run(|cnt| cnt.fpga_state()).await
    }

    /// See [`Controller::firmware_infos`]
    pub async fn firmware_infos(&self) -> Result<Vec<FirmwareInfo>, AUPAError> {
        self.run(|cnt| cnt.firmware_infos()).await
    }

    /// Lock the controller for direct access
    pub async fn lock(&self) -> MutexGuard<'_, Controller<L>> {
        self.inner.lock().await
    }
}

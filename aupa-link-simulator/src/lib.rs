//! Link to a visualization simulator over TCP.

mod error;
mod protocol;

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

use aupa_driver::{
    cpu::{RxMessage, TxDatagram},
    defined::DEFAULT_TIMEOUT,
    error::AUPAInternalError,
    geometry::Geometry,
    link::{Link, LinkBuilder},
};
use getset::CopyGetters;
use tokio::{
    io::AsyncWriteExt,
    net::{tcp::OwnedWriteHalf, TcpStream},
    runtime::Runtime,
    task::JoinHandle,
};

pub use error::SimulatorError;
use protocol::{close_message, geometry_message, read_frame, write_frame};

/// Link to a simulator
///
/// A background task keeps the latest input frames sent by the simulator.
pub struct Simulator {
    runtime: Runtime,
    writer: Option<OwnedWriteHalf>,
    reader: Option<JoinHandle<()>>,
    rx: Arc<Mutex<Vec<RxMessage>>>,
    timeout: Duration,
}

#[derive(Debug, Clone, Copy, CopyGetters)]
pub struct SimulatorBuilder {
    #[getset(get_copy = "pub")]
    addr: SocketAddr,
    /// Timeout of connecting and writing
    #[getset(get_copy = "pub")]
    timeout: Duration,
}

impl SimulatorBuilder {
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }
}

impl Simulator {
    pub const fn builder(addr: SocketAddr) -> SimulatorBuilder {
        SimulatorBuilder {
            addr,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    async fn connect(
        builder: SimulatorBuilder,
        geometry: &Geometry,
        rx: Arc<Mutex<Vec<RxMessage>>>,
    ) -> Result<(OwnedWriteHalf, JoinHandle<()>), SimulatorError> {
        let stream = tokio::time::timeout(builder.timeout, TcpStream::connect(builder.addr))
            .await
            .map_err(|_| SimulatorError::Timeout)??;
        stream.set_nodelay(true)?;
        let (mut read_half, mut write_half) = stream.into_split();

        tokio::time::timeout(
            builder.timeout,
            write_frame(&mut write_half, &geometry_message(geometry)),
        )
        .await
        .map_err(|_| SimulatorError::Timeout)??;

        let reader = tokio::spawn(async move {
            loop {
                match read_frame(&mut read_half).await {
                    Ok(Some(frame)) => {
                        if let Ok(mut rx) = rx.lock() {
                            protocol::decode_rx(&frame, &mut rx);
                        }
                    }
                    Ok(None) => {
                        tracing::info!("simulator closed the connection");
                        break;
                    }
                    Err(e) => {
                        tracing::error!("failed to read from simulator: {}", e);
                        break;
                    }
                }
            }
        });

        Ok((write_half, reader))
    }

    fn write(&mut self, payload: &[u8]) -> Result<(), SimulatorError> {
        let timeout = self.timeout;
        let writer = self.writer.as_mut().ok_or(SimulatorError::Closed)?;
        self.runtime.block_on(async {
            tokio::time::timeout(timeout, write_frame(writer, payload))
                .await
                .map_err(|_| SimulatorError::Timeout)??;
            Ok(())
        })
    }
}

impl LinkBuilder for SimulatorBuilder {
    type L = Simulator;

    fn open(self, geometry: &Geometry) -> Result<Self::L, AUPAInternalError> {
        tracing::info!("connecting to simulator at {}", self.addr);
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .map_err(SimulatorError::from)?;
        let rx = Arc::new(Mutex::new(vec![
            RxMessage::default();
            geometry.num_devices()
        ]));
        let (writer, reader) = runtime.block_on(Simulator::connect(self, geometry, rx.clone()))?;
        Ok(Simulator {
            runtime,
            writer: Some(writer),
            reader: Some(reader),
            rx,
            timeout: self.timeout,
        })
    }
}

impl Link for Simulator {
    fn close(&mut self) -> Result<(), AUPAInternalError> {
        let res = if self.is_open() {
            tracing::info!("closing simulator link");
            self.write(&close_message())
        } else {
            Ok(())
        };
        if let Some(mut writer) = self.writer.take() {
            let _ = self.runtime.block_on(writer.shutdown());
        }
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
        res?;
        Ok(())
    }

    fn send(&mut self, tx: &TxDatagram) -> Result<bool, AUPAInternalError> {
        if !self.is_open() {
            return Err(AUPAInternalError::LinkClosed);
        }
        self.write(tx.as_bytes())?;
        Ok(true)
    }

    fn receive(&mut self, rx: &mut [RxMessage]) -> Result<bool, AUPAInternalError> {
        if !self.is_open() {
            return Err(AUPAInternalError::LinkClosed);
        }
        let latest = self
            .rx
            .lock()
            .map_err(|_| AUPAInternalError::LinkError("receive buffer is poisoned".to_owned()))?;
        rx.iter_mut()
            .zip(latest.iter())
            .for_each(|(dst, src)| *dst = *src);
        Ok(true)
    }

    fn is_open(&self) -> bool {
        self.writer.is_some() && self.reader.as_ref().is_some_and(|r| !r.is_finished())
    }
}

impl Drop for Simulator {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

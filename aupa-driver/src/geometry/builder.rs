use super::Geometry;
use crate::{autd3_device::AUTD3, error::AUPAInternalError, fpga::TransMode};

/// Accumulates device poses and builds a [`Geometry`]
#[derive(Default)]
pub struct GeometryBuilder {
    devices: Vec<AUTD3>,
    mode: TransMode,
}

impl GeometryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a device and return its index
    pub fn add_device(&mut self, dev: AUTD3) -> usize {
        self.devices.push(dev);
        self.devices.len() - 1
    }

    pub fn with_mode(self, mode: TransMode) -> Self {
        Self { mode, ..self }
    }

    pub fn set_mode(&mut self, mode: TransMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> TransMode {
        self.mode
    }

    pub fn devices(&self) -> &[AUTD3] {
        &self.devices
    }

    pub fn build(self) -> Result<Geometry, AUPAInternalError> {
        if self.devices.is_empty() {
            return Err(AUPAInternalError::GeometryBuild(
                "no device was added".to_owned(),
            ));
        }
        if let Some(idx) = self.devices.iter().position(|dev| !dev.is_finite()) {
            return Err(AUPAInternalError::GeometryBuild(format!(
                "pose of device {} is not finite",
                idx
            )));
        }
        let mut offset = 0;
        let devices = self
            .devices
            .iter()
            .enumerate()
            .map(|(i, dev)| {
                let dev = dev.into_device(i, offset);
                offset += dev.num_transducers();
                dev
            })
            .collect();
        Ok(Geometry::new(devices, self.mode))
    }
}

mod builder;
mod device;
mod rotation;
mod transducer;

pub type Vector3 = nalgebra::Vector3<f64>;
pub type UnitVector3 = nalgebra::UnitVector3<f64>;
pub type Quaternion = nalgebra::Quaternion<f64>;
pub type UnitQuaternion = nalgebra::UnitQuaternion<f64>;
pub type Matrix3 = nalgebra::Matrix3<f64>;

pub use builder::GeometryBuilder;
pub use device::*;
pub use rotation::*;
pub use transducer::*;

use std::ops::{Deref, DerefMut};

use crate::{error::AUPAInternalError, fpga::TransMode};

pub struct Geometry {
    devices: Vec<Device>,
    mode: TransMode,
}

impl Geometry {
    #[doc(hidden)]
    pub const fn new(devices: Vec<Device>, mode: TransMode) -> Geometry {
        Self { devices, mode }
    }

    pub const fn mode(&self) -> TransMode {
        self.mode
    }

    /// Get the number of devices
    pub fn num_devices(&self) -> usize {
        self.devices.len()
    }

    /// Get the number of total transducers
    pub fn num_transducers(&self) -> usize {
        self.devices.iter().map(|dev| dev.num_transducers()).sum()
    }

    /// Get center position of all devices
    pub fn center(&self) -> Vector3 {
        self.devices.iter().map(|d| d.center()).sum::<Vector3>() / self.devices.len() as f64
    }

    /// Enumerate enabled devices
    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.devices.iter().filter(|dev| dev.enable)
    }

    /// Enumerate enabled devices mutably
    pub fn devices_mut(&mut self) -> impl Iterator<Item = &mut Device> {
        self.devices.iter_mut().filter(|dev| dev.enable)
    }

    pub fn get(&self, idx: usize) -> Result<&Device, AUPAInternalError> {
        self.devices
            .get(idx)
            .ok_or(AUPAInternalError::DeviceIndexOutOfRange(
                idx,
                self.devices.len(),
            ))
    }

    pub fn get_mut(&mut self, idx: usize) -> Result<&mut Device, AUPAInternalError> {
        let n = self.devices.len();
        self.devices
            .get_mut(idx)
            .ok_or(AUPAInternalError::DeviceIndexOutOfRange(idx, n))
    }

    /// Get a transducer by its global index
    pub fn transducer(&self, global_idx: usize) -> Result<&Transducer, AUPAInternalError> {
        let mut idx = global_idx;
        for dev in &self.devices {
            if idx < dev.num_transducers() {
                return dev.get(idx);
            }
            idx -= dev.num_transducers();
        }
        Err(AUPAInternalError::TransducerIndexOutOfRange(
            global_idx,
            self.num_transducers(),
        ))
    }

    /// Set speed of sound of all devices
    ///
    /// # Arguments
    ///
    /// * `c` - Speed of sound in mm/s
    ///
    pub fn set_sound_speed(&mut self, c: f64) {
        self.devices.iter_mut().for_each(|dev| dev.sound_speed = c);
    }

    /// Set speed of sound of all devices from temperature
    ///
    /// # Arguments
    ///
    /// * `temp` - Temperature in Celsius
    ///
    pub fn set_sound_speed_from_temp(&mut self, temp: f64) {
        self.devices
            .iter_mut()
            .for_each(|dev| dev.set_sound_speed_from_temp(temp));
    }

    pub fn set_sound_speed_from_temp_with(&mut self, temp: f64, k: f64, r: f64, m: f64) {
        self.devices
            .iter_mut()
            .for_each(|dev| dev.set_sound_speed_from_temp_with(temp, k, r, m));
    }
}

impl Deref for Geometry {
    type Target = [Device];

    fn deref(&self) -> &Self::Target {
        &self.devices
    }
}

impl DerefMut for Geometry {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.devices
    }
}

impl<'a> IntoIterator for &'a Geometry {
    type Item = &'a Device;
    type IntoIter = std::slice::Iter<'a, Device>;

    fn into_iter(self) -> Self::IntoIter {
        self.devices.iter()
    }
}

impl<'a> IntoIterator for &'a mut Geometry {
    type Item = &'a mut Device;
    type IntoIter = std::slice::IterMut<'a, Device>;

    fn into_iter(self) -> Self::IntoIter {
        self.devices.iter_mut()
    }
}

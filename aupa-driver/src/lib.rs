pub mod autd3_device;
pub mod common;
pub mod cpu;
pub mod datagram;
pub mod defined;
pub mod error;
pub mod firmware_version;
pub mod fpga;
pub mod geometry;
pub mod link;
pub mod operation;

pub mod derive {
    pub use crate::{
        common::{Drive, EmitIntensity, Phase, SamplingConfig},
        datagram::{
            BodyDatagram, Datagram, Gain, GainCache, GainFilter, GainTransform, HeaderDatagram,
            IntoGainCache, IntoGainTransform, IntoModulationCache, IntoModulationTransform,
            IntoRadiationPressure, Modulation, ModulationCache, ModulationProperty,
            ModulationTransform, RadiationPressure,
        },
        defined::DEFAULT_TIMEOUT,
        error::AUPAInternalError,
        geometry::{Device, Geometry, Transducer},
        operation::{GainOp, ModulationOp, NullOp, Operation},
    };
    pub use aupa_derive::{Gain, Modulation};
    pub use std::collections::HashMap;
}

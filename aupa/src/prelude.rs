#[cfg(feature = "async")]
pub use crate::controller::AsyncController;
pub use crate::{
    controller::{Controller, ControllerBuilder, SoftwareSTM, SpinSleeper, TimerStrategy},
    datagram::Stop,
    error::AUPAError,
    gain::{Bessel, Focus, Group, Null, Plane, TransducerTest, Uniform},
    link::{Audit, Nop},
    modulation::{Fir, Fourier, IntoFir, Sine, SineLegacy, SineSquared, Square, Static},
};

pub use aupa_driver::{
    autd3_device::AUTD3,
    common::{Drive, EmitIntensity, Phase, Rad, SamplingConfig},
    datagram::{
        Amplitudes, Clear, ConfigureModDelay, FocusSTM, Gain, GainCache, GainFilter, GainSTM,
        GainTransform, IntoDatagramWithTimeout, IntoGainCache, IntoGainTransform,
        IntoModulationCache, IntoModulationTransform, IntoRadiationPressure, Modulation,
        ModulationCache, ModulationProperty, ModulationTransform, RadiationPressure, Silencer,
        Synchronize, UpdateFlags,
    },
    defined::{METER, MILLIMETER, PI},
    error::AUPAInternalError,
    firmware_version::{FirmwareInfo, FirmwareVersion},
    fpga::{FPGAState, TransMode},
    geometry::*,
    link::{Link, LinkBuilder},
    operation::{ControlPoint, GainSTMMode},
};

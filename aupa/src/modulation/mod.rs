mod fir;
mod fourier;
mod sine;
mod sine_legacy;
mod sine_squared;
mod square;
mod r#static;

pub use fir::{Fir, IntoFir};
pub use fourier::Fourier;
pub use r#static::Static;
pub use sine::Sine;
pub use sine_legacy::SineLegacy;
pub use sine_squared::SineSquared;
pub use square::Square;

pub use aupa_driver::datagram::{
    IntoModulationCache as IntoCache, IntoModulationTransform as IntoTransform,
    IntoRadiationPressure, ModulationCache as Cache, ModulationTransform as Transform,
    RadiationPressure,
};

use aupa_driver::{common::SamplingConfig, error::AUPAInternalError};

/// Integer sampling frequency of `config`, required for exact-period waveforms
fn integer_sampling_freq(config: SamplingConfig) -> Result<usize, AUPAInternalError> {
    let sf = config.frequency();
    if sf.fract() != 0.0 {
        return Err(AUPAInternalError::ModulationError(format!(
            "Sampling frequency ({}) must be integer",
            sf
        )));
    }
    Ok(sf as usize)
}

mod drive;
mod emit_intensity;
mod phase;
mod sampling_config;

pub use drive::Drive;
pub use emit_intensity::EmitIntensity;
pub use phase::{Phase, Rad};
pub use sampling_config::SamplingConfig;

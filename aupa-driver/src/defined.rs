use std::time::Duration;

pub use std::f64::consts::PI;

pub const METER: f64 = 1000.0;
pub const MILLIMETER: f64 = METER / 1000.0;

/// Default ultrasound frequency with the default cycle
pub const ULTRASOUND_FREQUENCY: f64 =
    crate::fpga::FPGA_CLK_FREQ as f64 / crate::fpga::DEFAULT_CYCLE as f64;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(200);

/// Temperature offset between Celsius and Kelvin
pub const ABSOLUTE_ZERO_CELSIUS: f64 = 273.15;

pub const DEFAULT_SOUND_SPEED: f64 = 340.0 * METER;

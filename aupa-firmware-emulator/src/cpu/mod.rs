mod emulator;
mod operation;

pub use emulator::CPUEmulator;

pub(crate) const CPU_VERSION_MAJOR: u8 = 0x89;
pub(crate) const CPU_VERSION_MINOR: u8 = 0x00;
pub(crate) const FPGA_VERSION_MAJOR: u8 = 0x89;
pub(crate) const FPGA_VERSION_MINOR: u8 = 0x00;

pub mod cpu;
pub mod fpga;

pub use cpu::CPUEmulator;
pub use fpga::FPGAEmulator;

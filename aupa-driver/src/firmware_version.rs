use std::fmt;

/// Version number pair as reported by the firmware
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FirmwareVersion {
    pub major: u8,
    pub minor: u8,
}

impl FirmwareVersion {
    pub const LATEST: Self = Self {
        major: 0x89,
        minor: 0x00,
    };

    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.major {
            0 => write!(f, "older than v0.4"),
            0x01..=0x06 => write!(f, "v0.{}", self.major + 3),
            0x0A..=0x15 => write!(f, "v1.{}", self.major - 0x0A),
            0x80..=0x89 => write!(f, "v2.{}.{}", self.major - 0x80, self.minor),
            v => write!(f, "unknown ({})", v),
        }
    }
}

/// Firmware information of a device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirmwareInfo {
    idx: usize,
    cpu: FirmwareVersion,
    fpga: FirmwareVersion,
    fpga_function_bits: u8,
}

impl FirmwareInfo {
    /// Set in the FPGA function bits when the FPGA is emulated
    pub const ENABLED_EMULATOR_BIT: u8 = 1 << 7;

    #[doc(hidden)]
    pub const fn new(
        idx: usize,
        cpu_major: u8,
        cpu_minor: u8,
        fpga_major: u8,
        fpga_minor: u8,
        fpga_function_bits: u8,
    ) -> Self {
        Self {
            idx,
            cpu: FirmwareVersion::new(cpu_major, cpu_minor),
            fpga: FirmwareVersion::new(fpga_major, fpga_minor),
            fpga_function_bits,
        }
    }

    pub const fn idx(&self) -> usize {
        self.idx
    }

    pub const fn cpu(&self) -> FirmwareVersion {
        self.cpu
    }

    pub const fn fpga(&self) -> FirmwareVersion {
        self.fpga
    }

    pub const fn fpga_function_bits(&self) -> u8 {
        self.fpga_function_bits
    }

    pub const fn is_emulator(&self) -> bool {
        self.fpga_function_bits & Self::ENABLED_EMULATOR_BIT != 0
    }

    /// Whether both CPU and FPGA run the version this library targets
    pub fn is_latest(&self) -> bool {
        self.cpu == FirmwareVersion::LATEST && self.fpga == FirmwareVersion::LATEST
    }
}

impl fmt::Display for FirmwareInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: CPU = {}, FPGA = {}", self.idx, self.cpu, self.fpga)?;
        if self.is_emulator() {
            write!(f, " [Emulator]")?;
        }
        Ok(())
    }
}

use ethercrab::{Command, MainDevice, RegisterAddress, SubDevicePdi, SubDeviceRef};

/// AL status of a subdevice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct State(u16);

impl State {
    pub const NONE: Self = Self(0x00);
    pub const INIT: Self = Self(0x01);
    pub const PRE_OP: Self = Self(0x02);
    pub const SAFE_OP: Self = Self(0x04);
    pub const OPERATIONAL: Self = Self(0x08);
    pub const ACK: Self = Self(0x10);
    pub const ERROR: Self = Self(0x10);

    pub const fn value(self) -> u16 {
        self.0
    }

    pub const fn without_error(self) -> Self {
        Self(self.0 & !Self::ERROR.0)
    }

    pub const fn is_safe_op(self) -> bool {
        self.without_error().0 == Self::SAFE_OP.0
    }

    pub const fn is_error(self) -> bool {
        self.0 & Self::ERROR.0 != 0
    }

    pub const fn with_ack(self) -> Self {
        Self(self.0 | Self::ACK.0)
    }
}

impl From<u16> for State {
    fn from(state: u16) -> Self {
        Self(state)
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.without_error() {
            Self::NONE => write!(f, "NONE")?,
            Self::INIT => write!(f, "INIT")?,
            Self::PRE_OP => write!(f, "PRE-OP")?,
            Self::SAFE_OP => write!(f, "SAFE-OP")?,
            Self::OPERATIONAL => write!(f, "OP")?,
            s => return write!(f, "UNKNOWN ({})", s.0),
        }
        if self.is_error() {
            write!(f, " + ERROR")
        } else {
            Ok(())
        }
    }
}

pub(crate) trait SubDeviceStateExt {
    async fn read_state(&self) -> Result<State, ethercrab::error::Error>;
    async fn write_state(
        &self,
        main_device: &MainDevice<'_>,
        state: State,
    ) -> Result<u16, ethercrab::error::Error>;
}

impl<const N: usize> SubDeviceStateExt for SubDeviceRef<'_, SubDevicePdi<'_, N>> {
    async fn read_state(&self) -> Result<State, ethercrab::error::Error> {
        self.register_read::<u16>(RegisterAddress::AlStatus)
            .await
            .map(State::from)
    }

    async fn write_state(
        &self,
        main_device: &MainDevice<'_>,
        state: State,
    ) -> Result<u16, ethercrab::error::Error> {
        Command::fpwr(self.configured_address(), RegisterAddress::AlControl.into())
            .send_receive::<u16>(main_device, state.value())
            .await
    }
}

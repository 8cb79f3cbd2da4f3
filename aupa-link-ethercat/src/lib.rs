//! EtherCAT link for AUTD3 devices using [EtherCrab](https://github.com/ethercrab-rs/ethercrab).

mod builder;
mod error;
mod inner;
mod link;
mod status;

pub use builder::{EtherCATBuilder, TimerStrategy};
pub use error::EtherCATError;
pub use ethercrab::{MainDeviceConfig, Timeouts};
pub use link::EtherCAT;
pub use status::Status;
pub use thread_priority;

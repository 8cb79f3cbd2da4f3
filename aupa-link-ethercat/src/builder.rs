use std::time::Duration;

use aupa_driver::{error::AUPAInternalError, geometry::Geometry, link::LinkBuilder};
use ethercrab::{MainDeviceConfig, RetryBehaviour, Timeouts};
use spin_sleep::SpinSleeper;
use thread_priority::{ThreadBuilder, ThreadPriority};

use crate::{link::EtherCAT, status::Status};

pub(crate) type OnLostCallback = Box<dyn Fn(&str) + Send + Sync + 'static>;
pub(crate) type OnErrCallback = Box<dyn Fn(usize, Status) + Send + Sync + 'static>;

/// How the process data loop waits for the next cycle
#[derive(Debug, Clone, Copy, Default)]
pub enum TimerStrategy {
    /// [`std::thread::sleep`]
    Sleep,
    /// See [`SpinSleeper`]
    #[default]
    SpinSleep,
}

impl TimerStrategy {
    pub(crate) fn sleep(&self, duration: Duration) {
        match self {
            TimerStrategy::Sleep => std::thread::sleep(duration),
            TimerStrategy::SpinSleep => SpinSleeper::default().sleep(duration),
        }
    }
}

/// Builder for [`EtherCAT`]
pub struct EtherCATBuilder {
    pub(crate) ifname: Option<String>,
    pub(crate) buf_size: usize,
    pub(crate) sync0_period: Duration,
    pub(crate) sync_tolerance: Duration,
    pub(crate) sync_timeout: Duration,
    pub(crate) state_check_interval: Duration,
    pub(crate) timeouts: Timeouts,
    pub(crate) main_device_config: MainDeviceConfig,
    pub(crate) timer_strategy: TimerStrategy,
    pub(crate) thread_builder: ThreadBuilder,
    pub(crate) on_lost: Option<OnLostCallback>,
    pub(crate) on_err: Option<OnErrCallback>,
}

impl Default for EtherCATBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EtherCATBuilder {
    pub fn new() -> Self {
        Self {
            ifname: None,
            buf_size: 32,
            sync0_period: Duration::from_millis(1),
            sync_tolerance: Duration::from_micros(1),
            sync_timeout: Duration::from_secs(10),
            state_check_interval: Duration::from_millis(100),
            timeouts: Timeouts {
                state_transition: Duration::from_secs(10),
                pdu: Duration::from_millis(100),
                wait_loop_delay: Duration::ZERO,
                ..Default::default()
            },
            main_device_config: MainDeviceConfig {
                dc_static_sync_iterations: 10000,
                retry_behaviour: RetryBehaviour::None,
            },
            timer_strategy: TimerStrategy::default(),
            #[cfg(target_os = "windows")]
            thread_builder: ThreadBuilder::default()
                .name("aupa-ethercat")
                .priority(ThreadPriority::Max),
            #[cfg(not(target_os = "windows"))]
            thread_builder: ThreadBuilder::default()
                .name("aupa-ethercat")
                .priority(ThreadPriority::Max)
                .policy(thread_priority::ThreadSchedulePolicy::Realtime(
                    thread_priority::RealtimeThreadSchedulePolicy::Fifo,
                )),
            on_lost: None,
            on_err: None,
        }
    }

    /// Set network interface name
    ///
    /// If not set, every interface is scanned for AUTD3 devices.
    pub fn with_ifname(self, ifname: impl Into<String>) -> Self {
        Self {
            ifname: Some(ifname.into()),
            ..self
        }
    }

    /// Set send queue size
    pub fn with_buf_size(self, buf_size: usize) -> Self {
        Self { buf_size, ..self }
    }

    /// Set period of the sync0 signal, which is also the period of the process data loop
    pub fn with_sync0_period(self, sync0_period: Duration) -> Self {
        Self {
            sync0_period,
            ..self
        }
    }

    /// Set tolerance of the distributed clock alignment
    pub fn with_sync_tolerance(self, sync_tolerance: Duration) -> Self {
        Self {
            sync_tolerance,
            ..self
        }
    }

    pub fn with_sync_timeout(self, sync_timeout: Duration) -> Self {
        Self {
            sync_timeout,
            ..self
        }
    }

    pub fn with_state_check_interval(self, state_check_interval: Duration) -> Self {
        Self {
            state_check_interval,
            ..self
        }
    }

    /// See [`Timeouts`]
    pub fn with_timeouts(self, timeouts: Timeouts) -> Self {
        Self { timeouts, ..self }
    }

    pub fn with_timer_strategy(self, timer_strategy: TimerStrategy) -> Self {
        Self {
            timer_strategy,
            ..self
        }
    }

    /// Set builder of the process data thread
    pub fn with_thread_builder(self, thread_builder: ThreadBuilder) -> Self {
        Self {
            thread_builder,
            ..self
        }
    }

    /// Set callback invoked once when a device is lost
    pub fn with_on_lost(self, on_lost: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Self {
            on_lost: Some(Box::new(on_lost)),
            ..self
        }
    }

    /// Set callback invoked on recoverable state changes of a device
    pub fn with_on_err(self, on_err: impl Fn(usize, Status) + Send + Sync + 'static) -> Self {
        Self {
            on_err: Some(Box::new(on_err)),
            ..self
        }
    }
}

impl LinkBuilder for EtherCATBuilder {
    type L = EtherCAT;

    fn open(self, geometry: &Geometry) -> Result<Self::L, AUPAInternalError> {
        Ok(EtherCAT::open(self, geometry.num_devices())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder() {
        let builder = EtherCAT::builder();
        assert_eq!(None, builder.ifname);
        assert_eq!(32, builder.buf_size);
        assert_eq!(Duration::from_millis(1), builder.sync0_period);
        assert!(builder.on_lost.is_none());
        assert!(builder.on_err.is_none());

        let builder = builder
            .with_ifname("eth0")
            .with_buf_size(8)
            .with_sync0_period(Duration::from_millis(2))
            .with_state_check_interval(Duration::from_millis(50))
            .with_timer_strategy(TimerStrategy::Sleep)
            .with_on_lost(|msg| tracing::error!("{}", msg))
            .with_on_err(|idx, status| tracing::warn!("device {}: {}", idx, status));
        assert_eq!(Some("eth0".to_owned()), builder.ifname);
        assert_eq!(8, builder.buf_size);
        assert_eq!(Duration::from_millis(2), builder.sync0_period);
        assert_eq!(Duration::from_millis(50), builder.state_check_interval);
        assert!(matches!(builder.timer_strategy, TimerStrategy::Sleep));
        assert!(builder.on_lost.is_some());
        assert!(builder.on_err.is_some());
    }
}

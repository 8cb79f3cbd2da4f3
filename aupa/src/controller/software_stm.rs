use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::JoinHandle,
    time::{Duration, Instant},
};

use aupa_driver::link::Link;
pub use spin_sleep::SpinSleeper;

use super::Controller;
use crate::error::AUPAError;

/// How the software STM thread waits for the next step
#[derive(Debug, Clone, Copy, Default)]
pub enum TimerStrategy {
    /// [`std::thread::sleep`]
    #[default]
    Sleep,
    /// Spin until the deadline
    BusyWait,
    /// OS sleep followed by a spin, see [`SpinSleeper`]
    NativeTimer(SpinSleeper),
}

trait Sleeper {
    fn sleep_until(&self, deadline: Instant);
}

struct StdSleeper;

impl Sleeper for StdSleeper {
    fn sleep_until(&self, deadline: Instant) {
        std::thread::sleep(deadline.saturating_duration_since(Instant::now()));
    }
}

struct BusyWaitSleeper;

impl Sleeper for BusyWaitSleeper {
    fn sleep_until(&self, deadline: Instant) {
        while Instant::now() < deadline {
            std::hint::spin_loop();
        }
    }
}

impl Sleeper for SpinSleeper {
    fn sleep_until(&self, deadline: Instant) {
        self.sleep(deadline.saturating_duration_since(Instant::now()));
    }
}

/// Software spatio-temporal modulation
///
/// The callback runs on a dedicated thread at a fixed interval and receives the step index and
/// the elapsed time since start. Returning `false` stops the thread.
pub struct SoftwareSTM<L, F>
where
    L: Link + 'static,
    F: FnMut(&mut Controller<L>, usize, Duration) -> bool + Send + 'static,
{
    controller: Controller<L>,
    callback: F,
    timer_strategy: TimerStrategy,
}

impl<L: Link + 'static> Controller<L> {
    /// Create a [`SoftwareSTM`] taking over this controller
    pub fn software_stm<F>(self, callback: F) -> SoftwareSTM<L, F>
    where
        F: FnMut(&mut Controller<L>, usize, Duration) -> bool + Send + 'static,
    {
        SoftwareSTM {
            controller: self,
            callback,
            timer_strategy: TimerStrategy::default(),
        }
    }
}

impl<L, F> SoftwareSTM<L, F>
where
    L: Link + 'static,
    F: FnMut(&mut Controller<L>, usize, Duration) -> bool + Send + 'static,
{
    pub fn with_timer_strategy(self, timer_strategy: TimerStrategy) -> Self {
        Self {
            timer_strategy,
            ..self
        }
    }

    pub const fn timer_strategy(&self) -> TimerStrategy {
        self.timer_strategy
    }

    /// Start the thread
    ///
    /// # Arguments
    ///
    /// * `interval` - Interval between two callbacks, must not be zero
    pub fn start(self, interval: Duration) -> Result<SoftwareSTMThreadHandle<L>, AUPAError> {
        if interval.is_zero() {
            return Err(AUPAError::SoftwareSTM(
                "interval must not be zero".to_owned(),
            ));
        }

        let Self {
            controller,
            callback,
            timer_strategy,
        } = self;

        tracing::debug!(
            "start software STM (interval: {:?}, strategy: {:?})",
            interval,
            timer_strategy
        );

        let run = Arc::new(AtomicBool::new(true));
        let handle = {
            let run = run.clone();
            std::thread::Builder::new()
                .name("aupa-software-stm".to_owned())
                .spawn(move || match timer_strategy {
                    TimerStrategy::Sleep => {
                        run_loop(controller, callback, interval, &run, StdSleeper)
                    }
                    TimerStrategy::BusyWait => {
                        run_loop(controller, callback, interval, &run, BusyWaitSleeper)
                    }
                    TimerStrategy::NativeTimer(sleeper) => {
                        run_loop(controller, callback, interval, &run, sleeper)
                    }
                })
                .map_err(|e| AUPAError::SoftwareSTM(e.to_string()))?
        };

        Ok(SoftwareSTMThreadHandle { run, handle })
    }
}

fn run_loop<L, F, S>(
    mut controller: Controller<L>,
    mut callback: F,
    interval: Duration,
    run: &AtomicBool,
    sleeper: S,
) -> Controller<L>
where
    L: Link,
    F: FnMut(&mut Controller<L>, usize, Duration) -> bool,
    S: Sleeper,
{
    let start = Instant::now();
    let mut deadline = start;
    let mut i = 0;
    while run.load(Ordering::Acquire) {
        if !callback(&mut controller, i, start.elapsed()) {
            tracing::debug!("software STM stopped by callback at step {}", i);
            break;
        }
        i += 1;
        deadline += interval;
        sleeper.sleep_until(deadline);
    }
    controller
}

/// Handle of a running [`SoftwareSTM`] thread
pub struct SoftwareSTMThreadHandle<L: Link + 'static> {
    run: Arc<AtomicBool>,
    handle: JoinHandle<Controller<L>>,
}

impl<L: Link + 'static> SoftwareSTMThreadHandle<L> {
    /// Check if the callback has stopped the thread
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop the thread and give the controller back
    pub fn finish(self) -> Result<Controller<L>, AUPAError> {
        self.run.store(false, Ordering::Release);
        self.handle
            .join()
            .map_err(|_| AUPAError::SoftwareSTM("software STM thread panicked".to_owned()))
    }
}

//! Fixed-interval scheduler.
//!
//! Runs a [`Tick`] on its own thread once per interval. Each iteration fixes
//! its deadline *before* calling the tick, so the tick's own runtime is
//! absorbed into the interval instead of adding to it. A tick that overruns
//! is followed immediately by the next one; missed intervals are not replayed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::core::{Flow, Tick};
use crate::error::SchedulerError;

/// Cooperative cancellation for a running scheduler.
///
/// Observed at the top of each iteration; a tick in progress always finishes.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunReport {
    /// Ticks executed.
    pub ticks: u64,
    /// Ticks that finished after their deadline.
    pub overruns: u64,
}

/// Drives a [`Tick`] at a fixed interval on a dedicated thread.
#[derive(Debug)]
pub struct Scheduler {
    interval: Duration,
    stop: StopHandle,
}

impl Scheduler {
    /// Rejects a zero interval.
    pub fn new(interval: Duration) -> Result<Self, SchedulerError> {
        if interval.is_zero() {
            return Err(SchedulerError::InvalidInterval);
        }
        Ok(Self {
            interval,
            stop: StopHandle::default(),
        })
    }

    /// Handle that stops the loop from any thread.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Start ticking on a new thread.
    pub fn start<T>(self, ticker: T) -> Result<SchedulerHandle<T>, SchedulerError>
    where
        T: Tick + Send + 'static,
    {
        let Scheduler { interval, stop } = self;
        let loop_stop = stop.clone();
        let join = thread::Builder::new()
            .name("scene-tick".into())
            .spawn(move || run_loop(ticker, interval, &loop_stop))
            .map_err(SchedulerError::Spawn)?;

        tracing::info!(interval_ms = interval.as_millis() as u64, "scheduler started");
        Ok(SchedulerHandle { join, stop })
    }

    /// Start ticking and block until the loop ends.
    pub fn run<T>(self, ticker: T) -> Result<(T, RunReport), SchedulerError>
    where
        T: Tick + Send + 'static,
    {
        self.start(ticker)?.join()
    }
}

/// A running scheduler thread.
#[derive(Debug)]
pub struct SchedulerHandle<T> {
    join: JoinHandle<(T, RunReport)>,
    stop: StopHandle,
}

impl<T> SchedulerHandle<T> {
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Wait for the loop to end and take the ticker back.
    pub fn join(self) -> Result<(T, RunReport), SchedulerError> {
        let (ticker, report) = self.join.join().map_err(|_| SchedulerError::TickPanicked)?;
        tracing::info!(
            ticks = report.ticks,
            overruns = report.overruns,
            "scheduler stopped"
        );
        Ok((ticker, report))
    }
}

fn run_loop<T: Tick>(mut ticker: T, interval: Duration, stop: &StopHandle) -> (T, RunReport) {
    let mut report = RunReport::default();

    while !stop.is_stopped() {
        let deadline = Instant::now() + interval;
        let flow = ticker.tick();
        report.ticks += 1;

        if flow == Flow::Stop {
            stop.stop();
            break;
        }

        let now = Instant::now();
        match deadline.checked_duration_since(now) {
            Some(remaining) if !remaining.is_zero() => thread::sleep(remaining),
            _ => {
                report.overruns += 1;
                tracing::debug!(
                    late_us = now.duration_since(deadline).as_micros() as u64,
                    tick = report.ticks,
                    "tick overran its interval"
                );
            }
        }
    }

    (ticker, report)
}

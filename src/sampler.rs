//! Clock/Sampler — fixed-period tick source on a dedicated thread.
//!
//! Runs an `edge-executor` [`LocalExecutor`](edge_executor::LocalExecutor)
//! on its own thread.  The tick future races an `async-io-mini` reactor
//! timer against an `embassy-sync` stop [`Signal`], so a stop request
//! wakes the thread immediately instead of waiting out the period.
//!
//! ```text
//!  ┌──────────────────────────────────────────────┐
//!  │  Sampler thread                               │
//!  │  block_on(executor.run(..))                   │
//!  │    loop {                                     │
//!  │      or(Timer::after(period), stop.wait())    │
//!  │        ├─ timer fired  → on_tick()            │
//!  │        └─ stop fired   → exit                 │
//!  │    }                                          │
//!  └──────────────────────────────────────────────┘
//! ```
//!
//! The first tick fires one full period after `start`, never immediately.
//! `stop` joins the thread, so once it returns no tick is in flight and
//! none will follow.

use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use core::time::Duration;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use log::{debug, info, warn};

use crate::error::{Error, Result};

const THREAD_NAME: &str = "binsense-sampler";

struct Shared {
    running: AtomicBool,
    stop: Signal<CriticalSectionRawMutex, ()>,
    ticks: AtomicU64,
}

/// Handle to a running periodic tick source.
///
/// Dropping the handle stops the sampler.
pub struct Sampler {
    shared: Arc<Shared>,
    handle: Option<JoinHandle<()>>,
    period: Duration,
}

impl Sampler {
    /// Begin calling `on_tick` every `period`, starting one period from now.
    ///
    /// An `Err` from `on_tick` is logged and the loop keeps going.
    /// Fails with [`Error::SchedulingUnavailable`] when `period` is zero
    /// or the timer thread cannot be created.
    pub fn start<F>(period: Duration, on_tick: F) -> Result<Self>
    where
        F: FnMut() -> Result<()> + Send + 'static,
    {
        if period.is_zero() {
            return Err(Error::SchedulingUnavailable("sampling period must be non-zero"));
        }

        let shared = Arc::new(Shared {
            running: AtomicBool::new(true),
            stop: Signal::new(),
            ticks: AtomicU64::new(0),
        });

        let worker = shared.clone();
        let handle = thread::Builder::new()
            .name(THREAD_NAME.into())
            .spawn(move || run_sampler(&worker, period, on_tick))
            .map_err(|_| Error::SchedulingUnavailable("failed to spawn sampler thread"))?;

        info!("Sampler started (period {} ms)", period.as_millis());
        Ok(Self {
            shared,
            handle: Some(handle),
            period,
        })
    }

    /// Cancel all future ticks.  Safe to call repeatedly.
    ///
    /// Blocks until an in-flight tick finishes.  Called from inside a
    /// tick, it only flags the loop to exit after the current tick.
    pub fn stop(&mut self) {
        self.shared.running.store(false, Ordering::Release);
        self.shared.stop.signal(());

        let Some(handle) = self.handle.take() else {
            return;
        };
        if handle.thread().id() == thread::current().id() {
            debug!("Sampler stop requested from its own thread; not joining");
            return;
        }
        if handle.join().is_err() {
            warn!("Sampler thread panicked");
        }
        info!(
            "Sampler stopped after {} tick(s)",
            self.shared.ticks.load(Ordering::Acquire)
        );
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some() && self.shared.running.load(Ordering::Acquire)
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Ticks delivered so far.
    pub fn tick_count(&self) -> u64 {
        self.shared.ticks.load(Ordering::Acquire)
    }
}

impl Drop for Sampler {
    fn drop(&mut self) {
        self.stop();
    }
}

// ── Thread body ──────────────────────────────────────────────

fn run_sampler<F>(shared: &Shared, period: Duration, mut on_tick: F)
where
    F: FnMut() -> Result<()>,
{
    let executor: edge_executor::LocalExecutor<'_, 2> = edge_executor::LocalExecutor::new();

    let ticker = async {
        loop {
            let fired = futures_lite::future::or(
                async {
                    async_io_mini::Timer::after(period).await;
                    true
                },
                async {
                    shared.stop.wait().await;
                    false
                },
            )
            .await;

            if !fired || !shared.running.load(Ordering::Acquire) {
                break;
            }

            shared.ticks.fetch_add(1, Ordering::AcqRel);
            if let Err(e) = on_tick() {
                warn!("Sampling cycle failed: {} (continuing)", e);
            }
        }
    };

    futures_lite::future::block_on(executor.run(ticker));
    debug!("Sampler loop exited");
}

//! Fixed-period countdown ticks for Impostor.
//!
//! A [`Countdown`] is the session's single timer handle: it fires once per
//! period and tags every tick with the session generation it was armed
//! for. Dropping the countdown cancels it; there is nothing else to clean up.
//!
//! # Disarmed slots
//!
//! The session actor keeps an `Option<Countdown>`. [`next_tick`] waits on
//! that slot and pends forever while it is `None`, so a `tokio::select!`
//! loop only ever sees ticks from a live countdown:
//!
//! ```ignore
//! loop {
//!     tokio::select! {
//!         Some(cmd) = cmd_rx.recv() => { /* handle commands */ }
//!         tick = impostor_tick::next_tick(&mut countdown) => {
//!             engine.tick(tick.generation);
//!         }
//!     }
//! }
//! ```

use std::time::Duration;

use tokio::time::{self, Instant};
use tracing::{debug, trace, warn};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for a countdown.
#[derive(Debug, Clone)]
pub struct TickConfig {
    /// Time between two ticks. Default: one second.
    pub period: Duration,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(1),
        }
    }
}

impl TickConfig {
    /// Shortest accepted period.
    pub const MIN_PERIOD: Duration = Duration::from_millis(10);
    /// Longest accepted period.
    pub const MAX_PERIOD: Duration = Duration::from_secs(60);

    /// Create a config with a specific period.
    pub fn with_period(period: Duration) -> Self {
        Self { period }
    }

    /// Clamp the period into [`Self::MIN_PERIOD`]`..=`[`Self::MAX_PERIOD`].
    ///
    /// Called automatically by [`Countdown::new`].
    pub fn validated(mut self) -> Self {
        let clamped = self.period.clamp(Self::MIN_PERIOD, Self::MAX_PERIOD);
        if clamped != self.period {
            warn!(
                requested_ms = self.period.as_millis() as u64,
                clamped_ms = clamped.as_millis() as u64,
                "countdown period out of range, clamping"
            );
            self.period = clamped;
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Tick info
// ---------------------------------------------------------------------------

/// A fired tick, returned by [`Countdown::wait_for_tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickInfo {
    /// Session generation the countdown was armed for.
    pub generation: u64,
    /// Tick number within this countdown (starts at 1).
    pub tick: u64,
    /// `true` if the tick woke up more than 10% of a period late.
    pub overrun: bool,
    /// Whole periods that passed without a tick because of the overrun.
    pub ticks_skipped: u64,
}

// ---------------------------------------------------------------------------
// Countdown
// ---------------------------------------------------------------------------

/// A repeating timer bound to one session generation.
#[derive(Debug)]
pub struct Countdown {
    generation: u64,
    period: Duration,
    next_tick: Instant,
    tick_count: u64,
    total_skipped: u64,
}

impl Countdown {
    /// Arm a countdown. The first tick fires one period from now.
    pub fn new(generation: u64, config: TickConfig) -> Self {
        let config = config.validated();
        debug!(
            generation,
            period_ms = config.period.as_millis() as u64,
            "countdown armed"
        );
        Self {
            generation,
            period: config.period,
            next_tick: Instant::now() + config.period,
            tick_count: 0,
            total_skipped: 0,
        }
    }

    /// Arm a countdown with the default one-second period.
    pub fn every_second(generation: u64) -> Self {
        Self::new(generation, TickConfig::default())
    }

    /// Wait until the next tick is due.
    ///
    /// Late wake-ups never produce a burst of ticks: the next deadline is
    /// always scheduled one period after the actual wake-up.
    pub async fn wait_for_tick(&mut self) -> TickInfo {
        let due = self.next_tick;
        time::sleep_until(due).await;

        let now = Instant::now();
        self.tick_count += 1;

        let late_by = now.saturating_duration_since(due);
        let overrun = late_by > self.period / 10;
        let ticks_skipped = if overrun {
            (late_by.as_nanos() / self.period.as_nanos()) as u64
        } else {
            0
        };
        if ticks_skipped > 0 {
            self.total_skipped += ticks_skipped;
            warn!(
                generation = self.generation,
                tick = self.tick_count,
                skipped = ticks_skipped,
                late_ms = late_by.as_secs_f64() * 1000.0,
                "countdown overrun, skipping ahead"
            );
        }

        self.next_tick = now + self.period;
        trace!(generation = self.generation, tick = self.tick_count, "countdown tick");

        TickInfo {
            generation: self.generation,
            tick: self.tick_count,
            overrun,
            ticks_skipped,
        }
    }

    /// Generation this countdown was armed for.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Ticks fired so far.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Periods skipped across all overruns.
    pub fn total_skipped(&self) -> u64 {
        self.total_skipped
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        debug!(
            generation = self.generation,
            ticks = self.tick_count,
            "countdown cancelled"
        );
    }
}

/// Wait for the next tick of an optional countdown.
///
/// Pends forever when the slot is empty.
pub async fn next_tick(slot: &mut Option<Countdown>) -> TickInfo {
    match slot {
        Some(countdown) => countdown.wait_for_tick().await,
        None => std::future::pending().await,
    }
}

//! # Frame Ticker
//!
//! Explicit, fixed-timestep frame source.
//!
//! ## Design
//!
//! The host calls [`Ticker::advance`] from its animation-frame callback with
//! the wall time since the previous frame. The ticker:
//! - Runs scheduled clients in fixed steps (60Hz by default)
//! - Caps catch-up after a stall so a backgrounded tab cannot spiral
//! - Does NOTHING while no client is scheduled, so the host can stop
//!   requesting frames entirely
//!
//! Clients unschedule themselves by returning [`TickControl::Stop`] or by
//! dropping their [`TickHandle`].
//!
//! `advance` may be called from several threads; a client runs on one of
//! them at a time. A client that drives the ticker from inside its own
//! callback is skipped for the nested steps.

use std::cell::RefCell;
use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::{Mutex, ReentrantMutex};

use crate::config::TickerConfig;

/// One fixed step delivered to a client.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTick {
    /// Step length in seconds.
    pub dt: f32,
    /// Step counter since the ticker was created.
    pub frame: u64,
    /// Simulated time since the ticker was created.
    pub elapsed: Duration,
}

/// What a client wants after a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickControl {
    /// Keep calling me.
    Continue,
    /// Unschedule me.
    Stop,
}

/// Ticker statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Host frames passed to `advance`.
    pub frames: u64,
    /// Fixed steps executed.
    pub steps: u64,
    /// Steps discarded by the catch-up cap.
    pub dropped_steps: u64,
    /// Host frames that arrived with nothing scheduled.
    pub idle_frames: u64,
}

type FrameCallback = Box<dyn FnMut(&FrameTick) -> TickControl + Send>;
type SharedCallback = Arc<ReentrantMutex<RefCell<FrameCallback>>>;

struct Client {
    id: u64,
    callback: SharedCallback,
}

struct TickerState {
    step: Duration,
    max_catch_up: u32,
    accumulator: Duration,
    elapsed: Duration,
    frame: u64,
    next_id: u64,
    clients: Vec<Client>,
    stats: TickStats,
}

impl TickerState {
    fn remove(&mut self, id: u64) -> Option<Client> {
        let index = self.clients.iter().position(|c| c.id == id)?;
        Some(self.clients.remove(index))
    }
}

/// Shared handle to a fixed-step frame source.
///
/// Clones drive the same schedule.
#[derive(Clone)]
pub struct Ticker {
    state: Arc<Mutex<TickerState>>,
}

impl Ticker {
    /// Default step rate.
    pub const DEFAULT_RATE_HZ: u32 = 60;
    /// Default catch-up cap per host frame.
    pub const DEFAULT_MAX_CATCH_UP: u32 = 8;

    /// Creates a ticker stepping at `rate_hz` (clamped to at least 1Hz).
    #[must_use]
    pub fn new(rate_hz: u32) -> Self {
        let step = Duration::from_nanos(1_000_000_000 / u64::from(rate_hz.max(1)));
        Self {
            state: Arc::new(Mutex::new(TickerState {
                step,
                max_catch_up: Self::DEFAULT_MAX_CATCH_UP,
                accumulator: Duration::ZERO,
                elapsed: Duration::ZERO,
                frame: 0,
                next_id: 0,
                clients: Vec::new(),
                stats: TickStats::default(),
            })),
        }
    }

    /// Creates a ticker from validated configuration.
    #[must_use]
    pub fn from_config(config: &TickerConfig) -> Self {
        Self::new(config.rate_hz).with_max_catch_up(config.max_catch_up_steps)
    }

    /// Sets how many steps one host frame may run.
    #[must_use]
    pub fn with_max_catch_up(self, steps: u32) -> Self {
        self.state.lock().max_catch_up = steps.max(1);
        self
    }

    /// Schedules a client; it runs on every step until stopped.
    pub fn schedule<F>(&self, callback: F) -> TickHandle
    where
        F: FnMut(&FrameTick) -> TickControl + Send + 'static,
    {
        let id = {
            let mut state = self.state.lock();
            let id = state.next_id;
            state.next_id += 1;
            state.clients.push(Client {
                id,
                callback: Arc::new(ReentrantMutex::new(RefCell::new(Box::new(callback)))),
            });
            id
        };
        tracing::debug!(client = id, "frame client scheduled");

        TickHandle {
            id,
            state: Arc::downgrade(&self.state),
            cancelled: false,
        }
    }

    /// Feeds host wall time; returns the number of fixed steps executed.
    pub fn advance(&self, elapsed: Duration) -> u32 {
        {
            let mut state = self.state.lock();
            state.stats.frames += 1;
            if state.clients.is_empty() {
                state.accumulator = Duration::ZERO;
                state.stats.idle_frames += 1;
                return 0;
            }
            state.accumulator += elapsed;
        }

        let mut steps = 0;
        loop {
            let (tick, snapshot) = {
                let mut state = self.state.lock();
                if state.clients.is_empty() {
                    state.accumulator = Duration::ZERO;
                    break;
                }
                if state.accumulator < state.step {
                    break;
                }
                if steps >= state.max_catch_up {
                    let step_ns = state.step.as_nanos();
                    let backlog = state.accumulator.as_nanos();
                    let dropped = (backlog / step_ns) as u64;
                    state.stats.dropped_steps += dropped;
                    state.accumulator = Duration::from_nanos((backlog % step_ns) as u64);
                    tracing::debug!(dropped, "frame catch-up capped");
                    break;
                }

                let step = state.step;
                state.accumulator -= step;
                state.elapsed += step;
                state.frame += 1;
                state.stats.steps += 1;

                let tick = FrameTick {
                    dt: step.as_secs_f32(),
                    frame: state.frame,
                    elapsed: state.elapsed,
                };
                let snapshot: Vec<(u64, SharedCallback)> = state
                    .clients
                    .iter()
                    .map(|c| (c.id, Arc::clone(&c.callback)))
                    .collect();
                (tick, snapshot)
            };

            let mut finished = Vec::new();
            for (id, callback) in snapshot {
                if !self.state.lock().clients.iter().any(|c| c.id == id) {
                    continue;
                }
                let guard = callback.lock();
                let Ok(mut running) = guard.try_borrow_mut() else {
                    continue;
                };
                let run = &mut *running;
                if run(&tick) == TickControl::Stop {
                    finished.push(id);
                }
            }

            if !finished.is_empty() {
                let removed: Vec<Client> = {
                    let mut state = self.state.lock();
                    finished.iter().filter_map(|id| state.remove(*id)).collect()
                };
                tracing::debug!(count = removed.len(), "frame clients finished");
            }
            steps += 1;
        }
        steps
    }

    /// True when nothing is scheduled.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state.lock().clients.is_empty()
    }

    /// Number of scheduled clients.
    #[must_use]
    pub fn client_count(&self) -> usize {
        self.state.lock().clients.len()
    }

    /// Fixed step length.
    #[must_use]
    pub fn step_duration(&self) -> Duration {
        self.state.lock().step
    }

    /// Simulated time executed so far.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.state.lock().elapsed
    }

    /// Returns ticker statistics.
    #[must_use]
    pub fn stats(&self) -> TickStats {
        self.state.lock().stats
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RATE_HZ)
    }
}

impl fmt::Debug for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Ticker")
            .field("step", &state.step)
            .field("clients", &state.clients.len())
            .field("frame", &state.frame)
            .finish()
    }
}

/// Owned schedule slot on a [`Ticker`]. Dropping it unschedules the client.
#[must_use = "dropping a TickHandle unschedules the client immediately"]
pub struct TickHandle {
    id: u64,
    state: Weak<Mutex<TickerState>>,
    cancelled: bool,
}

impl TickHandle {
    /// Unschedules the client. Idempotent.
    pub fn cancel(&mut self) {
        if self.cancelled {
            return;
        }
        self.cancelled = true;
        if let Some(state) = self.state.upgrade() {
            let removed = state.lock().remove(self.id);
            if removed.is_some() {
                tracing::debug!(client = self.id, "frame client cancelled");
            }
        }
    }

    /// True while the client is still on the schedule.
    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        if self.cancelled {
            return false;
        }
        self.state
            .upgrade()
            .is_some_and(|state| state.lock().clients.iter().any(|c| c.id == self.id))
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for TickHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickHandle")
            .field("id", &self.id)
            .field("cancelled", &self.cancelled)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    const FRAME: Duration = Duration::from_nanos(16_666_667);

    #[test]
    fn test_one_step_per_frame() {
        let ticker = Ticker::new(60);
        let count = Arc::new(AtomicU64::new(0));
        let c = Arc::clone(&count);
        let _handle = ticker.schedule(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
            TickControl::Continue
        });

        for _ in 0..120 {
            assert_eq!(ticker.advance(FRAME), 1);
        }
        assert_eq!(count.load(Ordering::SeqCst), 120);
        assert_eq!(ticker.stats().steps, 120);
    }

    #[test]
    fn test_idle_ticker_does_no_work() {
        let ticker = Ticker::new(60);
        assert!(ticker.is_idle());
        assert_eq!(ticker.advance(Duration::from_secs(5)), 0);
        assert_eq!(ticker.stats().idle_frames, 1);
        assert_eq!(ticker.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_stop_unschedules() {
        let ticker = Ticker::new(60);
        let count = Arc::new(AtomicU64::new(0));
        let c = Arc::clone(&count);
        let handle = ticker.schedule(move |tick| {
            c.fetch_add(1, Ordering::SeqCst);
            if tick.frame >= 3 {
                TickControl::Stop
            } else {
                TickControl::Continue
            }
        });

        for _ in 0..10 {
            ticker.advance(FRAME);
        }
        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert!(!handle.is_scheduled());
        assert!(ticker.is_idle());
    }

    #[test]
    fn test_drop_handle_cancels() {
        let ticker = Ticker::new(60);
        let handle = ticker.schedule(|_| TickControl::Continue);
        assert_eq!(ticker.client_count(), 1);
        drop(handle);
        assert!(ticker.is_idle());
    }

    #[test]
    fn test_catch_up_is_capped() {
        let ticker = Ticker::new(60).with_max_catch_up(4);
        let _handle = ticker.schedule(|_| TickControl::Continue);

        let steps = ticker.advance(Duration::from_secs(1));
        assert_eq!(steps, 4);
        assert!(ticker.stats().dropped_steps >= 55);
        // Backlog is gone, next frame runs normally.
        assert_eq!(ticker.advance(FRAME), 1);
    }

    #[test]
    fn test_frames_from_two_threads_run_every_step() {
        let ticker = Ticker::new(60).with_max_catch_up(u32::MAX);
        let count = Arc::new(AtomicU64::new(0));
        let c = Arc::clone(&count);
        let _handle = ticker.schedule(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
            std::thread::yield_now();
            TickControl::Continue
        });

        let step = ticker.step_duration();
        let drivers: Vec<_> = (0..2)
            .map(|_| {
                let ticker = ticker.clone();
                std::thread::spawn(move || {
                    for _ in 0..300 {
                        ticker.advance(step);
                    }
                })
            })
            .collect();
        for driver in drivers {
            driver.join().unwrap();
        }
        assert_eq!(ticker.stats().steps, 600);
        assert_eq!(count.load(Ordering::SeqCst), 600);
    }

    #[test]
    fn test_cancel_from_inside_callback() {
        let ticker = Ticker::new(60);
        let slot: Arc<Mutex<Option<TickHandle>>> = Arc::new(Mutex::new(None));
        let inner = Arc::clone(&slot);
        let handle = ticker.schedule(move |_| {
            if let Some(mut own) = inner.lock().take() {
                own.cancel();
            }
            TickControl::Continue
        });
        *slot.lock() = Some(handle);

        ticker.advance(FRAME);
        assert!(ticker.is_idle());
    }
}

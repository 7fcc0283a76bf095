//! Periodic timers and the runner that feeds them into an `Engine`.

use crate::config::{CLOCK_TICK_MS, TICK_RATE_MS};
use crate::engine::Engine;
use crate::error::EngineError;
use crate::events::MatchEvent;
use crate::intent::Intent;
use crate::state::MatchState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    ClockSecond,
    SimTick,
}

/// A repeating timer driven by elapsed milliseconds.
#[derive(Debug, Clone, Copy)]
struct IntervalTimer {
    period_ms: u64,
    elapsed_ms: u64,
}

impl IntervalTimer {
    fn new(period_ms: u64) -> Self {
        IntervalTimer {
            period_ms: period_ms.max(1),
            elapsed_ms: 0,
        }
    }

    fn until_due(&self) -> u64 {
        self.period_ms - self.elapsed_ms
    }

    fn elapse(&mut self, ms: u64) {
        self.elapsed_ms += ms;
    }

    fn take_due(&mut self) -> bool {
        if self.elapsed_ms >= self.period_ms {
            self.elapsed_ms -= self.period_ms;
            true
        } else {
            false
        }
    }

    fn reset(&mut self) {
        self.elapsed_ms = 0;
    }
}

/// The match clock (1 s) and simulation tick (600 ms) timers.
///
/// Firings come out in time order. When both are due at the same instant
/// the clock second goes first.
#[derive(Debug, Clone)]
pub struct MatchTimers {
    clock: IntervalTimer,
    sim: IntervalTimer,
    armed: bool,
}

impl MatchTimers {
    pub fn new() -> Self {
        Self::with_periods(CLOCK_TICK_MS, TICK_RATE_MS)
    }

    pub fn with_periods(clock_ms: u64, sim_ms: u64) -> Self {
        MatchTimers {
            clock: IntervalTimer::new(clock_ms),
            sim: IntervalTimer::new(sim_ms),
            armed: false,
        }
    }

    /// (Re)starts both timers from zero.
    pub fn arm(&mut self) {
        self.clock.reset();
        self.sim.reset();
        self.armed = true;
    }

    pub fn cancel(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<TimerEvent> {
        let mut fired = Vec::new();
        if !self.armed {
            return fired;
        }

        let mut remaining = elapsed_ms;
        loop {
            let step = self.clock.until_due().min(self.sim.until_due());
            if step > remaining {
                self.clock.elapse(remaining);
                self.sim.elapse(remaining);
                break;
            }
            self.clock.elapse(step);
            self.sim.elapse(step);
            remaining -= step;

            if self.clock.take_due() {
                fired.push(TimerEvent::ClockSecond);
            }
            if self.sim.take_due() {
                fired.push(TimerEvent::SimTick);
            }
        }
        fired
    }
}

impl Default for MatchTimers {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts fractional frame times into whole milliseconds, carrying the
/// remainder into the next frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameAccumulator {
    carry_ms: f32,
}

impl FrameAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_seconds(&mut self, frame_time: f32) -> u64 {
        self.carry_ms += frame_time.max(0.0) * 1000.0;
        let whole = self.carry_ms.floor();
        self.carry_ms -= whole;
        whole as u64
    }

    pub fn carry_ms(&self) -> f32 {
        self.carry_ms
    }
}

/// Owns an engine plus its timers. Timers are armed on start and cancelled
/// as soon as the match leaves AUTO/TELEOP.
pub struct MatchRunner {
    engine: Engine,
    timers: MatchTimers,
}

impl MatchRunner {
    pub fn new(engine: Engine) -> Self {
        MatchRunner {
            engine,
            timers: MatchTimers::new(),
        }
    }

    pub fn start(&mut self) -> Result<(), EngineError> {
        self.engine.start()?;
        self.timers.arm();
        Ok(())
    }

    /// Advances wall time, dispatching due firings in order. Returns the
    /// firings that reached the engine.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<TimerEvent> {
        let mut dispatched = Vec::new();
        for event in self.timers.advance(elapsed_ms) {
            if !self.engine.phase().is_running() {
                break;
            }
            match event {
                TimerEvent::ClockSecond => self.engine.clock_second(),
                TimerEvent::SimTick => self.engine.sim_tick(),
            }
            dispatched.push(event);
        }

        if !self.engine.phase().is_running() && self.timers.is_armed() {
            crate::debug_clock!("match not running ({}), timers cancelled", self.engine.phase());
            self.timers.cancel();
        }
        dispatched
    }

    pub fn intent(&mut self, intent: Intent) -> bool {
        self.engine.apply_intent(intent)
    }

    pub fn snapshot(&self) -> MatchState {
        self.engine.snapshot()
    }

    pub fn state(&self) -> &MatchState {
        self.engine.state()
    }

    pub fn drain_events(&mut self) -> impl Iterator<Item = MatchEvent> + '_ {
        self.engine.drain_events()
    }

    pub fn timers_armed(&self) -> bool {
        self.timers.is_armed()
    }
}

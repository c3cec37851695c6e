// Tick timing for the simulation
//
// Each tick carries the current timestamp and the timestamp of the previous
// tick, both in milliseconds since the clock started. Movement is scaled by
// the gap between them, so the simulation runs at the same speed whatever
// the frame rate.

use std::time::Instant;

use crate::core::math::elapsed_ms;

/// Timestamps for a single simulation tick (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Time of this tick
    pub now: f64,
    /// Time of the tick before this one
    pub previous: f64,
}

impl Tick {
    pub fn new(previous: f64, now: f64) -> Self {
        Self { now, previous }
    }

    /// Milliseconds since the previous tick, clamped to zero
    pub fn delta_ms(&self) -> f32 {
        elapsed_ms(self.previous, self.now) as f32
    }
}

/// Where the clock reads time from
#[derive(Debug, Clone, Copy)]
enum TimeSource {
    Realtime(Instant),
    /// Driven by hand
    #[cfg(test)]
    Manual(f64),
}

/// Produces ticks from a monotonic time source
#[derive(Debug)]
pub struct TickClock {
    source: TimeSource,

    /// Timestamp handed out by the last tick
    last_tick: f64,

    /// Whether the simulation is paused
    paused: bool,

    /// Total ticks produced while running
    tick_count: u64,
}

impl TickClock {
    /// Create a clock backed by the system's monotonic clock
    pub fn new() -> Self {
        Self::with_source(TimeSource::Realtime(Instant::now()))
    }

    fn with_source(source: TimeSource) -> Self {
        Self {
            source,
            last_tick: 0.0,
            paused: false,
            tick_count: 0,
        }
    }

    /// Current time in milliseconds since the clock started
    pub fn now_ms(&self) -> f64 {
        match self.source {
            TimeSource::Realtime(start) => start.elapsed().as_secs_f64() * 1000.0,
            #[cfg(test)]
            TimeSource::Manual(now) => now,
        }
    }

    /// Begin a new tick
    ///
    /// While paused the tick has zero length, so nothing moves.
    pub fn begin_tick(&mut self) -> Tick {
        let now = self.now_ms();

        if self.paused {
            self.last_tick = now;
            return Tick::new(now, now);
        }

        let tick = Tick::new(self.last_tick, now);
        self.last_tick = now;
        self.tick_count += 1;
        tick
    }

    /// Total number of ticks produced while running
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Pause the simulation
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Simulation paused");
        }
    }

    /// Resume the simulation
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Time spent paused must not show up in the next tick
            self.last_tick = self.now_ms();
            log::info!("Simulation resumed");
        }
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl TickClock {
    /// Clock that only advances through `advance_to`/`advance_by`
    fn manual() -> Self {
        Self::with_source(TimeSource::Manual(0.0))
    }

    /// Set a manual clock's time; never moves backwards
    fn advance_to(&mut self, ms: f64) {
        if let TimeSource::Manual(now) = &mut self.source {
            *now = now.max(ms);
        }
    }

    fn advance_by(&mut self, ms: f64) {
        let target = self.now_ms() + ms.max(0.0);
        self.advance_to(target);
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}

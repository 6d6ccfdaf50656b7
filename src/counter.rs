//! Count-up animation for the stats row
//!
//! Each frame adds `target / (duration / frame)` to a running value; the
//! shown number is the floor of that value until it reaches the target.
//! [`FrameClock`] decides how many frames have passed, so the UI loop can
//! wake up for input without speeding the counters up.

use std::time::{Duration, Instant};

/// One animated counter
#[derive(Debug, Clone)]
pub struct Counter {
    target: u64,
    step: f64,
    current: f64,
    finished: bool,
}

impl Counter {
    pub fn new(target: u64, duration: Duration, frame: Duration) -> Self {
        let frames = duration.as_nanos() as f64 / frame.as_nanos().max(1) as f64;
        // A duration shorter than one frame finishes on the first frame
        let step = if frames > 1.0 {
            target as f64 / frames
        } else {
            target as f64
        };
        Self {
            target,
            step,
            current: 0.0,
            finished: false,
        }
    }

    /// Advance one frame and return the value to display
    pub fn advance(&mut self) -> u64 {
        if self.finished {
            return self.target;
        }
        self.current += self.step;
        if self.current < self.target as f64 {
            self.current.floor() as u64
        } else {
            self.finished = true;
            self.target
        }
    }

    /// Value currently displayed
    pub fn value(&self) -> u64 {
        if self.finished {
            self.target
        } else {
            self.current.floor() as u64
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// A set of counters that animate together, once
#[derive(Debug, Clone, Default)]
pub struct CounterGroup {
    counters: Vec<Counter>,
    started: bool,
}

impl CounterGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the group. Returns false if it has already run.
    pub fn start(&mut self, targets: &[u64], duration: Duration, frame: Duration) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        self.counters = targets
            .iter()
            .map(|&t| Counter::new(t, duration, frame))
            .collect();
        true
    }

    /// Advance every unfinished counter; returns true if anything changed
    pub fn advance(&mut self) -> bool {
        let mut changed = false;
        for counter in self.counters.iter_mut().filter(|c| !c.is_finished()) {
            let before = counter.value();
            if counter.advance() != before || counter.is_finished() {
                changed = true;
            }
        }
        changed
    }

    pub fn values(&self) -> Vec<u64> {
        self.counters.iter().map(Counter::value).collect()
    }

    pub fn is_finished(&self) -> bool {
        self.counters.iter().all(Counter::is_finished)
    }
}

/// Wall-clock frame pacing
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame: Duration,
    next: Instant,
}

impl FrameClock {
    /// First frame falls due one `frame` after `now`
    pub fn new(frame: Duration, now: Instant) -> Self {
        let frame = frame.max(Duration::from_millis(1));
        Self {
            frame,
            next: now + frame,
        }
    }

    /// Number of frames that came due up to `now`; each is counted once
    pub fn due(&mut self, now: Instant) -> u32 {
        if now < self.next {
            return 0;
        }
        let behind = now.duration_since(self.next).as_nanos() / self.frame.as_nanos();
        let frames = u32::try_from(behind + 1).unwrap_or(u32::MAX);
        self.next += self.frame * frames;
        frames
    }

    /// Time left until the next frame
    pub fn until_next(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }
}

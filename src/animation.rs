//! Stat counter count-up animation.
//!
//! A counter runs for a fixed duration from 0 to its target on a cubic
//! ease-out curve. Each frame writes the floored intermediate value; the
//! final frame snaps to the exact target. Timestamps are the frame times
//! handed out by the [`Timeline`](crate::scheduler::Timeline), and the first
//! frame seen defines the start of the animation.

/// Cubic ease-out: fast start, gentle landing. `p` is clamped to `[0, 1]`.
pub fn ease_out_cubic(p: f64) -> f64 {
    let p = p.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// One rendered frame of a counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterFrame {
    pub value: u64,
    pub finished: bool,
}

/// A running count-up. Not cancellable: once started it runs to the target.
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    target: u64,
    duration_ms: u64,
    start_ms: Option<u64>,
    finished: bool,
}

impl CounterAnimation {
    pub fn new(target: u64, duration_ms: u64) -> Self {
        Self {
            target,
            duration_ms,
            start_ms: None,
            finished: false,
        }
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance to the frame at `timestamp_ms`.
    pub fn frame(&mut self, timestamp_ms: u64) -> CounterFrame {
        let start = *self.start_ms.get_or_insert(timestamp_ms);
        let elapsed = timestamp_ms.saturating_sub(start);
        let progress = if self.duration_ms == 0 {
            1.0
        } else {
            (elapsed as f64 / self.duration_ms as f64).min(1.0)
        };

        if progress >= 1.0 {
            self.finished = true;
            return CounterFrame {
                value: self.target,
                finished: true,
            };
        }

        let value = (ease_out_cubic(progress) * self.target as f64).floor() as u64;
        CounterFrame {
            value: value.min(self.target),
            finished: false,
        }
    }
}

//! Cancelable scheduled tasks on the simulation clock
//!
//! The host drives time forward; these only answer "is it due yet".
//! Cancelling is idempotent and a cancelled task never reports due again,
//! so a fire that was pending at the moment of cancellation is dropped.

/// Shortest allowed interval period (guards `while interval.poll()` loops)
const MIN_PERIOD: f64 = 1e-3;

/// Repeating timer (spawn cadence)
#[derive(Debug, Clone)]
pub struct Interval {
    period: f64,
    next_due: Option<f64>,
}

impl Interval {
    pub fn new(period_secs: f32) -> Self {
        Self {
            period: (period_secs as f64).max(MIN_PERIOD),
            next_due: None,
        }
    }

    /// Arm the timer; first fire is one period after `now`
    pub fn start(&mut self, now: f64) {
        self.next_due = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    /// Consume one due fire, if any. Call in a loop to catch up after a long
    /// step; cancelling between calls stops the remaining fires.
    pub fn poll(&mut self, now: f64) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(due + self.period);
                true
            }
            _ => false,
        }
    }
}

/// One-shot delayed task (final screen, toast hide)
#[derive(Debug, Clone, Default)]
pub struct Timeout {
    due: Option<f64>,
}

impl Timeout {
    pub fn new() -> Self {
        Self { due: None }
    }

    /// Arm (or re-arm) the timeout
    pub fn start(&mut self, now: f64, delay_secs: f32) {
        self.due = Some(now + delay_secs as f64);
    }

    pub fn cancel(&mut self) {
        self.due = None;
    }

    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    /// Returns true exactly once, when the deadline has passed
    pub fn poll(&mut self, now: f64) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}

/// Per-frame trigger (the collision loop)
#[derive(Debug, Clone, Default)]
pub struct FrameLoop {
    running: bool,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self { running: false }
    }

    pub fn request(&mut self) {
        self.running = true;
    }

    pub fn cancel(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Enter a frame; false if the loop has been cancelled
    pub fn begin_frame(&self) -> bool {
        self.running
    }
}

use std::time::{Duration, Instant};

/// Visibility of the floating control bar. Pointer activity shows the bar and
/// restarts a single deadline; when the deadline passes the bar hides.
#[derive(Debug, Clone)]
pub struct IdleTimer {
    timeout: Duration,
    deadline: Option<Instant>,
    visible: bool,
    auto_hide: bool,
}

impl IdleTimer {
    pub fn new(timeout: Duration, auto_hide: bool) -> Self {
        Self {
            timeout,
            deadline: None,
            visible: true,
            auto_hide,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Shows the bar and replaces any running deadline with a fresh one.
    pub fn activity(&mut self, now: Instant) {
        self.visible = true;
        self.deadline = self.auto_hide.then(|| now + self.timeout);
    }

    /// Hides the bar once the deadline has passed. Returns true when the
    /// visibility changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                let changed = self.visible;
                self.visible = false;
                changed
            }
            _ => false,
        }
    }

    /// Time left before the bar hides, if a deadline is running.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

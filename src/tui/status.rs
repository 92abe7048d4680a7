use std::time::{Duration, Instant};

/// How long a transient status message stays up
pub const STATUS_TIMEOUT: Duration = Duration::from_secs(2);

/// Something the event loop should do later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Clear the status line if it still shows message `generation`
    ClearStatus { generation: u64 },
    /// Advance blink `generation` by one on/off step
    BlinkTick { generation: u64 },
}

#[derive(Debug, Clone, Copy)]
pub struct Timer {
    pub at: Instant,
    pub event: TimerEvent,
}

/// Pending timers, fired by the event loop between key events
#[derive(Debug, Default)]
pub struct TimerQueue {
    timers: Vec<Timer>,
}

impl TimerQueue {
    pub fn schedule(&mut self, at: Instant, event: TimerEvent) {
        self.timers.push(Timer { at, event });
    }

    /// Remove and return every timer due at `now`, earliest first
    pub fn take_due(&mut self, now: Instant) -> Vec<TimerEvent> {
        let mut due: Vec<Timer> = Vec::new();
        self.timers.retain(|t| {
            if t.at <= now {
                due.push(*t);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|t| t.at);
        due.into_iter().map(|t| t.event).collect()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

/// The one-line transient message area.
///
/// Each message gets a generation number; a clear timer only removes the
/// message it was scheduled for, so a stale timer cannot wipe a newer one.
#[derive(Debug, Default)]
pub struct StatusLine {
    message: Option<String>,
    generation: u64,
}

impl StatusLine {
    /// Show `message`, returning the generation its clear timer must carry
    pub fn set(&mut self, message: impl Into<String>) -> u64 {
        self.generation += 1;
        self.message = Some(message.into());
        self.generation
    }

    /// Clear only if `generation` is still the current message
    pub fn clear_if(&mut self, generation: u64) -> bool {
        if self.generation == generation && self.message.is_some() {
            self.message = None;
            true
        } else {
            false
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

use std::time::Duration;

use super::detail::DetailFieldKind;

/// Time between highlight toggles
pub const BLINK_INTERVAL: Duration = Duration::from_millis(150);

/// What a post-edit highlight is drawn on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkTarget {
    /// Table row of the task with this ID
    Row(u32),
    /// A field slot in the detail view
    Field(DetailFieldKind),
}

/// A running highlight animation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blink {
    pub target: BlinkTarget,
    pub generation: u64,
    /// Toggles left before the highlight stops
    pub remaining: u8,
    /// Whether the highlight is currently drawn
    pub on: bool,
}

impl Blink {
    pub fn new(target: BlinkTarget, generation: u64, ticks: u8) -> Self {
        Blink {
            target,
            generation,
            remaining: ticks.max(1),
            on: true,
        }
    }

    /// Advance one step. Returns false once the animation is finished.
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.on = !self.on;
        self.remaining > 0
    }
}

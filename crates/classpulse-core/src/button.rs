//! Signal button -- the one-shot "I'm confused" affordance.
//!
//! Wall-clock state machine in the same style as the gauge: the caller
//! supplies epoch-millisecond timestamps and drives `tick()` periodically.
//! While the button is in its fired state, repeated activation is a
//! deliberate no-op (a debounce, not an error) that only re-shows an
//! informational message.

use crate::config::SignalConfig;
use crate::status::Indicator;

/// Idle visual: hollow circle, green.
const IDLE_INDICATOR: Indicator = Indicator {
    glyph: "○",
    color: "#00FF00",
    tooltip: "I'm confused",
};

/// Fired visual: question mark, yellow.
const FIRED_INDICATOR: Indicator = Indicator {
    glyph: "?",
    color: "#FFFF00",
    tooltip: "signal sent",
};

/// Message re-shown when activation is debounced.
pub const DEBOUNCE_TEXT: &str = "?";

/// What an activation attempt should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Not fired: caller should send one increment, then `confirm`.
    SendIncrement,
    /// Already fired: no remote call, just the informational message.
    Debounced,
}

/// Core button state machine.
#[derive(Debug, Clone)]
pub struct SignalButton {
    reset_after_ms: u64,
    fired: bool,
    /// Timestamp of the most recent successful increment. A later
    /// `confirm` supersedes any pending reset.
    fired_at_epoch_ms: Option<u64>,
}

impl SignalButton {
    pub fn new(cfg: &SignalConfig) -> Self {
        Self {
            reset_after_ms: cfg.reset_after_ms,
            fired: false,
            fired_at_epoch_ms: None,
        }
    }

    pub fn is_fired(&self) -> bool {
        self.fired
    }

    pub fn visual(&self) -> Indicator {
        if self.fired {
            FIRED_INDICATOR
        } else {
            IDLE_INDICATOR
        }
    }

    /// Decide what an activation should do. Does not mutate state; the
    /// transition happens in `confirm` once the increment succeeded.
    pub fn activate(&self) -> Activation {
        if self.fired {
            Activation::Debounced
        } else {
            Activation::SendIncrement
        }
    }

    /// Record a successful increment at `now_ms`. Restarts the reset
    /// countdown from this instant.
    pub fn confirm(&mut self, now_ms: u64) {
        self.fired = true;
        self.fired_at_epoch_ms = Some(now_ms);
    }

    /// Call periodically. Returns `true` exactly once per fired period,
    /// when the reset delay has elapsed and the button returned to idle.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        match self.fired_at_epoch_ms {
            Some(fired_at) if self.fired && now_ms.saturating_sub(fired_at) >= self.reset_after_ms => {
                self.fired = false;
                self.fired_at_epoch_ms = None;
                true
            }
            _ => false,
        }
    }
}

//! Auto-signal loop -- an on/off toggle that keeps raising the shared
//! counter on a fixed period while enabled.
//!
//! The state machine here only tracks the toggle; the recurring timer
//! lives in the runtime driver, which keeps its task alive exactly while
//! the loop is enabled. A failed tick is the one path that disables the
//! loop without a user action.

use crate::config::AutoConfig;
use crate::status::Indicator;

const OFF_INDICATOR: Indicator = Indicator {
    glyph: "🐧",
    color: "#808080",
    tooltip: "auto signal off",
};

const ON_INDICATOR: Indicator = Indicator {
    glyph: "🐧",
    color: "#FFFF00",
    tooltip: "auto signal on",
};

/// Result of flipping the toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Enabled,
    Disabled,
}

#[derive(Debug, Clone)]
pub struct AutoSignalLoop {
    interval_ms: u64,
    enabled: bool,
}

impl AutoSignalLoop {
    pub fn new(cfg: &AutoConfig) -> Self {
        Self {
            interval_ms: cfg.interval_ms,
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn visual(&self) -> Indicator {
        if self.enabled {
            ON_INDICATOR
        } else {
            OFF_INDICATOR
        }
    }

    /// Flip the toggle, returning the new state.
    pub fn toggle(&mut self) -> Toggle {
        self.enabled = !self.enabled;
        if self.enabled {
            Toggle::Enabled
        } else {
            Toggle::Disabled
        }
    }

    /// Disable after a tick failure. The only non-manual path out of the
    /// enabled state.
    pub fn force_disable(&mut self) {
        self.enabled = false;
    }
}

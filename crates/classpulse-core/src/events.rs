use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::gauge::Threshold;

/// Every user-visible state change produces an Event.
/// The CLI prints them; runners hand them to the notification channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    GaugeShown {
        at: DateTime<Utc>,
    },
    GaugeHidden {
        at: DateTime<Utc>,
    },
    GaugeUpdated {
        count: i64,
        filled: usize,
        at: DateTime<Utc>,
    },
    /// A poll cycle failed; gauge state was left untouched.
    GaugeErrored {
        message: String,
        at: DateTime<Utc>,
    },
    ThresholdCrossed {
        threshold: Threshold,
        count: i64,
        at: DateTime<Utc>,
    },
    SignalSent {
        at: DateTime<Utc>,
    },
    /// Repeated activation while the button was still in its fired state.
    SignalDebounced {
        at: DateTime<Utc>,
    },
    /// A manual increment failed; button state was left untouched.
    SignalFailed {
        message: String,
        at: DateTime<Utc>,
    },
    SignalReset {
        at: DateTime<Utc>,
    },
    AutoLoopEnabled {
        at: DateTime<Utc>,
    },
    AutoLoopDisabled {
        /// Set when the loop disabled itself after a tick failure,
        /// absent for a manual toggle off.
        reason: Option<String>,
        at: DateTime<Utc>,
    },
}

//! Engagement gauge implementation.
//!
//! The gauge is a caller-driven state machine. It does not own timers or
//! sockets -- the runtime feeds it one counter sample per poll cycle via
//! [`EngagementGauge::observe`], and the gauge answers with what to display
//! and whether a threshold crossing should be announced.
//!
//! ## Lifecycle
//!
//! ```text
//! Hidden -> Active -> Hidden (toggle)
//! ```
//!
//! Activation resets all state: counts back to zero, every threshold armed
//! again. Threshold memory never survives a hide/show cycle.

use serde::{Deserialize, Serialize};

use crate::config::GaugeConfig;
use crate::error::RemoteError;
use crate::notify::Severity;

/// Glyph for a filled bar cell.
const FULL_CELL: &str = "█";
/// Glyph for an empty bar cell.
const EMPTY_CELL: &str = "░";
/// Shown between activation and the first successful sample.
pub const LOADING_TEXT: &str = "⏳ …";
/// Shown in place of the bar when a poll cycle fails.
pub const ERROR_TEXT: &str = "gauge update failed";

/// Fraction of the class that triggers a one-time announcement
/// per gauge activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Threshold {
    Half,
    ThreeQuarters,
    Full,
}

impl Threshold {
    /// Highest priority first; at most one fires per poll cycle.
    pub const DESCENDING: [Threshold; 3] =
        [Threshold::Full, Threshold::ThreeQuarters, Threshold::Half];

    pub fn percent(self) -> u8 {
        match self {
            Threshold::Half => 50,
            Threshold::ThreeQuarters => 75,
            Threshold::Full => 100,
        }
    }

    /// Whether a normalized fill level crosses this threshold.
    ///
    /// Full is inclusive (the bar cannot exceed 1.0), the lower two are
    /// strict, matching the shipped behavior.
    fn crossed(self, normalized: f64) -> bool {
        match self {
            Threshold::Full => normalized >= 1.0,
            Threshold::ThreeQuarters => normalized > 0.75,
            Threshold::Half => normalized > 0.5,
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            Threshold::Half => Severity::Info,
            Threshold::ThreeQuarters | Threshold::Full => Severity::Warning,
        }
    }

    /// Announcement set in declared order. The notification channel plays
    /// these reversed (see [`crate::notify::announce`]).
    pub fn messages(self, count: i64) -> Vec<String> {
        match self {
            Threshold::Half => vec![format!(
                "💡 Instructor, this is getting heavy... 💡 \
                 One more pass over that last part and it will click! \
                 Students currently lost: {count}"
            )],
            Threshold::ThreeQuarters => vec![
                "😭 Instructor, save us... 😭".to_string(),
                "If we can just get past this part, we can do it!".to_string(),
                format!("Students currently lost: {count}"),
            ],
            Threshold::Full => vec![
                "🚨 Instructor! 🚨".to_string(),
                "Our heads are about to explode...".to_string(),
                "Could we take a short break...? :)".to_string(),
            ],
        }
    }

    fn index(self) -> usize {
        match self {
            Threshold::Half => 0,
            Threshold::ThreeQuarters => 1,
            Threshold::Full => 2,
        }
    }
}

/// What the gauge wants shown after a poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GaugeDisplay {
    /// Placeholder before the first sample arrives.
    Loading,
    /// Rendered bar text, `bar_width` cells wide.
    Bar { text: String, filled: usize },
    /// Error indicator; gauge state was left untouched.
    Error,
}

/// One threshold crossing to announce.
#[derive(Debug, Clone, PartialEq)]
pub struct Crossing {
    pub threshold: Threshold,
    pub count: i64,
    pub severity: Severity,
    pub messages: Vec<String>,
}

/// Result of applying one poll cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeUpdate {
    pub display: GaugeDisplay,
    pub crossing: Option<Crossing>,
}

/// Core gauge state machine.
///
/// Owns the poll-cycle bookkeeping: current and previous counts plus the
/// fired flag per threshold. All fields are private; the only mutation
/// paths are `activate`, `deactivate` and `observe`.
#[derive(Debug, Clone)]
pub struct EngagementGauge {
    max_population: u32,
    bar_width: u32,
    active: bool,
    current_count: i64,
    previous_count: i64,
    fired: [bool; 3],
}

impl EngagementGauge {
    pub fn new(cfg: &GaugeConfig) -> Self {
        Self {
            max_population: cfg.max_population.max(1),
            bar_width: cfg.bar_width.max(1),
            active: false,
            current_count: 0,
            previous_count: 0,
            fired: [false; 3],
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn current_count(&self) -> i64 {
        self.current_count
    }

    pub fn previous_count(&self) -> i64 {
        self.previous_count
    }

    pub fn has_fired(&self, threshold: Threshold) -> bool {
        self.fired[threshold.index()]
    }

    /// 0.0 .. 1.0 fill level for a raw count.
    pub fn normalized(&self, count: i64) -> f64 {
        (count as f64 / f64::from(self.max_population)).clamp(0.0, 1.0)
    }

    /// Render the fixed-width bar for a raw count.
    pub fn render_bar(&self, count: i64) -> (String, usize) {
        let width = self.bar_width as usize;
        let filled = (self.normalized(count) * width as f64).floor() as usize;
        let filled = filled.min(width);
        let empty = width - filled;
        let text = format!("{}{}", FULL_CELL.repeat(filled), EMPTY_CELL.repeat(empty));
        (text, filled)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Enter the Active state with a clean slate: counts zeroed, every
    /// threshold armed. Returns the placeholder display.
    pub fn activate(&mut self) -> GaugeDisplay {
        self.active = true;
        self.current_count = 0;
        self.previous_count = 0;
        self.fired = [false; 3];
        GaugeDisplay::Loading
    }

    /// Leave the Active state. Fired-threshold memory is discarded with
    /// the rest of the state on the next `activate`.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Apply one poll cycle.
    ///
    /// A failed sample shows the error indicator and leaves everything
    /// else untouched -- no threshold evaluation, `previous_count` kept,
    /// and the poll loop is expected to keep running.
    pub fn observe(&mut self, sample: Result<i64, RemoteError>) -> GaugeUpdate {
        let value = match sample {
            Ok(v) => v,
            Err(_) => {
                return GaugeUpdate {
                    display: GaugeDisplay::Error,
                    crossing: None,
                }
            }
        };

        self.current_count = value;
        let (text, filled) = self.render_bar(value);
        let normalized = self.normalized(value);

        // Only the highest unfired threshold crossed this cycle fires, and
        // only on a strict increase over the previous sample.
        let mut crossing = None;
        if value > self.previous_count {
            for threshold in Threshold::DESCENDING {
                if threshold.crossed(normalized) && !self.fired[threshold.index()] {
                    self.fired[threshold.index()] = true;
                    crossing = Some(Crossing {
                        threshold,
                        count: value,
                        severity: threshold.severity(),
                        messages: threshold.messages(value),
                    });
                    break;
                }
            }
        }

        self.previous_count = value;
        GaugeUpdate {
            display: GaugeDisplay::Bar { text, filled },
            crossing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GaugeConfig;
    use proptest::prelude::*;

    fn gauge() -> EngagementGauge {
        let mut g = EngagementGauge::new(&GaugeConfig::default());
        g.activate();
        g
    }

    fn filled_of(update: &GaugeUpdate) -> usize {
        match &update.display {
            GaugeDisplay::Bar { filled, .. } => *filled,
            other => panic!("expected bar display, got {other:?}"),
        }
    }

    #[test]
    fn fourteen_of_thirtyseven_fills_seven_cells() {
        let mut g = gauge();
        let update = g.observe(Ok(14));
        assert_eq!(filled_of(&update), 7);
        assert!(update.crossing.is_none());
        match update.display {
            GaugeDisplay::Bar { text, .. } => {
                assert_eq!(text.chars().count(), 20);
                assert_eq!(text.chars().filter(|c| *c == '█').count(), 7);
                assert_eq!(text.chars().filter(|c| *c == '░').count(), 13);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn half_threshold_fires_once_on_increase() {
        let mut g = gauge();
        assert!(g.observe(Ok(14)).crossing.is_none());

        let update = g.observe(Ok(19));
        let crossing = update.crossing.expect("50% should fire at 19/37");
        assert_eq!(crossing.threshold, Threshold::Half);
        assert_eq!(crossing.count, 19);
        assert_eq!(crossing.severity, Severity::Info);

        // Flat value on the next poll: previous_count is now 19, no re-fire.
        assert!(g.observe(Ok(19)).crossing.is_none());
    }

    #[test]
    fn no_threshold_fires_without_an_increase() {
        let mut g = gauge();
        g.observe(Ok(30));
        g.observe(Ok(30));
        // Dropping and returning to the same level stays quiet too.
        g.observe(Ok(25));
        assert!(g.observe(Ok(30)).crossing.is_none());
    }

    #[test]
    fn no_threshold_refires_after_dip_below_bound() {
        // 30/37 fired ThreeQuarters; dip to 25 then rise to 31 must not
        // re-fire it within the same activation.
        let mut g = gauge();
        let first = g.observe(Ok(30)).crossing.unwrap();
        assert_eq!(first.threshold, Threshold::ThreeQuarters);
        g.observe(Ok(25));
        assert!(g.observe(Ok(31)).crossing.is_none());
    }

    #[test]
    fn only_the_highest_unfired_threshold_fires_per_cycle() {
        let mut g = gauge();
        // Jump straight to a full class: only Full fires this cycle.
        let update = g.observe(Ok(37));
        assert_eq!(update.crossing.unwrap().threshold, Threshold::Full);
        assert!(g.has_fired(Threshold::Full));
        assert!(!g.has_fired(Threshold::Half));

        // Lower thresholds can still fire later on a fresh increase after
        // a dip, since they never fired.
        g.observe(Ok(10));
        let update = g.observe(Ok(20));
        assert_eq!(update.crossing.unwrap().threshold, Threshold::Half);
    }

    #[test]
    fn thresholds_escalate_across_cycles() {
        let mut g = gauge();
        assert_eq!(g.observe(Ok(19)).crossing.unwrap().threshold, Threshold::Half);
        assert_eq!(
            g.observe(Ok(29)).crossing.unwrap().threshold,
            Threshold::ThreeQuarters
        );
        assert_eq!(g.observe(Ok(37)).crossing.unwrap().threshold, Threshold::Full);
        // Everything fired; further increases stay quiet. The bar is
        // already pinned at full width.
        g.observe(Ok(10));
        assert!(g.observe(Ok(40)).crossing.is_none());
    }

    #[test]
    fn reactivation_rearms_thresholds() {
        let mut g = gauge();
        assert!(g.observe(Ok(19)).crossing.is_some());

        g.deactivate();
        g.activate();

        // Fresh activation: same value can trigger 50% again.
        let update = g.observe(Ok(19));
        assert_eq!(update.crossing.unwrap().threshold, Threshold::Half);
    }

    #[test]
    fn failed_sample_shows_error_and_freezes_state() {
        let mut g = gauge();
        g.observe(Ok(14));

        let update = g.observe(Err(RemoteError::MalformedResponse {
            detail: "'current_count' is not numeric: \"abc\"".into(),
        }));
        assert_eq!(update.display, GaugeDisplay::Error);
        assert!(update.crossing.is_none());
        assert_eq!(g.previous_count(), 14);

        // Next successful cycle evaluates against the pre-failure value.
        let update = g.observe(Ok(19));
        assert_eq!(update.crossing.unwrap().threshold, Threshold::Half);
    }

    #[test]
    fn activate_resets_counts_and_returns_placeholder() {
        let mut g = gauge();
        g.observe(Ok(25));
        assert_eq!(g.activate(), GaugeDisplay::Loading);
        assert_eq!(g.current_count(), 0);
        assert_eq!(g.previous_count(), 0);
    }

    #[test]
    fn negative_count_clamps_to_empty_bar() {
        let mut g = gauge();
        let update = g.observe(Ok(-3));
        assert_eq!(filled_of(&update), 0);
        assert!(update.crossing.is_none());
    }

    #[test]
    fn full_message_set_has_fixed_text() {
        let with_10 = Threshold::Full.messages(10);
        let with_37 = Threshold::Full.messages(37);
        assert_eq!(with_10, with_37);
        assert_eq!(with_10.len(), 3);
    }

    #[test]
    fn lower_message_sets_include_the_count() {
        assert!(Threshold::Half.messages(19)[0].contains("19"));
        let three_quarters = Threshold::ThreeQuarters.messages(29);
        assert_eq!(three_quarters.len(), 3);
        assert!(three_quarters[2].contains("29"));
    }

    proptest! {
        #[test]
        fn bar_cells_always_sum_to_width(count in -100i64..500) {
            let g = gauge();
            let (text, filled) = g.render_bar(count);
            prop_assert!(filled <= 20);
            prop_assert_eq!(text.chars().count(), 20);
            let empty = text.chars().filter(|c| *c == '░').count();
            prop_assert_eq!(filled + empty, 20);
        }

        #[test]
        fn normalized_stays_in_unit_interval(count in -100i64..500) {
            let g = gauge();
            let n = g.normalized(count);
            prop_assert!((0.0..=1.0).contains(&n));
        }
    }
}

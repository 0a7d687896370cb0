//! Async drivers wiring the state machines to the remote counter service.
//!
//! Each runner owns one component, its client handle, its notifier and its
//! status surface, and runs on a single logical task -- timers via
//! `tokio::time`, no parallel poll cycles. Ticking is non-reentrant: a slow
//! remote call delays the next tick instead of stacking a second cycle on
//! top of the first.
//!
//! Timestamps handed to the wall-clock state machines derive from
//! `tokio::time::Instant`, so every delay here bends to a paused test
//! clock.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::autoloop::AutoSignalLoop;
use crate::button::{Activation, SignalButton, DEBOUNCE_TEXT};
use crate::client::CounterService;
use crate::config::Config;
use crate::error::RemoteError;
use crate::events::Event;
use crate::gauge::{EngagementGauge, GaugeDisplay, ERROR_TEXT, LOADING_TEXT};
use crate::notify::{announce, Notifier, Severity};
use crate::status::StatusSurface;

/// Drives the engagement gauge: activate, poll, render, announce.
pub struct GaugeRunner<C, N, S> {
    gauge: EngagementGauge,
    client: C,
    notifier: N,
    surface: S,
    poll_interval: Duration,
    message_gap: Duration,
    events: Option<UnboundedSender<Event>>,
}

impl<C, N, S> GaugeRunner<C, N, S>
where
    C: CounterService,
    N: Notifier,
    S: StatusSurface,
{
    pub fn new(cfg: &Config, client: C, notifier: N, surface: S) -> Self {
        Self {
            gauge: EngagementGauge::new(&cfg.gauge),
            client,
            notifier,
            surface,
            poll_interval: cfg.poll_interval(),
            message_gap: cfg.message_gap(),
            events: None,
        }
    }

    /// Forward every lifecycle event to the given channel.
    pub fn with_events(mut self, events: UnboundedSender<Event>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn gauge(&self) -> &EngagementGauge {
        &self.gauge
    }

    fn emit(&self, event: Event) {
        if let Some(tx) = &self.events {
            let _ = tx.send(event);
        }
    }

    /// Show the gauge and poll until the returned future is dropped.
    ///
    /// The first poll happens immediately, then one per period. A failed
    /// poll renders the error indicator and the loop keeps going.
    pub async fn run(&mut self) {
        self.gauge.activate();
        self.surface.set(LOADING_TEXT);
        self.emit(Event::GaugeShown { at: Utc::now() });

        let mut ticker = time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let sample = self.client.read().await;
            let failure = sample.as_ref().err().map(ToString::to_string);
            let update = self.gauge.observe(sample);

            match &update.display {
                GaugeDisplay::Bar { text, filled } => {
                    self.surface.set(text);
                    self.emit(Event::GaugeUpdated {
                        count: self.gauge.current_count(),
                        filled: *filled,
                        at: Utc::now(),
                    });
                }
                GaugeDisplay::Error => {
                    self.surface.set(ERROR_TEXT);
                    self.emit(Event::GaugeErrored {
                        message: failure.unwrap_or_default(),
                        at: Utc::now(),
                    });
                }
                GaugeDisplay::Loading => self.surface.set(LOADING_TEXT),
            }

            if let Some(crossing) = update.crossing {
                self.emit(Event::ThresholdCrossed {
                    threshold: crossing.threshold,
                    count: crossing.count,
                    at: Utc::now(),
                });
                announce(
                    &self.notifier,
                    crossing.severity,
                    &crossing.messages,
                    self.message_gap,
                )
                .await;
            }
        }
    }

    /// Tear down after `run` was cancelled: deactivate and remove the bar.
    pub fn hide(&mut self) -> Event {
        self.gauge.deactivate();
        self.surface.clear();
        let event = Event::GaugeHidden { at: Utc::now() };
        self.emit(event.clone());
        event
    }
}

/// Drives the signal button: debounce, increment, visual state, reset.
pub struct SignalRunner<C, N, S> {
    button: SignalButton,
    client: C,
    notifier: N,
    surface: S,
    reset_after: Duration,
    epoch: Instant,
}

impl<C, N, S> SignalRunner<C, N, S>
where
    C: CounterService,
    N: Notifier,
    S: StatusSurface,
{
    pub fn new(cfg: &Config, client: C, notifier: N, surface: S) -> Self {
        Self {
            button: SignalButton::new(&cfg.signal),
            client,
            notifier,
            surface,
            reset_after: cfg.reset_after(),
            epoch: Instant::now(),
        }
    }

    pub fn button(&self) -> &SignalButton {
        &self.button
    }

    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    fn render_visual(&mut self) {
        let visual = self.button.visual();
        self.surface.set(visual.glyph);
    }

    /// One activation end to end.
    pub async fn fire(&mut self) -> Event {
        match self.button.activate() {
            Activation::Debounced => {
                self.notifier.notify(Severity::Info, DEBOUNCE_TEXT);
                Event::SignalDebounced { at: Utc::now() }
            }
            Activation::SendIncrement => match self.client.increment().await {
                Ok(()) => {
                    self.button.confirm(self.now_ms());
                    self.render_visual();
                    Event::SignalSent { at: Utc::now() }
                }
                Err(e) => {
                    self.notifier
                        .notify(Severity::Error, &format!("failed to send signal: {e}"));
                    Event::SignalFailed {
                        message: e.to_string(),
                        at: Utc::now(),
                    }
                }
            },
        }
    }

    /// Wait out the reset delay and restore the idle visual.
    /// Returns `None` when the button was not fired.
    pub async fn wait_for_reset(&mut self) -> Option<Event> {
        if !self.button.is_fired() {
            return None;
        }
        time::sleep(self.reset_after).await;
        if self.button.tick(self.now_ms()) {
            self.render_visual();
            Some(Event::SignalReset { at: Utc::now() })
        } else {
            None
        }
    }
}

/// Drives the auto-signal loop: immediate increment, then one per period.
pub struct AutoLoopRunner<C, N, S> {
    state: AutoSignalLoop,
    client: C,
    notifier: N,
    surface: S,
    interval: Duration,
}

impl<C, N, S> AutoLoopRunner<C, N, S>
where
    C: CounterService,
    N: Notifier,
    S: StatusSurface,
{
    pub fn new(cfg: &Config, client: C, notifier: N, surface: S) -> Self {
        Self {
            state: AutoSignalLoop::new(&cfg.auto),
            client,
            notifier,
            surface,
            interval: cfg.auto_interval(),
        }
    }

    pub fn state(&self) -> &AutoSignalLoop {
        &self.state
    }

    fn render_visual(&mut self) {
        let visual = self.state.visual();
        self.surface.set(visual.glyph);
    }

    /// Flip the toggle on and update the affordance.
    pub fn enable(&mut self) -> Event {
        self.state.toggle();
        self.render_visual();
        Event::AutoLoopEnabled { at: Utc::now() }
    }

    /// Run while enabled. The immediate first increment propagates its
    /// failure to the caller; a later tick failure notifies, disables the
    /// loop and resolves with the disabled event.
    pub async fn run(&mut self) -> Result<Event, RemoteError> {
        self.client.increment().await?;

        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if let Err(e) = self.client.increment().await {
                self.notifier
                    .notify(Severity::Error, &format!("auto signal failed: {e}"));
                self.state.force_disable();
                self.render_visual();
                return Ok(Event::AutoLoopDisabled {
                    reason: Some(e.to_string()),
                    at: Utc::now(),
                });
            }
        }
    }

    /// Manual toggle off after `run` was cancelled.
    pub fn stop(&mut self) -> Event {
        if self.state.is_enabled() {
            self.state.toggle();
        }
        self.surface.clear();
        Event::AutoLoopDisabled {
            reason: None,
            at: Utc::now(),
        }
    }
}

//! # Classpulse Core Library
//!
//! Core logic for the Classpulse classroom-engagement toolkit. A shared
//! remote counter tracks how many students are currently lost; this crate
//! turns that counter into a live gauge, a one-shot signal button and an
//! automatic signal loop. The CLI binary is a thin orchestration layer over
//! this library.
//!
//! ## Architecture
//!
//! - **State machines**: [`EngagementGauge`], [`SignalButton`] and
//!   [`AutoSignalLoop`] are caller-driven and clock-agnostic -- no internal
//!   threads, no sockets
//! - **Runtime**: tokio-based runners drive the state machines against the
//!   remote service on fixed periods, one logical task each
//! - **Client**: [`CounterService`] is the seam to the remote counter;
//!   [`HttpCounterClient`] is the reqwest implementation
//! - **Notification channel**: [`Notifier`] carries threshold announcements
//!   and failures to the instructor

pub mod autoloop;
pub mod button;
pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod gauge;
pub mod notify;
pub mod runtime;
pub mod status;

pub use autoloop::{AutoSignalLoop, Toggle};
pub use button::{Activation, SignalButton};
pub use client::{CounterService, HttpCounterClient};
pub use config::Config;
pub use error::{ConfigError, CoreError, RemoteError, Result};
pub use events::Event;
pub use gauge::{Crossing, EngagementGauge, GaugeDisplay, GaugeUpdate, Threshold};
pub use notify::{announce, Notifier, Severity, TerminalNotifier};
pub use runtime::{AutoLoopRunner, GaugeRunner, SignalRunner};
pub use status::{Indicator, NullSurface, StatusSurface, TerminalStatus};

//! Diagnostic command: one raw increment against the counter service,
//! bypassing button debounce.

use chrono::Utc;
use classpulse_core::{CounterService, Event};

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (_cfg, client) = super::client()?;
    client.increment().await?;
    let event = Event::SignalSent { at: Utc::now() };
    println!("{}", serde_json::to_string_pretty(&event)?);
    Ok(())
}

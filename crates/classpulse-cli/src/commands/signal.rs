//! Fire one "I'm confused" signal through the button state machine.

use classpulse_core::{SignalRunner, TerminalNotifier, TerminalStatus};

pub async fn run(wait: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (cfg, client) = super::client()?;
    let mut runner = SignalRunner::new(&cfg, client, TerminalNotifier, TerminalStatus::new());

    let event = runner.fire().await;
    println!("{}", serde_json::to_string_pretty(&event)?);

    if wait {
        if let Some(reset) = runner.wait_for_reset().await {
            println!("{}", serde_json::to_string_pretty(&reset)?);
        }
    }

    Ok(())
}

//! Auto-signal loop command.
//!
//! Runs until Ctrl-C (manual toggle off) or until a failed tick makes the
//! loop disable itself. A failure of the immediate first increment
//! propagates as a command error.

use classpulse_core::{AutoLoopRunner, TerminalNotifier, TerminalStatus};

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (cfg, client) = super::client()?;
    let mut runner = AutoLoopRunner::new(&cfg, client, TerminalNotifier, TerminalStatus::new());

    let enabled = runner.enable();
    println!("{}", serde_json::to_string_pretty(&enabled)?);

    tokio::select! {
        outcome = runner.run() => {
            // Loop disabled itself after a tick failure.
            let event = outcome?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        _ = tokio::signal::ctrl_c() => {
            let event = runner.stop();
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
    }

    Ok(())
}

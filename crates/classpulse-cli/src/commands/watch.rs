//! Live gauge command: show the bar, poll until Ctrl-C, then hide it.

use classpulse_core::{GaugeRunner, NullSurface, TerminalNotifier, TerminalStatus};

pub async fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (cfg, client) = super::client()?;

    if json {
        // Headless mode: lifecycle events as JSON lines, no status bar.
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut runner =
            GaugeRunner::new(&cfg, client, TerminalNotifier, NullSurface).with_events(tx);

        let printer = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                if let Ok(line) = serde_json::to_string(&event) {
                    println!("{line}");
                }
            }
        });

        tokio::select! {
            _ = runner.run() => {}
            _ = tokio::signal::ctrl_c() => {}
        }
        runner.hide();
        drop(runner); // closes the event channel
        let _ = printer.await;
    } else {
        let mut runner = GaugeRunner::new(&cfg, client, TerminalNotifier, TerminalStatus::new());
        tokio::select! {
            _ = runner.run() => {}
            _ = tokio::signal::ctrl_c() => {}
        }
        let event = runner.hide();
        println!("{}", serde_json::to_string_pretty(&event)?);
    }

    Ok(())
}

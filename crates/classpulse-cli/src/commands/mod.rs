pub mod auto;
pub mod board;
pub mod config;
pub mod ping;
pub mod signal;
pub mod watch;

use classpulse_core::{Config, HttpCounterClient};

/// Build the HTTP client from the stored configuration.
pub fn client() -> Result<(Config, HttpCounterClient), Box<dyn std::error::Error>> {
    let cfg = Config::load_or_default();
    let client = HttpCounterClient::new(&cfg.remote.base_url)?;
    Ok((cfg, client))
}

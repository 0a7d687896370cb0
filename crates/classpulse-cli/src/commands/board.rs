//! Open the external class board. The panel itself lives outside this
//! tool; we only hand the configured URL to the OS opener.

use classpulse_core::Config;
use url::Url;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load_or_default();
    let url = Url::parse(&cfg.board.url)?;
    open::that(url.as_str())?;
    println!("opened {url}");
    Ok(())
}

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "classpulse", version, about = "Classpulse CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the engagement gauge and poll until Ctrl-C
    Watch {
        /// Print lifecycle events as JSON lines instead of the live bar
        #[arg(long)]
        json: bool,
    },
    /// Send one "I'm confused" signal
    Signal {
        /// Hold the fired state and wait out the reset delay
        #[arg(long)]
        wait: bool,
    },
    /// Run the auto-signal loop until Ctrl-C or a failed tick
    Auto,
    /// Open the class discussion board in the browser
    Board,
    /// Diagnostic: send one raw increment to the counter service
    Ping,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Watch { json } => commands::watch::run(json).await,
        Commands::Signal { wait } => commands::signal::run(wait).await,
        Commands::Auto => commands::auto::run().await,
        Commands::Board => commands::board::run(),
        Commands::Ping => commands::ping::run().await,
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

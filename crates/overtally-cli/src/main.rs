use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "overtally-cli", version, about = "Overtally CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive scoring session
    Score(commands::score::ScoreArgs),
    /// Apply a sequence of ball tokens and print the resulting state
    Replay(commands::replay::ReplayArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Score(args) => commands::score::run(args),
        Commands::Replay(args) => commands::replay::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

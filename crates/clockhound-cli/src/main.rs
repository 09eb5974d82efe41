use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "clockhound-cli", version, about = "Clockhound CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Organization file management
    Org {
        #[command(subcommand)]
        action: commands::org::OrgAction,
    },
    /// Run a hound settings command as a user
    Settings {
        /// Organization file
        #[arg(short, long, default_value = "clockhound.toml")]
        file: PathBuf,
        /// Invoking user's chat handle
        #[arg(short, long)]
        user: String,
        /// The raw command, e.g. `pause` or `acme 4 hours`
        command: Vec<String>,
    },
    /// Run the periodic reminder sweep over every user
    Sweep {
        /// Organization file
        #[arg(short, long, default_value = "clockhound.toml")]
        file: PathBuf,
        /// Evaluate at this RFC3339 instant instead of now
        #[arg(long)]
        at: Option<String>,
        /// Seed for deterministic phrase selection
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run the morning hound-status reset
    Reset {
        /// Organization file
        #[arg(short, long, default_value = "clockhound.toml")]
        file: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Org { action } => commands::org::run(action),
        Commands::Settings {
            file,
            user,
            command,
        } => commands::settings::run(&file, &user, &command.join(" ")),
        Commands::Sweep { file, at, seed } => commands::sweep::run(&file, at.as_deref(), seed),
        Commands::Reset { file } => commands::reset::run(&file),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

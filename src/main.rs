use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use dicelist::config::Config;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with configuration; flags given on the command line win.
    #[arg(global = true, long = "config")]
    config_file: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a dice list from a frequency corpus.
    Generate(cmd::generate::GenerateArgs),
    /// Audit an existing dice list.
    Validate(cmd::validate::ValidateArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .init();

    let (cli_config, sub_matches) = match &cli.command {
        Commands::Generate(args) => (args.config.clone(), matches.subcommand_matches("generate")),
        Commands::Validate(args) => (args.config(), matches.subcommand_matches("validate")),
    };

    let config = match (&cli.config_file, sub_matches) {
        (Some(path), Some(sub)) => {
            info!("⚙️  Loading configuration from: {}", path);
            match Config::load_from_file(path) {
                Ok(mut file_config) => {
                    file_config.merge_from_cli(&cli_config, sub);
                    file_config
                }
                Err(e) => {
                    error!("❌ Failed to load '{}': {}", path, e);
                    process::exit(1);
                }
            }
        }
        _ => cli_config,
    };

    let result = match cli.command {
        Commands::Generate(args) => cmd::generate::run(args, config),
        Commands::Validate(args) => cmd::validate::run(args, config),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}

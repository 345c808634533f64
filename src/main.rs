use clap::Parser;
use clusterview::cli::{self, Cli, Commands, ConfigCommands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => cli::serve::run_serve(args).await,
        Commands::Status(args) => cli::status::run_status(args).await,
        Commands::Config(ConfigCommands::Init(args)) => cli::handle_config_init(args),
        Commands::Completions(args) => {
            cli::handle_completions(args);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

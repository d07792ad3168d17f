use clap::Parser;
use clasp_secrets::cli::{init_logging, Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Upload { ref repo, yes } => {
            clasp_secrets::cli::commands::upload::execute(&cli, repo, yes)
        }
        Commands::Delete { ref repo, yes } => {
            clasp_secrets::cli::commands::delete::execute(&cli, repo, yes)
        }
        Commands::List { ref repo } => clasp_secrets::cli::commands::list::execute(&cli, repo),
        Commands::Verify => clasp_secrets::cli::commands::verify::execute(),
        Commands::Seed => clasp_secrets::cli::commands::seed::execute(),
        Commands::Completions { shell } => {
            clasp_secrets::cli::commands::completions::execute(shell)
        }
    };

    if let Err(e) = result {
        clasp_secrets::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

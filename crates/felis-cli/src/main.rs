use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::context::AppContext;

#[derive(Parser)]
#[command(name = "felis")]
#[command(about = "felis - browse the cat breed catalog with your account", long_about = None)]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this file for the persisted session instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and persist the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account (does not log in)
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Password confirmation; defaults to the password
        #[arg(long)]
        confirm: Option<String>,
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
    },
    /// End the current session
    Logout,
    /// Show the signed-in user
    Profile,
    /// List all breeds, optionally filtered
    Breeds {
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Show one breed with its images
    Breed {
        id: String,
        /// Number of images to fetch (at least 1)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        limit: Option<u32>,
    },
    /// Search breeds by name, origin or temperament
    Search {
        query: String,
        /// Ask the catalog server instead of filtering locally
        #[arg(long)]
        remote: bool,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let ctx = AppContext::build(cli.storage)?;

    match cli.command {
        Commands::Login { email, password } => commands::auth::login(&ctx, &email, &password).await,
        Commands::Register {
            username,
            email,
            password,
            confirm,
            first_name,
            last_name,
        } => {
            let confirm = confirm.unwrap_or_else(|| password.clone());
            let form = felis_core::validation::RegistrationForm {
                first_name,
                last_name,
                username,
                email,
                password,
                confirm_password: confirm,
            };
            commands::auth::register(&ctx, &form).await
        }
        Commands::Logout => commands::auth::logout(&ctx),
        Commands::Profile => commands::auth::profile(&ctx),
        Commands::Breeds { query } => commands::breeds::list(&ctx, query.as_deref()).await,
        Commands::Breed { id, limit } => commands::breeds::show(&ctx, &id, limit).await,
        Commands::Search { query, remote } => commands::breeds::search(&ctx, &query, remote).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("{}", format!("Error: {e:#}").red());
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breed_limit_must_be_positive() {
        assert!(Cli::try_parse_from(["felis", "breed", "siam", "--limit", "0"]).is_err());

        let cli = Cli::try_parse_from(["felis", "breed", "siam", "--limit", "3"]).unwrap();
        match cli.command {
            Commands::Breed { id, limit } => {
                assert_eq!(id, "siam");
                assert_eq!(limit, Some(3));
            }
            _ => panic!("Expected breed command"),
        }
    }
}

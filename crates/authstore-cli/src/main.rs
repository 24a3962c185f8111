//! authstore CLI - local accounts and sign-in sessions
//!
//! A command-line front end over the authstore core: every invocation loads
//! (or seeds) the account list first, the same way an app does at startup.

mod commands;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use authstore_core::{AuthConfig, AuthState, Database, PasswordScheme};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "authstore")]
#[command(author, version, about = "Local account store and sign-in CLI", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format: table (default) or json
    #[arg(long, global = true, default_value = "table")]
    format: output::OutputFormat,

    /// Suppress progress messages
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Override database path (or set AUTHSTORE_DB_PATH env var)
    #[arg(long, env = "AUTHSTORE_DB_PATH", global = true)]
    db: Option<String>,

    /// Password storage scheme: bcrypt or plaintext (or set AUTHSTORE_PASSWORD_SCHEME)
    #[arg(long, global = true)]
    password_scheme: Option<PasswordScheme>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the account list, creating the default administrator if it is empty
    Init,

    /// List registered accounts
    Users,

    /// Register a new account
    Register(commands::account::RegisterArgs),

    /// Check credentials and show the resulting session
    Login(commands::account::CredentialArgs),

    /// Sign in and delete that account
    DeleteAccount(commands::account::CredentialArgs),

    /// Interactive session reading commands from stdin
    Shell,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::print_error(&format!("Error: {:#}", err));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = AuthConfig::from_env()?;
    if let Some(scheme) = cli.password_scheme {
        config.password_scheme = scheme;
        config.validate()?;
    }

    // Open the backing store
    let db = match &cli.db {
        Some(path) => Database::open(PathBuf::from(shellexpand::tilde(path).into_owned())).await?,
        None => Database::new().await?,
    };

    let result = execute(cli, config, &db).await;

    db.close().await;
    result
}

async fn execute(cli: Cli, config: AuthConfig, db: &Database) -> Result<()> {
    let state = AuthState::new(Arc::new(db.clone()), config);
    let user_count = state.initialize().await?;
    log::debug!("Loaded {} users", user_count);

    // Create context for commands
    let ctx = commands::Context {
        state,
        format: cli.format,
        quiet: cli.quiet,
    };

    // Execute command
    match cli.command {
        Commands::Init => commands::account::init(&ctx).await,
        Commands::Users => commands::account::list_users(&ctx).await,
        Commands::Register(args) => commands::account::register(&ctx, args).await,
        Commands::Login(args) => commands::account::login(&ctx, args).await,
        Commands::DeleteAccount(args) => commands::account::delete_account(&ctx, args).await,
        Commands::Shell => commands::shell::run(&ctx).await,
    }
}

pub mod commands;
pub mod prompt;
pub mod utils;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::api::ApiClient;
use crate::config::{self, ConsoleConfig};
use crate::error::ConsoleError;
use crate::session::{Session, SessionStore};

#[derive(Parser)]
#[command(name = "alamal")]
#[command(about = "Alamal admin console - manage engineers, societies, reference types, users and backups")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(short = 'y', long, global = true, help = "Answer yes to confirmation prompts")]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Login, logout and session status")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Engineer cheque records")]
    Engineers {
        #[command(subcommand)]
        cmd: commands::engineer::EngineerCommands,
    },

    #[command(about = "Society cheque records")]
    Societies {
        #[command(subcommand)]
        cmd: commands::society::SocietyCommands,
    },

    #[command(name = "engineer-types", about = "Engineer type reference list")]
    EngineerTypes {
        #[command(subcommand)]
        cmd: commands::engineer_type::EngineerTypeCommands,
    },

    #[command(name = "batch-types", about = "Batch type reference list")]
    BatchTypes {
        #[command(subcommand)]
        cmd: commands::batch_type::BatchTypeCommands,
    },

    #[command(about = "Console user accounts")]
    Users {
        #[command(subcommand)]
        cmd: commands::user::UserCommands,
    },

    #[command(about = "Database backups and restore")]
    Backup {
        #[command(subcommand)]
        cmd: commands::backup::BackupCommands,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Everything a command handler needs: configuration, the persisted session
/// and a client bound to both.
pub struct Context {
    pub config: &'static ConsoleConfig,
    pub session: Arc<Session>,
    pub client: ApiClient,
    pub output: OutputFormat,
    pub assume_yes: bool,
}

impl Context {
    pub fn new(config: &'static ConsoleConfig, output: OutputFormat, assume_yes: bool) -> Result<Self, ConsoleError> {
        let session = Arc::new(Session::open(SessionStore::from_config(&config.storage)?)?);
        let client = ApiClient::from_config(config, session.clone())?;
        Ok(Self {
            config,
            session,
            client,
            output,
            assume_yes,
        })
    }

    /// Fails unless a token is stored; every screen past login needs one.
    pub fn require_login(&self) -> Result<(), ConsoleError> {
        if self.session.is_logged_in() {
            Ok(())
        } else {
            Err(ConsoleError::NotLoggedIn)
        }
    }

    pub fn confirmer(&self) -> prompt::StdinConfirm {
        prompt::StdinConfirm::new(self.assume_yes)
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output = OutputFormat::from_cli(&cli);
    let ctx = Context::new(config::config(), output, cli.yes)?;

    let result = match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, &ctx).await,
        Commands::Engineers { cmd } => commands::engineer::handle(cmd, &ctx).await,
        Commands::Societies { cmd } => commands::society::handle(cmd, &ctx).await,
        Commands::EngineerTypes { cmd } => commands::engineer_type::handle(cmd, &ctx).await,
        Commands::BatchTypes { cmd } => commands::batch_type::handle(cmd, &ctx).await,
        Commands::Users { cmd } => commands::user::handle(cmd, &ctx).await,
        Commands::Backup { cmd } => commands::backup::handle(cmd, &ctx).await,
    };

    // JSON consumers read the failure from stdout; the binary still reports it on stderr
    if let (Err(err), OutputFormat::Json) = (&result, output) {
        let code = err.downcast_ref::<ConsoleError>().map(ConsoleError::error_code);
        utils::output_error(&output, &err.to_string(), code)?;
    }
    result
}

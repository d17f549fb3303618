use clap::Subcommand;

use super::{create_record, delete_record, list_records, update_record};
use crate::api::UserGateway;
use crate::cli::prompt::password_or_prompt;
use crate::cli::Context;
use crate::controller::{UserController, UserCriteria};

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "List console users")]
    List {
        #[arg(long, help = "Username contains (case-insensitive)")]
        username: Option<String>,
    },

    #[command(about = "Create a console user")]
    Create {
        #[arg(help = "Username")]
        username: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Change a user's password")]
    Update {
        #[arg(help = "Username")]
        username: String,
        #[arg(long, help = "New password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Delete a console user")]
    Delete {
        #[arg(help = "Username")]
        username: String,
    },
}

pub async fn handle(cmd: UserCommands, ctx: &Context) -> anyhow::Result<()> {
    ctx.require_login()?;
    let mut controller = UserController::new(UserGateway::new(ctx.client.clone()), ctx.session.clone(), &ctx.config.ui);

    match cmd {
        UserCommands::List { username } => {
            let criteria = UserCriteria {
                username: username.unwrap_or_default(),
            };
            list_records(ctx, &mut controller, criteria, false).await
        }
        UserCommands::Create { username, password } => {
            let password = password_or_prompt(password)?;
            create_record(ctx, &mut controller, |form| {
                form.username = username;
                form.password = password;
            })
            .await
        }
        UserCommands::Update { username, password } => {
            let password = password_or_prompt(password)?;
            update_record(ctx, &mut controller, &username, |form| form.password = password).await
        }
        UserCommands::Delete { username } => delete_record(ctx, &mut controller, &username).await,
    }
}

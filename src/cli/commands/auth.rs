use clap::Subcommand;
use serde_json::json;

use crate::api::AuthGateway;
use crate::cli::prompt::password_or_prompt;
use crate::cli::utils::output_success;
use crate::cli::{Context, OutputFormat};
use crate::models::LoginRequest;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login to the backend")]
    Login {
        #[arg(help = "Username")]
        username: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Forget the stored token")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,
}

pub async fn handle(cmd: AuthCommands, ctx: &Context) -> anyhow::Result<()> {
    let gateway = AuthGateway::new(ctx.client.clone());

    match cmd {
        AuthCommands::Login { username, password } => {
            let credentials = LoginRequest {
                username,
                password: password_or_prompt(password)?,
            };
            let response = gateway.login(&credentials).await.map_err(|err| {
                let message = err.display_message("Invalid username or password");
                anyhow::Error::new(err).context(message)
            })?;
            output_success(
                &ctx.output,
                &format!("Logged in as {}", response.username),
                Some(json!({ "username": response.username, "expiration": response.expiration })),
            )
        }
        AuthCommands::Logout => {
            gateway.logout()?;
            output_success(&ctx.output, "Logged out", None)
        }
        AuthCommands::Status => {
            let username = ctx.session.username();
            let logged_in = ctx.session.is_logged_in();
            match ctx.output {
                OutputFormat::Json => {
                    let status = json!({
                        "logged_in": logged_in,
                        "username": username,
                        "api_url": ctx.config.api.base_url,
                    });
                    println!("{}", serde_json::to_string_pretty(&status)?);
                }
                OutputFormat::Text => {
                    match (logged_in, username) {
                        (true, Some(username)) => println!("Logged in as {}", username),
                        (true, None) => println!("Logged in"),
                        (false, _) => println!("Not logged in"),
                    }
                    println!("API: {}", ctx.config.api.base_url);
                }
            }
            Ok(())
        }
    }
}

use clap::Subcommand;

use super::{create_record, delete_record, list_records, update_record};
use crate::api::{EngineerTypeGateway, ResourceGateway};
use crate::cli::utils::output_record;
use crate::cli::Context;
use crate::controller::{EngineerTypeController, EngineerTypeCriteria};

#[derive(Subcommand)]
pub enum EngineerTypeCommands {
    #[command(about = "List engineer types")]
    List {
        #[arg(long = "type", help = "Type contains (case-insensitive)")]
        engineer_type: Option<String>,
    },

    #[command(about = "Show one engineer type by label")]
    Get {
        #[arg(help = "Type label")]
        engineer_type: String,
    },

    #[command(about = "Create an engineer type")]
    Create {
        #[arg(help = "Type label")]
        engineer_type: String,
    },

    #[command(about = "Rename an engineer type")]
    Update {
        #[arg(help = "Engineer type id")]
        id: i64,
        #[arg(help = "New label")]
        engineer_type: String,
    },

    #[command(about = "Delete an engineer type")]
    Delete {
        #[arg(help = "Engineer type id")]
        id: i64,
    },
}

pub async fn handle(cmd: EngineerTypeCommands, ctx: &Context) -> anyhow::Result<()> {
    ctx.require_login()?;
    let gateway = EngineerTypeGateway::new(ctx.client.clone());
    let mut controller = EngineerTypeController::new(gateway, ctx.session.clone(), &ctx.config.ui);

    match cmd {
        EngineerTypeCommands::List { engineer_type } => {
            let criteria = EngineerTypeCriteria {
                engineer_type: engineer_type.unwrap_or_default(),
            };
            list_records(ctx, &mut controller, criteria, false).await
        }
        EngineerTypeCommands::Get { engineer_type } => {
            let record = controller.gateway().get_by_key(&engineer_type).await?;
            output_record(&ctx.output, &record)
        }
        EngineerTypeCommands::Create { engineer_type } => {
            create_record(ctx, &mut controller, |form| form.engineer_type = engineer_type).await
        }
        EngineerTypeCommands::Update { id, engineer_type } => {
            update_record(ctx, &mut controller, &id, |form| form.engineer_type = engineer_type).await
        }
        EngineerTypeCommands::Delete { id } => delete_record(ctx, &mut controller, &id).await,
    }
}

use clap::Subcommand;

use super::{create_record, delete_record, list_records, update_record};
use crate::api::{BatchTypeGateway, ResourceGateway};
use crate::cli::utils::output_record;
use crate::cli::Context;
use crate::controller::{BatchTypeController, BatchTypeCriteria};

#[derive(Subcommand)]
pub enum BatchTypeCommands {
    #[command(about = "List batch types")]
    List {
        #[arg(long = "type", help = "Type contains (case-insensitive)")]
        batch_type: Option<String>,
    },

    #[command(about = "Show one batch type by label")]
    Get {
        #[arg(help = "Type label")]
        batch_type: String,
    },

    #[command(about = "Create a batch type")]
    Create {
        #[arg(help = "Type label")]
        batch_type: String,
        #[arg(long)]
        section: Option<i64>,
    },

    #[command(about = "Update a batch type")]
    Update {
        #[arg(help = "Batch type id")]
        id: i64,
        #[arg(long = "type")]
        batch_type: Option<String>,
        #[arg(long)]
        section: Option<i64>,
    },

    #[command(about = "Delete a batch type")]
    Delete {
        #[arg(help = "Batch type id")]
        id: i64,
    },
}

pub async fn handle(cmd: BatchTypeCommands, ctx: &Context) -> anyhow::Result<()> {
    ctx.require_login()?;
    let gateway = BatchTypeGateway::new(ctx.client.clone());
    let mut controller = BatchTypeController::new(gateway, ctx.session.clone(), &ctx.config.ui);

    match cmd {
        BatchTypeCommands::List { batch_type } => {
            let criteria = BatchTypeCriteria {
                batch_type: batch_type.unwrap_or_default(),
            };
            list_records(ctx, &mut controller, criteria, false).await
        }
        BatchTypeCommands::Get { batch_type } => {
            let record = controller.gateway().get_by_key(&batch_type).await?;
            output_record(&ctx.output, &record)
        }
        BatchTypeCommands::Create { batch_type, section } => {
            create_record(ctx, &mut controller, |form| {
                form.batch_type = batch_type;
                form.section = section;
            })
            .await
        }
        BatchTypeCommands::Update { id, batch_type, section } => {
            update_record(ctx, &mut controller, &id, |form| {
                if let Some(batch_type) = batch_type {
                    form.batch_type = batch_type;
                }
                if section.is_some() {
                    form.section = section;
                }
            })
            .await
        }
        BatchTypeCommands::Delete { id } => delete_record(ctx, &mut controller, &id).await,
    }
}

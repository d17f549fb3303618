use chrono::NaiveDate;
use clap::{Args, Subcommand};

use super::{create_record, delete_record, list_records, prepare_list, update_record};
use crate::api::{ResourceGateway, SocietyGateway};
use crate::cli::utils::{output_groups, output_record, output_records};
use crate::cli::Context;
use crate::controller::{SocietyController, SocietyCriteria, SummaryPanel};
use crate::models::SocietyRequest;

#[derive(Subcommand)]
pub enum SocietyCommands {
    #[command(about = "List societies, newest first")]
    List {
        #[command(flatten)]
        filter: SocietyFilter,
        #[arg(long, help = "Oldest first")]
        asc: bool,
        #[arg(long, help = "Group rows by society name with combined batches")]
        grouped: bool,
    },

    #[command(about = "Show one society record by cheque number")]
    Get {
        #[arg(help = "Cheque number")]
        cheque_number: i64,
    },

    #[command(about = "Create a society record")]
    Create {
        #[command(flatten)]
        fields: SocietyFields,
    },

    #[command(about = "Update a society record")]
    Update {
        #[arg(help = "Attachment number")]
        id: i64,
        #[command(flatten)]
        fields: SocietyFields,
    },

    #[command(about = "Delete a society record")]
    Delete {
        #[arg(help = "Attachment number")]
        id: i64,
    },

    #[command(about = "Batches and totals for one society name")]
    Summary {
        #[arg(help = "Society name")]
        name: String,
    },

    #[command(about = "Server-side search by name and/or date")]
    Search {
        #[arg(long)]
        name: Option<String>,
        #[arg(long, help = "Cheque date (YYYY-MM-DD)")]
        date: Option<NaiveDate>,
    },
}

#[derive(Args, Debug, Default)]
pub struct SocietyFilter {
    #[arg(long, help = "Name contains (case-insensitive)")]
    pub name: Option<String>,
    #[arg(long = "batch-type", help = "Batch type contains (case-insensitive)")]
    pub batch_type: Option<String>,
    #[arg(long, help = "Cheque date (YYYY-MM-DD)")]
    pub date: Option<NaiveDate>,
    #[arg(long, help = "Cheque number")]
    pub cheque: Option<i64>,
}

impl From<SocietyFilter> for SocietyCriteria {
    fn from(filter: SocietyFilter) -> Self {
        SocietyCriteria {
            name: filter.name.unwrap_or_default(),
            batch_type: filter.batch_type.unwrap_or_default(),
            date: filter.date,
            cheque_number: filter.cheque,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct SocietyFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub cheque: Option<i64>,
    #[arg(long)]
    pub sum: Option<f64>,
    #[arg(long, help = "Cheque date (YYYY-MM-DD)")]
    pub date: Option<NaiveDate>,
    #[arg(long = "batch-type")]
    pub batch_type: Option<String>,
    #[arg(long)]
    pub section: Option<i64>,
    #[arg(long = "batch", help = "Batch number; repeat for several. Replaces existing batches on update")]
    pub batches: Vec<f64>,
}

impl SocietyFields {
    fn apply(self, form: &mut SocietyRequest) {
        if let Some(name) = self.name {
            form.society_name = name;
        }
        if let Some(cheque) = self.cheque {
            form.cheque_number = cheque;
        }
        if let Some(sum) = self.sum {
            form.sum = sum;
        }
        if self.date.is_some() {
            form.date = self.date;
        }
        if let Some(batch_type) = self.batch_type {
            form.batch_type = batch_type;
        }
        if self.section.is_some() {
            form.section = self.section;
        }
        if !self.batches.is_empty() {
            form.batches.clear();
            for batch in self.batches {
                form.add_batch(batch);
            }
        }
    }
}

pub async fn handle(cmd: SocietyCommands, ctx: &Context) -> anyhow::Result<()> {
    ctx.require_login()?;
    let gateway = SocietyGateway::new(ctx.client.clone());

    match cmd {
        SocietyCommands::List { filter, asc, grouped } => {
            let mut controller = SocietyController::new(gateway, ctx.session.clone(), &ctx.config.ui);
            if grouped {
                prepare_list(&mut controller, filter.into(), asc).await?;
                output_groups(&ctx.output, controller.groups(), "batches", "No societies found")
            } else {
                list_records(ctx, &mut controller, filter.into(), asc).await
            }
        }
        SocietyCommands::Get { cheque_number } => {
            let society = gateway.get_by_key(&cheque_number).await?;
            output_record(&ctx.output, &society)
        }
        SocietyCommands::Create { fields } => {
            let mut controller = SocietyController::new(gateway, ctx.session.clone(), &ctx.config.ui);
            create_record(ctx, &mut controller, |form| fields.apply(form)).await
        }
        SocietyCommands::Update { id, fields } => {
            let mut controller = SocietyController::new(gateway, ctx.session.clone(), &ctx.config.ui);
            update_record(ctx, &mut controller, &id, |form| fields.apply(form)).await
        }
        SocietyCommands::Delete { id } => {
            let mut controller = SocietyController::new(gateway, ctx.session.clone(), &ctx.config.ui);
            delete_record(ctx, &mut controller, &id).await
        }
        SocietyCommands::Summary { name } => {
            let mut panel = SummaryPanel::new();
            panel.show(&gateway, &name).await;
            match panel.data() {
                Some(summary) => output_record(&ctx.output, summary),
                None => Err(anyhow::anyhow!("No summary available for '{}'", name)),
            }
        }
        SocietyCommands::Search { name, date } => {
            let societies = match (name, date) {
                (Some(name), Some(date)) => gateway.by_name_and_date(&name, date).await?,
                (Some(name), None) => gateway.by_name(&name).await?,
                (None, Some(date)) => gateway.by_date(date).await?,
                (None, None) => gateway.list().await?,
            };
            output_records(&ctx.output, "societies", &societies, "No societies found")
        }
    }
}

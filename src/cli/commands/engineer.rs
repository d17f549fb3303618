use chrono::NaiveDate;
use clap::{Args, Subcommand};

use super::{create_record, delete_record, list_records, prepare_list, update_record};
use crate::api::{EngineerGateway, ResourceGateway};
use crate::cli::utils::{output_groups, output_record, output_records};
use crate::cli::Context;
use crate::controller::{EngineerController, EngineerCriteria, SummaryPanel};
use crate::models::EngineerRequest;

#[derive(Subcommand)]
pub enum EngineerCommands {
    #[command(about = "List engineers, newest first")]
    List {
        #[command(flatten)]
        filter: EngineerFilter,
        #[arg(long, help = "Oldest first")]
        asc: bool,
        #[arg(long, help = "Group rows by engineer name with combined acts")]
        grouped: bool,
    },

    #[command(about = "Show one engineer record by cheque number")]
    Get {
        #[arg(help = "Cheque number")]
        cheque_number: i64,
    },

    #[command(about = "Create an engineer record")]
    Create {
        #[command(flatten)]
        fields: EngineerFields,
    },

    #[command(about = "Update an engineer record")]
    Update {
        #[arg(help = "Engineer id")]
        id: i64,
        #[command(flatten)]
        fields: EngineerFields,
    },

    #[command(about = "Delete an engineer record")]
    Delete {
        #[arg(help = "Engineer id")]
        id: i64,
    },

    #[command(about = "Acts and totals for one engineer name")]
    Summary {
        #[arg(help = "Engineer name")]
        name: String,
    },

    #[command(about = "Server-side search by name, type or cheque date")]
    Search {
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "type", conflicts_with_all = ["name", "date"], help = "Engineer type; searched on its own")]
        engineer_type: Option<String>,
        #[arg(long, help = "Cheque date (YYYY-MM-DD)")]
        date: Option<NaiveDate>,
    },
}

#[derive(Args, Debug, Default)]
pub struct EngineerFilter {
    #[arg(long, help = "Name contains (case-insensitive)")]
    pub name: Option<String>,
    #[arg(long = "type", help = "Engineer type contains (case-insensitive)")]
    pub engineer_type: Option<String>,
    #[arg(long, help = "Cheque date (YYYY-MM-DD)")]
    pub date: Option<NaiveDate>,
    #[arg(long, help = "Cheque number")]
    pub cheque: Option<i64>,
}

impl From<EngineerFilter> for EngineerCriteria {
    fn from(filter: EngineerFilter) -> Self {
        EngineerCriteria {
            name: filter.name.unwrap_or_default(),
            engineer_type: filter.engineer_type.unwrap_or_default(),
            cheque_date: filter.date,
            cheque_number: filter.cheque,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct EngineerFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub cheque: Option<i64>,
    #[arg(long)]
    pub amount: Option<f64>,
    #[arg(long, help = "Cheque date (YYYY-MM-DD)")]
    pub date: Option<NaiveDate>,
    #[arg(long = "type")]
    pub engineer_type: Option<String>,
    #[arg(long = "act", help = "Act number; repeat for several. Replaces existing acts on update")]
    pub acts: Vec<f64>,
}

impl EngineerFields {
    fn apply(self, form: &mut EngineerRequest) {
        if let Some(name) = self.name {
            form.engineer_name = name;
        }
        if let Some(cheque) = self.cheque {
            form.cheque_number = cheque;
        }
        if let Some(amount) = self.amount {
            form.amount = amount;
        }
        if self.date.is_some() {
            form.cheque_date = self.date;
        }
        if let Some(engineer_type) = self.engineer_type {
            form.engineer_type = engineer_type;
        }
        if !self.acts.is_empty() {
            form.acts.clear();
            for act in self.acts {
                form.add_act(act);
            }
        }
    }
}

pub async fn handle(cmd: EngineerCommands, ctx: &Context) -> anyhow::Result<()> {
    ctx.require_login()?;
    let gateway = EngineerGateway::new(ctx.client.clone());

    match cmd {
        EngineerCommands::List { filter, asc, grouped } => {
            let mut controller = EngineerController::new(gateway, ctx.session.clone(), &ctx.config.ui);
            if grouped {
                prepare_list(&mut controller, filter.into(), asc).await?;
                output_groups(&ctx.output, controller.groups(), "acts", "No engineers found")
            } else {
                list_records(ctx, &mut controller, filter.into(), asc).await
            }
        }
        EngineerCommands::Get { cheque_number } => {
            let engineer = gateway.get_by_key(&cheque_number).await?;
            output_record(&ctx.output, &engineer)
        }
        EngineerCommands::Create { fields } => {
            let mut controller = EngineerController::new(gateway, ctx.session.clone(), &ctx.config.ui);
            create_record(ctx, &mut controller, |form| fields.apply(form)).await
        }
        EngineerCommands::Update { id, fields } => {
            let mut controller = EngineerController::new(gateway, ctx.session.clone(), &ctx.config.ui);
            update_record(ctx, &mut controller, &id, |form| fields.apply(form)).await
        }
        EngineerCommands::Delete { id } => {
            let mut controller = EngineerController::new(gateway, ctx.session.clone(), &ctx.config.ui);
            delete_record(ctx, &mut controller, &id).await
        }
        EngineerCommands::Summary { name } => {
            let mut panel = SummaryPanel::new();
            panel.show(&gateway, &name).await;
            match panel.data() {
                Some(summary) => output_record(&ctx.output, summary),
                None => Err(anyhow::anyhow!("No summary available for '{}'", name)),
            }
        }
        EngineerCommands::Search {
            name,
            engineer_type,
            date,
        } => {
            let engineers = match (name, engineer_type, date) {
                (Some(name), None, Some(date)) => gateway.by_name_and_date(&name, date).await?,
                (Some(name), None, None) => gateway.by_name(&name).await?,
                (None, Some(engineer_type), None) => gateway.by_type(&engineer_type).await?,
                (None, None, Some(date)) => gateway.by_cheque_date(date).await?,
                (None, None, None) => gateway.list().await?,
                (_, Some(_), _) => anyhow::bail!("--type cannot be combined with --name or --date"),
            };
            output_records(&ctx.output, "engineers", &engineers, "No engineers found")
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::{Cli, Commands};

    fn parse_search(args: &[&str]) -> Result<EngineerCommands, clap::Error> {
        let argv = ["alamal", "engineers", "search"].iter().chain(args);
        Cli::try_parse_from(argv).map(|cli| match cli.command {
            Commands::Engineers { cmd } => cmd,
            _ => panic!("expected engineers command"),
        })
    }

    #[test]
    fn search_by_type_stands_alone() {
        match parse_search(&["--type", "Civil"]).unwrap() {
            EngineerCommands::Search {
                name,
                engineer_type,
                date,
            } => {
                assert_eq!(name, None);
                assert_eq!(engineer_type.as_deref(), Some("Civil"));
                assert_eq!(date, None);
            }
            _ => panic!("expected search"),
        }

        assert!(parse_search(&["--name", "Ali", "--date", "2024-01-15"]).is_ok());
    }

    #[test]
    fn search_rejects_type_with_other_criteria() {
        let err = parse_search(&["--name", "Ali", "--type", "Civil"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);

        let err = parse_search(&["--type", "Civil", "--date", "2024-01-15"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn update_fields_only_touch_what_was_given() {
        let mut form = EngineerRequest {
            engineer_name: "Ali".to_string(),
            cheque_number: 5,
            amount: 20.0,
            acts: vec![1.0],
            ..Default::default()
        };
        EngineerFields {
            amount: Some(35.5),
            acts: vec![7.0, 0.0, 8.0],
            ..Default::default()
        }
        .apply(&mut form);

        assert_eq!(form.engineer_name, "Ali");
        assert_eq!(form.cheque_number, 5);
        assert_eq!(form.amount, 35.5);
        assert_eq!(form.acts, vec![7.0, 8.0]);
    }
}

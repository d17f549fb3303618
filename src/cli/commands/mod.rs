pub mod auth;
pub mod backup;
pub mod batch_type;
pub mod engineer;
pub mod engineer_type;
pub mod society;
pub mod user;

use std::fmt::Display;
use std::time::Instant;

use anyhow::Context as _;
use serde::Serialize;
use serde_json::json;

use crate::api::ResourceGateway;
use crate::cli::utils::{output_records, output_success};
use crate::cli::Context;
use crate::controller::{ListController, ListResource, SortDirection};
use crate::models::capitalize;

/// Loads, filters and prints one list screen.
pub(crate) async fn list_records<R, G>(
    ctx: &Context,
    controller: &mut ListController<R, G>,
    criteria: R::Criteria,
    ascending: bool,
) -> anyhow::Result<()>
where
    R: ListResource + Serialize + Display,
    G: ResourceGateway<R>,
{
    prepare_list(controller, criteria, ascending).await?;
    output_records(
        &ctx.output,
        R::PLURAL,
        controller.records(),
        &format!("No {} found", R::PLURAL),
    )
}

/// Loads, then applies criteria and order; grouped and flat listings share it.
pub(crate) async fn prepare_list<R, G>(
    controller: &mut ListController<R, G>,
    criteria: R::Criteria,
    ascending: bool,
) -> anyhow::Result<()>
where
    R: ListResource,
    G: ResourceGateway<R>,
{
    load(controller).await?;
    controller.filter(criteria);
    if ascending {
        controller.set_sort(SortDirection::Ascending);
    }
    Ok(())
}

pub(crate) async fn load<R, G>(controller: &mut ListController<R, G>) -> anyhow::Result<()>
where
    R: ListResource,
    G: ResourceGateway<R>,
{
    if let Err(err) = controller.load().await {
        let message = controller.error_message().unwrap_or(R::PLURAL).to_string();
        return Err(anyhow::Error::new(err).context(message));
    }
    Ok(())
}

/// Opens the create form, lets `fill` populate it and submits.
pub(crate) async fn create_record<R, G>(
    ctx: &Context,
    controller: &mut ListController<R, G>,
    fill: impl FnOnce(&mut R::Request),
) -> anyhow::Result<()>
where
    R: ListResource + Serialize,
    G: ResourceGateway<R>,
{
    controller.open_create();
    fill(controller.form_mut());
    submit(ctx, controller).await
}

/// Loads the list, opens the edit form for `id`, applies `fill` and submits.
pub(crate) async fn update_record<R, G>(
    ctx: &Context,
    controller: &mut ListController<R, G>,
    id: &R::Id,
    fill: impl FnOnce(&mut R::Request),
) -> anyhow::Result<()>
where
    R: ListResource + Serialize,
    G: ResourceGateway<R>,
{
    load(controller).await?;
    let record = controller
        .find(id)
        .cloned()
        .with_context(|| format!("{} {} not found", capitalize(R::LABEL), id))?;
    controller.open_edit(&record);
    fill(controller.form_mut());
    submit(ctx, controller).await
}

async fn submit<R, G>(ctx: &Context, controller: &mut ListController<R, G>) -> anyhow::Result<()>
where
    R: ListResource + Serialize,
    G: ResourceGateway<R>,
{
    match controller.submit().await {
        Ok(record) => {
            let message = controller.success_message().unwrap_or_default().to_string();
            // A CLI run has no modal to keep open
            controller.tick(Instant::now() + ctx.config.ui.modal_close_delay());
            output_success(&ctx.output, &message, Some(json!({ "record": record })))
        }
        Err(err) => {
            let message = controller.error_message().unwrap_or_default().to_string();
            Err(anyhow::Error::new(err).context(message))
        }
    }
}

pub(crate) async fn delete_record<R, G>(ctx: &Context, controller: &mut ListController<R, G>, id: &R::Id) -> anyhow::Result<()>
where
    R: ListResource,
    G: ResourceGateway<R>,
{
    match controller.remove(id, &ctx.confirmer()).await {
        Ok(true) => {
            let message = controller.success_message().unwrap_or_default().to_string();
            output_success(&ctx.output, &message, Some(json!({ "deleted": id.to_string() })))
        }
        Ok(false) => output_success(&ctx.output, "Cancelled", None),
        Err(err) => {
            let message = controller.error_message().unwrap_or_default().to_string();
            Err(anyhow::Error::new(err).context(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::controller::testing::controller;
    use crate::controller::EngineerCriteria;
    use crate::models::Engineer;

    fn engineer(id: i64, name: &str, acts: &[f64]) -> Engineer {
        Engineer {
            engineer_id: id,
            cheque_number: 1000 + id,
            engineer_name: name.to_string(),
            amount: 100.0,
            cheque_date: NaiveDate::from_ymd_opt(2024, 1, id as u32).unwrap(),
            acts: acts.to_vec(),
            engineer_type: "Civil".to_string(),
            created_by: "admin".to_string(),
        }
    }

    fn fixtures() -> Vec<Engineer> {
        vec![
            engineer(1, "Ali", &[1.0, 2.0]),
            engineer(2, "Sara", &[]),
            engineer(3, "Ali", &[3.0]),
        ]
    }

    #[tokio::test]
    async fn ascending_flag_reorders_groups_too() {
        let mut controller = controller(fixtures());
        prepare_list(&mut controller, EngineerCriteria::default(), true).await.unwrap();

        assert_eq!(controller.sort(), SortDirection::Ascending);
        assert_eq!(controller.sub_items_for("Ali"), &[1.0, 2.0, 3.0]);
        let rows: Vec<i64> = controller.group("Ali").unwrap().rows.iter().map(|e| e.engineer_id).collect();
        assert_eq!(rows, vec![1, 3]);
    }

    #[tokio::test]
    async fn default_listing_stays_newest_first() {
        let mut controller = controller(fixtures());
        prepare_list(
            &mut controller,
            EngineerCriteria {
                name: "ali".to_string(),
                ..Default::default()
            },
            false,
        )
        .await
        .unwrap();

        assert_eq!(controller.sort(), SortDirection::Descending);
        assert_eq!(controller.sub_items_for("Ali"), &[3.0, 1.0, 2.0]);
        assert!(controller.group("Sara").is_none());
    }
}

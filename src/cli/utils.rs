use std::fmt::Display;

use serde::Serialize;
use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::grouping::GroupedView;
use crate::models::format_values;

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(target), Some(Value::Object(extra))) = (response.as_object_mut(), data) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(output_format: &OutputFormat, message: &str, error_code: Option<&str>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Output a list of records, or `empty_message` when there are none
pub fn output_records<T: Serialize + Display>(
    output_format: &OutputFormat,
    collection_name: &str,
    records: &[T],
    empty_message: &str,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ collection_name: records }))?);
        }
        OutputFormat::Text if records.is_empty() => println!("{}", empty_message),
        OutputFormat::Text => {
            for record in records {
                println!("{}", record);
            }
        }
    }
    Ok(())
}

/// Output a single record
pub fn output_record<T: Serialize + Display>(output_format: &OutputFormat, record: &T) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(record)?),
        OutputFormat::Text => println!("{}", record),
    }
    Ok(())
}

/// Output a name-grouped view: one header per name with its combined
/// sub-items, then the rows.
pub fn output_groups<T: Serialize + Display>(
    output_format: &OutputFormat,
    groups: &GroupedView<T>,
    sub_items_label: &str,
    empty_message: &str,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(groups)?),
        OutputFormat::Text if groups.is_empty() => println!("{}", empty_message),
        OutputFormat::Text => {
            for (name, group) in groups {
                println!(
                    "{} ({} records) {}: [{}]",
                    name,
                    group.rows.len(),
                    sub_items_label,
                    format_values(&group.sub_items)
                );
                for row in &group.rows {
                    println!("    {}", row);
                }
            }
        }
    }
    Ok(())
}

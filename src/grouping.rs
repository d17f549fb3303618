//! Name-keyed grouping of a filtered, sorted list.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Engineer, Society};

/// Records that group under a display name and carry a numeric sub-list
/// (acts for engineers, batches for societies).
pub trait Groupable {
    fn group_name(&self) -> &str;
    fn sub_items(&self) -> &[f64];
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group<R> {
    pub rows: Vec<R>,
    pub sub_items: Vec<f64>,
}

impl<R> Default for Group<R> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            sub_items: Vec::new(),
        }
    }
}

pub type GroupedView<R> = BTreeMap<String, Group<R>>;

/// Folds `rows` into groups, keeping input order for both the rows of each
/// group and the concatenated sub-items. Always builds a fresh map.
pub fn group_by_name<R: Groupable + Clone>(rows: &[R]) -> GroupedView<R> {
    rows.iter().fold(GroupedView::new(), |mut groups, row| {
        let group = groups.entry(row.group_name().to_string()).or_default();
        group.rows.push(row.clone());
        group.sub_items.extend_from_slice(row.sub_items());
        groups
    })
}

impl Groupable for Engineer {
    fn group_name(&self) -> &str {
        &self.engineer_name
    }

    fn sub_items(&self) -> &[f64] {
        &self.acts
    }
}

impl Groupable for Society {
    fn group_name(&self) -> &str {
        &self.society_name
    }

    fn sub_items(&self) -> &[f64] {
        &self.batches
    }
}

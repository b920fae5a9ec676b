use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::links;

pub const EVALUATION_NAME: &str = "tensorzero::evaluation_name";
pub const EVALUATION_RUN_ID: &str = "tensorzero::evaluation_run_id";
pub const DATASET_NAME: &str = "tensorzero::dataset_name";
pub const DATAPOINT_ID: &str = "tensorzero::datapoint_id";
pub const EVALUATOR_INFERENCE_ID: &str = "tensorzero::evaluator_inference_id";

pub const EMPTY_STATE: &str = "No tags found";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagRow {
    pub key: String,
    pub value: String,
    /// Where clicking the row navigates, if anywhere
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl TagRow {
    pub fn is_navigable(&self) -> bool {
        self.href.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagsTable {
    pub rows: Vec<TagRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_state: Option<String>,
}

/// Build the rows of a tag table, in key order
pub fn tag_rows(tags: &BTreeMap<String, String>) -> TagsTable {
    let rows: Vec<TagRow> = tags
        .iter()
        .map(|(key, value)| TagRow {
            key: key.clone(),
            value: value.clone(),
            href: tag_href(tags, key, value),
        })
        .collect();

    let empty_state = rows.is_empty().then(|| EMPTY_STATE.to_string());
    TagsTable { rows, empty_state }
}

/// Run ids and datapoint ids only link somewhere when their parent name is tagged too
fn tag_href(tags: &BTreeMap<String, String>, key: &str, value: &str) -> Option<String> {
    match key {
        EVALUATION_NAME => Some(links::evaluation(value)),
        DATASET_NAME => Some(links::dataset(value)),
        EVALUATOR_INFERENCE_ID => Some(links::inference(value)),
        EVALUATION_RUN_ID => {
            non_empty(tags, EVALUATION_NAME).map(|name| links::evaluation_run(name, value))
        }
        DATAPOINT_ID => non_empty(tags, DATASET_NAME).map(|name| links::datapoint(name, value)),
        _ => None,
    }
}

fn non_empty<'a>(tags: &'a BTreeMap<String, String>, key: &str) -> Option<&'a str> {
    tags.get(key).map(String::as_str).filter(|v| !v.is_empty())
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::links;

pub const EMPTY_STATE: &str = "No inferences found";
const TIMESTAMP_FORMAT: &str = "%b %-d, %Y, %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionType {
    Chat,
    Json,
}

/// An inference as looked up by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceByIdRow {
    pub id: String,
    pub function_name: String,
    pub variant_name: String,
    pub episode_id: String,
    pub function_type: FunctionType,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkCell {
    pub text: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceTableRow {
    pub inference: LinkCell,
    pub episode: LinkCell,
    pub function: LinkCell,
    pub variant: LinkCell,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferencesTable {
    pub rows: Vec<InferenceTableRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_state: Option<String>,
}

impl From<&InferenceByIdRow> for InferenceTableRow {
    fn from(row: &InferenceByIdRow) -> Self {
        InferenceTableRow {
            inference: LinkCell {
                text: row.id.clone(),
                href: links::inference(&row.id),
            },
            episode: LinkCell {
                text: row.episode_id.clone(),
                href: links::episode(&row.episode_id),
            },
            function: LinkCell {
                text: row.function_name.clone(),
                href: links::function(&row.function_name),
            },
            variant: LinkCell {
                text: row.variant_name.clone(),
                href: links::variant(&row.function_name, &row.variant_name),
            },
            time: format_timestamp(&row.timestamp),
        }
    }
}

pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

pub fn inference_rows(inferences: &[InferenceByIdRow]) -> InferencesTable {
    let rows: Vec<InferenceTableRow> = inferences.iter().map(InferenceTableRow::from).collect();
    let empty_state = rows.is_empty().then(|| EMPTY_STATE.to_string());
    InferencesTable { rows, empty_state }
}

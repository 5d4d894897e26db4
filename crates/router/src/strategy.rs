//! Maps raw query rows onto navigable [`ResultRecord`]s.

use crate::error::Result;
use crate::term::SearchTerm;
use orgjump_protocol::ResultRecord;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct FlowDefinitionRow {
    pub id: String,
    pub developer_name: String,
    #[serde(default)]
    pub active_version: Option<FlowVersionRef>,
    #[serde(default)]
    pub latest_version: Option<FlowVersionRef>,
    #[serde(default)]
    pub active_version_id: Option<String>,
    #[serde(default)]
    pub latest_version_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FlowVersionRef {
    #[serde(rename = "MasterLabel", default)]
    pub master_label: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct UserRow {
    id: String,
    name: String,
    #[serde(default)]
    username: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ProfileRow {
    id: String,
    name: String,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn version_label(version: &Option<FlowVersionRef>) -> Option<&str> {
    version.as_ref().and_then(|v| non_empty(&v.master_label))
}

impl FlowDefinitionRow {
    /// Only versions open in the builder, and admins almost always want the
    /// active one: active version, then latest (draft), then the definition.
    pub fn target_id(&self) -> &str {
        non_empty(&self.active_version_id)
            .or_else(|| non_empty(&self.latest_version_id))
            .unwrap_or(self.id.as_str())
    }

    pub fn is_active(&self) -> bool {
        non_empty(&self.active_version_id).is_some()
    }

    pub fn display_label(&self) -> &str {
        version_label(&self.active_version)
            .or_else(|| version_label(&self.latest_version))
            .unwrap_or(self.developer_name.as_str())
    }

    fn into_record(self) -> ResultRecord {
        let id = self.target_id().to_string();
        let status = if self.is_active() { "Active" } else { "Draft" };
        ResultRecord {
            label: format!("{} ({status})", self.display_label()),
            subtitle: self.developer_name.clone(),
            target: format!("/builder_platform_interaction/flowBuilder.app?flowId={id}"),
            id,
        }
    }
}

fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>, limit: usize) -> Result<Vec<T>> {
    rows.into_iter()
        .take(limit)
        .map(|row| serde_json::from_value(row).map_err(Into::into))
        .collect()
}

pub(crate) fn flow_records(rows: Vec<Value>, limit: usize) -> Result<Vec<ResultRecord>> {
    Ok(decode_rows::<FlowDefinitionRow>(rows, limit)?
        .into_iter()
        .map(FlowDefinitionRow::into_record)
        .collect())
}

pub(crate) fn user_records(rows: Vec<Value>, limit: usize) -> Result<Vec<ResultRecord>> {
    Ok(decode_rows::<UserRow>(rows, limit)?
        .into_iter()
        .map(|row| ResultRecord {
            target: format!("/lightning/setup/ManageUsers/page?address=%2F{}", row.id),
            id: row.id,
            label: row.name,
            subtitle: row.username,
        })
        .collect())
}

pub(crate) fn profile_records(rows: Vec<Value>, limit: usize) -> Result<Vec<ResultRecord>> {
    Ok(decode_rows::<ProfileRow>(rows, limit)?
        .into_iter()
        .map(|row| ResultRecord {
            target: format!("/lightning/setup/EnhancedProfiles/page?address=%2F{}", row.id),
            id: row.id,
            label: row.name,
            subtitle: "Profile".to_string(),
        })
        .collect())
}

/// Object lookups trust the typed API name; a wrong name lands on the
/// platform's own "not found" page.
pub(crate) fn object_record(term: &SearchTerm) -> ResultRecord {
    let name = term.as_str();
    ResultRecord {
        id: name.to_string(),
        label: name.to_string(),
        subtitle: "Object Manager".to_string(),
        target: format!("/lightning/setup/ObjectManager/{name}/Details/view"),
    }
}

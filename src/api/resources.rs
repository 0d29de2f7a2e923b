use super::client::{ApiClient, ApiError};
use super::{Page, StatusMessage};
use crate::query::ListQuery;
use serde::{Deserialize, Serialize};

pub const FILTER_NAMES: [&str; 1] = ["type"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Apps,
    Articles,
    Audios,
    Videos,
    Books,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Apps,
        ResourceKind::Articles,
        ResourceKind::Audios,
        ResourceKind::Videos,
        ResourceKind::Books,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Apps => "apps",
            ResourceKind::Articles => "articles",
            ResourceKind::Audios => "audios",
            ResourceKind::Videos => "videos",
            ResourceKind::Books => "books",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Apps => "Apps",
            ResourceKind::Articles => "Articles",
            ResourceKind::Audios => "Audios",
            ResourceKind::Videos => "Videos",
            ResourceKind::Books => "Books",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CreatedBy {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "fullName", default)]
    pub full_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExternalResource {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub link: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    #[serde(rename = "createdBy", default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<CreatedBy>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ResourceEnvelope {
    data: ExternalResource,
}

pub fn list(api: &ApiClient, query: &ListQuery) -> Result<Page<ExternalResource>, ApiError> {
    api.get_with("resource", &query.to_pairs(&FILTER_NAMES))
}

pub fn get(api: &ApiClient, id: &str) -> Result<ExternalResource, ApiError> {
    let envelope: ResourceEnvelope = api.get(&format!("resource/{id}"))?;
    Ok(envelope.data)
}

pub fn add(api: &ApiClient, resource: &ExternalResource) -> Result<StatusMessage, ApiError> {
    api.post("resource", resource)
}

pub fn update(
    api: &ApiClient,
    id: &str,
    resource: &ExternalResource,
) -> Result<StatusMessage, ApiError> {
    api.put(&format!("resource/{id}"), resource)
}

pub fn delete(api: &ApiClient, id: &str) -> Result<StatusMessage, ApiError> {
    api.delete(&format!("resource/{id}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_uses_lowercase_wire_values() {
        let json = serde_json::to_value(ResourceKind::Articles).unwrap();
        assert_eq!(json, "articles");
        let kind: ResourceKind = serde_json::from_str(r#""books""#).unwrap();
        assert_eq!(kind, ResourceKind::Books);
    }

    #[test]
    fn resource_round_trips_wire_names() {
        let json = r#"{
            "_id": "88c3",
            "name": "The Rust Book",
            "link": "https://doc.rust-lang.org/book/",
            "type": "books",
            "createdBy": {"_id": "66a1", "fullName": "Ana Ruiz"},
            "createdAt": "2026-01-12T08:30:00.000Z"
        }"#;
        let resource: ExternalResource = serde_json::from_str(json).unwrap();
        assert_eq!(resource.kind, ResourceKind::Books);
        assert_eq!(
            resource.created_by.as_ref().map(|c| c.full_name.as_str()),
            Some("Ana Ruiz")
        );
        let value = serde_json::to_value(&resource).unwrap();
        assert_eq!(value["type"], "books");
    }
}

use super::client::{ApiClient, ApiError};
use super::{Page, StatusMessage};
use crate::query::ListQuery;
use serde::{Deserialize, Serialize};

pub const FILTER_NAMES: [&str; 4] = ["city", "type", "isOnline", "status"];

/// Status tabs offered by the events page; `upcoming` is the landing tab.
pub const STATUS_TABS: [&str; 3] = ["upcoming", "ongoing", "completed"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Event {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "startDateTime", default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(rename = "endDateTime", default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(rename = "isOnline", default)]
    pub is_online: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Distinct filter values for the currently selected status tab.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FilterOptions {
    #[serde(default)]
    pub cities: Vec<String>,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct EventEnvelope {
    data: Event,
}

#[derive(Debug, Clone, Deserialize)]
struct EventListEnvelope {
    #[serde(default)]
    data: Vec<Event>,
}

#[derive(Debug, Clone, Deserialize)]
struct FilterOptionsEnvelope {
    #[serde(default)]
    data: FilterOptions,
}

pub fn list(api: &ApiClient, query: &ListQuery) -> Result<Page<Event>, ApiError> {
    api.get_with("events/getAll", &query.to_pairs(&FILTER_NAMES))
}

pub fn get(api: &ApiClient, id: &str) -> Result<Event, ApiError> {
    let envelope: EventEnvelope = api.get(&format!("events/get/{id}"))?;
    Ok(envelope.data)
}

pub fn add(api: &ApiClient, event: &Event) -> Result<StatusMessage, ApiError> {
    api.post("events/add", event)
}

pub fn update(api: &ApiClient, id: &str, event: &Event) -> Result<StatusMessage, ApiError> {
    api.put(&format!("events/update/{id}"), event)
}

pub fn delete(api: &ApiClient, id: &str) -> Result<StatusMessage, ApiError> {
    api.delete(&format!("events/delete/{id}"))
}

/// Unpaginated list feeding the dashboard aggregates.
pub fn list_all(api: &ApiClient) -> Result<Vec<Event>, ApiError> {
    let envelope: EventListEnvelope = api.get("events/getAllEvents")?;
    Ok(envelope.data)
}

/// Distinct city/type values for the given status tab.
pub fn filter_options(api: &ApiClient, status: &str) -> Result<FilterOptions, ApiError> {
    let envelope: FilterOptionsEnvelope = api.get_with(
        "events/getAllFilters",
        &[("status".to_string(), status.to_string())],
    )?;
    Ok(envelope.data)
}

use super::client::{ApiClient, ApiError};
use super::StatusMessage;
use serde::{Deserialize, Serialize};

/// One dashboard panel in the persisted configuration. The key set is fixed
/// by the application; `order` positions the widget and `visible` hides it
/// without losing its place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WidgetItem {
    pub key: String,
    pub visible: bool,
    pub order: i64,
}

impl WidgetItem {
    /// Configuration used before the user has ever saved one.
    pub fn defaults() -> Vec<WidgetItem> {
        ["summary", "event", "user"]
            .into_iter()
            .enumerate()
            .map(|(index, key)| WidgetItem {
                key: key.to_string(),
                visible: true,
                order: index as i64,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WidgetCollection {
    #[serde(default)]
    widgets: Vec<WidgetItem>,
}

/// Fetch the persisted widget configuration; an empty server-side
/// configuration falls back to the default set.
pub fn get(api: &ApiClient) -> Result<Vec<WidgetItem>, ApiError> {
    let collection: WidgetCollection = api.get("widget/get")?;
    if collection.widgets.is_empty() {
        Ok(WidgetItem::defaults())
    } else {
        Ok(collection.widgets)
    }
}

/// Persist the whole collection at once.
pub fn add_or_update(api: &ApiClient, widgets: &[WidgetItem]) -> Result<StatusMessage, ApiError> {
    let body = WidgetCollection {
        widgets: widgets.to_vec(),
    };
    api.post("widget/add-or-update", &body)
}

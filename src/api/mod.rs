pub mod auth;
pub mod client;
pub mod events;
pub mod resources;
pub mod users;
pub mod widgets;

pub use client::{ApiClient, ApiError};

use serde::{Deserialize, Serialize};

/// Envelope for paginated list responses: `{ data, total, totalPages? }`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(rename = "totalPages", default)]
    pub total_pages: Option<u32>,
}

impl<T> Page<T> {
    /// Total pages, derived from the item count when the server does not
    /// report it.
    pub fn page_count(&self, page_size: u32) -> u32 {
        match self.total_pages {
            Some(pages) => pages,
            None => {
                let size = page_size.max(1) as u64;
                ((self.total + size - 1) / size) as u32
            }
        }
    }
}

/// Envelope for mutation responses: `{ success?, message? }`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StatusMessage {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

impl StatusMessage {
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.message.as_deref().unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_derives_from_total() {
        let page: Page<u32> = Page {
            data: vec![],
            total: 101,
            total_pages: None,
        };
        assert_eq!(page.page_count(10), 11);
        assert_eq!(page.page_count(25), 5);
    }

    #[test]
    fn page_count_prefers_server_value() {
        let page: Page<u32> = Page {
            data: vec![],
            total: 101,
            total_pages: Some(7),
        };
        assert_eq!(page.page_count(10), 7);
    }

    #[test]
    fn status_message_fallback() {
        let status = StatusMessage::default();
        assert_eq!(status.message_or("done"), "done");
        let status: StatusMessage =
            serde_json::from_str(r#"{"success":true,"message":"Saved"}"#).unwrap();
        assert_eq!(status.message_or("done"), "Saved");
    }
}

use super::client::{ApiClient, ApiError};
use super::{Page, StatusMessage};
use crate::query::ListQuery;
use serde::{Deserialize, Serialize};

pub const FILTER_NAMES: [&str; 2] = ["role", "isVerified"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Admin,
    Manager,
    Employee,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::Admin, UserRole::Manager, UserRole::Employee];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "Admin",
            UserRole::Manager => "Manager",
            UserRole::Employee => "Employee",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(rename = "isVerified", default)]
    pub is_verified: bool,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct UserEnvelope {
    data: User,
}

#[derive(Debug, Clone, Deserialize)]
struct UserListEnvelope {
    #[serde(default)]
    data: Vec<User>,
}

pub fn list(api: &ApiClient, query: &ListQuery) -> Result<Page<User>, ApiError> {
    api.get_with("user/get", &query.to_pairs(&FILTER_NAMES))
}

pub fn get(api: &ApiClient, id: &str) -> Result<User, ApiError> {
    let envelope: UserEnvelope = api.get(&format!("user/get/{id}"))?;
    Ok(envelope.data)
}

pub fn add(api: &ApiClient, user: &User) -> Result<StatusMessage, ApiError> {
    api.post("user/add", user)
}

pub fn update(api: &ApiClient, id: &str, user: &User) -> Result<StatusMessage, ApiError> {
    api.put(&format!("user/update/{id}"), user)
}

pub fn delete(api: &ApiClient, id: &str) -> Result<StatusMessage, ApiError> {
    api.delete(&format!("user/delete/{id}"))
}

/// Unpaginated list feeding the dashboard aggregates.
pub fn list_all(api: &ApiClient) -> Result<Vec<User>, ApiError> {
    let envelope: UserListEnvelope = api.get("user/getAllUser")?;
    Ok(envelope.data)
}

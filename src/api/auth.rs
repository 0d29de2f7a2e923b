use super::client::{ApiClient, ApiError};
use super::StatusMessage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OtpRequest {
    pub email: String,
    pub otp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmailRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    #[serde(rename = "fullName", default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ProfileEnvelope {
    data: Profile,
}

#[derive(Debug, Clone, Deserialize)]
struct RoleAccessResponse {
    #[serde(rename = "hasAccess", default)]
    has_access: bool,
}

pub fn register(api: &ApiClient, request: &RegisterRequest) -> Result<StatusMessage, ApiError> {
    api.post("auth/signup", request)
}

pub fn login(api: &ApiClient, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
    api.post("auth/login", request)
}

pub fn verify_email(api: &ApiClient, request: &OtpRequest) -> Result<StatusMessage, ApiError> {
    api.post("auth/verify-email", request)
}

pub fn resend_email(api: &ApiClient, request: &EmailRequest) -> Result<StatusMessage, ApiError> {
    api.post("auth/resend-email", request)
}

pub fn forget_password(api: &ApiClient, request: &EmailRequest) -> Result<StatusMessage, ApiError> {
    api.post("auth/forget-password", request)
}

pub fn verify_forget_password(
    api: &ApiClient,
    request: &ResetPasswordRequest,
) -> Result<StatusMessage, ApiError> {
    api.post("auth/verify-forget-password", request)
}

pub fn get_user_details(api: &ApiClient) -> Result<Profile, ApiError> {
    let envelope: ProfileEnvelope = api.get("auth/getUserDetails")?;
    Ok(envelope.data)
}

/// Capability check gating the mutating controls. The caller treats any
/// failure as "no access".
pub fn check_role_access(api: &ApiClient) -> Result<bool, ApiError> {
    let response: RoleAccessResponse = api.get("auth/check-role-access")?;
    Ok(response.has_access)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_payload_uses_wire_names() {
        let request = RegisterRequest {
            full_name: "Ana Ruiz".into(),
            email: "ana@example.test".into(),
            password: "hunter2hunter2".into(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["fullName"], "Ana Ruiz");
        assert!(json.get("full_name").is_none());
    }

    #[test]
    fn reset_payload_uses_wire_names() {
        let request = ResetPasswordRequest {
            email: "ana@example.test".into(),
            otp: "123456".into(),
            new_password: "fresh-pass-9".into(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["newPassword"], "fresh-pass-9");
    }

    #[test]
    fn role_access_defaults_to_false_on_missing_field() {
        let response: RoleAccessResponse = serde_json::from_str("{}").unwrap();
        assert!(!response.has_access);
    }
}

use serde::{Deserialize, Serialize};

/// Request body for signup and login. Absent fields decode as empty
/// strings and are rejected by the handlers' presence check.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Request body for check-email.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CheckEmailRequest {
    pub email: String,
}

/// Request body for reset-password.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: &'static str,
}

impl SuccessResponse {
    pub fn new(message: &'static str) -> Self {
        Self {
            success: true,
            message,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CheckEmailResponse {
    pub exists: bool,
}

use gloo::net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{
    ErrorResponse, UpdateAvatarResponse, UpdateDailyNormRequest, UpdateDailyNormResponse,
    UpdateProfileRequest, UserProfile,
};
use thiserror::Error;
use web_sys::{File, FormData};

use super::config::AppConfig;

/// Failure of a single backend call; `Display` is what the user sees
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Failed to prepare request: {0}")]
    Serialize(String),
    #[error("Failed to parse response: {0}")]
    Parse(String),
    #[error("{message}")]
    Server { status: u16, message: String },
}

impl From<gloo::net::Error> for ApiError {
    fn from(e: gloo::net::Error) -> Self {
        ApiError::Network(e.to_string())
    }
}

/// API client for the AquaTrack backend
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client with the configured base URL
    pub fn new() -> Self {
        Self::with_base_url(AppConfig::from_env().api_base_url)
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            token: None,
        }
    }

    /// Same client, sending `Authorization: Bearer <token>`
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    /// Update the daily water norm
    pub async fn update_daily_norm(
        &self,
        request: &UpdateDailyNormRequest,
    ) -> Result<UpdateDailyNormResponse, ApiError> {
        let url = self.url("/api/aquatrack/daily-water-requirement");
        self.send_json(Request::patch(&url), request).await
    }

    /// Update the changed subset of the profile
    pub async fn update_profile(
        &self,
        request: &UpdateProfileRequest,
    ) -> Result<UserProfile, ApiError> {
        let url = self.url("/api/users/update");
        self.send_json(Request::patch(&url), request).await
    }

    /// Upload a new avatar as multipart form data
    pub async fn update_avatar(&self, file: &File) -> Result<UpdateAvatarResponse, ApiError> {
        let url = self.url("/api/users/avatars");

        let form = FormData::new()
            .map_err(|_| ApiError::Serialize("FormData is unavailable".to_string()))?;
        form.append_with_blob_and_filename("avatar", file, &file.name())
            .map_err(|_| ApiError::Serialize("Failed to attach avatar".to_string()))?;

        let request = self
            .authorize(Request::patch(&url))
            .body(form)
            .map_err(|e| ApiError::Serialize(e.to_string()))?;
        let response = request.send().await?;
        Self::read_json(response).await
    }

    /// End the session on the backend
    pub async fn logout(&self) -> Result<(), ApiError> {
        let url = self.url("/api/users/logout");
        let response = self.authorize(Request::post(&url)).send().await?;
        if response.ok() {
            Ok(())
        } else {
            Err(Self::server_error(response).await)
        }
    }

    async fn send_json<B, T>(&self, builder: RequestBuilder, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let request = self
            .authorize(builder)
            .json(body)
            .map_err(|e| ApiError::Serialize(e.to_string()))?;
        let response = request.send().await?;
        Self::read_json(response).await
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        if !response.ok() {
            return Err(Self::server_error(response).await);
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn server_error(response: Response) -> ApiError {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        ApiError::Server {
            status,
            message: server_message(status, &text),
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Picks the backend's `message` field, falling back to the raw body
fn server_message(status: u16, body: &str) -> String {
    if let Ok(error) = serde_json::from_str::<ErrorResponse>(body) {
        return error.message;
    }
    let body = body.trim();
    if body.is_empty() {
        format!("Server error {}", status)
    } else {
        format!("Server error {}: {}", status, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_prefers_json_message() {
        let message = server_message(409, r#"{"message":"Email in use"}"#);
        assert_eq!(message, "Email in use");
    }

    #[test]
    fn test_server_message_falls_back_to_body() {
        assert_eq!(server_message(500, ""), "Server error 500");
        assert_eq!(server_message(502, "Bad Gateway"), "Server error 502: Bad Gateway");
    }

    #[test]
    fn test_server_error_displays_message_only() {
        let error = ApiError::Server {
            status: 401,
            message: "Password is wrong".to_string(),
        };
        assert_eq!(error.to_string(), "Password is wrong");
    }

    #[test]
    fn test_token_is_kept() {
        let client = ApiClient::with_base_url("http://localhost:3000".to_string())
            .with_token(Some("abc".to_string()));
        assert_eq!(client.token.as_deref(), Some("abc"));
        assert_eq!(client.url("/api/users/logout"), "http://localhost:3000/api/users/logout");
    }
}

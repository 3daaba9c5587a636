use std::time::Duration;

use crate::doctor::Doctor;

/// How long the connectivity probe waits before calling the backend down.
const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Client for the hospital backend directory API.
///
/// Unlike the AI chat wrapper this client does check status codes: the
/// backend speaks plain REST and a non-2xx answer is a failure, not a
/// payload.
pub struct DirectoryClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl DirectoryClient {
    /// Create a client for a backend base URL (e.g. `http://localhost:8080`)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Create a client over a caller-configured transport
    pub fn with_http_client(base_url: impl Into<String>, http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    /// Fetch the full doctor list
    pub async fn get_doctors(&self) -> Result<Vec<Doctor>, DirectoryError> {
        let url = format!("{}/api/doctors", self.base_url);
        log::debug!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| DirectoryError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DirectoryError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| DirectoryError::Parse(e.to_string()))
    }

    /// Fetch the list of department names
    pub async fn get_departments(&self) -> Result<Vec<String>, DirectoryError> {
        let url = format!("{}/api/departments", self.base_url);
        log::debug!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| DirectoryError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DirectoryError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| DirectoryError::Parse(e.to_string()))
    }

    /// Probe backend connectivity with a short per-request timeout.
    pub async fn check_connection(&self) -> Result<(), DirectoryError> {
        let url = format!("{}/api/doctors", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
            .map_err(|e| DirectoryError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Api {
                status: status.as_u16(),
                message: String::new(),
            });
        }

        Ok(())
    }

    /// The configured backend base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Directory API errors
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("http error: {0}")]
    Http(String),

    #[error("api error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(String),
}

// Server API HTTP client.
// Handles the session cookie, default headers, and response envelope unwrapping.

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::de::DeserializeOwned;

use crate::error::{Result, ShellError};

use super::types::ApiResponse;

/// Error code the server returns when the session is missing or expired.
const NEED_LOGGED_IN: &str = "NEED_LOGGED_IN";

/// Client for the database-client server.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the server at `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ShellError::InvalidUrl(base_url));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("dbdesk-tui"));

        let client = Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .build()
            .map_err(ShellError::Http)?;

        Ok(Self { client, base_url })
    }

    #[cfg(test)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET an endpoint and unwrap the envelope.
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Option<T>> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self.client.get(&url).send().await?;
        let response = check_response(response).await?;
        unwrap_envelope(response.json().await?)
    }

    /// GET with query parameters.
    pub async fn get_with_params<T, P>(&self, endpoint: &str, params: &P) -> Result<Option<T>>
    where
        T: DeserializeOwned,
        P: serde::Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self.client.get(&url).query(params).send().await?;
        let response = check_response(response).await?;
        unwrap_envelope(response.json().await?)
    }

    /// POST with an empty body.
    pub async fn post<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Option<T>> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self.client.post(&url).send().await?;
        let response = check_response(response).await?;
        unwrap_envelope(response.json().await?)
    }
}

/// Check response status and convert errors.
async fn check_response(response: Response) -> Result<Response> {
    match response.status() {
        StatusCode::OK | StatusCode::CREATED | StatusCode::ACCEPTED => Ok(response),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ShellError::Unauthorized),
        status => Err(ShellError::Other(format!(
            "HTTP {}: {}",
            status,
            response.text().await.unwrap_or_default()
        ))),
    }
}

/// Turn a response envelope into its payload or a typed error.
pub(crate) fn unwrap_envelope<T>(envelope: ApiResponse<T>) -> Result<Option<T>> {
    if envelope.success {
        return Ok(envelope.data);
    }
    let code = envelope.error_code.unwrap_or_default();
    if code == NEED_LOGGED_IN {
        return Err(ShellError::Unauthorized);
    }
    Err(ShellError::Server {
        code,
        message: envelope.error_message.unwrap_or_default(),
    })
}

//! HTTP helpers for the JSON API. Feature clients use these helpers to avoid
//! duplicating request setup and to keep error extraction uniform: a failed
//! response surfaces the API's `error` field, or a status-coded fallback.
//! Requests are never retried and carry no explicit timeout; the transport
//! defaults apply. The helpers do not store tokens; they only attach headers
//! provided by callers.

use super::{config::AppConfig, errors::AppError, APP_USER_AGENT};
use reqwest::{header::CONTENT_TYPE, Client, Method, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Thin wrapper around a shared `reqwest::Client` bound to the API base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// # Errors
    /// Returns `AppError::Config` if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    /// # Errors
    /// Returns `AppError::Config` if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        Self::new(&config.api_base_url)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a GET with extra headers and decodes the JSON body.
    ///
    /// # Errors
    /// Returns an error on transport failure, a non-2xx status, or an undecodable body.
    pub async fn get_json_with_headers<T: DeserializeOwned>(
        &self,
        path: &str,
        headers: &[(String, String)],
    ) -> Result<T, AppError> {
        let body = self.request(Method::GET, path, None, headers).await?;
        decode_json(body)
    }

    /// Posts JSON and decodes the JSON body.
    ///
    /// # Errors
    /// Returns an error on transport failure, a non-2xx status, or an undecodable body.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        self.post_json_with_headers(path, body, &[]).await
    }

    /// Posts JSON with extra headers and decodes the JSON body.
    ///
    /// # Errors
    /// Returns an error on transport failure, a non-2xx status, or an undecodable body.
    pub async fn post_json_with_headers<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        headers: &[(String, String)],
    ) -> Result<T, AppError> {
        let payload = encode_json(body)?;
        let body = self.request(Method::POST, path, Some(payload), headers).await?;
        decode_json(body)
    }

    /// Posts JSON with extra headers; a missing or non-JSON body decodes as `T::default()`.
    ///
    /// # Errors
    /// Returns an error on transport failure, a non-2xx status, or a JSON body that does not fit `T`.
    pub async fn post_json_with_headers_optional<B: Serialize, T: DeserializeOwned + Default>(
        &self,
        path: &str,
        body: &B,
        headers: &[(String, String)],
    ) -> Result<T, AppError> {
        let payload = encode_json(body)?;
        match self.request(Method::POST, path, Some(payload), headers).await? {
            Some(value) => decode_value(value),
            None => Ok(T::default()),
        }
    }

    /// Single request path for every endpoint. Always sends JSON and merges the
    /// caller's headers on top of the `Content-Type`. The returned body is `None`
    /// when the response is not JSON, regardless of status.
    ///
    /// # Errors
    /// Returns `AppError::Http` for non-2xx responses and `AppError::Network` for transport failures.
    #[instrument(skip(self, payload, headers), fields(http.method = %method))]
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        payload: Option<String>,
        headers: &[(String, String)],
    ) -> Result<Option<Value>, AppError> {
        let url = build_url(&self.base_url, path)?;

        let mut builder = self
            .client
            .request(method, url.as_str())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE);

        for (name, value) in headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(payload) = payload {
            builder = builder.body(payload);
        }

        let response = builder.send().await.map_err(map_request_error)?;
        handle_response(response).await
    }
}

/// Builds an `Authorization: Bearer` header pair for a session token.
#[must_use]
pub fn bearer_header(token: &SecretString) -> (String, String) {
    (
        "Authorization".to_string(),
        format!("Bearer {}", token.expose_secret()),
    )
}

/// Joins the base URL and path. An empty base keeps the path as given.
///
/// # Errors
/// Returns `AppError::Config` when the joined URL is not absolute, which happens
/// when no base URL is configured.
pub fn build_url(base_url: &str, path: &str) -> Result<Url, AppError> {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    let joined = if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    };

    Url::parse(&joined).map_err(|err| {
        AppError::Config(format!(
            "Cannot build request URL {joined}: {err}. Set the API base URL."
        ))
    })
}

/// Extracts the user-facing failure message: the body's `error` string when
/// present and non-empty, otherwise a status-coded fallback.
#[must_use]
pub fn error_message(status: u16, body: Option<&Value>) -> String {
    body.and_then(|body| body.get("error"))
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map_or_else(
            || format!("Request failed with status {status}"),
            ToString::to_string,
        )
}

fn map_request_error(err: reqwest::Error) -> AppError {
    AppError::Network(format!("Unable to reach the server: {err}"))
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains(JSON_CONTENT_TYPE))
}

async fn handle_response(response: Response) -> Result<Option<Value>, AppError> {
    let status = response.status();
    let json = is_json(&response);
    let text = response.text().await.map_err(map_request_error)?;

    let body = if json {
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => Some(value),
            Err(err) if status.is_success() => {
                return Err(AppError::Parse(format!("Failed to decode response: {err}")));
            }
            Err(_) => None,
        }
    } else {
        None
    };

    if status.is_success() {
        debug!(status = status.as_u16(), "request succeeded");
        Ok(body)
    } else {
        let message = error_message(status.as_u16(), body.as_ref());
        debug!(status = status.as_u16(), %message, "request failed");
        Err(AppError::Http {
            status: status.as_u16(),
            message,
        })
    }
}

fn encode_json<B: Serialize>(body: &B) -> Result<String, AppError> {
    serde_json::to_string(body)
        .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))
}

fn decode_json<T: DeserializeOwned>(body: Option<Value>) -> Result<T, AppError> {
    let value = body.ok_or_else(|| AppError::Parse("Response body is missing".to_string()))?;
    decode_value(value)
}

fn decode_value<T: DeserializeOwned>(value: Value) -> Result<T, AppError> {
    serde_json::from_value(value)
        .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
}

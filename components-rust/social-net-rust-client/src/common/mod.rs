use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use common_lib::domain::common::{Empty, Envelope};
use common_lib::Attachment;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, HOST};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

pub const TOKEN_HEADER: &str = "token";

/// Thin wrapper over `reqwest::Client` bound to the API base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    host: Option<String>,
}

/// Outcome of one exchange, named for logging. Transport errors are kept
/// until the caller decides on the message to surface.
pub struct ApiResponse {
    pub name: String,
    pub response: std::result::Result<reqwest::Response, reqwest::Error>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::request(None, format!("Failed to build HTTP client: {e}")))?;

        Ok(ApiClient {
            http,
            base_url: config.base_url.clone(),
            host: config.host.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get_request(&self, name: &str, path: &str, token: Option<&str>) -> ApiResponse {
        let request_builder = self.request_builder(Method::GET, path, token);
        self.request(name, request_builder).await
    }

    pub async fn post_request<T: Serialize + ?Sized>(
        &self,
        name: &str,
        path: &str,
        token: Option<&str>,
        json: &T,
    ) -> ApiResponse {
        let request_builder = self.request_builder(Method::POST, path, token).json(json);
        self.request(name, request_builder).await
    }

    pub async fn put_request<T: Serialize + ?Sized>(
        &self,
        name: &str,
        path: &str,
        token: Option<&str>,
        json: &T,
    ) -> ApiResponse {
        let request_builder = self.request_builder(Method::PUT, path, token).json(json);
        self.request(name, request_builder).await
    }

    pub async fn patch_request<T: Serialize + ?Sized>(
        &self,
        name: &str,
        path: &str,
        token: Option<&str>,
        json: &T,
    ) -> ApiResponse {
        let request_builder = self.request_builder(Method::PATCH, path, token).json(json);
        self.request(name, request_builder).await
    }

    pub async fn delete_request(&self, name: &str, path: &str, token: Option<&str>) -> ApiResponse {
        let request_builder = self.request_builder(Method::DELETE, path, token);
        self.request(name, request_builder).await
    }

    pub async fn multipart_request(
        &self,
        name: &str,
        method: Method,
        path: &str,
        token: Option<&str>,
        form: Form,
    ) -> ApiResponse {
        let request_builder = self.request_builder(method, path, token).multipart(form);
        self.request(name, request_builder).await
    }

    fn request_builder(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .headers(self.headers(token))
    }

    fn headers(&self, token: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(host) = &self.host {
            match HeaderValue::from_str(host) {
                Ok(value) => {
                    headers.insert(HOST, value);
                }
                Err(_) => log::warn!("headers - invalid host override: {host}"),
            }
        }
        if let Some(token) = token {
            match HeaderValue::from_str(token) {
                Ok(value) => {
                    headers.insert(TOKEN_HEADER, value);
                }
                Err(_) => log::warn!("headers - stored token is not a valid header value"),
            }
        }
        headers
    }

    async fn request(&self, name: &str, request_builder: RequestBuilder) -> ApiResponse {
        log::debug!("{name} - sending request");
        ApiResponse {
            name: name.to_string(),
            response: request_builder.send().await,
        }
    }
}

impl ApiResponse {
    /// Decodes the envelope payload. A non-2xx status, or a 2xx body whose
    /// `message` is not `"success"`, fails with the server message or
    /// `fallback`.
    pub async fn json<T: DeserializeOwned>(self, fallback: &str) -> Result<T> {
        let ApiResponse { name, response } = self;

        let response = response.map_err(|e| {
            log::warn!("{name} - transport error: {e}");
            ClientError::request(None, fallback)
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            log::warn!("{name} - failed reading body - status: {status}, error: {e}");
            ClientError::request(Some(status.as_u16()), fallback)
        })?;
        let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };

        let outcome: Option<Envelope<Empty>> = serde_json::from_slice(body).ok();
        let accepted = outcome.as_ref().map(|o| o.is_success()).unwrap_or(true);

        if !status.is_success() || !accepted {
            let message = outcome
                .and_then(|o| o.failure_message())
                .unwrap_or_else(|| fallback.to_string());
            log::warn!("{name} - request failed - status: {status}, message: {message}");
            return Err(ClientError::request(Some(status.as_u16()), message));
        }

        let envelope: Envelope<T> = serde_json::from_slice(body).map_err(|e| {
            log::warn!("{name} - unexpected response body - error: {e}");
            ClientError::request(Some(status.as_u16()), fallback)
        })?;

        log::debug!("{name} - completed - status: {status}");
        Ok(envelope.data)
    }

    /// Like `json` for calls whose payload is not needed.
    pub async fn ok(self, fallback: &str) -> Result<()> {
        self.json::<Empty>(fallback).await.map(|_| ())
    }
}

pub fn attachment_part(attachment: &Attachment) -> Result<Part> {
    Part::bytes(attachment.bytes.clone())
        .file_name(attachment.file_name.clone())
        .mime_str(&attachment.content_type)
        .map_err(|e| {
            ClientError::request(
                None,
                format!("Invalid content type {}: {e}", attachment.content_type),
            )
        })
}

pub async fn load_attachment(path: &Path) -> Result<Attachment> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "upload".to_string());
    Ok(Attachment::new(file_name, bytes))
}

/// Turns the photo/image references returned by the API into absolute URLs.
pub fn resolve_image_url(base_url: &str, photo: Option<&str>) -> Option<String> {
    let photo = photo?.trim();
    if photo.is_empty() || photo == "undefined" || photo == "null" {
        return None;
    }
    let lower = photo.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Some(photo.to_string());
    }
    let separator = if photo.starts_with('/') { "" } else { "/" };
    Some(format!("{base_url}{separator}{photo}"))
}

//! HTTP client for the Tienda REST backend

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::{ApiResponse, ErrorCode};

use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP client for making requests to the backend
///
/// Every verb accepts both the `ApiResponse` envelope and a bare JSON
/// payload, and returns the payload.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URLs pass through untouched
    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    async fn send<T: DeserializeOwned>(&self, method: &str, path: &str, request: RequestBuilder) -> ClientResult<T> {
        let request = match self.auth_header() {
            Some(auth) => request.header(reqwest::header::AUTHORIZATION, auth),
            None => request,
        };
        tracing::debug!(method, path, "request");
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send("GET", path, self.client.get(self.url(path))).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<T> {
        self.send("POST", path, self.client.post(self.url(path)).json(body))
            .await
    }

    /// Make a POST request without body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send("POST", path, self.client.post(self.url(path))).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<T> {
        self.send("PUT", path, self.client.put(self.url(path)).json(body))
            .await
    }

    /// Make a PATCH request with JSON body
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<T> {
        self.send("PATCH", path, self.client.patch(self.url(path)).json(body))
            .await
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send("DELETE", path, self.client.delete(self.url(path))).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let err = error_from_status(status, &text);
            let code = err.code();
            tracing::debug!(
                status = status.as_u16(),
                code = %code,
                category = code.category().name(),
                "request failed"
            );
            return Err(err);
        }

        decode_body(&text)
    }
}

/// Decode a success body: empty, envelope, or bare payload
pub fn decode_body<T: DeserializeOwned>(text: &str) -> ClientResult<T> {
    if text.trim().is_empty() {
        return serde_json::from_value(Value::Null)
            .map_err(|_| ClientError::InvalidResponse("Respuesta vacía".to_string()));
    }
    let value: Value = serde_json::from_str(text)?;
    if !is_envelope(&value) {
        return serde_json::from_value(value).map_err(Into::into);
    }
    let envelope: ApiResponse<Value> = serde_json::from_value(value)?;
    let data = envelope.into_result()?.unwrap_or(Value::Null);
    serde_json::from_value(data).map_err(Into::into)
}

/// An object carrying `data` or `success`, or both `code` and `message`
fn is_envelope(value: &Value) -> bool {
    value.as_object().is_some_and(|o| {
        o.contains_key("data")
            || o.get("success").is_some_and(Value::is_boolean)
            || (o.contains_key("code") && (o.contains_key("message") || o.contains_key("mensaje")))
    })
}

/// Backend message from an error body: `message`, `mensaje` or `error`
pub fn extract_message(text: &str) -> Option<String> {
    let value: Value = serde_json::from_str(text).ok()?;
    ["message", "mensaje", "error"].iter().find_map(|key| {
        value
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

fn error_from_status(status: StatusCode, text: &str) -> ClientError {
    let message = extract_message(text).unwrap_or_default();
    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
        StatusCode::FORBIDDEN => ClientError::Forbidden(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ClientError::Validation(message),
        _ => {
            // Keep the envelope code when the backend sent one
            let code = serde_json::from_str::<Value>(text)
                .ok()
                .and_then(|v| v.get("code").and_then(Value::as_u64))
                .and_then(|c| u16::try_from(c).ok())
                .and_then(|c| ErrorCode::try_from(c).ok())
                .filter(|c| *c != ErrorCode::Success)
                .unwrap_or_else(|| ErrorCode::from_http_status(status));
            ClientError::Api { code, message }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: i64,
    }

    #[test]
    fn test_decode_bare_and_envelope() {
        let bare: Item = decode_body(r#"{"id": 1}"#).unwrap();
        assert_eq!(bare, Item { id: 1 });

        let wrapped: Item = decode_body(r#"{"success": true, "data": {"id": 2}}"#).unwrap();
        assert_eq!(wrapped, Item { id: 2 });

        let list: Vec<Item> = decode_body(r#"[{"id": 3}]"#).unwrap();
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_decode_error_envelope() {
        let err = decode_body::<Item>(r#"{"success": false, "code": 6001, "message": "No existe"}"#)
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ProductNotFound);
        assert_eq!(err.user_message(), "No existe");
    }

    #[test]
    fn test_decode_empty_body_as_unit() {
        decode_body::<()>("").unwrap();
        let none: Option<Item> = decode_body("  ").unwrap();
        assert!(none.is_none());
        assert!(decode_body::<Item>("").is_err());
    }

    #[test]
    fn test_extract_message_keys() {
        assert_eq!(extract_message(r#"{"message": "a"}"#).as_deref(), Some("a"));
        assert_eq!(extract_message(r#"{"mensaje": "b"}"#).as_deref(), Some("b"));
        assert_eq!(extract_message(r#"{"error": "c"}"#).as_deref(), Some("c"));
        assert_eq!(extract_message(r#"{"message": " "}"#), None);
        assert_eq!(extract_message("Internal Server Error"), None);
    }

    #[test]
    fn test_error_from_status() {
        let err = error_from_status(StatusCode::UNAUTHORIZED, r#"{"message": "Credenciales inválidas"}"#);
        assert!(matches!(err, ClientError::Unauthorized(ref m) if m == "Credenciales inválidas"));

        let err = error_from_status(StatusCode::CONFLICT, r#"{"code": 8002, "message": "Email ya registrado"}"#);
        assert_eq!(err.code(), ErrorCode::CustomerEmailExists);

        let err = error_from_status(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert!(err.backend_message().is_none());
    }
}

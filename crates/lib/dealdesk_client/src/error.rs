//! Client error types.
//!
//! Every catalog call funnels through [`crate::ApiClient`] and fails with one
//! [`ApiError`]. Callers branch on the variant: `Unauthorized` means the
//! session is already gone and a redirect is under way, so it must not be
//! reported twice.

use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

/// Convenience alias for client return types.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the API client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// The server rejected the session's credentials (HTTP 401).
    #[error("Unauthorized")]
    Unauthorized,

    /// Non-2xx response carrying field-level validation errors.
    #[error("Validation failed ({status}): {}", errors.combined_message())]
    ValidationFailed {
        status: u16,
        errors: FieldErrors,
        body: Value,
    },

    /// Any other non-2xx response, or a transport/decode failure.
    #[error("Request failed: {message}")]
    RequestFailed {
        status: Option<u16>,
        message: String,
        body: Option<Value>,
    },

    /// The request could not be built locally (body encoding, MIME type).
    /// Nothing was sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// An unauthenticated endpoint (login, OTP, password reset) said no.
    #[error("{message}")]
    LoginRejected { status: u16, message: String },

    /// The caller cancelled the operation before a response arrived.
    #[error("Request cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// True when the session was torn down by a 401.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::ValidationFailed { status, .. } => Some(*status),
            ApiError::RequestFailed { status, .. } => *status,
            ApiError::LoginRejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Decoded error body of a failed response.
    pub fn body(&self) -> Option<&Value> {
        match self {
            ApiError::ValidationFailed { body, .. } => Some(body),
            ApiError::RequestFailed { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::ValidationFailed { errors, .. } => {
                format!("Update Failed: {}", errors.combined_message())
            }
            ApiError::LoginRejected { message, .. } => message.clone(),
            ApiError::Unauthorized => "Session expired, please log in again".to_string(),
            other => other.to_string(),
        }
    }

    /// Classify a non-2xx, non-401 response body.
    pub(crate) fn from_failed_body(status: u16, body: Value) -> Self {
        if let Some(errors) = FieldErrors::from_body(&body) {
            return ApiError::ValidationFailed {
                status,
                errors,
                body,
            };
        }
        let message = message_from_body(&body).unwrap_or_else(|| format!("HTTP {status}"));
        ApiError::RequestFailed {
            status: Some(status),
            message,
            body: Some(body),
        }
    }

    pub(crate) fn transport(e: reqwest::Error) -> Self {
        if e.is_builder() {
            return ApiError::InvalidRequest(e.to_string());
        }
        ApiError::RequestFailed {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
            body: None,
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// Looks at `message`, `detail` and `error` in that order.
pub(crate) fn message_from_body(body: &Value) -> Option<String> {
    ["message", "detail", "error"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

/// Errors loading client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("invalid value for {var}: {value}")]
    InvalidVar { var: &'static str, value: String },
}

/// Errors reading or writing client-side storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt storage file {path}: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

// =============================================================================
// Field errors
// =============================================================================

/// Envelope keys that never name a form field.
const ENVELOPE_KEYS: &[&str] = &["success", "message", "detail", "error", "status", "code"];

/// Field-level validation errors, field name → message(s).
///
/// Keeps fields in decoded order and remembers whether each entry was a
/// single string or a list so the original JSON can be rebuilt exactly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    entries: Vec<FieldEntry>,
}

#[derive(Debug, Clone, PartialEq)]
struct FieldEntry {
    field: String,
    messages: Vec<String>,
    was_list: bool,
}

impl FieldErrors {
    /// Parse a validation body.
    ///
    /// Accepts a flat object (`{"sku": ["taken"], "stock": "must be positive"}`)
    /// or the same object nested under `errors`. Envelope keys such as
    /// `message` or `detail` are skipped. Returns `None` when any field value
    /// is neither a string nor a list of strings, or when no fields remain.
    pub fn from_body(body: &Value) -> Option<Self> {
        let object = body.as_object()?;
        if let Some(nested) = object.get("errors").and_then(Value::as_object) {
            return Self::from_map(nested);
        }
        Self::from_map(object)
    }

    fn from_map(map: &Map<String, Value>) -> Option<Self> {
        let mut entries = Vec::with_capacity(map.len());
        for (field, value) in map {
            if ENVELOPE_KEYS.contains(&field.as_str()) {
                continue;
            }
            let entry = match value {
                Value::String(s) => FieldEntry {
                    field: field.clone(),
                    messages: vec![s.clone()],
                    was_list: false,
                },
                Value::Array(items) => {
                    let messages = items
                        .iter()
                        .map(|v| v.as_str().map(str::to_string))
                        .collect::<Option<Vec<_>>>()?;
                    FieldEntry {
                        field: field.clone(),
                        messages,
                        was_list: true,
                    }
                }
                _ => return None,
            };
            entries.push(entry);
        }
        if entries.is_empty() {
            return None;
        }
        Some(Self { entries })
    }

    /// Messages recorded for one field.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.messages.as_slice())
    }

    /// Iterate `(field, messages)` in decoded order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|e| (e.field.as_str(), e.messages.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `"field: a, b | other: c"`
    pub fn combined_message(&self) -> String {
        self.to_string()
    }

    /// Rebuild the JSON object the errors were parsed from.
    pub fn to_json(&self) -> Value {
        let map = self
            .entries
            .iter()
            .map(|e| {
                let value = if e.was_list {
                    Value::Array(e.messages.iter().cloned().map(Value::String).collect())
                } else {
                    Value::String(e.messages.join(", "))
                };
                (e.field.clone(), value)
            })
            .collect::<Map<_, _>>();
        Value::Object(map)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{}: {}", entry.field, entry.messages.join(", "))?;
        }
        Ok(())
    }
}

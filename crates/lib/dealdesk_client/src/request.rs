//! Request descriptions.
//!
//! An [`ApiRequest`] names the endpoint, method, body and whether a bearer
//! token should be attached. It is built per call and consumed by
//! [`crate::ApiClient`].

use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

/// Whether a request carries the session's bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Attach `Authorization: Bearer <token>` when a token exists; a 401
    /// tears the session down.
    Bearer,
    /// Never attach a token; a 401 is an ordinary rejection.
    Public,
}

/// A request body.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(MultipartForm),
}

impl RequestBody {
    pub fn is_multipart(&self) -> bool {
        matches!(self, RequestBody::Multipart(_))
    }
}

/// A multipart form: text fields and file parts in insertion order.
///
/// Converted to a transport form at send time so the boundary and its
/// content type are generated there.
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    parts: Vec<FormPart>,
}

#[derive(Debug, Clone)]
enum FormPart {
    Text { name: String, value: String },
    File(FilePart),
}

/// A binary file field.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field.
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Append a file field.
    #[must_use]
    pub fn file(mut self, file: FilePart) -> Self {
        self.parts.push(FormPart::File(file));
        self
    }

    /// Flatten a JSON object into text fields.
    ///
    /// Strings go in as-is, `null` is skipped, anything else is sent as its
    /// JSON text.
    pub fn from_json(value: &Value) -> Self {
        let mut form = Self::new();
        if let Some(object) = value.as_object() {
            for (name, v) in object {
                match v {
                    Value::Null => {}
                    Value::String(s) => form = form.text(name.clone(), s.clone()),
                    other => form = form.text(name.clone(), other.to_string()),
                }
            }
        }
        form
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Value of a text field.
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|p| match p {
            FormPart::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn files(&self) -> impl Iterator<Item = &FilePart> {
        self.parts.iter().filter_map(|p| match p {
            FormPart::File(f) => Some(f),
            FormPart::Text { .. } => None,
        })
    }

    pub(crate) fn into_form(self) -> Result<Form, ApiError> {
        let mut form = Form::new();
        for part in self.parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name, value),
                FormPart::File(file) => {
                    let part = Part::bytes(file.bytes)
                        .file_name(file.file_name)
                        .mime_str(&file.mime)
                        .map_err(|e| {
                            ApiError::InvalidRequest(format!(
                                "invalid mime type '{}': {e}",
                                file.mime
                            ))
                        })?;
                    form.part(file.field, part)
                }
            };
        }
        Ok(form)
    }
}

/// Description of one API call.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) body: RequestBody,
    pub(crate) headers: HeaderMap,
    pub(crate) auth: AuthMode,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            headers: HeaderMap::new(),
            auth: AuthMode::Bearer,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Serialize `body` as the JSON payload.
    pub fn with_json<T: Serialize>(mut self, body: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::InvalidRequest(format!("could not encode request body: {e}")))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    #[must_use]
    pub fn with_json_value(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    #[must_use]
    pub fn with_multipart(mut self, form: MultipartForm) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Add an extra header.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Mark the request as unauthenticated.
    #[must_use]
    pub fn public(mut self) -> Self {
        self.auth = AuthMode::Public;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    pub fn auth(&self) -> AuthMode {
        self.auth
    }

    /// Headers to send, given the token to attach (if any).
    ///
    /// JSON content type only for non-multipart bodies; a caller-supplied
    /// `Content-Type` is dropped for multipart so the boundary header wins.
    pub(crate) fn build_headers(&self, token: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if !self.body.is_multipart() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        for (name, value) in &self.headers {
            if name == CONTENT_TYPE && self.body.is_multipart() {
                tracing::warn!(path = %self.path, "ignoring Content-Type override on multipart body");
                continue;
            }
            headers.insert(name.clone(), value.clone());
        }
        if self.auth == AuthMode::Bearer {
            if let Some(token) = token {
                match HeaderValue::from_str(&format!("Bearer {token}")) {
                    Ok(value) => {
                        headers.insert(reqwest::header::AUTHORIZATION, value);
                    }
                    Err(_) => tracing::warn!("access token is not a valid header value"),
                }
            }
        }
        headers
    }
}

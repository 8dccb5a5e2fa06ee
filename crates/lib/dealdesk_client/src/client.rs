//! Authenticated API client, the single chokepoint for every API call.
//!
//! Attaches the bearer token, turns a 401 into a session teardown plus
//! [`ApiError::Unauthorized`], and surfaces every other failure with its
//! decoded body.

use std::future::Future;
use std::sync::Arc;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult, message_from_body};
use crate::events::{SessionEvent, SessionEvents};
use crate::models::AuthEnvelope;
use crate::request::{ApiRequest, AuthMode, RequestBody};
use crate::session::SessionStore;

/// Successful reply from an unauthenticated endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct PublicReply {
    /// Server-supplied message, e.g. "OTP sent".
    pub message: Option<String>,
    /// The envelope's `data`, `null` when absent.
    pub data: Value,
}

/// HTTP client bound to one API origin and one session store.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    session: Arc<SessionStore>,
    events: SessionEvents,
}

impl ApiClient {
    /// Build a client with its own connection pool.
    pub fn new(config: ClientConfig, session: Arc<SessionStore>) -> ApiResult<Self> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .user_agent(config.user_agent());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ApiError::transport)?;
        Ok(Self {
            http,
            config,
            session,
            events: SessionEvents::new(),
        })
    }

    /// Use a custom HTTP client (for connection pool reuse or testing).
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    /// Publish session events on an existing hub.
    #[must_use]
    pub fn with_events(mut self, events: SessionEvents) -> Self {
        self.events = events;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn events(&self) -> &SessionEvents {
        &self.events
    }

    /// Current bearer token; `None` before login, after teardown, or when
    /// no storage is available.
    pub fn get_access_token(&self) -> Option<String> {
        self.session.access_token()
    }

    /// Tear the session down after the server rejected its credentials.
    ///
    /// Clears tokens, cached user and cookie, then publishes
    /// [`SessionEvent::Expired`]. Repeating it is harmless.
    pub fn clear_session(&self) {
        if let Err(e) = self.session.clear() {
            warn!(error = %e, "failed to clear session storage");
        }
        self.events.publish(SessionEvent::expired());
    }

    /// Issue an authenticated request and decode the JSON reply as `T`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Unauthorized`] on 401, after the session was cleared
    /// - [`ApiError::ValidationFailed`] on a non-2xx with field errors
    /// - [`ApiError::RequestFailed`] on any other failure
    pub async fn request<T: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<T> {
        let auth = request.auth();
        let path = request.path().to_string();
        let response = self.send(request).await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED && auth == AuthMode::Bearer {
            warn!(%path, "server rejected credentials, clearing session");
            self.clear_session();
            return Err(ApiError::Unauthorized);
        }

        let body = decode_body(response, status).await?;
        if !status.is_success() {
            debug!(%path, status = status.as_u16(), "request failed");
            return Err(ApiError::from_failed_body(status.as_u16(), body));
        }

        serde_json::from_value(body).map_err(|e| ApiError::RequestFailed {
            status: Some(status.as_u16()),
            message: format!("unexpected response shape from {path}: {e}"),
            body: None,
        })
    }

    /// Issue an unauthenticated request to an auth endpoint.
    ///
    /// No token is attached and a 401 never clears the session. A non-2xx
    /// status or an envelope without `success: true` becomes
    /// [`ApiError::LoginRejected`] carrying the server's message, or
    /// `fallback` when it sent none.
    pub async fn request_public(
        &self,
        request: ApiRequest,
        fallback: &str,
    ) -> ApiResult<PublicReply> {
        let path = request.path().to_string();
        let response = self.send(request.public()).await?;
        let status = response.status();
        let body = match decode_body(response, status).await {
            Ok(body) => body,
            Err(e) if !status.is_success() => {
                debug!(%path, status = status.as_u16(), error = %e, "unreadable rejection body");
                return Err(ApiError::LoginRejected {
                    status: status.as_u16(),
                    message: fallback.to_string(),
                });
            }
            Err(e) => return Err(e),
        };

        let envelope: AuthEnvelope<Value> =
            serde_json::from_value(body.clone()).unwrap_or(AuthEnvelope {
                success: false,
                message: None,
                data: None,
            });

        if !status.is_success() || !envelope.success {
            debug!(%path, status = status.as_u16(), "auth endpoint rejected request");
            let message = envelope
                .message
                .filter(|m| !m.is_empty())
                .or_else(|| message_from_body(&body))
                .unwrap_or_else(|| fallback.to_string());
            return Err(ApiError::LoginRejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(PublicReply {
            message: envelope.message,
            data: envelope.data.unwrap_or(Value::Null),
        })
    }

    async fn send(&self, request: ApiRequest) -> ApiResult<Response> {
        let token = match request.auth() {
            AuthMode::Bearer => self.get_access_token(),
            AuthMode::Public => None,
        };
        let headers = request.build_headers(token.as_deref());
        let url = self.config.endpoint(request.path());

        debug!(
            method = %request.method(),
            path = request.path(),
            authenticated = token.is_some(),
            "sending request"
        );

        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .headers(headers);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(form.into_form()?),
        };

        builder.send().await.map_err(ApiError::transport)
    }
}

/// Read the body as JSON. An empty body reads as `null`.
async fn decode_body(response: Response, status: StatusCode) -> ApiResult<Value> {
    let bytes = response.bytes().await.map_err(ApiError::transport)?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&bytes).map_err(|e| ApiError::RequestFailed {
        status: Some(status.as_u16()),
        message: if status.is_success() {
            format!("invalid JSON in response: {e}")
        } else {
            format!("HTTP {status}")
        },
        body: None,
    })
}

/// Run `future` until it completes or `token` is cancelled.
///
/// Dropping the request future aborts the in-flight HTTP call, so a
/// cancelled operation leaves nothing running.
pub async fn cancellable<T, F>(token: &CancellationToken, future: F) -> ApiResult<T>
where
    F: Future<Output = ApiResult<T>>,
{
    tokio::select! {
        _ = token.cancelled() => Err(ApiError::Cancelled),
        result = future => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn cancellable_returns_cancelled() {
        let token = CancellationToken::new();
        token.cancel();
        let result: ApiResult<()> = cancellable(&token, std::future::pending()).await;
        assert!(matches!(result, Err(ApiError::Cancelled)));
    }

    #[tokio::test]
    async fn cancellable_passes_result_through() {
        let token = CancellationToken::new();
        let result = cancellable(&token, async { Ok(5) }).await;
        assert_eq!(result.unwrap(), 5);
    }

    #[test]
    fn client_exposes_token_from_store() {
        let config = ClientConfig::parse("http://localhost:1/api").unwrap();
        let client = ApiClient::new(config, Arc::new(SessionStore::detached())).unwrap();
        assert!(client.get_access_token().is_none());
        // No storage at all: teardown still succeeds.
        client.clear_session();
    }
}

//! # dealdesk_client
//!
//! Authenticated client for the DealDesk admin API: session storage, the
//! unauthorized-teardown contract, route gating and the endpoint catalog.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use dealdesk_client::{ApiClient, ClientConfig, MemoryStorage, ProductList, SessionStore};
//!
//! let store = Arc::new(SessionStore::new(
//!     Arc::new(MemoryStorage::new()),
//!     Arc::new(MemoryStorage::new()),
//!     Arc::new(MemoryStorage::new()),
//! ));
//! let client = ApiClient::new(ClientConfig::from_env()?, store)?;
//! client.auth().login("admin@example.com", "secret").await?;
//! let pending = client.products().list(ProductList::Pending, 1).await?;
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod cookies;
pub mod error;
pub mod events;
pub mod models;
pub mod request;
pub mod retry;
pub mod route_gate;
pub mod session;
pub mod storage;

pub use api::ProductList;
pub use client::{ApiClient, PublicReply, cancellable};
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult, ConfigError, FieldErrors, StorageError};
pub use events::{SessionEvent, SessionEvents};
pub use request::{ApiRequest, AuthMode, FilePart, MultipartForm, RequestBody};
pub use retry::{RetryPolicy, retry};
pub use route_gate::{RouteDecision, gate};
pub use session::{FlowExpired, PasswordResetFlow, Session, SessionStore, UserSummary};
pub use storage::{FileStorage, MemoryStorage, NullStorage, Storage};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

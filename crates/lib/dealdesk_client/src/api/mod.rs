//! Endpoint catalog.
//!
//! Named wrappers around [`ApiClient::request`] grouped by area. Each one
//! fixes the path, method and body shape; none adds logic of its own beyond
//! the session bookkeeping of the auth flow.

pub mod auth;
pub mod catalog;
pub mod dashboard;
pub mod logs;
pub mod products;
pub mod users;

use crate::ApiClient;

pub use auth::Auth;
pub use catalog::Catalog;
pub use dashboard::Dashboard;
pub use logs::Logs;
pub use products::{ProductBody, ProductList, Products};
pub use users::Users;

impl ApiClient {
    /// Login, OTP and password-reset endpoints (no bearer token).
    pub fn auth(&self) -> Auth<'_> {
        Auth::new(self)
    }

    pub fn dashboard(&self) -> Dashboard<'_> {
        Dashboard::new(self)
    }

    pub fn products(&self) -> Products<'_> {
        Products::new(self)
    }

    pub fn users(&self) -> Users<'_> {
        Users::new(self)
    }

    /// Categories and stores.
    pub fn catalog(&self) -> Catalog<'_> {
        Catalog::new(self)
    }

    /// Audit and error logs.
    pub fn logs(&self) -> Logs<'_> {
        Logs::new(self)
    }
}

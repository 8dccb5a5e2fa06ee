//! User management endpoints.

use serde_json::Value;

use crate::ApiClient;
use crate::error::ApiResult;
use crate::models::{AdminUser, Paginated, UserAction};
use crate::request::ApiRequest;

pub const LIST_PATH: &str = "/admin/users/list/";
pub const SUSPEND_PATH: &str = "/admin/user/suspend/";
pub const REACTIVATE_PATH: &str = "/admin/user/reactivate/";
pub const DELETE_PATH: &str = "/admin/user/delete/";

pub struct Users<'a> {
    client: &'a ApiClient,
}

impl<'a> Users<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// One page of users, optionally filtered by email.
    pub async fn list(&self, page: u64, email: Option<&str>) -> ApiResult<Paginated<AdminUser>> {
        let mut request = ApiRequest::get(LIST_PATH).with_query("page", page);
        if let Some(email) = email.filter(|e| !e.is_empty()) {
            request = request.with_query("email", email);
        }
        self.client.request(request).await
    }

    pub async fn suspend(&self, user_id: i64) -> ApiResult<Value> {
        self.action(SUSPEND_PATH, user_id).await
    }

    pub async fn reactivate(&self, user_id: i64) -> ApiResult<Value> {
        self.action(REACTIVATE_PATH, user_id).await
    }

    pub async fn delete(&self, user_id: i64) -> ApiResult<Value> {
        self.action(DELETE_PATH, user_id).await
    }

    async fn action(&self, path: &str, user_id: i64) -> ApiResult<Value> {
        let request = ApiRequest::post(path).with_json(&UserAction { user_id })?;
        self.client.request(request).await
    }
}

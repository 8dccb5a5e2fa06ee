//! Dashboard endpoints. Payload shapes are owned by the server and passed
//! through untouched.

use serde_json::Value;

use crate::ApiClient;
use crate::error::ApiResult;
use crate::request::ApiRequest;

pub const STATS_PATH: &str = "/admin/dashboard/stats/";
pub const RECENT_ACTIVITY_PATH: &str = "/admin/recent-activity/";
pub const QUICK_STATS_PATH: &str = "/admin/dashboard/quick-stats/";

pub struct Dashboard<'a> {
    client: &'a ApiClient,
}

impl<'a> Dashboard<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn stats(&self) -> ApiResult<Value> {
        self.client.request(ApiRequest::get(STATS_PATH)).await
    }

    pub async fn recent_activity(&self) -> ApiResult<Value> {
        self.client.request(ApiRequest::get(RECENT_ACTIVITY_PATH)).await
    }

    pub async fn quick_stats(&self) -> ApiResult<Value> {
        self.client.request(ApiRequest::get(QUICK_STATS_PATH)).await
    }
}

//! Category and store lookups.

use crate::ApiClient;
use crate::error::ApiResult;
use crate::models::{Category, CategoryList, Paginated, Store};
use crate::request::ApiRequest;

pub const CATEGORIES_PATH: &str = "/category/list/";
pub const STORES_PATH: &str = "/store/list/";

pub struct Catalog<'a> {
    client: &'a ApiClient,
}

impl<'a> Catalog<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn categories(&self) -> ApiResult<Vec<Category>> {
        let list: CategoryList = self.client.request(ApiRequest::get(CATEGORIES_PATH)).await?;
        Ok(list.into_vec())
    }

    pub async fn stores(&self, page: u64) -> ApiResult<Paginated<Store>> {
        self.client
            .request(ApiRequest::get(STORES_PATH).with_query("page", page))
            .await
    }
}

//! Product moderation and CRUD endpoints.

use serde_json::Value;

use crate::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::models::{Paginated, ProductDetail, ProductSummary, ProductUpdate, StoreType};
use crate::request::{ApiRequest, MultipartForm, RequestBody};

pub const ONLINE_CREATE_PATH: &str = "/admin/product/online-create/";
pub const INSTORE_CREATE_PATH: &str = "/admin/product/instore-create/";

/// Which product list to page through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductList {
    Approved,
    Pending,
    Rejected,
    /// Products submitted by the logged-in admin.
    Own,
}

impl ProductList {
    pub fn path(&self) -> &'static str {
        match self {
            ProductList::Approved => "/admin/products-approved/list/",
            ProductList::Pending => "/admin/products-pending/list/",
            ProductList::Rejected => "/admin/products-rejected/list/",
            ProductList::Own => "/admin/own-products-list/",
        }
    }
}

/// Body of a create or update call.
#[derive(Debug, Clone)]
pub enum ProductBody {
    Json(Value),
    /// Used when an image file is uploaded with the fields.
    Multipart(MultipartForm),
}

impl ProductBody {
    /// JSON body from any serializable payload.
    pub fn json<T: serde::Serialize>(payload: &T) -> ApiResult<Self> {
        serde_json::to_value(payload)
            .map(ProductBody::Json)
            .map_err(|e| ApiError::InvalidRequest(format!("could not encode product: {e}")))
    }
}

impl From<ProductBody> for RequestBody {
    fn from(body: ProductBody) -> Self {
        match body {
            ProductBody::Json(value) => RequestBody::Json(value),
            ProductBody::Multipart(form) => RequestBody::Multipart(form),
        }
    }
}

fn product_path(id: i64) -> String {
    format!("/admin/product/{id}")
}

fn update_path(id: i64) -> String {
    format!("/admin/product/{id}/update/")
}

pub struct Products<'a> {
    client: &'a ApiClient,
}

impl<'a> Products<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, list: ProductList, page: u64) -> ApiResult<Paginated<ProductSummary>> {
        self.client
            .request(ApiRequest::get(list.path()).with_query("page", page))
            .await
    }

    pub async fn detail(&self, id: i64) -> ApiResult<ProductDetail> {
        self.client.request(ApiRequest::get(product_path(id))).await
    }

    pub async fn approve(&self, id: i64) -> ApiResult<Value> {
        self.client
            .request(ApiRequest::patch(format!("/admin/product/{id}/approve/")))
            .await
    }

    pub async fn reject(&self, id: i64) -> ApiResult<Value> {
        self.client
            .request(ApiRequest::patch(format!("/admin/product/{id}/reject/")))
            .await
    }

    /// Submit a new deal; the store type picks the endpoint.
    pub async fn create(&self, store_type: StoreType, body: ProductBody) -> ApiResult<Value> {
        let path = match store_type {
            StoreType::Online => ONLINE_CREATE_PATH,
            StoreType::Instore => INSTORE_CREATE_PATH,
        };
        self.client
            .request(ApiRequest::post(path).with_body(body.into()))
            .await
    }

    pub async fn create_online(&self, body: ProductBody) -> ApiResult<Value> {
        self.create(StoreType::Online, body).await
    }

    pub async fn create_instore(&self, body: ProductBody) -> ApiResult<Value> {
        self.create(StoreType::Instore, body).await
    }

    pub async fn update(&self, id: i64, body: ProductBody) -> ApiResult<Value> {
        self.client
            .request(ApiRequest::patch(update_path(id)).with_body(body.into()))
            .await
    }

    /// Update from the edit form's fields, deriving the discount percentage.
    pub async fn update_fields(&self, id: i64, update: ProductUpdate) -> ApiResult<Value> {
        let body = ProductBody::json(&update.with_derived_fields())?;
        self.update(id, body).await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<Value> {
        self.client.request(ApiRequest::delete(update_path(id))).await
    }
}

//! Transport shapes of API payloads.
//!
//! Only the fields the console reads are typed; anything else the server
//! sends is kept in each model's `extra` map.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::session::{Session, UserSummary};

/// Page size the admin list endpoints use.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

// =============================================================================
// Auth
// =============================================================================

/// `{ success, message, data }` wrapper returned by the auth endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

/// Payload of a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub access: String,
    pub refresh: String,
    pub user: UserSummary,
}

impl From<LoginData> for Session {
    fn from(data: LoginData) -> Self {
        Session {
            access_token: data.access,
            refresh_token: data.refresh,
            user: data.user,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmailRequest<'a> {
    pub email: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyOtpRequest<'a> {
    pub email: &'a str,
    pub otp: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SetNewPasswordRequest<'a> {
    pub email: &'a str,
    pub new_password: &'a str,
}

// =============================================================================
// Pagination
// =============================================================================

/// One page of a paginated list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    /// Number of pages for `count` items at `page_size` per page.
    pub fn total_pages(&self, page_size: u64) -> u64 {
        if page_size == 0 {
            return 0;
        }
        self.count.div_ceil(page_size)
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }
}

/// Page to show after deleting an item from `current`.
///
/// Deleting the last row of a page other than the first steps back one page.
pub fn page_after_delete(current: u64, rows_on_page: usize) -> u64 {
    if current > 1 && rows_on_page == 1 {
        current - 1
    } else {
        current
    }
}

// =============================================================================
// Products
// =============================================================================

/// Moderation state of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Approved,
    Pending,
    Rejected,
    #[serde(other)]
    Unknown,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Approved => "approved",
            ProductStatus::Pending => "pending",
            ProductStatus::Rejected => "rejected",
            ProductStatus::Unknown => "unknown",
        }
    }
}

/// Where a deal was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreType {
    Online,
    Instore,
}

/// Row of a product list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub product_image: Option<String>,
    #[serde(default)]
    pub user_full_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub store_id: Option<i64>,
    #[serde(default)]
    pub store_name: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub deal_price: Option<Value>,
    #[serde(default)]
    pub original_price: Option<Value>,
    #[serde(default)]
    pub savings_percentage: Option<Value>,
    pub product_status: ProductStatus,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreRef {
    pub id: i64,
    pub store_name: String,
    #[serde(default)]
    pub store_url: Option<String>,
}

/// Full product record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDetail {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub product_store_type: Option<StoreType>,
    #[serde(default)]
    pub category: Option<CategoryRef>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub original_price: Option<Value>,
    #[serde(default)]
    pub deal_price: Option<Value>,
    #[serde(default)]
    pub savings_percentage: Option<Value>,
    #[serde(default)]
    pub stores: Vec<StoreRef>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub product_status: ProductStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Per-status tally over a page of products.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub total: u64,
    pub approved: u64,
    pub pending: u64,
    pub rejected: u64,
}

impl StatusCounts {
    /// Tally `page.results` by status; `total` is the server's overall count.
    pub fn tally(page: &Paginated<ProductSummary>) -> Self {
        let mut counts = StatusCounts {
            total: page.count,
            ..Default::default()
        };
        for product in &page.results {
            match product.product_status {
                ProductStatus::Approved => counts.approved += 1,
                ProductStatus::Pending => counts.pending += 1,
                ProductStatus::Rejected => counts.rejected += 1,
                ProductStatus::Unknown => {}
            }
        }
        counts
    }
}

/// Kind of deal offered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealType {
    #[default]
    Discount,
    Coupon,
    Clearance,
}

/// Editable fields of an existing product.
///
/// Only the four fields the edit form requires are mandatory. Anything left
/// out is left out of the PATCH body too, so the server keeps its value;
/// keys this struct does not know travel in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: String,
    pub category_id: i64,
    pub origin_price: String,
    pub discount_price: String,
    /// Filled by [`ProductUpdate::with_derived_fields`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dollar_off: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deal_type: Option<DealType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products_links: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upc_field: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProductUpdate {
    /// Compute `discount_percentage` from the prices and, when a `sku` is
    /// given, mirror it into `upc_field`, as the edit form does before
    /// submitting.
    #[must_use]
    pub fn with_derived_fields(mut self) -> Self {
        self.discount_percentage = Some(discount_percentage(
            &self.origin_price,
            &self.discount_price,
        ));
        if let Some(sku) = &self.sku {
            self.upc_field = Some(sku.clone());
        }
        self
    }
}

/// `(origin - discount) / origin * 100` to two decimals; unparsable prices
/// count as zero and a zero origin yields `"0.00"`.
pub fn discount_percentage(origin: &str, discount: &str) -> String {
    let origin: f64 = origin.trim().parse().unwrap_or(0.0);
    let discount: f64 = discount.trim().parse().unwrap_or(0.0);
    let pct = if origin > 0.0 {
        (origin - discount) / origin * 100.0
    } else {
        0.0
    };
    format!("{pct:.2}")
}

// =============================================================================
// Catalog, users, logs
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Category list; the endpoint answers either a bare array or a page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryList {
    Page(Paginated<Category>),
    Plain(Vec<Category>),
}

impl CategoryList {
    pub fn into_vec(self) -> Vec<Category> {
        match self {
            CategoryList::Page(page) => page.results,
            CategoryList::Plain(items) => items,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    pub id: i64,
    pub store_name: String,
    #[serde(default)]
    pub store_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A marketplace user as listed for moderation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserAction {
    pub user_id: i64,
}

/// Outcome recorded on an audit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditStatus {
    Success,
    Failure,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: Value,
    pub timestamp: String,
    pub user: String,
    pub action: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub details: String,
    pub status: AuditStatus,
    #[serde(default, alias = "ipAddress")]
    pub ip_address: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorLogEntry {
    pub id: Value,
    pub timestamp: String,
    #[serde(alias = "errorCode")]
    pub error_code: String,
    pub severity: Severity,
    pub message: String,
    pub module: String,
    #[serde(default, alias = "stackTrace")]
    pub stack_trace: Option<String>,
    #[serde(default, alias = "affectedUsers")]
    pub affected_users: Option<u64>,
}

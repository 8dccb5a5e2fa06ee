//! Audit and error log endpoints, plus the viewers' client-side filtering
//! and CSV export.

use crate::ApiClient;
use crate::error::ApiResult;
use crate::models::{AuditLogEntry, AuditStatus, ErrorLogEntry, Paginated, Severity};
use crate::request::ApiRequest;

pub const AUDIT_LOGS_PATH: &str = "/admin/audit-logs/";
pub const ERROR_LOGS_PATH: &str = "/admin/error-logs/";

pub struct Logs<'a> {
    client: &'a ApiClient,
}

impl<'a> Logs<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn audit(&self, page: u64) -> ApiResult<Paginated<AuditLogEntry>> {
        self.client
            .request(ApiRequest::get(AUDIT_LOGS_PATH).with_query("page", page))
            .await
    }

    pub async fn errors(&self, page: u64) -> ApiResult<Paginated<ErrorLogEntry>> {
        self.client
            .request(ApiRequest::get(ERROR_LOGS_PATH).with_query("page", page))
            .await
    }
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Audit entries whose user, action or details contain `query`
/// (case-insensitive) and whose status matches, when one is given.
pub fn filter_audit<'e>(
    entries: &'e [AuditLogEntry],
    query: &str,
    status: Option<AuditStatus>,
) -> Vec<&'e AuditLogEntry> {
    let needle = query.to_lowercase();
    entries
        .iter()
        .filter(|e| {
            contains_ci(&e.user, &needle)
                || contains_ci(&e.action, &needle)
                || contains_ci(&e.details, &needle)
        })
        .filter(|e| status.is_none_or(|s| e.status == s))
        .collect()
}

/// Error entries whose code, message or module contain `query`
/// (case-insensitive) and whose severity matches, when one is given.
pub fn filter_errors<'e>(
    entries: &'e [ErrorLogEntry],
    query: &str,
    severity: Option<Severity>,
) -> Vec<&'e ErrorLogEntry> {
    let needle = query.to_lowercase();
    entries
        .iter()
        .filter(|e| {
            contains_ci(&e.error_code, &needle)
                || contains_ci(&e.message, &needle)
                || contains_ci(&e.module, &needle)
        })
        .filter(|e| severity.is_none_or(|s| e.severity == s))
        .collect()
}

fn csv_row<I, S>(cells: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    cells
        .into_iter()
        .map(|c| format!("\"{}\"", c.as_ref().replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",")
}

/// Render audit entries as CSV, every cell quoted.
pub fn audit_csv(entries: &[&AuditLogEntry]) -> String {
    let mut rows = vec![csv_row([
        "Timestamp",
        "User",
        "Action",
        "Target",
        "Details",
        "Status",
        "IP Address",
    ])];
    rows.extend(entries.iter().map(|e| {
        let status = match e.status {
            AuditStatus::Success => "success",
            AuditStatus::Failure => "failure",
        };
        csv_row([
            e.timestamp.as_str(),
            e.user.as_str(),
            e.action.as_str(),
            e.target.as_str(),
            e.details.as_str(),
            status,
            e.ip_address.as_deref().unwrap_or(""),
        ])
    }));
    rows.join("\n")
}

/// Render error entries as CSV, every cell quoted.
pub fn errors_csv(entries: &[&ErrorLogEntry]) -> String {
    let mut rows = vec![csv_row([
        "Timestamp",
        "Error Code",
        "Severity",
        "Message",
        "Module",
        "Affected Users",
    ])];
    rows.extend(entries.iter().map(|e| {
        let severity = match e.severity {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        let affected = e.affected_users.map(|n| n.to_string()).unwrap_or_default();
        csv_row([
            e.timestamp.as_str(),
            e.error_code.as_str(),
            severity,
            e.message.as_str(),
            e.module.as_str(),
            affected.as_str(),
        ])
    }));
    rows.join("\n")
}

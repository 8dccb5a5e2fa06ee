use dealdesk_client::ApiClient;
use dealdesk_client::api::logs::{audit_csv, errors_csv, filter_audit, filter_errors};

use super::print_json;
use crate::Result;
use crate::cli::{AuditStatusArg, LogView, SeverityArg};

pub async fn audit(client: &ApiClient, view: LogView, status: Option<AuditStatusArg>) -> Result<()> {
    let page = client.logs().audit(view.page).await?;
    let entries = filter_audit(&page.results, &view.search, status.map(Into::into));
    if view.csv {
        println!("{}", audit_csv(&entries));
        Ok(())
    } else {
        print_json(&entries)
    }
}

pub async fn errors(client: &ApiClient, view: LogView, severity: Option<SeverityArg>) -> Result<()> {
    let page = client.logs().errors(view.page).await?;
    let entries = filter_errors(&page.results, &view.search, severity.map(Into::into));
    if view.csv {
        println!("{}", errors_csv(&entries));
        Ok(())
    } else {
        print_json(&entries)
    }
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use dealdesk_client::ProductList;
use dealdesk_client::models::{AuditStatus, Severity, StoreType};

#[derive(Parser, Debug)]
#[command(name = "dealdesk", version, about = "DealDesk admin console")]
pub struct Cli {
    /// API base URL, including the `/api` prefix.
    #[arg(long, global = true, env = "DEALDESK_API_URL")]
    pub base_url: Option<String>,

    /// Overall request timeout in seconds (no timeout when unset).
    #[arg(long, global = true, env = "DEALDESK_TIMEOUT_SECS")]
    pub timeout: Option<u64>,

    /// Directory holding the session and reset state.
    #[arg(long, global = true, env = "DEALDESK_HOME")]
    pub home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "DEALDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in admin
    Whoami,
    /// Request a password-reset code
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    /// Verify the reset code sent by email
    VerifyOtp {
        #[arg(long)]
        otp: String,
    },
    /// Send the reset code again
    ResendOtp,
    /// Finish the reset with a new password
    SetPassword {
        #[arg(long, env = "DEALDESK_NEW_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Dashboard statistics
    Dashboard,
    /// Recent admin activity
    Activity,
    /// Quick dashboard counters
    QuickStats,
    /// Product moderation
    #[command(subcommand)]
    Products(ProductCommand),
    /// User management
    #[command(subcommand)]
    Users(UserCommand),
    /// List categories
    Categories,
    /// List stores
    Stores {
        #[arg(long, default_value_t = 1)]
        page: u64,
    },
    /// Audit log
    AuditLogs {
        #[command(flatten)]
        view: LogView,
        #[arg(long, value_enum)]
        status: Option<AuditStatusArg>,
    },
    /// Error log
    ErrorLogs {
        #[command(flatten)]
        view: LogView,
        #[arg(long, value_enum)]
        severity: Option<SeverityArg>,
    },
    /// Show where the console would send a visitor of PATH
    Gate { path: String },
    /// Print version
    Version,
}

#[derive(Subcommand, Debug)]
pub enum ProductCommand {
    /// One page of products
    List {
        #[arg(long, value_enum, default_value_t = ListArg::Pending)]
        status: ListArg,
        #[arg(long, default_value_t = 1)]
        page: u64,
        /// Print per-status counts for the page instead of the products
        #[arg(long)]
        counts: bool,
    },
    Show { id: i64 },
    Approve { id: i64 },
    Reject { id: i64 },
    Delete { id: i64 },
    /// Submit a new deal
    Create {
        #[arg(long, value_enum)]
        kind: KindArg,
        #[command(flatten)]
        payload: Payload,
    },
    /// Edit an existing deal
    Update {
        id: i64,
        #[command(flatten)]
        payload: Payload,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    List {
        #[arg(long, default_value_t = 1)]
        page: u64,
        #[arg(long)]
        email: Option<String>,
    },
    Suspend { id: i64 },
    Reactivate { id: i64 },
    Delete { id: i64 },
}

/// Product fields from a JSON file, optionally with an image upload.
#[derive(Args, Debug)]
pub struct Payload {
    #[arg(long = "json")]
    pub json: PathBuf,
    #[arg(long)]
    pub image: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct LogView {
    #[arg(long, default_value_t = 1)]
    pub page: u64,
    /// Case-insensitive filter
    #[arg(long, default_value = "")]
    pub search: String,
    /// Print CSV instead of JSON
    #[arg(long)]
    pub csv: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListArg {
    Approved,
    Pending,
    Rejected,
    Own,
}

impl From<ListArg> for ProductList {
    fn from(arg: ListArg) -> Self {
        match arg {
            ListArg::Approved => ProductList::Approved,
            ListArg::Pending => ProductList::Pending,
            ListArg::Rejected => ProductList::Rejected,
            ListArg::Own => ProductList::Own,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindArg {
    Online,
    Instore,
}

impl From<KindArg> for StoreType {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Online => StoreType::Online,
            KindArg::Instore => StoreType::Instore,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuditStatusArg {
    Success,
    Failure,
}

impl From<AuditStatusArg> for AuditStatus {
    fn from(arg: AuditStatusArg) -> Self {
        match arg {
            AuditStatusArg::Success => AuditStatus::Success,
            AuditStatusArg::Failure => AuditStatus::Failure,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeverityArg {
    Critical,
    Warning,
    Info,
}

impl From<SeverityArg> for Severity {
    fn from(arg: SeverityArg) -> Self {
        match arg {
            SeverityArg::Critical => Severity::Critical,
            SeverityArg::Warning => Severity::Warning,
            SeverityArg::Info => Severity::Info,
        }
    }
}

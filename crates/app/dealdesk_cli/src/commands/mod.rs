//! Command dispatch.

mod admin;
mod auth;
mod logs;
mod products;

use std::sync::Arc;
use std::time::Duration;

use dealdesk_client::config::DEFAULT_BASE_URL;
use dealdesk_client::{ApiClient, ClientConfig, RouteDecision, SessionEvent};
use serde::Serialize;

use crate::cli::{Cli, Commands};
use crate::paths::Paths;
use crate::Result;

pub async fn dispatch(args: Cli) -> Result<()> {
    let Cli {
        base_url,
        timeout,
        home,
        command,
    } = args;

    if let Commands::Version = command {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let paths = Paths::resolve(home)?;
    let session = Arc::new(paths.session_store()?);

    if let Commands::Gate { path } = &command {
        match session.gate(path) {
            RouteDecision::Pass => println!("pass {path}"),
            RouteDecision::Redirect(to) => println!("redirect {to}"),
        }
        return Ok(());
    }

    let client = ApiClient::new(client_config(base_url, timeout)?, session)?;
    let mut events = client.events().subscribe();

    let result = run(&client, command).await;

    while let Ok(event) = events.try_recv() {
        match event {
            SessionEvent::Expired { redirect_to } => {
                log::debug!("session cleared, next stop {redirect_to}")
            }
            other => log::debug!("session event: {other:?}"),
        }
    }
    result
}

async fn run(client: &ApiClient, command: Commands) -> Result<()> {
    match command {
        Commands::Login { email, password } => auth::login(client, &email, &password).await,
        Commands::Logout => auth::logout(client),
        Commands::Whoami => auth::whoami(client),
        Commands::ForgotPassword { email } => auth::forgot_password(client, &email).await,
        Commands::VerifyOtp { otp } => auth::verify_otp(client, &otp).await,
        Commands::ResendOtp => auth::resend_otp(client).await,
        Commands::SetPassword { password } => auth::set_password(client, &password).await,
        Commands::Dashboard => print_json(&client.dashboard().stats().await?),
        Commands::Activity => print_json(&client.dashboard().recent_activity().await?),
        Commands::QuickStats => print_json(&client.dashboard().quick_stats().await?),
        Commands::Products(cmd) => products::run(client, cmd).await,
        Commands::Users(cmd) => admin::users(client, cmd).await,
        Commands::Categories => print_json(&client.catalog().categories().await?),
        Commands::Stores { page } => print_json(&client.catalog().stores(page).await?),
        Commands::AuditLogs { view, status } => logs::audit(client, view, status).await,
        Commands::ErrorLogs { view, severity } => logs::errors(client, view, severity).await,
        Commands::Gate { .. } | Commands::Version => Ok(()),
    }
}

fn client_config(base_url: Option<String>, timeout: Option<u64>) -> Result<ClientConfig> {
    let mut config = ClientConfig::parse(base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?
        .with_user_agent(format!("dealdesk/{}", env!("CARGO_PKG_VERSION")));
    if let Some(secs) = timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    Ok(config)
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

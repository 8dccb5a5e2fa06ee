use dealdesk_client::ApiClient;
use dealdesk_client::PublicReply;

use crate::{Error, Result};

pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<()> {
    let session = client.auth().login(email, password).await?;
    log::info!("logged in as {}", session.user.email);
    Ok(())
}

pub fn logout(client: &ApiClient) -> Result<()> {
    client.auth().logout()?;
    log::info!("logged out");
    Ok(())
}

pub fn whoami(client: &ApiClient) -> Result<()> {
    let user = client
        .session()
        .user()
        .ok_or_else(|| Error::Custom("not logged in, run `dealdesk login`".into()))?;
    super::print_json(&user)
}

pub async fn forgot_password(client: &ApiClient, email: &str) -> Result<()> {
    let reply = client.auth().forgot_password(email).await?;
    report(&reply, "reset code sent");
    Ok(())
}

pub async fn verify_otp(client: &ApiClient, otp: &str) -> Result<()> {
    let email = client.session().password_reset().email()?;
    let reply = client.auth().verify_otp(&email, otp).await?;
    report(&reply, "code verified");
    Ok(())
}

pub async fn resend_otp(client: &ApiClient) -> Result<()> {
    let email = client.session().password_reset().email()?;
    let reply = client.auth().resend_otp(&email).await?;
    report(&reply, "reset code sent again");
    Ok(())
}

pub async fn set_password(client: &ApiClient, password: &str) -> Result<()> {
    let email = client.session().password_reset().email()?;
    let reply = client.auth().set_new_password(&email, password).await?;
    report(&reply, "password updated, log in with the new password");
    Ok(())
}

fn report(reply: &PublicReply, fallback: &str) {
    log::info!("{}", reply.message.as_deref().unwrap_or(fallback));
}

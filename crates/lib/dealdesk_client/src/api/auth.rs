//! Unauthenticated auth endpoints.
//!
//! These never carry a bearer token and a 401 from them is a bad password,
//! not an expired session: it comes back as [`ApiError::LoginRejected`] and
//! the stored session is left alone.

use tracing::info;

use crate::ApiClient;
use crate::client::PublicReply;
use crate::error::{ApiError, ApiResult};
use crate::events::SessionEvent;
use crate::models::{
    EmailRequest, LoginData, LoginRequest, SetNewPasswordRequest, VerifyOtpRequest,
};
use crate::request::ApiRequest;
use crate::session::Session;

pub const LOGIN_PATH: &str = "/auth/login/";
pub const FORGOT_PASSWORD_PATH: &str = "/auth/forgot-password/";
pub const VERIFY_OTP_PATH: &str = "/auth/verify-otp/";
pub const RESEND_OTP_PATH: &str = "/auth/resend-otp/";
pub const SET_NEW_PASSWORD_PATH: &str = "/auth/set-new-password/";

pub struct Auth<'a> {
    client: &'a ApiClient,
}

impl<'a> Auth<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Log in and make the returned tokens the current session.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<Session> {
        let request = ApiRequest::post(LOGIN_PATH).with_json(&LoginRequest { email, password })?;
        let reply = self.client.request_public(request, "Login failed").await?;
        let data: LoginData =
            serde_json::from_value(reply.data).map_err(|e| ApiError::LoginRejected {
                status: 200,
                message: format!("Login failed: malformed response ({e})"),
            })?;

        let session = Session::from(data);
        self.client.session().set(&session)?;
        self.client.events().publish(SessionEvent::LoggedIn {
            user_id: session.user.id,
        });
        info!(user_id = session.user.id, "logged in");
        Ok(session)
    }

    /// Ask for a reset OTP; on success the email is kept for the next steps.
    pub async fn forgot_password(&self, email: &str) -> ApiResult<PublicReply> {
        let request =
            ApiRequest::post(FORGOT_PASSWORD_PATH).with_json(&EmailRequest { email })?;
        let reply = self
            .client
            .request_public(request, "Something went wrong")
            .await?;
        self.client.session().password_reset().begin(email)?;
        Ok(reply)
    }

    pub async fn verify_otp(&self, email: &str, otp: &str) -> ApiResult<PublicReply> {
        let request =
            ApiRequest::post(VERIFY_OTP_PATH).with_json(&VerifyOtpRequest { email, otp })?;
        self.client.request_public(request, "Invalid OTP").await
    }

    pub async fn resend_otp(&self, email: &str) -> ApiResult<PublicReply> {
        let request = ApiRequest::post(RESEND_OTP_PATH).with_json(&EmailRequest { email })?;
        self.client
            .request_public(request, "Failed to resend OTP")
            .await
    }

    /// Set the new password; on success the reset flow is finished.
    pub async fn set_new_password(&self, email: &str, new_password: &str) -> ApiResult<PublicReply> {
        let request = ApiRequest::post(SET_NEW_PASSWORD_PATH).with_json(&SetNewPasswordRequest {
            email,
            new_password,
        })?;
        let reply = self
            .client
            .request_public(request, "Failed to reset password")
            .await?;
        self.client.session().password_reset().finish()?;
        Ok(reply)
    }

    /// Forget the local session. The server is not contacted.
    pub fn logout(&self) -> ApiResult<()> {
        self.client.session().clear()?;
        self.client.events().publish(SessionEvent::LoggedOut);
        info!("logged out");
        Ok(())
    }
}

//! Route gate: decides redirects from the path and the session cookie.

/// Login entry point.
pub const LOGIN_PATH: &str = "/auth/login";
/// Start of the password-reset flow.
pub const FORGOT_PASSWORD_PATH: &str = "/auth/forgot-password";
pub const VERIFY_OTP_PATH: &str = "/auth/verify-otp";
pub const SET_NEW_PASSWORD_PATH: &str = "/auth/set-new-password";
/// Landing page for authenticated users.
pub const LANDING_PATH: &str = "/";

const AUTH_FORM_PATHS: [&str; 4] = [
    LOGIN_PATH,
    FORGOT_PASSWORD_PATH,
    VERIFY_OTP_PATH,
    SET_NEW_PASSWORD_PATH,
];

/// Outcome of gating one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Continue to the requested path.
    Pass,
    /// Send the user elsewhere.
    Redirect(&'static str),
}

/// Paths under `/auth` are reachable without a session.
pub fn is_public(path: &str) -> bool {
    path.starts_with("/auth")
}

/// One of the auth forms a logged-in user has no business seeing.
pub fn is_auth_form(path: &str) -> bool {
    AUTH_FORM_PATHS.contains(&path)
}

/// Gate a navigation to `path`.
///
/// - no session + non-public path → login
/// - session + auth form → landing page
/// - anything else passes
pub fn gate(path: &str, has_session_cookie: bool) -> RouteDecision {
    if !has_session_cookie && !is_public(path) {
        return RouteDecision::Redirect(LOGIN_PATH);
    }
    if has_session_cookie && is_auth_form(path) {
        return RouteDecision::Redirect(LANDING_PATH);
    }
    RouteDecision::Pass
}

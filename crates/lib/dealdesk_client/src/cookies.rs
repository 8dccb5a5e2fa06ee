//! Session cookie: set/get/clear the `access_token` navigation cookie.
//!
//! The cookie mirrors the bearer token so a route gate can decide on
//! redirects without reading durable storage.

use std::sync::Arc;

use cookie::{Cookie, Expiration, SameSite};
use time::{Duration, OffsetDateTime};
use tracing::debug;

use crate::error::StorageError;
use crate::storage::Storage;

/// Cookie name for the access token mirror.
pub const ACCESS_COOKIE: &str = "access_token";

/// Session cookie lifetime: 7 days.
pub const SESSION_COOKIE_MAX_AGE: i64 = 60 * 60 * 24 * 7;

/// Build the access token cookie (`Path=/`, 7 days, `SameSite=Lax`).
pub fn access_cookie(token: &str) -> Cookie<'static> {
    Cookie::build((ACCESS_COOKIE.to_string(), token.to_string()))
        .path("/".to_string())
        .max_age(Duration::seconds(SESSION_COOKIE_MAX_AGE))
        .same_site(SameSite::Lax)
        .build()
}

/// Build an expired cookie that clears the access token mirror.
pub fn clear_access_cookie() -> Cookie<'static> {
    Cookie::build((ACCESS_COOKIE.to_string(), String::new()))
        .path("/".to_string())
        .max_age(Duration::ZERO)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .build()
}

/// Cookies persisted through a [`Storage`], one entry per cookie name.
///
/// Entries carry an absolute `Expires` so a stale cookie disappears on read,
/// the way a browser drops it.
#[derive(Clone)]
pub struct CookieJar {
    storage: Arc<dyn Storage>,
}

impl CookieJar {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Store a cookie. A cookie with `Max-Age=0` or a past expiry removes it.
    pub fn add(&self, cookie: Cookie<'static>) -> Result<(), StorageError> {
        let now = OffsetDateTime::now_utc();
        if is_expired(&cookie, now) {
            debug!(name = cookie.name(), "removing cookie");
            return self.storage.remove(cookie.name());
        }
        let mut cookie = cookie;
        if let Some(max_age) = cookie.max_age() {
            cookie.set_expires(now + max_age);
        }
        self.storage.set(cookie.name(), &cookie.to_string())
    }

    /// Full cookie by name, if present and unexpired.
    pub fn cookie(&self, name: &str) -> Option<Cookie<'static>> {
        let raw = self.storage.get(name)?;
        let cookie = Cookie::parse(raw).ok()?;
        if is_expired(&cookie, OffsetDateTime::now_utc()) {
            return None;
        }
        Some(cookie)
    }

    /// Cookie value by name, if present and unexpired.
    pub fn get(&self, name: &str) -> Option<String> {
        self.cookie(name).map(|c| c.value().to_string())
    }

    pub fn remove(&self, name: &str) -> Result<(), StorageError> {
        self.storage.remove(name)
    }
}

fn is_expired(cookie: &Cookie<'_>, now: OffsetDateTime) -> bool {
    if cookie.max_age().is_some_and(|age| age <= Duration::ZERO) {
        return true;
    }
    match cookie.expires() {
        Some(Expiration::DateTime(at)) => at <= now,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn jar() -> CookieJar {
        CookieJar::new(Arc::new(MemoryStorage::new()))
    }

    #[test]
    fn access_cookie_attributes() {
        let cookie = access_cookie("tok");
        assert_eq!(cookie.name(), "access_token");
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(604_800)));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));

        let header = cookie.to_string();
        assert!(header.starts_with("access_token=tok"));
        assert!(header.contains("Max-Age=604800"));
        assert!(header.contains("SameSite=Lax"));
        assert!(header.contains("Path=/"));
    }

    #[test]
    fn clear_cookie_is_expired() {
        let cookie = clear_access_cookie();
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    }

    #[test]
    fn jar_roundtrip_and_clear() {
        let jar = jar();
        jar.add(access_cookie("A")).unwrap();
        assert_eq!(jar.get(ACCESS_COOKIE).as_deref(), Some("A"));

        jar.add(clear_access_cookie()).unwrap();
        assert!(jar.get(ACCESS_COOKIE).is_none());

        // Clearing twice is harmless.
        jar.add(clear_access_cookie()).unwrap();
        jar.remove(ACCESS_COOKIE).unwrap();
    }

    #[test]
    fn stale_cookie_reads_as_absent() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set(
                ACCESS_COOKIE,
                "access_token=old; Path=/; Expires=Thu, 01 Jan 1970 00:00:01 GMT",
            )
            .unwrap();
        let jar = CookieJar::new(storage);
        assert!(jar.get(ACCESS_COOKIE).is_none());
    }
}

use auth::REFRESH_TOKEN_TTL;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::SameSite;

/// Name of the cookie carrying the refresh token.
pub const REFRESH_COOKIE_NAME: &str = "refreshToken";

/// Attributes of the refresh-token cookie.
///
/// Sign-in and silent refresh both issue the cookie through here, so the
/// two always agree on path, flags and lifetime.
#[derive(Debug, Clone)]
pub struct RefreshCookie {
    path: String,
    secure: bool,
    max_age: time::Duration,
}

impl RefreshCookie {
    pub fn new(path: impl Into<String>, secure: bool) -> Self {
        Self {
            path: path.into(),
            secure,
            max_age: time::Duration::seconds(REFRESH_TOKEN_TTL.as_secs() as i64),
        }
    }

    /// Cookie holding `token`.
    pub fn issue(&self, token: String) -> Cookie<'static> {
        Cookie::build((REFRESH_COOKIE_NAME, token))
            .http_only(true)
            .same_site(SameSite::Lax)
            .path(self.path.clone())
            .secure(self.secure)
            .max_age(self.max_age)
            .build()
    }

    /// Expired, empty cookie that makes the client drop the refresh token.
    pub fn removal(&self) -> Cookie<'static> {
        Cookie::build((REFRESH_COOKIE_NAME, ""))
            .http_only(true)
            .same_site(SameSite::Lax)
            .path(self.path.clone())
            .secure(self.secure)
            .max_age(time::Duration::ZERO)
            .expires(time::OffsetDateTime::UNIX_EPOCH)
            .build()
    }
}

impl Default for RefreshCookie {
    fn default() -> Self {
        Self::new("/", false)
    }
}

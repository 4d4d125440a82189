use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

pub const ACCESS_COOKIE: &str = "access_token";
pub const REFRESH_COOKIE: &str = "refresh_token";

/// Attributes applied to every session cookie of a response.
///
/// Local development (a `Host` containing `localhost` or `127.0.0.1`) gets
/// `Secure=false; SameSite=Lax`; anything else gets `Secure; SameSite=None` so
/// a frontend on another origin can still send the cookies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookiePolicy {
    pub secure: bool,
    pub same_site: SameSite,
    pub domain: Option<String>,
}

impl CookiePolicy {
    pub fn for_host(host: Option<&str>, insecure: bool, domain: Option<String>) -> Self {
        let is_local = host
            .map(|h| h.contains("localhost") || h.contains("127.0.0.1"))
            .unwrap_or(false);
        let (secure, same_site) = if is_local {
            (false, SameSite::Lax)
        } else {
            (true, SameSite::None)
        };
        Self {
            secure: secure && !insecure,
            same_site,
            domain,
        }
    }

    pub fn build(&self, name: &'static str, value: String, max_age: Duration) -> Cookie<'static> {
        let mut builder = Cookie::build((name, value))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site)
            .max_age(max_age);
        if let Some(domain) = self.domain.clone() {
            builder = builder.domain(domain);
        }
        builder.build()
    }

    /// Empty cookie that makes the browser drop `name`.
    pub fn expired(&self, name: &'static str) -> Cookie<'static> {
        let mut cookie = self.build(name, String::new(), Duration::ZERO);
        cookie.make_removal();
        cookie
    }

    pub fn set_access(&self, jar: CookieJar, token: String, ttl: chrono::Duration) -> CookieJar {
        jar.add(self.build(ACCESS_COOKIE, token, to_time(ttl)))
    }

    pub fn set_session(
        &self,
        jar: CookieJar,
        access: (String, chrono::Duration),
        refresh: (String, chrono::Duration),
    ) -> CookieJar {
        let jar = self.set_access(jar, access.0, access.1);
        jar.add(self.build(REFRESH_COOKIE, refresh.0, to_time(refresh.1)))
    }

    pub fn clear_session(&self, jar: CookieJar) -> CookieJar {
        jar.add(self.expired(ACCESS_COOKIE))
            .add(self.expired(REFRESH_COOKIE))
    }
}

fn to_time(d: chrono::Duration) -> Duration {
    Duration::seconds(d.num_seconds())
}

//! Cookie Management
//!
//! Builds and parses the session cookie. Values are expected to be
//! cookie-safe already (the session token is base64url).

use axum::http::{HeaderMap, HeaderValue, header};

/// Default name of the blog session cookie
pub const SESSION_COOKIE_NAME: &str = "blog_session";

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Cookie configuration
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
    pub max_age_secs: Option<i64>,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: SESSION_COOKIE_NAME.to_string(),
            secure: true,
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
            max_age_secs: None,
        }
    }
}

impl CookieConfig {
    /// Session cookie: HttpOnly, SameSite=Lax, site-wide
    ///
    /// `secure` is only turned off for plain-HTTP local development.
    pub fn session(secure: bool, max_age_secs: i64) -> Self {
        Self {
            secure,
            max_age_secs: Some(max_age_secs),
            ..Self::default()
        }
    }

    fn push_attributes(&self, cookie: &mut String) {
        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str("; SameSite=");
        cookie.push_str(self.same_site.as_str());
        cookie.push_str("; Path=");
        cookie.push_str(&self.path);
    }

    /// Build Set-Cookie header value
    pub fn build_set_cookie(&self, value: &str) -> String {
        let mut cookie = format!("{}={}", self.name, value);
        self.push_attributes(&mut cookie);

        if let Some(max_age) = self.max_age_secs {
            cookie.push_str(&format!("; Max-Age={}", max_age));
        }

        cookie
    }

    /// Build Set-Cookie header value that expires the cookie
    ///
    /// Attributes must match the original cookie or browsers keep it.
    pub fn build_delete_cookie(&self) -> String {
        let mut cookie = format!("{}=", self.name);
        self.push_attributes(&mut cookie);
        cookie.push_str("; Max-Age=0");
        cookie
    }

    /// Set-Cookie header carrying `value`
    pub fn set_cookie_header(&self, value: &str) -> Option<HeaderValue> {
        HeaderValue::from_str(&self.build_set_cookie(value)).ok()
    }

    /// Set-Cookie header clearing the cookie
    pub fn delete_cookie_header(&self) -> Option<HeaderValue> {
        HeaderValue::from_str(&self.build_delete_cookie()).ok()
    }
}

/// Extract a cookie value from request headers
///
/// Looks through every `Cookie` header, since HTTP/2 clients may split them.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            (key == name && !value.is_empty()).then(|| value.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_build() {
        let config = CookieConfig::session(true, 3600);

        let cookie = config.build_set_cookie("value123");
        assert!(cookie.starts_with("blog_session=value123"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=3600"));
    }

    #[test]
    fn test_insecure_cookie_for_local_development() {
        let cookie = CookieConfig::session(false, 60).build_set_cookie("v");
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_delete_cookie_keeps_attributes() {
        let config = CookieConfig {
            path: "/api".to_string(),
            ..CookieConfig::session(true, 3600)
        };

        let cookie = config.build_delete_cookie();
        assert!(cookie.starts_with("blog_session=;"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("Path=/api"));
        assert!(cookie.ends_with("Max-Age=0"));
        assert!(config.delete_cookie_header().is_some());
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("foo=bar; blog_session=abc123; other=xyz"),
        );

        assert_eq!(
            extract_cookie(&headers, SESSION_COOKIE_NAME),
            Some("abc123".to_string())
        );
        assert_eq!(extract_cookie(&headers, "foo"), Some("bar".to_string()));
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_extract_cookie_across_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("a=1"));
        headers.append(header::COOKIE, HeaderValue::from_static("blog_session=tok"));
        headers.append(header::COOKIE, HeaderValue::from_static("empty="));

        assert_eq!(
            extract_cookie(&headers, SESSION_COOKIE_NAME),
            Some("tok".to_string())
        );
        assert_eq!(extract_cookie(&headers, "empty"), None);
    }
}

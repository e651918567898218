use crate::models::flash::Flash;

/// Cookie names used by the application
pub const SESSION_COOKIE: &str = "session_token";
pub const FLASH_COOKIE: &str = "flash";

/// Cookie security configuration
///
/// Controls how cookies are created and secured for browser clients
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct CookieConfig {
    /// HttpOnly flag prevents JavaScript access (XSS protection)
    pub http_only: bool,
    /// Secure flag ensures HTTPS-only transmission (should be true in production)
    pub secure: bool,
    /// SameSite attribute for CSRF protection
    pub same_site: SameSite,
    /// Path attribute to limit cookie scope
    pub path: String,
}

/// SameSite cookie attribute for CSRF protection
#[derive(Debug, Clone, Copy, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSite {
    /// Strict mode - cookie not sent with cross-site requests
    Strict,
    /// Lax mode - cookie sent with top-level navigations
    Lax,
    /// None mode - cookie sent with all requests (requires Secure)
    None,
}

impl SameSite {
    fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            http_only: true,
            secure: false, // Set to true in production
            same_site: SameSite::Lax,
            path: "/".to_string(),
        }
    }
}

/// Builds a Set-Cookie header value for the session token.
pub fn build_session_cookie(token: &str, max_age_seconds: i64, config: &CookieConfig) -> String {
    format!(
        "{}={}; HttpOnly{}; SameSite={}; Path={}; Max-Age={}",
        SESSION_COOKIE,
        token,
        if config.secure { "; Secure" } else { "" },
        config.same_site.as_str(),
        config.path,
        max_age_seconds
    )
}

/// Builds a Set-Cookie header value that clears a cookie by name.
///
/// Used during logout and after a flash message has been consumed.
pub fn build_clear_cookie(name: &str) -> String {
    format!("{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0", name)
}

/// Builds a Set-Cookie header value carrying a one-time flash message.
pub fn build_flash_cookie(flash: &Flash) -> String {
    format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/",
        FLASH_COOKIE,
        encode_flash(flash)
    )
}

/// Encodes a flash message for cookie transport: hex over its JSON form,
/// which keeps the value free of characters cookies cannot carry.
pub fn encode_flash(flash: &Flash) -> String {
    let json = serde_json::to_string(flash).unwrap_or_default();
    hex::encode(json)
}

/// Decodes a flash cookie value. Garbage values decode to `None`.
pub fn decode_flash(value: &str) -> Option<Flash> {
    let bytes = hex::decode(value).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Extract specific cookie value from Cookie header
pub fn extract_cookie_value(cookie_str: &str, cookie_name: &str) -> Option<String> {
    cookie_str
        .split(';')
        .map(|s| s.trim())
        .find(|cookie| cookie.starts_with(&format!("{}=", cookie_name)))
        .and_then(|cookie| cookie.split('=').nth(1).map(|s| s.to_string()))
}

use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use serde::Deserialize;

use crate::{
    client::{Client, SessionIdentity},
    error::{response_prefix, AuthError},
    gwt,
};

/// Name of the cookie carrying the per-session nonce after the GWT identity
/// exchange.
pub(crate) const SESSION_NONCE_COOKIE: &str = "sesnonce";

// The login page is the only markup this crate ever parses. Attribute order
// inside the tag is not fixed, so the tag and its value attribute are matched
// separately.
static ANTICSRF_INPUT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<input[^>]*\bname\s*=\s*["']anticsrf["'][^>]*>"#).expect("pattern is valid")
});
static VALUE_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bvalue\s*=\s*["']([^"']*)["']"#).expect("pattern is valid"));

#[derive(Deserialize)]
struct LoginApiResponse {
    #[serde(default)]
    success: bool,
    error: Option<String>,
}

impl Client {
    /// Authenticate with Cronometer.
    ///
    /// Runs the four-step handshake: fetch the login page and extract the
    /// anti-CSRF token, POST the credentials, perform the GWT identity
    /// exchange, and capture the session nonce cookie. Any step's failure
    /// aborts the sequence and leaves previously stored identity unchanged,
    /// so a later `login` call can retry cleanly.
    ///
    /// # Errors
    ///
    /// [`AuthError::Authentication`] for credential or login-page problems,
    /// [`AuthError::ProtocolVersion`] when the GWT response cannot be decoded
    /// (the built-in protocol constants have likely gone stale).
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let csrf_token = self.extract_csrf_token().await?;
        self.submit_credentials(email, password, &csrf_token).await?;
        let user_id = self.authenticate_gwt().await?;

        // Not fatal here: the server may have renamed the cookie. Minting an
        // export token without a nonce fails with an authentication error.
        let nonce = self.internal.cookie_value(SESSION_NONCE_COOKIE);
        if nonce.is_none() {
            debug!("no {SESSION_NONCE_COOKIE} cookie set after identity exchange");
        }

        self.internal.set_session(SessionIdentity { user_id, nonce });
        Ok(())
    }

    /// Step 1: fetch the login page and extract the anti-CSRF token.
    async fn extract_csrf_token(&self) -> Result<String, AuthError> {
        debug!("fetching login page for CSRF token");
        let response = self
            .internal
            .http_client
            .get(self.internal.settings.login_page_url())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AuthError::Authentication(format!(
                "login page returned status {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        let input = ANTICSRF_INPUT.find(&body).ok_or_else(|| {
            AuthError::Authentication("could not find CSRF token in login page".into())
        })?;
        VALUE_ATTR
            .captures(input.as_str())
            .map(|captures| captures[1].to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                AuthError::Authentication("CSRF token value is missing or empty".into())
            })
    }

    /// Step 2: POST the credentials with the CSRF token on the same session.
    async fn submit_credentials(
        &self,
        email: &str,
        password: &str,
        csrf_token: &str,
    ) -> Result<(), AuthError> {
        debug!("submitting credentials");
        let response = self
            .internal
            .http_client
            .post(self.internal.settings.login_api_url())
            .form(&[
                ("username", email),
                ("password", password),
                ("anticsrf", csrf_token),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AuthError::Authentication(format!(
                "login request returned status {}",
                response.status()
            )));
        }

        let data: LoginApiResponse = response.json().await?;
        if !data.success {
            return Err(AuthError::Authentication(format!(
                "login failed: {}",
                data.error.as_deref().unwrap_or("unknown login error")
            )));
        }
        Ok(())
    }

    /// Step 3: GWT identity exchange, yielding the user id.
    async fn authenticate_gwt(&self) -> Result<String, AuthError> {
        debug!("authenticating against GWT endpoint");
        let config = &self.internal.gwt_config;
        let response = self
            .internal
            .http_client
            .post(self.internal.settings.gwt_api_url())
            .headers(gwt::build_gwt_headers(config))
            .body(gwt::build_authenticate_body(config))
            .send()
            .await?
            .error_for_status()?;

        let text = response.text().await?;
        gwt::parse_user_id(&text).ok_or_else(|| AuthError::ProtocolVersion {
            operation: "authenticate",
            response_prefix: response_prefix(&text),
        })
    }
}

//! Internal client state shared behind the public [`Client`](super::Client).

use std::sync::{Arc, RwLock};

use reqwest::cookie::{CookieStore, Jar};

use crate::{client::client_settings::ClientSettings, gwt::GwtConfig};

/// Identity established by a successful login. Owned exclusively by the
/// client; absent before login and after a failed login attempt.
#[derive(Debug, Clone)]
pub struct SessionIdentity {
    /// Numeric Cronometer user id, as decoded from the authenticate RPC.
    pub user_id: String,
    /// Per-session secret captured from the `sesnonce` cookie. May
    /// legitimately be absent if the server changed cookie naming; minting
    /// export tokens requires it.
    pub nonce: Option<String>,
}

/// State and transport shared by all operations of one [`Client`](super::Client).
#[derive(Debug)]
pub struct InternalClient {
    pub(crate) settings: ClientSettings,
    pub(crate) gwt_config: GwtConfig,
    pub(crate) http_client: reqwest::Client,
    pub(crate) cookie_jar: Arc<Jar>,
    pub(crate) session: RwLock<Option<SessionIdentity>>,
}

impl InternalClient {
    /// The cookie-bearing HTTP client owned by this instance.
    pub fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    /// Settings this client was constructed with.
    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Identity from the last successful login, if any.
    pub fn session(&self) -> Option<SessionIdentity> {
        self.session.read().expect("RwLock is not poisoned").clone()
    }

    pub(crate) fn set_session(&self, identity: SessionIdentity) {
        *self.session.write().expect("RwLock is not poisoned") = Some(identity);
    }

    pub(crate) fn clear_session(&self) {
        *self.session.write().expect("RwLock is not poisoned") = None;
    }

    /// Read a cookie value from the transport session's jar.
    pub(crate) fn cookie_value(&self, name: &str) -> Option<String> {
        let url = reqwest::Url::parse(&self.settings.base_url).ok()?;
        let header = self.cookie_jar.cookies(&url)?;
        let header = header.to_str().ok()?;
        header.split("; ").find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            (key == name).then(|| value.to_string())
        })
    }
}

use std::sync::{Arc, RwLock};

use reqwest::cookie::Jar;

use super::internal::InternalClient;
use crate::{client::client_settings::ClientSettings, gwt::GwtConfig};

/// The main struct to interact with the Cronometer SDK.
///
/// One `Client` owns one logical session: a cookie-bearing HTTP transport plus
/// the identity established by [`login`](Client::login). Cloning returns an
/// owned reference to the same instance. Concurrent `login` calls on one
/// instance race on cookie state and are unsupported; use a separate `Client`
/// per account.
#[derive(Debug, Clone)]
pub struct Client {
    // Mutable state lives behind an Arc as part of [`InternalClient`] so that
    // clones share the session and cookie jar.
    #[doc(hidden)]
    pub internal: Arc<InternalClient>,
}

impl Client {
    /// Create a new Cronometer client.
    ///
    /// The GWT protocol configuration is resolved here, once: explicit
    /// settings override, then environment variables, then built-in defaults.
    pub fn new(settings: Option<ClientSettings>) -> Self {
        let settings = settings.unwrap_or_default();

        let cookie_jar = Arc::new(Jar::default());
        let http_client = reqwest::Client::builder()
            .cookie_provider(cookie_jar.clone())
            .user_agent(settings.user_agent.clone())
            .build()
            .expect("HTTP client build should not fail");

        let gwt_config = GwtConfig::resolve(
            settings.gwt_module_base(),
            settings.gwt_permutation.clone(),
            settings.gwt_header.clone(),
        );

        Self {
            internal: Arc::new(InternalClient {
                settings,
                gwt_config,
                http_client,
                cookie_jar,
                session: RwLock::new(None),
            }),
        }
    }
}

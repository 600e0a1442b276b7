use log::debug;

use crate::{
    client::{Client, SessionIdentity},
    error::{response_prefix, AuthError},
    gwt,
};

impl Client {
    /// Mint a fresh short-lived authorization token for the export endpoint.
    ///
    /// Tokens are never cached; every data-retrieval call requests a new one.
    /// Requires a logged-in session with a captured nonce.
    ///
    /// # Errors
    ///
    /// [`AuthError::Authentication`] when no session or nonce is available,
    /// [`AuthError::ProtocolVersion`] when the response holds no quoted token.
    pub async fn export_token(&self) -> Result<String, AuthError> {
        let session = self.require_session()?;
        let nonce = require_nonce(&session)?;

        debug!("minting export token for user {}", session.user_id);
        let config = &self.internal.gwt_config;
        let response = self
            .internal
            .http_client
            .post(self.internal.settings.gwt_api_url())
            .headers(gwt::build_gwt_headers(config))
            .body(gwt::build_generate_token_body(
                config,
                &nonce,
                &session.user_id,
            ))
            .send()
            .await?
            .error_for_status()?;

        let text = response.text().await?;
        gwt::parse_auth_token(&text).ok_or_else(|| AuthError::ProtocolVersion {
            operation: "generateAuthorizationToken",
            response_prefix: response_prefix(&text),
        })
    }

    /// End the current session on the server and forget the stored identity.
    ///
    /// Not required for correctness; the server expires sessions on its own.
    pub async fn logout(&self) -> Result<(), AuthError> {
        let session = self.require_session()?;
        let nonce = require_nonce(&session)?;

        debug!("logging out user {}", session.user_id);
        let config = &self.internal.gwt_config;
        self.internal
            .http_client
            .post(self.internal.settings.gwt_api_url())
            .headers(gwt::build_gwt_headers(config))
            .body(gwt::build_logout_body(config, &nonce))
            .send()
            .await?
            .error_for_status()?;

        self.internal.clear_session();
        Ok(())
    }

    fn require_session(&self) -> Result<SessionIdentity, AuthError> {
        self.internal.session().ok_or_else(|| {
            AuthError::Authentication("not authenticated; call login() first".into())
        })
    }
}

fn require_nonce(session: &SessionIdentity) -> Result<String, AuthError> {
    session.nonce.clone().ok_or_else(|| {
        AuthError::Authentication(
            "no session nonce was captured at login; log in again".into(),
        )
    })
}

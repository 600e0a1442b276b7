use serde::{Deserialize, Serialize};

/// Basic client behavior settings. These specify the target and identity of
/// the Cronometer client. They are optional and uneditable once the client is
/// initialized.
///
/// Defaults to
///
/// ```
/// # use cronometer_core::ClientSettings;
/// let settings = ClientSettings {
///     base_url: "https://cronometer.com".to_string(),
///     user_agent: "Cronometer Rust-SDK".to_string(),
///     gwt_permutation: None,
///     gwt_header: None,
/// };
/// let default = ClientSettings::default();
/// ```
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ClientSettings {
    /// The base url of the targeted Cronometer instance. Defaults to `https://cronometer.com`
    pub base_url: String,
    /// The user_agent to send to Cronometer. Defaults to `Cronometer Rust-SDK`
    pub user_agent: String,
    /// Explicit override for the GWT permutation hash. Takes precedence over
    /// the `CRONOMETER_GWT_PERMUTATION` environment variable and the built-in
    /// default.
    pub gwt_permutation: Option<String>,
    /// Explicit override for the GWT header hash. Takes precedence over the
    /// `CRONOMETER_GWT_HEADER` environment variable and the built-in default.
    pub gwt_header: Option<String>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "https://cronometer.com".into(),
            user_agent: "Cronometer Rust-SDK".into(),
            gwt_permutation: None,
            gwt_header: None,
        }
    }
}

impl ClientSettings {
    fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// URL of the HTML login page holding the CSRF field.
    pub fn login_page_url(&self) -> String {
        format!("{}/login/", self.base())
    }

    /// URL of the JSON login endpoint.
    pub fn login_api_url(&self) -> String {
        format!("{}/login", self.base())
    }

    /// URL of the GWT-RPC endpoint.
    pub fn gwt_api_url(&self) -> String {
        format!("{}/cronometer/app", self.base())
    }

    /// URL of the CSV export endpoint.
    pub fn export_url(&self) -> String {
        format!("{}/export", self.base())
    }

    /// GWT module base URL derived from the base url.
    pub fn gwt_module_base(&self) -> String {
        format!("{}/cronometer/", self.base())
    }
}

//! GWT protocol layer for Cronometer's backend.
//!
//! Cronometer's app talks to its backend with GWT-RPC: pipe-delimited,
//! positionally-typed request bodies and `//OK[...]` framed responses. The
//! request bodies are literal templates tied to an external, unversioned
//! contract; do not try to generalize them into a real serializer. Only the
//! documented substitution points vary.
//!
//! The permutation and header hashes identify a specific client build and
//! silently go stale when Cronometer redeploys, which is why both can be
//! overridden per client or via the environment.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

/// Default GWT permutation hash. May change when Cronometer updates their app.
pub const DEFAULT_GWT_PERMUTATION: &str = "7B121DC5483BF272B1BC1916DA9FA963";
/// Default GWT header hash. May change when Cronometer updates their app.
pub const DEFAULT_GWT_HEADER: &str = "2D6A926E3729946302DC68073CB0D550";

/// Environment variable overriding the GWT permutation hash.
pub const ENV_GWT_PERMUTATION: &str = "CRONOMETER_GWT_PERMUTATION";
/// Environment variable overriding the GWT header hash.
pub const ENV_GWT_HEADER: &str = "CRONOMETER_GWT_HEADER";

const GWT_CONTENT_TYPE: &str = "text/x-gwt-rpc; charset=UTF-8";
const GWT_SERVICE: &str = "com.cronometer.shared.rpc.CronometerService";

/// Seconds an export authorization token stays valid.
const TOKEN_VALIDITY_SECS: u32 = 3600;

/// Configuration for GWT requests, resolved once at client construction.
///
/// The values are opaque to this crate; they are never validated or derived.
#[derive(Debug, Clone)]
pub struct GwtConfig {
    /// MIME type for GWT-RPC request bodies.
    pub content_type: String,
    /// Module base URL, sent as a header and embedded in request bodies.
    pub module_base: String,
    /// Permutation hash identifying the client build.
    pub permutation: String,
    /// Header hash identifying the client build.
    pub header: String,
}

impl GwtConfig {
    /// Resolve the GWT configuration for a client instance.
    ///
    /// The permutation and header values each resolve independently:
    /// explicit argument, then environment variable, then built-in default.
    pub fn resolve(
        module_base: String,
        permutation: Option<String>,
        header: Option<String>,
    ) -> Self {
        Self {
            content_type: GWT_CONTENT_TYPE.to_string(),
            module_base,
            permutation: resolve_value(permutation, ENV_GWT_PERMUTATION, DEFAULT_GWT_PERMUTATION),
            header: resolve_value(header, ENV_GWT_HEADER, DEFAULT_GWT_HEADER),
        }
    }
}

fn resolve_value(explicit: Option<String>, env_key: &str, default: &str) -> String {
    explicit
        .or_else(|| std::env::var(env_key).ok())
        .unwrap_or_else(|| default.to_string())
}

/// Build the HTTP headers for a GWT request.
pub fn build_gwt_headers(config: &GwtConfig) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let pairs = [
        (CONTENT_TYPE, &config.content_type),
        (
            reqwest::header::HeaderName::from_static("x-gwt-module-base"),
            &config.module_base,
        ),
        (
            reqwest::header::HeaderName::from_static("x-gwt-permutation"),
            &config.permutation,
        ),
    ];
    for (name, value) in pairs {
        if let Ok(value) = HeaderValue::from_str(value) {
            headers.insert(name, value);
        }
    }
    headers
}

/// Build the GWT request body for the `authenticate` call.
///
/// Field counts, type markers and the trailing integers are fixed by the
/// server-side method signature and must match byte-for-byte.
pub fn build_authenticate_body(config: &GwtConfig) -> String {
    format!(
        "7|0|5|{}|{}|{GWT_SERVICE}|authenticate|java.lang.Integer/3438268394|1|2|3|4|1|5|5|-300|",
        config.module_base, config.header,
    )
}

/// Build the GWT request body for the `generateAuthorizationToken` call.
pub fn build_generate_token_body(config: &GwtConfig, nonce: &str, user_id: &str) -> String {
    format!(
        "7|0|8|{}|{}|{GWT_SERVICE}|generateAuthorizationToken|java.lang.String/2004016611|I|com.cronometer.shared.user.AuthScope/2065601159|{nonce}|1|2|3|4|4|5|6|6|7|8|{user_id}|{TOKEN_VALIDITY_SECS}|7|2|",
        config.module_base, config.header,
    )
}

/// Build the GWT request body for the `logout` call.
pub fn build_logout_body(config: &GwtConfig, nonce: &str) -> String {
    format!(
        "7|0|6|{}|{}|{GWT_SERVICE}|logout|java.lang.String/2004016611|{nonce}|1|2|3|4|1|5|6|",
        config.module_base, config.header,
    )
}

// Response scanning stays loose on purpose: the framing around `OK[...]` is
// undocumented and has changed before. A full parse would turn harmless
// framing changes into spurious protocol-version failures.
static USER_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"OK\[(\d+),").expect("pattern is valid"));
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""(.*?)""#).expect("pattern is valid"));

/// Extract the user id from an `authenticate` response.
///
/// Scans for `OK[<digits>,` anywhere in the response; returns `None` when the
/// pattern is absent.
pub fn parse_user_id(response_text: &str) -> Option<String> {
    USER_ID_PATTERN
        .captures(response_text)
        .map(|captures| captures[1].to_string())
}

/// Extract the token from a `generateAuthorizationToken` response.
///
/// Returns the contents of the first double-quoted run. The protocol does not
/// escape quotes in this position, so no unescaping is performed. An empty
/// quoted string decodes to `Some("")`.
pub fn parse_auth_token(response_text: &str) -> Option<String> {
    TOKEN_PATTERN
        .captures(response_text)
        .map(|captures| captures[1].to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Environment mutations are process-global; every test touching the
    /// override variables serializes behind this lock and restores state.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn with_env(vars: &[(&str, Option<&str>)], f: impl FnOnce()) {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let saved: Vec<(&str, Option<String>)> = vars
            .iter()
            .map(|(key, _)| (*key, std::env::var(key).ok()))
            .collect();
        for (key, value) in vars {
            match value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }
        f();
        for (key, value) in saved {
            match value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }
    }

    fn fixed_config() -> GwtConfig {
        GwtConfig {
            content_type: GWT_CONTENT_TYPE.to_string(),
            module_base: "https://cronometer.com/cronometer/".to_string(),
            permutation: DEFAULT_GWT_PERMUTATION.to_string(),
            header: DEFAULT_GWT_HEADER.to_string(),
        }
    }

    #[test]
    fn test_resolve_returns_defaults() {
        with_env(&[(ENV_GWT_PERMUTATION, None), (ENV_GWT_HEADER, None)], || {
            let config = GwtConfig::resolve("https://cronometer.com/cronometer/".into(), None, None);
            assert_eq!(config.permutation, DEFAULT_GWT_PERMUTATION);
            assert_eq!(config.header, DEFAULT_GWT_HEADER);
            assert_eq!(config.content_type, "text/x-gwt-rpc; charset=UTF-8");
        });
    }

    #[test]
    fn test_resolve_env_overrides_default_permutation() {
        with_env(
            &[(ENV_GWT_PERMUTATION, Some("ENV_PERM")), (ENV_GWT_HEADER, None)],
            || {
                let config = GwtConfig::resolve("base".into(), None, None);
                assert_eq!(config.permutation, "ENV_PERM");
                assert_eq!(config.header, DEFAULT_GWT_HEADER);
            },
        );
    }

    #[test]
    fn test_resolve_env_overrides_default_header() {
        with_env(
            &[(ENV_GWT_PERMUTATION, None), (ENV_GWT_HEADER, Some("ENV_HEAD"))],
            || {
                let config = GwtConfig::resolve("base".into(), None, None);
                assert_eq!(config.permutation, DEFAULT_GWT_PERMUTATION);
                assert_eq!(config.header, "ENV_HEAD");
            },
        );
    }

    #[test]
    fn test_resolve_explicit_overrides_env() {
        with_env(
            &[
                (ENV_GWT_PERMUTATION, Some("ENV_PERM")),
                (ENV_GWT_HEADER, Some("ENV_HEAD")),
            ],
            || {
                let config = GwtConfig::resolve(
                    "base".into(),
                    Some("PARAM_PERM".into()),
                    Some("PARAM_HEAD".into()),
                );
                assert_eq!(config.permutation, "PARAM_PERM");
                assert_eq!(config.header, "PARAM_HEAD");
            },
        );
    }

    #[test]
    fn test_build_gwt_headers() {
        let headers = build_gwt_headers(&fixed_config());
        assert_eq!(
            headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("text/x-gwt-rpc; charset=UTF-8")
        );
        assert_eq!(
            headers
                .get("x-gwt-module-base")
                .and_then(|v| v.to_str().ok()),
            Some("https://cronometer.com/cronometer/")
        );
        assert_eq!(
            headers
                .get("x-gwt-permutation")
                .and_then(|v| v.to_str().ok()),
            Some(DEFAULT_GWT_PERMUTATION)
        );
    }

    #[test]
    fn test_authenticate_body_matches_known_good_template() {
        let body = build_authenticate_body(&fixed_config());
        assert_eq!(
            body,
            "7|0|5|https://cronometer.com/cronometer/|2D6A926E3729946302DC68073CB0D550|\
             com.cronometer.shared.rpc.CronometerService|authenticate|\
             java.lang.Integer/3438268394|1|2|3|4|1|5|5|-300|"
        );
    }

    #[test]
    fn test_generate_token_body_embeds_arguments() {
        let body = build_generate_token_body(&fixed_config(), "test_nonce", "12345");
        assert_eq!(
            body,
            "7|0|8|https://cronometer.com/cronometer/|2D6A926E3729946302DC68073CB0D550|\
             com.cronometer.shared.rpc.CronometerService|generateAuthorizationToken|\
             java.lang.String/2004016611|I|com.cronometer.shared.user.AuthScope/2065601159|\
             test_nonce|1|2|3|4|4|5|6|6|7|8|12345|3600|7|2|"
        );
    }

    #[test]
    fn test_logout_body_embeds_nonce() {
        let body = build_logout_body(&fixed_config(), "test_nonce");
        assert!(body.contains("|logout|"));
        assert!(body.contains("|test_nonce|"));
        assert!(body.starts_with("7|0|6|"));
    }

    #[test]
    fn test_bodies_are_deterministic() {
        let config = fixed_config();
        assert_eq!(
            build_authenticate_body(&config),
            build_authenticate_body(&config)
        );
        assert_eq!(
            build_generate_token_body(&config, "n", "1"),
            build_generate_token_body(&config, "n", "1")
        );
        assert_eq!(
            build_logout_body(&config, "n"),
            build_logout_body(&config, "n")
        );
    }

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id("//OK[12345,2,1,...]").as_deref(), Some("12345"));
    }

    #[test]
    fn test_parse_user_id_tolerates_framing_changes() {
        // The bytes before OK[ are undocumented and have changed before.
        assert_eq!(
            parse_user_id("/*junk*/ //OK[67890,0]").as_deref(),
            Some("67890")
        );
    }

    #[test]
    fn test_parse_user_id_missing_pattern() {
        assert_eq!(parse_user_id("some invalid response"), None);
        assert_eq!(parse_user_id("//EX[\"error\"]"), None);
        assert_eq!(parse_user_id(""), None);
    }

    #[test]
    fn test_parse_auth_token() {
        assert_eq!(
            parse_auth_token("//OK[\"abc123def456\"]").as_deref(),
            Some("abc123def456")
        );
    }

    #[test]
    fn test_parse_auth_token_takes_first_quoted_run() {
        assert_eq!(
            parse_auth_token("//OK[\"first\",\"second\"]").as_deref(),
            Some("first")
        );
    }

    #[test]
    fn test_parse_auth_token_empty_string_is_not_missing() {
        assert_eq!(parse_auth_token("//OK[\"\"]").as_deref(), Some(""));
    }

    #[test]
    fn test_parse_auth_token_missing_quotes() {
        assert_eq!(parse_auth_token("some invalid response"), None);
    }
}

#![doc = include_str!("../README.md")]

use cronometer_core::{Client, ClientSettings};
use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

/// Helper for testing the Cronometer SDK using wiremock.
///
/// Warning: when using `Mock::expect` ensure `server` is not dropped before
/// the test completes.
pub async fn start_mock(mocks: Vec<Mock>) -> (MockServer, Client) {
    let server = MockServer::start().await;

    for mock in mocks {
        server.register(mock).await;
    }

    let client = Client::new(Some(ClientSettings {
        base_url: server.uri(),
        user_agent: "test-agent".to_string(),
        gwt_permutation: None,
        gwt_header: None,
    }));

    (server, client)
}

/// Mocks for a complete successful login handshake.
///
/// Covers the login page (CSRF field), the JSON login endpoint, the GWT
/// identity exchange (sets the `sesnonce` cookie and answers with `user_id`),
/// and token minting (answers with `token`).
pub fn session_mocks(user_id: &str, token: &str) -> Vec<Mock> {
    vec![
        Mock::given(matchers::method("GET"))
            .and(matchers::path("/login/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<html><body><input type="hidden" name="anticsrf" value="test-csrf"></body></html>"#,
            )),
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/login"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"success": true}"#)),
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/cronometer/app"))
            .and(matchers::body_string_contains("|authenticate|"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "sesnonce=test-nonce; Path=/")
                    .set_body_string(format!("//OK[{user_id},2,1,[]]")),
            ),
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/cronometer/app"))
            .and(matchers::body_string_contains("|generateAuthorizationToken|"))
            .respond_with(ResponseTemplate::new(200).set_body_string(format!("//OK[\"{token}\"]"))),
    ]
}

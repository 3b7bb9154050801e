//! Sign-in against a mock server over real HTTP.

use fedicheck_fetch::{ExtractionError, FetchError, ServiceContext};
use fedicheck_services::{AuthenticationService, SignInOptions};
use httpmock::prelude::*;

const LOGIN_FORM: &str = r#"<html><head>
<meta name="csrf-token" content="csrf1">
</head><body><form action="/auth/sign_in" method="post"></form></body></html>"#;

const WEB_HOME: &str = r#"<html><body>
<script id="initial-state" type="application/json">{"meta":{"access_token":"alicetoken","me":"1"}}</script>
</body></html>"#;

fn context(server: &MockServer) -> ServiceContext {
    ServiceContext::builder()
        .base_url(server.base_url())
        .build()
        .unwrap()
}

fn mock_login_form(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(GET).path("/auth/sign_in");
        then.status(200)
            .header("content-type", "text/html")
            .header("set-cookie", "_mastodon_session=form; path=/; HttpOnly")
            .body(LOGIN_FORM);
    })
}

#[tokio::test]
async fn test_sign_in_derives_token() {
    let server = MockServer::start_async().await;
    let form = mock_login_form(&server);
    let submit = server.mock(|when, then| {
        when.method(POST)
            .path("/auth/sign_in")
            .header("cookie", "_mastodon_session=form")
            .body("authenticity_token=csrf1&user%5Bemail%5D=alice%40localhost&user%5Bpassword%5D=secret&button=");
        then.status(302)
            .header("location", "/")
            .header("set-cookie", "_mastodon_session=alice; path=/; HttpOnly");
    });
    let home = server.mock(|when, then| {
        when.method(GET)
            .path("/")
            .header("cookie", "_mastodon_session=alice");
        then.status(200).header("content-type", "text/html").body(WEB_HOME);
    });

    let auth = AuthenticationService::new()
        .sign_in(&context(&server), "alice@localhost", "secret")
        .await
        .unwrap();

    form.assert();
    submit.assert();
    home.assert();
    assert_eq!(auth.username(), "alice@localhost");
    assert_eq!(auth.token(), Some("Bearer alicetoken"));
    assert_eq!(
        auth.session_cookies().and_then(|c| c.get("_mastodon_session")),
        Some("alice")
    );
}

#[tokio::test]
async fn test_sign_in_session_only() {
    let server = MockServer::start_async().await;
    mock_login_form(&server);
    server.mock(|when, then| {
        when.method(POST).path("/auth/sign_in");
        then.status(302)
            .header("set-cookie", "_mastodon_session=alice; path=/");
    });
    let home = server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200).body(WEB_HOME);
    });

    let auth = AuthenticationService::new()
        .sign_in_with(
            &context(&server),
            "alice@localhost",
            "secret",
            SignInOptions::session_only(),
        )
        .await
        .unwrap();

    home.assert_hits(0);
    assert!(auth.has_session());
    assert!(!auth.has_token());
}

#[tokio::test]
async fn test_sign_in_rejected_credentials() {
    let server = MockServer::start_async().await;
    mock_login_form(&server);
    server.mock(|when, then| {
        when.method(POST).path("/auth/sign_in");
        then.status(422).body("Invalid Email or password.");
    });

    let err = AuthenticationService::new()
        .sign_in(&context(&server), "alice@localhost", "wrong")
        .await
        .unwrap_err();

    match err {
        FetchError::AuthenticationFailed { status, body } => {
            assert_eq!(status, 422);
            assert!(body.contains("Invalid"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_sign_in_without_csrf_sends_nothing() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/auth/sign_in");
        then.status(200).body("<html><body>maintenance</body></html>");
    });
    let submit = server.mock(|when, then| {
        when.method(POST).path("/auth/sign_in");
        then.status(302);
    });

    let err = AuthenticationService::new()
        .sign_in(&context(&server), "alice@localhost", "secret")
        .await
        .unwrap_err();

    submit.assert_hits(0);
    assert!(matches!(
        err,
        FetchError::CredentialExtraction(ExtractionError::CsrfTokenNotFound)
    ));
}

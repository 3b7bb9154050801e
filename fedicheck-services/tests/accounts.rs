//! Account and timeline calls against a mock server over real HTTP.

use fedicheck_core::AuthContext;
use fedicheck_fetch::{FetchError, ServiceContext};
use fedicheck_services::{
    AccountService, CreateAccountFormBuilder, FieldsAttributes, TimelineQueryBuilder,
    TimelineService, UpdateCredentialsBuilder,
};
use httpmock::prelude::*;
use serde_json::json;

fn context(server: &MockServer) -> ServiceContext {
    ServiceContext::builder()
        .base_url(server.base_url())
        .build()
        .unwrap()
}

fn user() -> AuthContext {
    AuthContext::new("newbie@fedi.test", "pw").with_token("Bearer usertoken")
}

#[tokio::test]
async fn test_register_account_returns_new_context() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/accounts")
            .header("authorization", "Bearer admintoken")
            .header("content-type", "application/x-www-form-urlencoded");
        then.status(200).json_body(json!({
            "access_token": "newtoken",
            "token_type": "Bearer",
            "scope": "read write follow push",
            "created_at": 1_700_000_000
        }));
    });

    let form = CreateAccountFormBuilder::new()
        .with_username("newbie")
        .with_email("newbie@fedi.test")
        .with_password("correct-horse")
        .with_locale("en")
        .set_agreement(true)
        .build()
        .unwrap();
    let admin = AuthContext::new("admin@localhost", "pw").with_token("Bearer admintoken");

    let auth = AccountService::new()
        .register_account(&context(&server), &admin, &form)
        .await
        .unwrap();

    mock.assert();
    assert_eq!(auth.username(), "newbie@fedi.test");
    assert_eq!(auth.password(), "correct-horse");
    assert_eq!(auth.token(), Some("Bearer newtoken"));
    assert!(!auth.has_session());
}

#[tokio::test]
async fn test_register_account_unprocessable() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/api/v1/accounts");
        then.status(422)
            .json_body(json!({"error": "Validation failed: Username has already been taken"}));
    });

    let form = CreateAccountFormBuilder::new()
        .with_username("taken")
        .with_email("taken@fedi.test")
        .with_password("pw")
        .with_locale("en")
        .set_agreement(true)
        .build()
        .unwrap();
    let admin = AuthContext::new("admin@localhost", "pw").with_token("Bearer admintoken");

    let err = AccountService::new()
        .register_account(&context(&server), &admin, &form)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(422));
    assert!(matches!(err, FetchError::UnexpectedStatus { .. }));
}

#[tokio::test]
async fn test_lookup_account_is_anonymous() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/accounts/lookup")
            .query_param("acct", "newbie");
        then.status(200)
            .json_body(json!({"id": "42", "username": "newbie", "acct": "newbie"}));
    });

    let account = AccountService::new()
        .lookup_account(&context(&server), "newbie")
        .await
        .unwrap();

    mock.assert();
    assert_eq!(account.id, "42");
    assert_eq!(account.username, "newbie");
}

#[tokio::test]
async fn test_update_credentials_with_fields() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(PATCH)
            .path("/api/v1/accounts/update_credentials")
            .header("authorization", "Bearer usertoken")
            .body("display_name=Newbie&fields_attributes%5B0%5D%5Bname%5D=pronouns&fields_attributes%5B0%5D%5Bvalue%5D=they");
        then.status(200).json_body(json!({
            "id": "42",
            "username": "newbie",
            "acct": "newbie",
            "display_name": "Newbie"
        }));
    });

    let form = UpdateCredentialsBuilder::new()
        .with_display_name("Newbie")
        .with_fields_attributes(FieldsAttributes::new().with_field("pronouns", "they"))
        .build();

    let account = AccountService::new()
        .update_credentials(&context(&server), &user(), &form)
        .await
        .unwrap();

    mock.assert();
    assert_eq!(account.display_name.as_deref(), Some("Newbie"));
}

#[tokio::test]
async fn test_public_and_home_timelines() {
    let server = MockServer::start_async().await;
    let public = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/timelines/public")
            .query_param("limit", "2")
            .query_param("local", "true");
        then.status(200).json_body(json!([
            {"id": "2", "content": "<p>two</p>", "account": {"id": "9", "username": "bob", "acct": "bob"}},
            {"id": "1", "content": "<p>one</p>", "account": {"id": "9", "username": "bob", "acct": "bob"}}
        ]));
    });
    let home = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/timelines/home")
            .header("authorization", "Bearer usertoken");
        then.status(200).json_body(json!([]));
    });

    let ctx = context(&server);
    let timelines = TimelineService::new();
    let query = TimelineQueryBuilder::new().with_limit("2").set_local().build();

    let statuses = timelines.public_timeline(&ctx, Some(&query)).await.unwrap();
    let own = timelines.home_timeline(&ctx, &user(), None).await.unwrap();

    public.assert();
    home.assert();
    assert_eq!(statuses.len(), 2);
    assert_eq!(statuses[0].id, "2");
    assert!(own.is_empty());
}

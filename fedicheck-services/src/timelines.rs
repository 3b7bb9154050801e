//! Timeline endpoints under `/api/v1/timelines`.

use fedicheck_core::{AuthContext, Status};
use fedicheck_fetch::{
    AuthedRequestBuilder, FetchError, HttpError, HttpRequest, Method, QueryParams,
    RequestBuilder, ServiceContext,
};
use tracing::instrument;
use url::Url;

use crate::pipeline::fetch_json;

/// Base path of the timeline endpoints.
pub const TIMELINES_PATH: &str = "/api/v1/timelines";

/// `Accept` value for API calls.
pub const ACCEPT_JSON: &str = "application/json";

/// Public, hashtag and home timelines.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimelineService;

impl TimelineService {
    /// Creates the service.
    pub fn new() -> Self {
        Self
    }

    /// Fetches the public timeline.
    #[instrument(skip(self, ctx, query))]
    pub async fn public_timeline(
        &self,
        ctx: &ServiceContext,
        query: Option<&QueryParams>,
    ) -> Result<Vec<Status>, FetchError> {
        let request = Self::anonymous(ctx.url(&format!("{TIMELINES_PATH}/public")), query);
        fetch_json(ctx, &request).await
    }

    /// Fetches public statuses using a hashtag.
    ///
    /// A leading `#` is ignored. An empty tag is rejected before any
    /// request is made.
    #[instrument(skip(self, ctx, query))]
    pub async fn hashtag_timeline(
        &self,
        ctx: &ServiceContext,
        hashtag: &str,
        query: Option<&QueryParams>,
    ) -> Result<Vec<Status>, FetchError> {
        let tag = hashtag.trim().trim_start_matches('#');
        if tag.is_empty() {
            return Err(FetchError::MissingParameter("hashtag"));
        }

        let request = Self::anonymous(Self::tag_url(ctx, tag)?, query);
        fetch_json(ctx, &request).await
    }

    /// Fetches the caller's home timeline.
    #[instrument(skip(self, ctx, auth, query), fields(username = %auth.username()))]
    pub async fn home_timeline(
        &self,
        ctx: &ServiceContext,
        auth: &AuthContext,
        query: Option<&QueryParams>,
    ) -> Result<Vec<Status>, FetchError> {
        let request = AuthedRequestBuilder::new(
            ctx.url(&format!("{TIMELINES_PATH}/home")),
            Method::Get,
            auth,
        )
        .with_header("accept", ACCEPT_JSON)
        .with_optional_query(query)
        .build();
        fetch_json(ctx, &request).await
    }

    fn anonymous(url: String, query: Option<&QueryParams>) -> HttpRequest {
        let mut builder = RequestBuilder::new(url, Method::Get).with_header("accept", ACCEPT_JSON);
        if let Some(query) = query {
            builder = builder.with_query_params(query);
        }
        builder.build()
    }

    /// Percent-encodes the tag as a single path segment.
    fn tag_url(ctx: &ServiceContext, tag: &str) -> Result<String, FetchError> {
        let base = ctx.url(&format!("{TIMELINES_PATH}/tag"));
        let mut url = Url::parse(&base).map_err(|e| HttpError::InvalidUrl(format!("{base}: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| HttpError::InvalidUrl(base.clone()))?
            .push(tag);
        Ok(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use fedicheck_fetch::testing::ScriptedTransport;
    use fedicheck_fetch::HttpResponse;

    use super::*;
    use crate::builders::TimelineQueryBuilder;

    const STATUSES: &str = r#"[
        {"id": "1", "content": "<p>hello</p>", "visibility": "public",
         "account": {"id": "9", "username": "alice", "acct": "alice"},
         "tags": [{"name": "rust", "url": "http://localhost:3000/tags/rust"}]}
    ]"#;

    fn setup(responses: Vec<HttpResponse>) -> (Arc<ScriptedTransport>, ServiceContext) {
        let transport = Arc::new(ScriptedTransport::new(responses));
        let ctx = ServiceContext::new(transport.clone(), "http://localhost:3000");
        (transport, ctx)
    }

    #[tokio::test]
    async fn test_public_timeline() {
        let (transport, ctx) = setup(vec![HttpResponse::new(200, STATUSES)]);
        let query = TimelineQueryBuilder::new().with_limit("1").set_local().build();

        let statuses = TimelineService::new()
            .public_timeline(&ctx, Some(&query))
            .await
            .unwrap();

        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].account.username, "alice");

        let requests = transport.requests();
        assert_eq!(requests[0].url, "http://localhost:3000/api/v1/timelines/public");
        assert_eq!(requests[0].header("accept"), Some("application/json"));
        assert_eq!(requests[0].query.pairs(), vec![("limit", "1"), ("local", "true")]);
    }

    #[tokio::test]
    async fn test_unknown_visibility_is_core_error() {
        let (_transport, ctx) = setup(vec![HttpResponse::new(
            200,
            r#"[{"id": "1", "content": "", "visibility": "bogus",
                 "account": {"id": "9", "username": "alice", "acct": "alice"}}]"#,
        )]);

        let result = TimelineService::new().public_timeline(&ctx, None).await;

        match result {
            Err(FetchError::Core(fedicheck_core::CoreError::InvalidEnumValue { kind, value })) => {
                assert_eq!(kind, "visibility");
                assert_eq!(value, "bogus");
            }
            other => panic!("expected a core error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_hashtag_timeline() {
        let (transport, ctx) = setup(vec![HttpResponse::new(200, STATUSES)]);

        let statuses = TimelineService::new()
            .hashtag_timeline(&ctx, "#rust", None)
            .await
            .unwrap();

        assert!(statuses[0].has_tag("rust"));
        let requests = transport.requests();
        assert_eq!(requests[0].url, "http://localhost:3000/api/v1/timelines/tag/rust");
    }

    #[tokio::test]
    async fn test_hashtag_is_path_encoded() {
        let (transport, ctx) = setup(vec![HttpResponse::new(200, "[]")]);

        TimelineService::new()
            .hashtag_timeline(&ctx, "a/b c", None)
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(
            requests[0].url,
            "http://localhost:3000/api/v1/timelines/tag/a%2Fb%20c"
        );
    }

    #[tokio::test]
    async fn test_empty_hashtag_rejected() {
        let (transport, ctx) = setup(Vec::new());

        let result = TimelineService::new().hashtag_timeline(&ctx, " # ", None).await;

        assert!(matches!(result, Err(FetchError::MissingParameter("hashtag"))));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_home_timeline_sends_token() {
        let (transport, ctx) = setup(vec![HttpResponse::new(200, "[]")]);
        let auth = AuthContext::new("alice@localhost", "pw").with_token("Bearer alice");

        let statuses = TimelineService::new()
            .home_timeline(&ctx, &auth, None)
            .await
            .unwrap();

        assert!(statuses.is_empty());
        let requests = transport.requests();
        assert_eq!(requests[0].url, "http://localhost:3000/api/v1/timelines/home");
        assert_eq!(requests[0].header("authorization"), Some("Bearer alice"));
    }

    #[tokio::test]
    async fn test_unauthorized_home_timeline() {
        let (_transport, ctx) = setup(vec![HttpResponse::new(
            401,
            r#"{"error": "The access token is invalid"}"#,
        )]);
        let auth = AuthContext::new("alice@localhost", "pw");

        let err = TimelineService::new()
            .home_timeline(&ctx, &auth, None)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(401));
    }
}

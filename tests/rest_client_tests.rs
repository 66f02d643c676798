//! Integration tests for the REST client.
//!
//! These tests drive `RestClient` through a scripted in-memory transport
//! and verify request resolution, outcome normalization, redirects on
//! authorization failure, and post-call hook behavior.

use async_trait::async_trait;
use rest_service::clients::{
    CallParams, FormData, HeaderParams, HttpMethod, HttpResponse, InterceptorConfig,
    RequestBody, ResponseBody, ResponseInterceptor, RestClient, Transport, TransportFailure,
    TransportRequest,
};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Transport that replays scripted outcomes and records every request.
#[derive(Default)]
struct ScriptedTransport {
    outcomes: Mutex<VecDeque<Result<HttpResponse, TransportFailure>>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl ScriptedTransport {
    fn new(outcomes: Vec<Result<HttpResponse, TransportFailure>>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: TransportRequest) -> Result<HttpResponse, TransportFailure> {
        self.requests.lock().unwrap().push(request);
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportFailure::network(None, "no scripted outcome")))
    }
}

/// Records every navigation.
#[derive(Default)]
struct Navigations(Mutex<Vec<Vec<String>>>);

impl Navigations {
    fn all(&self) -> Vec<Vec<String>> {
        self.0.lock().unwrap().clone()
    }
}

struct Harness {
    client: RestClient,
    transport: Arc<ScriptedTransport>,
    navigations: Arc<Navigations>,
    hook_calls: Arc<AtomicUsize>,
}

fn harness(
    config: InterceptorConfig,
    outcomes: Vec<Result<HttpResponse, TransportFailure>>,
) -> Harness {
    let transport = ScriptedTransport::new(outcomes);
    let navigations = Arc::new(Navigations::default());
    let hook_calls = Arc::new(AtomicUsize::new(0));

    let nav = Arc::clone(&navigations);
    let hook = Arc::clone(&hook_calls);
    let interceptor = ResponseInterceptor::new(
        config,
        Arc::new(move |segments: &[String]| nav.0.lock().unwrap().push(segments.to_vec())),
    )
    .with_post_hook(Arc::new(move || {
        hook.fetch_add(1, Ordering::SeqCst);
    }));

    Harness {
        client: RestClient::new(transport.clone(), interceptor),
        transport,
        navigations,
        hook_calls,
    }
}

fn ok(body: serde_json::Value) -> Result<HttpResponse, TransportFailure> {
    Ok(HttpResponse::new(200, "OK", ResponseBody::Json(body)))
}

// ============================================================================
// Request Resolution
// ============================================================================

#[tokio::test]
async fn test_get_substitutes_url_params_and_passes_query() {
    let h = harness(InterceptorConfig::default(), vec![ok(json!({"status": 200}))]);

    let response = h
        .client
        .get(
            CallParams::new("/test/with/{id}")
                .url_param("id", 1)
                .query_param("test", "test 01"),
        )
        .await
        .unwrap();

    assert_eq!(response.body, ResponseBody::Json(json!({"status": 200})));

    let request = &h.transport.requests()[0];
    assert_eq!(request.method, HttpMethod::Get);
    assert_eq!(request.url, "/test/with/1");
    assert_eq!(
        request.options.query_pairs(),
        vec![("test".to_string(), "test 01".to_string())]
    );
}

#[tokio::test]
async fn test_default_headers_for_json_calls() {
    let h = harness(InterceptorConfig::default(), vec![ok(json!({}))]);

    h.client
        .post(CallParams::new("/api/test").json_body(json!({"name": "x"})))
        .await
        .unwrap();

    let request = &h.transport.requests()[0];
    assert_eq!(request.options.header("Content-Type"), Some("application/json"));
    assert_eq!(request.options.header("Accept"), Some("application/json"));
    assert_eq!(request.options.header("Access-Control-Allow-Origin"), Some("*"));
    assert!(request.options.with_credentials);
    assert_eq!(request.body, Some(RequestBody::Json(json!({"name": "x"}))));
}

#[tokio::test]
async fn test_custom_accept_header() {
    let h = harness(InterceptorConfig::default(), vec![ok(json!({}))]);

    h.client
        .get(CallParams::new("/export").header(HeaderParams::new().accept("text/csv")))
        .await
        .unwrap();

    assert_eq!(
        h.transport.requests()[0].options.header("Accept"),
        Some("text/csv")
    );
}

#[tokio::test]
async fn test_body_kind_is_inspected_per_call() {
    let h = harness(
        InterceptorConfig::default(),
        vec![ok(json!({})), ok(json!({})), ok(json!({}))],
    );

    let form = FormData::new().file("doc", vec![1, 2, 3], "a.bin", "application/octet-stream");

    h.client
        .put(CallParams::new("/upload").form_body(form.clone()))
        .await
        .unwrap();
    h.client
        .put(CallParams::new("/upload").json_body(json!({"a": 1})))
        .await
        .unwrap();
    h.client
        .patch(CallParams::new("/upload").form_body(form))
        .await
        .unwrap();

    let requests = h.transport.requests();
    assert_eq!(requests[0].options.header("Content-Type"), None);
    assert_eq!(
        requests[1].options.header("Content-Type"),
        Some("application/json")
    );
    assert_eq!(requests[2].options.header("Content-Type"), None);
}

#[tokio::test]
async fn test_delete_sends_no_body() {
    let h = harness(InterceptorConfig::default(), vec![ok(json!({}))]);

    h.client
        .delete(
            CallParams::new("/items/{id}")
                .url_param("id", "abc")
                .json_body(json!({"ignored": true})),
        )
        .await
        .unwrap();

    let request = &h.transport.requests()[0];
    assert_eq!(request.method, HttpMethod::Delete);
    assert_eq!(request.url, "/items/abc");
    assert!(request.body.is_none());
}

// ============================================================================
// Outcome Normalization
// ============================================================================

#[tokio::test]
async fn test_204_passes_through() {
    let h = harness(
        InterceptorConfig::default(),
        vec![Ok(HttpResponse::new(204, "No Content", ResponseBody::default()))],
    );

    let response = h.client.delete(CallParams::new("/items/1")).await.unwrap();
    assert_eq!(response.status, 204);
}

#[tokio::test]
async fn test_network_failure_becomes_unknown_error() {
    let h = harness(
        InterceptorConfig::default(),
        vec![Err(TransportFailure::network(None, "refused"))],
    );

    let error = h.client.get(CallParams::new("/items")).await.unwrap_err();

    assert_eq!(error.status, 0);
    assert_eq!(error.message, "Unknown Error");
    assert_eq!(error.body, json!({}));
    assert!(h.navigations.all().is_empty());
}

#[tokio::test]
async fn test_unauthorized_uses_payload_or_fallback() {
    let h = harness(
        InterceptorConfig::default(),
        vec![
            Err(TransportFailure::from_status(
                401,
                None,
                Some(json!("session expired")),
                "unauthorized",
            )),
            Err(TransportFailure::from_status(401, None, None, "unauthorized")),
        ],
    );

    let first = h.client.get(CallParams::new("/me")).await.unwrap_err();
    assert_eq!(first.status, 401);
    assert_eq!(first.message, "session expired");

    let second = h.client.get(CallParams::new("/me")).await.unwrap_err();
    assert_eq!(second.message, "Forbidden Error");
    assert_eq!(second.body, json!({}));
}

#[tokio::test]
async fn test_other_failures_keep_payload_as_body() {
    let h = harness(
        InterceptorConfig::default(),
        vec![Err(TransportFailure::from_status(
            404,
            Some("http://localhost/items/9".to_string()),
            Some(json!({"error": "not found"})),
            "Http failure response",
        ))],
    );

    let error = h.client.get(CallParams::new("/items/9")).await.unwrap_err();

    assert_eq!(error.status, 404);
    assert_eq!(error.message, "");
    assert_eq!(error.body, json!({"error": "not found"}));
    assert!(h.navigations.all().is_empty());
}

#[tokio::test]
async fn test_in_band_error_status_becomes_application_error() {
    let h = harness(
        InterceptorConfig::default(),
        vec![Ok(HttpResponse::new(
            202,
            "Accepted",
            ResponseBody::Json(json!({"queued": true})),
        ))],
    );

    let error = h.client.post(CallParams::new("/jobs")).await.unwrap_err();

    assert_eq!(error.status, 202);
    assert_eq!(error.message, "Accepted");
    assert_eq!(error.body, json!({"queued": true}));
}

// ============================================================================
// Authorization Redirect
// ============================================================================

#[tokio::test]
async fn test_forbidden_navigates_to_redirect_target() {
    let h = harness(
        InterceptorConfig::default(),
        vec![Err(TransportFailure::from_status(403, None, None, "forbidden"))],
    );

    let error = h.client.get(CallParams::new("/admin")).await.unwrap_err();

    assert_eq!(error.status, 403);
    assert_eq!(h.navigations.all(), vec![vec!["403".to_string()]]);
}

#[tokio::test]
async fn test_identity_check_failure_navigates() {
    let h = harness(
        InterceptorConfig::default(),
        vec![Err(TransportFailure::from_status(
            500,
            Some("http://localhost/api/who-am-i".to_string()),
            None,
            "boom",
        ))],
    );

    h.client
        .get(CallParams::new("/api/who-am-i"))
        .await
        .unwrap_err();

    assert_eq!(h.navigations.all().len(), 1);
}

#[tokio::test]
async fn test_custom_redirect_target() {
    let config = InterceptorConfig {
        redirect_target: vec!["auth".to_string(), "denied".to_string()],
        ..InterceptorConfig::default()
    };
    let h = harness(
        config,
        vec![Err(TransportFailure::from_status(403, None, None, "forbidden"))],
    );

    h.client.get(CallParams::new("/x")).await.unwrap_err();

    assert_eq!(
        h.navigations.all(),
        vec![vec!["auth".to_string(), "denied".to_string()]]
    );
}

#[tokio::test]
async fn test_redirect_disabled_only_propagates() {
    let config = InterceptorConfig {
        redirect_on_auth_failure: false,
        ..InterceptorConfig::default()
    };
    let h = harness(
        config,
        vec![Err(TransportFailure::from_status(403, None, None, "forbidden"))],
    );

    let error = h.client.get(CallParams::new("/x")).await.unwrap_err();

    assert_eq!(error.status, 403);
    assert!(h.navigations.all().is_empty());
}

// ============================================================================
// Post-Call Hook
// ============================================================================

#[tokio::test]
async fn test_post_hook_runs_once_per_call() {
    let h = harness(
        InterceptorConfig::default(),
        vec![
            ok(json!({})),
            Err(TransportFailure::network(None, "refused")),
            Err(TransportFailure::from_status(403, None, None, "forbidden")),
        ],
    );

    h.client.get(CallParams::new("/a")).await.unwrap();
    h.client.get(CallParams::new("/b")).await.unwrap_err();
    h.client.get(CallParams::new("/c")).await.unwrap_err();

    assert_eq!(h.hook_calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_concurrent_calls_share_one_client() {
    let h = harness(
        InterceptorConfig::default(),
        vec![ok(json!({"n": 1})), ok(json!({"n": 2}))],
    );

    let (first, second) = tokio::join!(
        h.client.get(CallParams::new("/one")),
        h.client.get(CallParams::new("/two"))
    );

    assert!(first.is_ok());
    assert!(second.is_ok());
    assert_eq!(h.transport.requests().len(), 2);
    assert_eq!(h.hook_calls.load(Ordering::SeqCst), 2);
}

// ============================================================================
// Files, Authentication and Logout
// ============================================================================

#[tokio::test]
async fn test_file_returns_data_url_with_declared_type() {
    let h = harness(
        InterceptorConfig::default(),
        vec![Ok(HttpResponse::new(
            200,
            "OK",
            ResponseBody::Bytes(b"%PDF".to_vec()),
        ))],
    );

    let safe = h
        .client
        .file(
            CallParams::new("/reports/{id}")
                .url_param("id", 3)
                .header(HeaderParams::new().content_type("application/pdf")),
        )
        .await
        .unwrap();

    assert_eq!(safe.as_ref(), "data:application/pdf;base64,JVBERg==");
    assert_eq!(h.transport.requests()[0].url, "/reports/3");
}

#[tokio::test]
async fn test_file_failure_is_normalized() {
    let h = harness(
        InterceptorConfig::default(),
        vec![Err(TransportFailure::from_status(403, None, None, "forbidden"))],
    );

    let error = h.client.file(CallParams::new("/reports/1")).await.unwrap_err();

    assert_eq!(error.status, 403);
    assert_eq!(h.navigations.all().len(), 1);
    assert_eq!(h.hook_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_authenticate_sends_basic_credentials() {
    let h = harness(InterceptorConfig::default(), vec![ok(json!({"user": "ana"}))]);

    let response = h
        .client
        .authenticate("/api/login", "ana", "secret")
        .await
        .unwrap();

    assert_eq!(response.body, ResponseBody::Json(json!({"user": "ana"})));

    let request = &h.transport.requests()[0];
    assert_eq!(request.method, HttpMethod::Get);
    assert_eq!(request.url, "/api/login");
    assert_eq!(
        request.options.header("Authorization"),
        Some("Basic YW5hOnNlY3JldA==")
    );
    assert_eq!(request.options.headers.len(), 1);
}

#[tokio::test]
async fn test_logout_sends_delete() {
    let h = harness(
        InterceptorConfig::default(),
        vec![Ok(HttpResponse::new(204, "No Content", ResponseBody::default()))],
    );

    h.client.logout("/api/logout").await.unwrap();

    let request = &h.transport.requests()[0];
    assert_eq!(request.method, HttpMethod::Delete);
    assert_eq!(request.options.header("Content-Type"), Some("application/json"));
}

//! Shared helpers for middleware integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::routing::get;
use axum::Router;
use secure_response::{SecureResponseConfig, SecureResponseLayers};
use tower::ServiceExt;

/// Router behind the secure-response layers whose handlers count calls.
pub struct TestApp {
    router: Router,
    calls: Arc<AtomicUsize>,
}

impl TestApp {
    pub fn new(config: &SecureResponseConfig) -> Self {
        let calls = Arc::new(AtomicUsize::new(0));

        let hits = calls.clone();
        let hello = move || {
            let hits = hits.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                "hello"
            }
        };

        let hits = calls.clone();
        let preset = move || {
            let hits = hits.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                (
                    [
                        (header::CONTENT_SECURITY_POLICY, "default-src 'none'"),
                        (header::STRICT_TRANSPORT_SECURITY, "max-age=60"),
                    ],
                    "preset",
                )
            }
        };

        let router = Router::new()
            .route("/", get(hello.clone()))
            .route("/preset", get(preset))
            .route("/{*path}", get(hello));

        let router = SecureResponseLayers::from_config(config)
            .expect("valid config")
            .apply(router);

        Self { router, calls }
    }

    /// Number of handler invocations so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

/// GET `uri` with `Host: example.org` plus extra headers.
pub fn get_request(uri: &str, headers: &[(&str, &str)]) -> Request<Body> {
    let mut builder = Request::builder().uri(uri).header(header::HOST, "example.org");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(Body::empty()).unwrap()
}

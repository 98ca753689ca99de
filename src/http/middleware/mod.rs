//! Response-hardening middleware.
//!
//! Each middleware is a [`ResponseHardening`] policy holding its resolved
//! configuration. [`HardeningLayer`] turns any policy into a tower layer:
//!
//! ```text
//! request → policy.inspect()
//!     Pass        → inner service → response
//!     Decorate    → inner service → policy.decorate(response)
//!     Respond(r)  → r (inner service not called)
//! ```
//!
//! The service readied by `poll_ready` is swapped out for a fresh clone on
//! every call, so a short-circuited request drops whatever capacity the
//! inner service reserved for it.

pub mod csp_coverage;
pub mod hsts_support;
pub mod ssl_redirect;

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::http::Request;
use axum::response::Response;
use futures_util::future::BoxFuture;
use tower::{Layer, Service};

pub use csp_coverage::CspCoverage;
pub use hsts_support::HstsSupport;
pub use ssl_redirect::SslRedirect;

/// What a policy wants done with a request.
#[derive(Debug)]
pub enum Verdict {
    /// Call the inner service and return its response untouched.
    Pass,
    /// Call the inner service, then decorate its response.
    Decorate,
    /// Answer directly without calling the inner service.
    Respond(Response),
}

/// A per-request hardening policy.
pub trait ResponseHardening: Send + Sync + 'static {
    /// Decide how to handle `req`.
    fn inspect<B>(&self, req: &Request<B>) -> Verdict;

    /// Mutate the response after a [`Verdict::Decorate`].
    fn decorate(&self, _response: &mut Response) {}
}

/// Tower layer applying a [`ResponseHardening`] policy.
pub struct HardeningLayer<P> {
    policy: Arc<P>,
}

impl<P> HardeningLayer<P> {
    pub fn new(policy: P) -> Self {
        Self {
            policy: Arc::new(policy),
        }
    }
}

impl<P> Clone for HardeningLayer<P> {
    fn clone(&self) -> Self {
        Self {
            policy: self.policy.clone(),
        }
    }
}

impl<S, P> Layer<S> for HardeningLayer<P> {
    type Service = HardeningService<S, P>;

    fn layer(&self, inner: S) -> Self::Service {
        HardeningService {
            inner,
            policy: self.policy.clone(),
        }
    }
}

/// Service produced by [`HardeningLayer`].
pub struct HardeningService<S, P> {
    inner: S,
    policy: Arc<P>,
}

impl<S: Clone, P> Clone for HardeningService<S, P> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            policy: self.policy.clone(),
        }
    }
}

impl<S, P, B> Service<Request<B>> for HardeningService<S, P>
where
    S: Service<Request<B>, Response = Response> + Clone,
    S::Future: Send + 'static,
    S::Error: 'static,
    P: ResponseHardening,
{
    type Response = Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Response, S::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<B>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        match self.policy.inspect(&req) {
            Verdict::Pass => Box::pin(inner.call(req)),
            Verdict::Respond(response) => {
                drop(inner);
                Box::pin(async move { Ok::<_, S::Error>(response) })
            }
            Verdict::Decorate => {
                let future = inner.call(req);
                let policy = self.policy.clone();
                Box::pin(async move {
                    let mut response = future.await?;
                    policy.decorate(&mut response);
                    Ok(response)
                })
            }
        }
    }
}

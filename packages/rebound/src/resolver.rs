//! The redirect-following state machine.
//!
//! [`FollowRedirects`] wraps a [`Transport`] and re-issues requests
//! until a terminal response arrives or the hop limit is spent. The
//! chain is linear: one in-flight response at a time, disposed before
//! the next hop goes out, and no state survives a call.

use std::future::Future;
use std::sync::Arc;

use http::header::{CONTENT_LENGTH, REFERER};
use http::{HeaderValue, Method};
use url::Url;

use crate::error::{Error, Result};
use crate::headers::{make_referer, strip_sensitive_headers};
use crate::policy::{RedirectClass, RedirectDecision};
use crate::transport::{Request, Response, Transport};

/// Hop limit applied when none is configured.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

type Confirm<Req, Resp> = dyn Fn(&Req, &Resp) -> bool + Send + Sync;
type Observer = dyn Fn(&Url) + Send + Sync;

/// Middleware that follows HTTP redirects on behalf of a wrapped
/// transport.
///
/// 301/302/303 responses are re-issued as `GET` (`HEAD` when the
/// first request was `HEAD`) with the body dropped; 307/308 keep the
/// method and, for anything other than `GET`/`HEAD`, are only
/// followed when the [`confirm`](FollowRedirects::confirm) callback
/// agrees. Hops that leave the origin of the first request lose their
/// `Cookie` and `Authorization` headers.
///
/// The wrapper is itself a [`Transport`] over the same types, so it
/// composes with further layers, and it keeps no per-call state:
/// concurrent calls through one instance do not interfere.
pub struct FollowRedirects<S: Transport> {
    inner: S,
    max_redirects: usize,
    confirm: Option<Arc<Confirm<S::Request, S::Response>>>,
    observer: Option<Arc<Observer>>,
    referer: bool,
}

impl<S: Transport> FollowRedirects<S> {
    /// Wrap `inner` with the default hop limit, no confirmation
    /// callback, no observer and no `Referer` emission.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            confirm: None,
            observer: None,
            referer: false,
        }
    }

    /// Cap the number of transport invocations per chain.
    #[must_use]
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }

    /// Gate 307/308 redirects of non-`GET`/`HEAD` requests. Without a
    /// callback such responses are handed back to the caller
    /// unfollowed.
    #[must_use]
    pub fn confirm<F>(mut self, confirm: F) -> Self
    where
        F: Fn(&S::Request, &S::Response) -> bool + Send + Sync + 'static,
    {
        self.confirm = Some(Arc::new(confirm));
        self
    }

    /// Observe the resolved target of each hop. Purely informational
    /// and invoked inline, so keep it cheap.
    #[must_use]
    pub fn on_redirect<F>(mut self, observer: F) -> Self
    where
        F: Fn(&Url) + Send + Sync + 'static,
    {
        self.observer = Some(Arc::new(observer));
        self
    }

    /// Send a sanitized `Referer` header on follow-up requests.
    #[must_use]
    pub fn referer(mut self, enabled: bool) -> Self {
        self.referer = enabled;
        self
    }

    /// Build the next request in the chain from the first request,
    /// with the target and method applied and credentials stripped
    /// when the target leaves the first request's origin.
    fn next_request(
        &self,
        original: &S::Request,
        previous: &Url,
        target: &Url,
        method: Method,
    ) -> S::Request {
        let mut next = original.clone();
        next.set_method(method);
        next.set_url(target.clone());
        strip_sensitive_headers(&mut next, original.url());
        if self.referer {
            if let Some(value) = make_referer(target, previous) {
                next.insert_header(REFERER, value);
            }
        }
        next
    }
}

impl<S: Transport> Transport for FollowRedirects<S> {
    type Request = S::Request;
    type Response = S::Response;
    type Fallback = S::Fallback;

    fn call(
        &self,
        request: Self::Request,
        done: &Self::Fallback,
    ) -> impl Future<Output = Result<Self::Response, Self::Request>> + Send {
        async move {
            let original = request;
            let mut current = original.clone();
            let mut attempt = 0;

            while attempt < self.max_redirects {
                attempt += 1;
                let mut response = self.inner.call(current.clone(), done).await?;

                let Some(decision) = RedirectDecision::classify(&current, &response)? else {
                    return Ok(response);
                };

                // The intermediate body is never inspected; release it
                // before the next hop goes out.
                response.dispose().await;

                if let Some(observer) = &self.observer {
                    observer(&decision.target);
                }

                match decision.class {
                    RedirectClass::FollowWithGet => {
                        let method = if original.method() == Method::HEAD {
                            Method::HEAD
                        } else {
                            Method::GET
                        };
                        tracing::debug!(
                            status = response.status().as_u16(),
                            method = %method,
                            target = %decision.target,
                            "following redirect"
                        );
                        let mut next =
                            self.next_request(&original, current.url(), &decision.target, method);
                        next.clear_body();
                        next.insert_header(CONTENT_LENGTH, HeaderValue::from_static("0"));
                        current = next;
                    }
                    RedirectClass::FollowWithConfirmation => {
                        let method = current.method().clone();
                        let follow = method == Method::GET
                            || method == Method::HEAD
                            || self
                                .confirm
                                .as_ref()
                                .is_some_and(|confirm| confirm(&current, &response));
                        if !follow {
                            tracing::trace!(
                                status = response.status().as_u16(),
                                "redirect not confirmed, returning response"
                            );
                            return Ok(response);
                        }
                        tracing::debug!(
                            status = response.status().as_u16(),
                            method = %method,
                            target = %decision.target,
                            "following redirect, method preserved"
                        );
                        current =
                            self.next_request(&original, current.url(), &decision.target, method);
                    }
                    // classify() turns these into the terminal return
                    // above; keep the response path for exhaustiveness.
                    RedirectClass::NotARedirect => return Ok(response),
                }
            }

            Err(Error::MaxRedirectsExceeded {
                request: current,
                max: self.max_redirects,
            })
        }
    }
}

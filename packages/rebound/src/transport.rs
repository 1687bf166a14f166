//! Trait seams between the resolver and its collaborators.
//!
//! The resolver performs no I/O and owns no request or response
//! representation of its own; it drives these capability sets and
//! nothing else.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use http::{HeaderName, HeaderValue, Method, StatusCode};
use url::Url;

use crate::error::Result;

/// Capability set the resolver needs from a request.
///
/// Cloning must be deep enough that mutating the clone never affects
/// the original; the resolver relies on that to leave the caller's
/// request untouched while it builds follow-up requests.
pub trait Request: Clone + fmt::Debug + Send + Sync {
    fn method(&self) -> &Method;
    fn set_method(&mut self, method: Method);

    fn url(&self) -> &Url;
    fn set_url(&mut self, url: Url);

    /// Case-insensitive header lookup.
    fn header(&self, name: &HeaderName) -> Option<&HeaderValue>;
    fn insert_header(&mut self, name: HeaderName, value: HeaderValue);
    fn remove_header(&mut self, name: &HeaderName);

    /// Drop any request body so the request goes out empty.
    fn clear_body(&mut self);
}

/// Capability set the resolver needs from a response.
pub trait Response: Send {
    fn status(&self) -> StatusCode;

    /// Case-insensitive header lookup.
    fn header(&self, name: &HeaderName) -> Option<&HeaderValue>;

    fn has_header(&self, name: &HeaderName) -> bool {
        self.header(name).is_some()
    }

    /// Release held resources (socket, stream buffers).
    ///
    /// Invoked at most once per response, and always awaited before
    /// the next request in a chain is issued. Status and headers must
    /// stay readable afterwards.
    fn dispose(&mut self) -> impl Future<Output = ()> + Send;
}

/// A transport layer: takes a request plus an opaque terminal
/// continuation and produces a response.
///
/// [`FollowRedirects`](crate::FollowRedirects) implements this trait
/// with the same associated types as the transport it wraps, so layers
/// stack transparently; `done` is threaded through to the innermost
/// call untouched.
pub trait Transport: Send + Sync {
    type Request: Request;
    type Response: Response;

    /// Terminal fallback handed through to the innermost layer. The
    /// resolver never invokes or inspects it.
    type Fallback: Sync;

    fn call(
        &self,
        request: Self::Request,
        done: &Self::Fallback,
    ) -> impl Future<Output = Result<Self::Response, Self::Request>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    type Request = T::Request;
    type Response = T::Response;
    type Fallback = T::Fallback;

    fn call(
        &self,
        request: Self::Request,
        done: &Self::Fallback,
    ) -> impl Future<Output = Result<Self::Response, Self::Request>> + Send {
        (**self).call(request, done)
    }
}

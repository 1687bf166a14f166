//! Redirect Following
//!
//! Middleware that adds transparent redirect handling to any HTTP
//! transport. [`FollowRedirects`] wraps a [`Transport`] and is itself a
//! `Transport` with the same request, response and fallback types, so
//! it slots into a middleware chain without the neighbouring layers
//! noticing.
//!
//! Per chain it classifies each response status, rewrites the method
//! the way the HTTP spec demands (301/302/303 become `GET`, 307/308
//! keep the method), resolves `Location` against the URL that produced
//! it, strips `Cookie` and `Authorization` when a hop leaves the
//! origin of the first request, and gives up with
//! [`Error::MaxRedirectsExceeded`] once the configured hop limit is
//! spent. The default limit is [`DEFAULT_MAX_REDIRECTS`].

mod error;
mod headers;
mod policy;
mod resolver;
mod transport;

pub use error::{Error, Result};
pub use policy::{RedirectClass, RedirectDecision};
pub use resolver::{DEFAULT_MAX_REDIRECTS, FollowRedirects};
pub use transport::{Request, Response, Transport};

//! Status classification for redirect handling.
//!
//! Maps response statuses onto the closed set of behaviors a chain can
//! take, and resolves the `Location` target for a single hop.

use http::StatusCode;
use http::header::LOCATION;
use url::Url;

use crate::error::Error;
use crate::transport::{Request, Response};

/// What a response status asks the chain to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectClass {
    /// The response is terminal; hand it back to the caller.
    NotARedirect,
    /// 301/302/303: follow by reissuing as `GET` (`HEAD` stays
    /// `HEAD`) with the body dropped.
    FollowWithGet,
    /// 307/308: follow automatically for `GET`/`HEAD`, otherwise only
    /// when the caller's confirmation callback agrees; the method is
    /// preserved.
    FollowWithConfirmation,
}

impl RedirectClass {
    /// Classify a status code.
    ///
    /// Exact match only; every code outside the table, including the
    /// rest of 3xx, is [`RedirectClass::NotARedirect`].
    #[must_use]
    pub fn of(status: StatusCode) -> Self {
        match status {
            StatusCode::MOVED_PERMANENTLY | StatusCode::FOUND | StatusCode::SEE_OTHER => {
                RedirectClass::FollowWithGet
            }
            StatusCode::TEMPORARY_REDIRECT | StatusCode::PERMANENT_REDIRECT => {
                RedirectClass::FollowWithConfirmation
            }
            _ => RedirectClass::NotARedirect,
        }
    }

    #[must_use]
    pub fn is_redirect(self) -> bool {
        !matches!(self, RedirectClass::NotARedirect)
    }
}

/// A single hop's resolved target plus the class that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectDecision {
    pub class: RedirectClass,
    pub target: Url,
}

impl RedirectDecision {
    /// Work out whether `response` redirects the chain somewhere.
    ///
    /// Returns `None` when the response is terminal: a non-redirect
    /// status, or a redirect status with a missing or empty
    /// `Location`. A `Location` that cannot be resolved against the
    /// current request's URL fails the chain; no fallback is guessed.
    pub(crate) fn classify<R: Request>(
        current: &R,
        response: &impl Response,
    ) -> Result<Option<Self>, Error<R>> {
        let class = RedirectClass::of(response.status());
        if !class.is_redirect() {
            return Ok(None);
        }

        let Some(value) = response.header(&LOCATION) else {
            return Ok(None);
        };
        let location = value.to_str().map_err(|_| Error::InvalidLocation {
            location: String::from_utf8_lossy(value.as_bytes()).into_owned(),
            base: current.url().clone(),
        })?;
        if location.is_empty() {
            return Ok(None);
        }

        // Relative references resolve against the request that
        // produced them, not the first request in the chain.
        let target = current
            .url()
            .join(location)
            .map_err(|_| Error::InvalidLocation {
                location: location.to_owned(),
                base: current.url().clone(),
            })?;

        Ok(Some(RedirectDecision { class, target }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class_of(code: u16) -> RedirectClass {
        RedirectClass::of(StatusCode::from_u16(code).expect("test status should be valid"))
    }

    #[test]
    fn get_statuses_follow_with_get() {
        for code in [301, 302, 303] {
            assert_eq!(class_of(code), RedirectClass::FollowWithGet, "status {code}");
        }
    }

    #[test]
    fn preserving_statuses_need_confirmation() {
        for code in [307, 308] {
            assert_eq!(
                class_of(code),
                RedirectClass::FollowWithConfirmation,
                "status {code}"
            );
        }
    }

    #[test]
    fn everything_else_is_terminal() {
        for code in [200, 201, 204, 300, 304, 305, 306, 399, 400, 404, 500, 503] {
            assert_eq!(class_of(code), RedirectClass::NotARedirect, "status {code}");
        }
    }

    #[test]
    fn is_redirect_covers_both_follow_classes() {
        assert!(RedirectClass::FollowWithGet.is_redirect());
        assert!(RedirectClass::FollowWithConfirmation.is_redirect());
        assert!(!RedirectClass::NotARedirect.is_redirect());
    }
}

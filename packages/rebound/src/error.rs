//! Error surface for redirect chains.

use url::Url;

/// A `Result` alias where the error is [`Error`] over the transport's
/// request type `R`.
pub type Result<T, R> = std::result::Result<T, Error<R>>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure modes of a redirect chain.
#[derive(Debug, thiserror::Error)]
pub enum Error<R> {
    /// The chain used every allowed hop without reaching a terminal
    /// response. Carries the request that was about to be issued next.
    #[error("maximum redirects exceeded: {max}")]
    MaxRedirectsExceeded { request: R, max: usize },

    /// A `Location` header that does not name a resolvable target
    /// relative to the URL it arrived on.
    #[error("invalid redirect location {location:?} from {base}")]
    InvalidLocation { location: String, base: Url },

    /// A failure raised by the wrapped transport, passed through
    /// unmodified.
    #[error("{0}")]
    Transport(#[source] BoxError),
}

impl<R> Error<R> {
    /// Wrap a transport failure.
    pub fn transport<E: Into<BoxError>>(error: E) -> Self {
        Error::Transport(error.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_redirects_display_names_the_limit() {
        let err: Error<()> = Error::MaxRedirectsExceeded { request: (), max: 5 };
        assert_eq!(err.to_string(), "maximum redirects exceeded: 5");
    }

    #[test]
    fn transport_display_defers_to_the_inner_error() {
        let err: Error<()> = Error::transport(std::io::Error::other("connection reset"));
        assert_eq!(err.to_string(), "connection reset");
    }
}

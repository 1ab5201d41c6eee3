//! HTTP transport seam

use std::fmt;

#[cfg(feature = "reqwest")]
use std::time::Duration;

use thiserror::Error;

/// A completed HTTP response
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Response {
    /// HTTP status code
    pub status: u16,

    /// HTTP reason phrase, if known
    pub reason: Option<String>,

    /// Response body
    pub body: String,
}

impl Response {
    /// A response with the given `status` and `body` and no reason phrase
    pub fn new<S>(status: u16, body: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            status,
            reason: None,
            body: body.into(),
        }
    }

    /// Attach a reason phrase
    pub fn with_reason<S>(mut self, reason: S) -> Self
    where
        S: Into<String>,
    {
        self.reason = Some(reason.into());
        self
    }
}

/// Issues HTTP GET requests
///
/// The client performs exactly one `get()` per operation and never
/// retries. Timeouts and cancellation are the transport's business.
///
/// ```
/// use uaalert::{Response, Transport, TransportError};
///
/// struct Canned;
///
/// impl Transport for Canned {
///     fn get(&self, _url: &str) -> Result<Response, TransportError> {
///         Ok(Response::new(200, "\"N\""))
///     }
/// }
///
/// let rsp = Canned.get("https://example.invalid/").unwrap();
/// assert_eq!(200, rsp.status);
/// ```
pub trait Transport {
    /// Fetch `url`
    fn get(&self, url: &str) -> Result<Response, TransportError>;
}

impl<T> Transport for &T
where
    T: Transport + ?Sized,
{
    fn get(&self, url: &str) -> Result<Response, TransportError> {
        (**self).get(url)
    }
}

impl<T> Transport for Box<T>
where
    T: Transport + ?Sized,
{
    fn get(&self, url: &str) -> Result<Response, TransportError> {
        (**self).get(url)
    }
}

/// Broad category of a transport failure
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransportErrorKind {
    /// Could not connect to the server
    Connect,

    /// The request timed out
    Timeout,

    /// Any other failure, such as an unreadable body
    Other,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportErrorKind::Connect => "connection failed",
            TransportErrorKind::Timeout => "timed out",
            TransportErrorKind::Other => "request failed",
        }
        .fmt(f)
    }
}

/// The request could not be completed
#[derive(Error, Clone, Debug, PartialEq, Eq, Hash)]
#[error("HTTP {kind}: {message}")]
pub struct TransportError {
    kind: TransportErrorKind,
    message: String,
}

impl TransportError {
    pub fn new<S>(kind: TransportErrorKind, message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> TransportErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Blocking HTTP transport using `reqwest`
///
/// Requires the `reqwest` feature.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "reqwest")]
impl HttpTransport {
    /// Default request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create with the default timeout
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(Self::DEFAULT_TIMEOUT)
    }

    /// Create with a request `timeout`
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(TransportError::from)?;
        Ok(Self { client })
    }
}

#[cfg(feature = "reqwest")]
impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<Response, TransportError> {
        let rsp = self.client.get(url).send()?;
        let status = rsp.status();
        Ok(Response {
            status: status.as_u16(),
            reason: status.canonical_reason().map(str::to_owned),
            body: rsp.text()?,
        })
    }
}

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else {
            TransportErrorKind::Other
        };

        // reqwest includes the URL, and with it the token
        TransportError::new(kind, err.without_url().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error() {
        let err = TransportError::new(TransportErrorKind::Timeout, "after 30 s");
        assert_eq!(TransportErrorKind::Timeout, err.kind());
        assert_eq!("after 30 s", err.message());
        assert_eq!("HTTP timed out: after 30 s", err.to_string());
    }

    #[test]
    fn test_response_builder() {
        let rsp = Response::new(418, "").with_reason("I'm a teapot");
        assert_eq!(418, rsp.status);
        assert_eq!(Some("I'm a teapot"), rsp.reason.as_deref());
        assert_eq!("", rsp.body);
    }
}

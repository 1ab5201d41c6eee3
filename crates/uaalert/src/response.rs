//! HTTP status classification

use thiserror::Error;

use crate::transport::Response;

/// The service refused or failed the request
///
/// None of these are retried by this crate.
#[derive(Error, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ApiError {
    /// HTTP 401
    #[error("invalid API token")]
    AuthenticationFailure,

    /// HTTP 403
    #[error("IP address blocked or API unavailable in your region")]
    AccessDenied,

    /// HTTP 429
    #[error("too many requests")]
    RateLimited,

    /// Any other non-200 status
    #[error(
        "unexpected HTTP status {code} ({})",
        .reason.as_deref().unwrap_or("no reason given")
    )]
    UnexpectedStatus { code: u16, reason: Option<String> },
}

impl ApiError {
    /// Classify a status code
    ///
    /// Returns `None` for `200 OK`, which is the only success
    /// status the service uses.
    ///
    /// ```
    /// use uaalert::ApiError;
    ///
    /// assert_eq!(None, ApiError::from_status(200, None));
    /// assert_eq!(Some(ApiError::RateLimited), ApiError::from_status(429, None));
    /// ```
    pub fn from_status(code: u16, reason: Option<&str>) -> Option<ApiError> {
        match code {
            200 => None,
            401 => Some(ApiError::AuthenticationFailure),
            403 => Some(ApiError::AccessDenied),
            429 => Some(ApiError::RateLimited),
            _ => Some(ApiError::UnexpectedStatus {
                code,
                reason: reason.map(str::to_owned),
            }),
        }
    }

    /// HTTP status code which produced this error
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::AuthenticationFailure => 401,
            ApiError::AccessDenied => 403,
            ApiError::RateLimited => 429,
            ApiError::UnexpectedStatus { code, .. } => *code,
        }
    }
}

/// Pass a successful response body through, or classify the failure
///
/// The body is never inspected.
pub fn classify(response: Response) -> Result<String, ApiError> {
    match ApiError::from_status(response.status, response.reason.as_deref()) {
        None => Ok(response.body),
        Some(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(
            Ok("\"ANP\"".to_owned()),
            classify(Response::new(200, "\"ANP\""))
        );
        assert_eq!(
            Err(ApiError::AuthenticationFailure),
            classify(Response::new(401, "ok"))
        );
        assert_eq!(Err(ApiError::AccessDenied), classify(Response::new(403, "")));
        assert_eq!(Err(ApiError::RateLimited), classify(Response::new(429, "")));
        assert_eq!(
            Err(ApiError::UnexpectedStatus {
                code: 418,
                reason: Some("I'm a teapot".to_owned())
            }),
            classify(Response::new(418, "").with_reason("I'm a teapot"))
        );
        assert_eq!(
            Err(ApiError::UnexpectedStatus {
                code: 204,
                reason: None
            }),
            classify(Response::new(204, ""))
        );
    }

    #[test]
    fn test_status_code() {
        for code in [401, 403, 429, 418, 500, 0, u16::MAX] {
            let err = ApiError::from_status(code, None).expect("not a success");
            assert_eq!(code, err.status_code());
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(
            "unexpected HTTP status 503 (Service Unavailable)",
            ApiError::from_status(503, Some("Service Unavailable"))
                .unwrap()
                .to_string()
        );
        assert_eq!(
            "unexpected HTTP status 520 (no reason given)",
            ApiError::from_status(520, None).unwrap().to_string()
        );
    }
}

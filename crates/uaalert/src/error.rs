//! Client errors

use thiserror::Error;

use crate::alert::AlertDecodeErr;
use crate::regions::UnknownRegion;
use crate::response::ApiError;
use crate::status::StatusDecodeErr;
use crate::transport::TransportError;

/// Error from an [`AlertsClient`](crate::AlertsClient) operation
///
/// Every error is terminal for the call which produced it.
#[derive(Error, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClientError {
    /// The request could not be completed
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The service answered with a non-success status
    #[error(transparent)]
    Api(#[from] ApiError),

    /// An alert list could not be decoded
    #[error(transparent)]
    AlertFormat(#[from] AlertDecodeErr),

    /// A status response could not be decoded
    #[error(transparent)]
    StatusFormat(#[from] StatusDecodeErr),

    /// The caller named a region which does not exist
    #[error(transparent)]
    UnknownRegion(#[from] UnknownRegion),
}

impl ClientError {
    /// True if the caller supplied a bad argument
    ///
    /// An unknown region name is a caller error. So is an
    /// unrecognized status character, which cannot be given
    /// a safe default.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            ClientError::UnknownRegion(_)
                | ClientError::StatusFormat(StatusDecodeErr::InvalidStatus(_))
        )
    }

    /// True if the response body was malformed
    pub fn is_data_format(&self) -> bool {
        match self {
            ClientError::AlertFormat(_) => true,
            ClientError::StatusFormat(e) => !matches!(e, StatusDecodeErr::InvalidStatus(_)),
            _ => false,
        }
    }

    /// The service's rejection, if that is what this is
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            ClientError::Api(e) => Some(e),
            _ => None,
        }
    }
}

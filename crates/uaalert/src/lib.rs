//! # uaalert: alerts.in.ua Client
//!
//! This crate is a client for the [alerts.in.ua](https://alerts.in.ua)
//! air-raid alert service. It retrieves current alerts, per-region
//! alert status summaries, and the recent alert history of a region,
//! and decodes the service's compact responses into typed values.
//!
//! ## Disclaimer
//!
//! This crate is dual-licensed MIT and Apache 2.0. Read these licenses
//! carefully as they may affect your rights.
//!
//! This crate is not affiliated with the operators of the service and
//! has not been certified for any purpose. Do not rely on it as your
//! only means of receiving alerts. Always have at least two.
//!
//! ## Example
//!
//! You will need an API token from the service operators.
//!
//! ```no_run
//! use uaalert::{AlertsClient, ActiveState};
//!
//! let client = AlertsClient::with_token("your-token").expect("no HTTP client");
//!
//! // one status per oblast, in canonical order
//! let statuses = client.alert_statuses().expect("request failed");
//! for st in statuses.active().iter() {
//!     println!("{}", st);
//! }
//!
//! // one oblast, by name or alias
//! let kyiv = client.alert_status_by_name("Київ").expect("request failed");
//! if kyiv.state() != ActiveState::None {
//!     println!("{}", kyiv);
//! }
//!
//! // every active alert, at every tier
//! for alert in client.active_alerts().expect("request failed") {
//!     println!("{} since {}", alert.location_title(), alert.started_at());
//! }
//! ```
//!
//! The client issues one blocking GET per call. It never caches,
//! retries, or rate-limits. The service limits request rates per
//! token; polling more than a few times per minute will earn you
//! [`ApiError::RateLimited`].
//!
//! ## Response decoding
//!
//! The decoders are usable without a client. The by-oblast status
//! endpoint returns a quoted *positional* string. Each character
//! is the status of one region, in [canonical order](canonical_order):
//!
//! ```txt
//! "AAANNNNNNNNNANNNNNNNNPPPNNN"
//! ```
//!
//! ```
//! use uaalert::{decode_statuses, ActiveState};
//!
//! let statuses = decode_statuses("\"AAANNNNNNNNNANNNNNNNNPPPNNN\"").unwrap();
//! assert_eq!("Автономна Республіка Крим", statuses[0].region());
//! assert_eq!(ActiveState::Active, statuses[0].state());
//! ```
//!
//! Status characters are decoded strictly. Anything other than
//! `A`, `P`, or `N` is an error.
//!
//! Alert lists are JSON, decoded with [`decode_alerts_str()`]. Two
//! enumerated fields are decoded *leniently*:
//!
//! * unknown `location_type` strings become [`LocationType::Unknown`]
//! * unknown `alert_type` strings become [`AlertType::AirRaid`]
//!
//! A missing required field fails the entire list.
//!
//! ## Crate features
//!
//! * `reqwest` (default): provides [`HttpTransport`], a blocking HTTP
//!   transport, and [`AlertsClient::with_token()`]. Without it, you must
//!   implement [`Transport`] yourself.
//!

mod alert;
mod client;
mod endpoints;
mod error;
mod regions;
mod response;
mod status;
mod transport;

pub use alert::{decode_alerts, decode_alerts_str, Alert, AlertDecodeErr, AlertType, LocationType};
pub use client::AlertsClient;
pub use endpoints::{Endpoint, DEFAULT_BASE_URL};
pub use error::ClientError;
pub use regions::{
    canonical_order, name_for, region_exists, uid_for, Region, UnknownRegion, REGIONS,
    REGION_COUNT,
};
pub use response::{classify, ApiError};
pub use status::{
    decode_status, decode_status_framed, decode_statuses, ActiveState, RegionStatus,
    RegionStatuses, StatusDecodeErr,
};
#[cfg(feature = "reqwest")]
pub use transport::HttpTransport;
pub use transport::{Response, Transport, TransportError, TransportErrorKind};

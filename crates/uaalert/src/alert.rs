//! Alert records and their JSON decoding

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use log::{debug, trace};
use serde_json::{Map, Value};
use strum::EnumMessage;
use thiserror::Error;

/// Administrative tier of an alert's location
///
/// Location types are decoded from their wire strings with
/// [`from_wire()`](LocationType::from_wire). Unrecognized strings
/// quietly become [`LocationType::Unknown`].
///
/// ```
/// use uaalert::LocationType;
///
/// assert_eq!(LocationType::Hromada, LocationType::from_wire("hromada"));
/// assert_eq!(LocationType::Unknown, LocationType::from_wire("planet"));
/// assert_eq!("raion", LocationType::Raion.as_str());
/// assert_eq!("Raion", format!("{}", LocationType::Raion));
/// ```
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum_macros::EnumMessage,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
pub enum LocationType {
    /// Oblast (region)
    #[strum(serialize = "oblast", detailed_message = "Oblast")]
    Oblast,

    /// Raion (district)
    #[strum(serialize = "raion", detailed_message = "Raion")]
    Raion,

    /// City
    #[strum(serialize = "city", detailed_message = "City")]
    City,

    /// Hromada (territorial community)
    #[strum(serialize = "hromada", detailed_message = "Hromada")]
    Hromada,

    /// A location type not known to this crate
    #[strum(serialize = "unknown", detailed_message = "Unknown")]
    Unknown,
}

impl LocationType {
    /// Decode from wire string, leniently
    ///
    /// Unrecognized strings become [`LocationType::Unknown`].
    /// Use `str::parse()` for a strict conversion.
    pub fn from_wire(s: &str) -> LocationType {
        match LocationType::from_str(s) {
            Ok(loc) => loc,
            Err(_e) => {
                debug!("unrecognized location type \"{}\"", s);
                LocationType::Unknown
            }
        }
    }

    /// Human-readable string representation
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().expect("missing definition")
    }

    /// Wire string representation
    pub fn as_str(&self) -> &'static str {
        self.get_serializations()[0]
    }
}

impl AsRef<str> for LocationType {
    fn as_ref(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_display_str().fmt(f)
    }
}

/// Kind of threat an alert warns about
///
/// Alert types are decoded from their wire strings with
/// [`from_wire()`](AlertType::from_wire). There is no "unknown"
/// alert type: unrecognized strings are reported as
/// [`AlertType::AirRaid`]. This loses information when the service
/// introduces a new alert type.
///
/// ```
/// use uaalert::AlertType;
///
/// assert_eq!(AlertType::Chemical, AlertType::from_wire("chemical"));
/// assert_eq!(AlertType::AirRaid, AlertType::from_wire("laser"));
/// assert_eq!("urban_fighting", AlertType::UrbanFighting.as_str());
/// ```
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum_macros::EnumMessage,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
pub enum AlertType {
    #[strum(serialize = "air_raid", detailed_message = "Air raid")]
    AirRaid,

    #[strum(serialize = "artillery_shelling", detailed_message = "Artillery shelling")]
    ArtilleryShelling,

    #[strum(serialize = "urban_fighting", detailed_message = "Urban fighting")]
    UrbanFighting,

    #[strum(serialize = "chemical", detailed_message = "Chemical threat")]
    Chemical,

    #[strum(serialize = "nuclear", detailed_message = "Nuclear threat")]
    Nuclear,
}

impl AlertType {
    /// Decode from wire string, leniently
    ///
    /// Unrecognized strings become [`AlertType::AirRaid`].
    pub fn from_wire(s: &str) -> AlertType {
        match AlertType::from_str(s) {
            Ok(kind) => kind,
            Err(_e) => {
                debug!("unrecognized alert type \"{}\", assuming air raid", s);
                AlertType::default()
            }
        }
    }

    /// Human-readable string representation
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().expect("missing definition")
    }

    /// Wire string representation
    pub fn as_str(&self) -> &'static str {
        self.get_serializations()[0]
    }
}

impl std::default::Default for AlertType {
    fn default() -> Self {
        AlertType::AirRaid
    }
}

impl AsRef<str> for AlertType {
    fn as_ref(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_display_str().fmt(f)
    }
}

/// Error decoding alert records
///
/// Any of these errors aborts decoding of the whole batch.
#[derive(Error, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AlertDecodeErr {
    /// The response body is not valid JSON
    #[error("invalid alert response: {0}")]
    Json(String),

    /// Expected a JSON object
    #[error("invalid alert response: expected a JSON object")]
    NotAnObject,

    /// Top-level `alerts` list is missing or not a list
    #[error("invalid alert response: missing \"alerts\" list")]
    MissingAlerts,

    /// A required field is absent or null
    #[error("invalid alert: missing required field \"{0}\"")]
    MissingField(&'static str),

    /// A field has the wrong JSON type
    #[error("invalid alert: field \"{field}\" is not {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    /// A timestamp field could not be parsed
    #[error("invalid alert: field \"{field}\" has invalid timestamp \"{value}\"")]
    InvalidTimestamp { field: &'static str, value: String },

    /// The alert ends before it starts
    #[error("invalid alert {id}: finished before it started")]
    FinishedBeforeStart { id: u64 },
}

/// An air-raid alert in an oblast, raion, city, or hromada
///
/// Alerts are decoded from the service's alert lists with
/// [`decode_alerts()`]. An alert whose
/// [`finished_at()`](Alert::finished_at) is `None` is ongoing.
///
/// ```
/// use uaalert::{decode_alerts_str, AlertType, LocationType};
///
/// let body = r#"{"alerts": [{
///     "id": 8757,
///     "location_title": "Луганська область",
///     "location_type": "oblast",
///     "started_at": "2022-04-04T16:45:39.000Z",
///     "finished_at": null,
///     "updated_at": "2023-10-29T18:22:37.357Z",
///     "alert_type": "air_raid",
///     "location_uid": "16",
///     "location_oblast": "Луганська область",
///     "location_oblast_uid": 16,
///     "notes": null,
///     "calculated": null
/// }]}"#;
///
/// let alerts = decode_alerts_str(body).expect("bad alerts");
/// let alert = &alerts[0];
/// assert_eq!(8757, alert.id());
/// assert_eq!(LocationType::Oblast, alert.location_type());
/// assert_eq!(AlertType::AirRaid, alert.alert_type());
/// assert!(!alert.is_finished());
/// assert_eq!("", alert.notes());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Alert {
    id: u64,
    location_title: String,
    location_type: LocationType,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    updated_at: DateTime<Utc>,
    alert_type: AlertType,
    location_uid: String,
    location_oblast: String,
    location_oblast_uid: u32,
    notes: String,
    calculated: bool,
}

impl Alert {
    /// Decode one alert document
    ///
    /// Required fields must be present and non-null. The fields
    /// `finished_at`, `notes`, `calculated`, and `alert_type` may
    /// be absent or null.
    pub fn from_json(doc: &Map<String, Value>) -> Result<Self, AlertDecodeErr> {
        let id = required_u64(doc, "id")?;
        let started_at = required_timestamp(doc, "started_at")?;
        let finished_at = match optional(doc, "finished_at") {
            Some(v) => Some(timestamp(v, "finished_at")?),
            None => None,
        };

        if let Some(finished) = finished_at {
            if finished < started_at {
                return Err(AlertDecodeErr::FinishedBeforeStart { id });
            }
        }

        let alert_type = match optional(doc, "alert_type") {
            Some(v) => AlertType::from_wire(string(v, "alert_type")?),
            None => AlertType::default(),
        };

        let location_oblast_uid = u32::try_from(required_u64(doc, "location_oblast_uid")?)
            .map_err(|_| AlertDecodeErr::WrongType {
                field: "location_oblast_uid",
                expected: "a 32-bit integer",
            })?;

        Ok(Self {
            id,
            location_title: required_str(doc, "location_title")?.to_owned(),
            location_type: LocationType::from_wire(required_str(doc, "location_type")?),
            started_at,
            finished_at,
            updated_at: required_timestamp(doc, "updated_at")?,
            alert_type,
            location_uid: required_str(doc, "location_uid")?.to_owned(),
            location_oblast: required_str(doc, "location_oblast")?.to_owned(),
            location_oblast_uid,
            notes: match optional(doc, "notes") {
                Some(v) => string(v, "notes")?.to_owned(),
                None => String::new(),
            },
            calculated: match optional(doc, "calculated") {
                Some(v) => v.as_bool().ok_or(AlertDecodeErr::WrongType {
                    field: "calculated",
                    expected: "a boolean",
                })?,
                None => false,
            },
        })
    }

    /// Unique alert identifier
    ///
    /// Stable across polls; suitable for change detection.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Display name of the alert's location
    pub fn location_title(&self) -> &str {
        &self.location_title
    }

    /// Administrative tier of the location
    pub fn location_type(&self) -> LocationType {
        self.location_type
    }

    /// Time the alert began
    pub fn started_at(&self) -> &DateTime<Utc> {
        &self.started_at
    }

    /// Time the alert ended, if it has
    ///
    /// If [`is_calculated()`](Alert::is_calculated), this is an
    /// estimate rather than a confirmed end time.
    pub fn finished_at(&self) -> Option<&DateTime<Utc>> {
        self.finished_at.as_ref()
    }

    /// Time the alert record was last updated
    pub fn updated_at(&self) -> &DateTime<Utc> {
        &self.updated_at
    }

    /// Kind of threat
    pub fn alert_type(&self) -> AlertType {
        self.alert_type
    }

    /// Opaque identifier of the alert's location
    ///
    /// This identifies a location at any tier and is *not* the
    /// same as a region UID.
    pub fn location_uid(&self) -> &str {
        &self.location_uid
    }

    /// Name of the oblast containing the location
    pub fn location_oblast(&self) -> &str {
        &self.location_oblast
    }

    /// Region UID of the oblast containing the location
    pub fn location_oblast_uid(&self) -> u32 {
        self.location_oblast_uid
    }

    /// Free-form notes, or the empty string
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// True if the end time is estimated
    pub fn is_calculated(&self) -> bool {
        self.calculated
    }

    /// True if the alert has ended
    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const RULE: &str = "--------------------";

        writeln!(f, "{}", RULE)?;
        writeln!(f, "id: {}", self.id)?;
        writeln!(f, "location: {} ({})", self.location_title, self.location_type)?;
        writeln!(f, "oblast: {} [{}]", self.location_oblast, self.location_oblast_uid)?;
        writeln!(f, "location uid: {}", self.location_uid)?;
        writeln!(f, "type: {}", self.alert_type)?;
        writeln!(f, "started: {}", self.started_at.to_rfc3339())?;
        match &self.finished_at {
            Some(ts) if self.calculated => writeln!(f, "finished: {} (estimated)", ts.to_rfc3339())?,
            Some(ts) => writeln!(f, "finished: {}", ts.to_rfc3339())?,
            None => writeln!(f, "finished: ongoing")?,
        }
        writeln!(f, "updated: {}", self.updated_at.to_rfc3339())?;
        if !self.notes.is_empty() {
            writeln!(f, "notes: {}", self.notes)?;
        }
        f.write_str(RULE)
    }
}

impl TryFrom<&Value> for Alert {
    type Error = AlertDecodeErr;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Alert::from_json(value.as_object().ok_or(AlertDecodeErr::NotAnObject)?)
    }
}

/// Decode every alert under the top-level `alerts` key
///
/// Decoding is all-or-nothing: if any element fails to decode,
/// the error is returned and no alerts are.
pub fn decode_alerts(top: &Map<String, Value>) -> Result<Vec<Alert>, AlertDecodeErr> {
    let list = top
        .get("alerts")
        .and_then(Value::as_array)
        .ok_or(AlertDecodeErr::MissingAlerts)?;

    let out = list
        .iter()
        .map(Alert::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    trace!("decoded {} alerts", out.len());
    Ok(out)
}

/// Parse a JSON response `body` and decode its alerts
pub fn decode_alerts_str(body: &str) -> Result<Vec<Alert>, AlertDecodeErr> {
    let top: Value = serde_json::from_str(body).map_err(|e| AlertDecodeErr::Json(e.to_string()))?;
    decode_alerts(top.as_object().ok_or(AlertDecodeErr::NotAnObject)?)
}

// Field present and non-null
fn optional<'d>(doc: &'d Map<String, Value>, field: &'static str) -> Option<&'d Value> {
    match doc.get(field) {
        None | Some(Value::Null) => None,
        Some(v) => Some(v),
    }
}

fn required<'d>(
    doc: &'d Map<String, Value>,
    field: &'static str,
) -> Result<&'d Value, AlertDecodeErr> {
    optional(doc, field).ok_or(AlertDecodeErr::MissingField(field))
}

fn required_str<'d>(
    doc: &'d Map<String, Value>,
    field: &'static str,
) -> Result<&'d str, AlertDecodeErr> {
    string(required(doc, field)?, field)
}

fn required_u64(doc: &Map<String, Value>, field: &'static str) -> Result<u64, AlertDecodeErr> {
    required(doc, field)?
        .as_u64()
        .ok_or(AlertDecodeErr::WrongType {
            field,
            expected: "a non-negative integer",
        })
}

fn required_timestamp(
    doc: &Map<String, Value>,
    field: &'static str,
) -> Result<DateTime<Utc>, AlertDecodeErr> {
    timestamp(required(doc, field)?, field)
}

fn string<'v>(v: &'v Value, field: &'static str) -> Result<&'v str, AlertDecodeErr> {
    v.as_str().ok_or(AlertDecodeErr::WrongType {
        field,
        expected: "a string",
    })
}

fn timestamp(v: &Value, field: &'static str) -> Result<DateTime<Utc>, AlertDecodeErr> {
    parse_timestamp(string(v, field)?).ok_or_else(|| AlertDecodeErr::InvalidTimestamp {
        field,
        value: v.as_str().unwrap_or_default().to_owned(),
    })
}

// Parse an RFC 3339 timestamp, or a zone-less ISO 8601
// date-time which is taken to be UTC
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
    Some(Utc.from_utc_datetime(&naive))
}

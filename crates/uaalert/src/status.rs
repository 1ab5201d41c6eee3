//! Per-region alert status

use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use log::trace;
use strum::EnumMessage;
use thiserror::Error;

use crate::regions::{canonical_order, REGION_COUNT};

/// Alert state of an oblast-level region
///
/// The status endpoints encode the state of each region as a
/// single character:
///
/// | Code | State                                           |
/// |------|-------------------------------------------------|
/// | `A`  | [active](crate::ActiveState::Active)            |
/// | `P`  | [partly active](crate::ActiveState::Partial)    |
/// | `N`  | [no alert](crate::ActiveState::None)            |
///
/// There is no "unknown" state. Decoding any other character
/// is an error, since "no alert" and "active alert" must never
/// be confused.
///
/// ```
/// use std::convert::TryFrom;
/// use uaalert::ActiveState;
///
/// assert_eq!(ActiveState::Active, ActiveState::try_from('A').unwrap());
/// assert_eq!(ActiveState::None, ActiveState::try_from('N').unwrap());
/// assert!(ActiveState::try_from('X').is_err());
///
/// assert_eq!("P", ActiveState::Partial.as_code_str());
/// assert_eq!("Partly active alert", format!("{}", ActiveState::Partial));
/// assert_eq!("P", format!("{:#}", ActiveState::Partial));
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
pub enum ActiveState {
    /// Air-raid alert is active over the whole region
    #[strum(serialize = "A", detailed_message = "Active alert")]
    Active,

    /// Air-raid alert is active in some raions or hromadas
    #[strum(serialize = "P", detailed_message = "Partly active alert")]
    Partial,

    /// No air-raid alert
    #[strum(serialize = "N", detailed_message = "No alert")]
    None,
}

impl ActiveState {
    /// Human-readable string representation
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().expect("missing definition")
    }

    /// Wire representation
    ///
    /// Returns the one-character code for this state.
    pub fn as_code_str(&self) -> &'static str {
        self.get_serializations()[0]
    }
}

impl TryFrom<char> for ActiveState {
    type Error = StatusDecodeErr;

    fn try_from(code: char) -> Result<Self, Self::Error> {
        let mut buf = [0u8; 4];
        ActiveState::from_str(code.encode_utf8(&mut buf))
            .map_err(|_| StatusDecodeErr::InvalidStatus(code))
    }
}

impl AsRef<str> for ActiveState {
    fn as_ref(&self) -> &'static str {
        self.as_code_str()
    }
}

impl fmt::Display for ActiveState {
    /// Printable string
    ///
    /// * The normal form is a human-readable string like "`No alert`"
    /// * The alternate form is the one-character code like "`N`"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            self.as_code_str().fmt(f)
        } else {
            self.as_display_str().fmt(f)
        }
    }
}

/// Error decoding a status response
#[derive(Error, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StatusDecodeErr {
    /// A status character other than `A`, `P`, or `N`
    #[error("invalid alert status character {0:?}")]
    InvalidStatus(char),

    /// The response is not wrapped in quotation marks
    #[error("invalid status response: missing quotation marks")]
    Unframed,

    /// The response does not have one status per region
    #[error("invalid status response: expected {expected} status characters, got {actual}")]
    WrongLength { expected: usize, actual: usize },
}

/// Alert status of one named region
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RegionStatus {
    region: String,
    state: ActiveState,
}

impl RegionStatus {
    /// Status for `region` with a known `state`
    pub fn new<S>(region: S, state: ActiveState) -> Self
    where
        S: Into<String>,
    {
        Self {
            region: region.into(),
            state,
        }
    }

    /// Decode a status character for `region`
    ///
    /// Use this when the region is already known, for example
    /// because it was queried by UID.
    ///
    /// ```
    /// use uaalert::{ActiveState, RegionStatus};
    ///
    /// let st = RegionStatus::from_code("Одеська область", 'P').unwrap();
    /// assert_eq!(ActiveState::Partial, st.state());
    /// assert!(RegionStatus::from_code("Одеська область", '?').is_err());
    /// ```
    pub fn from_code<S>(region: S, code: char) -> Result<Self, StatusDecodeErr>
    where
        S: Into<String>,
    {
        Ok(Self::new(region, ActiveState::try_from(code)?))
    }

    /// Region name
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Alert state
    pub fn state(&self) -> ActiveState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == ActiveState::Active
    }

    pub fn is_partly_active(&self) -> bool {
        self.state == ActiveState::Partial
    }

    pub fn is_no_alert(&self) -> bool {
        self.state == ActiveState::None
    }
}

impl fmt::Display for RegionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lead = match self.state {
            ActiveState::Active => "🔴 Active alert in ",
            ActiveState::Partial => "🟡 Partly active alert in ",
            ActiveState::None => "🟢 No alert in ",
        };
        write!(f, "{}{}", lead, self.region)
    }
}

/// Ordered collection of region statuses
///
/// Produced by [`decode_statuses()`] in canonical region
/// order. Filtering returns a new collection and preserves
/// relative order.
///
/// ```
/// use uaalert::{decode_statuses, ActiveState};
///
/// let all = decode_statuses("\"AAANNNNNNNNNANNNNNNNNPPPNNN\"").unwrap();
/// assert_eq!(27, all.len());
/// assert_eq!(4, all.active().len());
/// assert_eq!(3, all.partly_active().len());
/// assert_eq!(20, all.inactive().len());
///
/// let kyiv = all.by_name("м. Київ").unwrap();
/// assert_eq!(ActiveState::None, kyiv.state());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RegionStatuses {
    statuses: Vec<RegionStatus>,
}

impl RegionStatuses {
    /// Number of statuses
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Status at position `index`
    pub fn get(&self, index: usize) -> Option<&RegionStatus> {
        self.statuses.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RegionStatus> {
        self.statuses.iter()
    }

    /// Statuses in the given `state`, in original order
    pub fn filter(&self, state: ActiveState) -> RegionStatuses {
        self.statuses
            .iter()
            .filter(|st| st.state == state)
            .cloned()
            .collect()
    }

    /// Regions with an active alert
    pub fn active(&self) -> RegionStatuses {
        self.filter(ActiveState::Active)
    }

    /// Regions with a partly-active alert
    pub fn partly_active(&self) -> RegionStatuses {
        self.filter(ActiveState::Partial)
    }

    /// Regions with no alert
    pub fn inactive(&self) -> RegionStatuses {
        self.filter(ActiveState::None)
    }

    /// Status for the region with the exact `name`
    ///
    /// Region names are the canonical names; aliases are not
    /// matched here.
    pub fn by_name(&self, name: &str) -> Option<&RegionStatus> {
        self.statuses.iter().find(|st| st.region == name)
    }

    /// Obtain the owned statuses
    pub fn into_vec(self) -> Vec<RegionStatus> {
        self.statuses
    }
}

impl std::ops::Index<usize> for RegionStatuses {
    type Output = RegionStatus;

    fn index(&self, index: usize) -> &RegionStatus {
        &self.statuses[index]
    }
}

impl FromIterator<RegionStatus> for RegionStatuses {
    fn from_iter<I: IntoIterator<Item = RegionStatus>>(iter: I) -> Self {
        Self {
            statuses: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for RegionStatuses {
    type Item = RegionStatus;
    type IntoIter = std::vec::IntoIter<RegionStatus>;

    fn into_iter(self) -> Self::IntoIter {
        self.statuses.into_iter()
    }
}

impl<'a> IntoIterator for &'a RegionStatuses {
    type Item = &'a RegionStatus;
    type IntoIter = std::slice::Iter<'a, RegionStatus>;

    fn into_iter(self) -> Self::IntoIter {
        self.statuses.iter()
    }
}

impl fmt::Display for RegionStatuses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, st) in self.statuses.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            st.fmt(f)?;
        }
        Ok(())
    }
}

/// Decode the by-oblast positional status string
///
/// The `raw` response body is a quoted string with exactly one
/// status character per region, in
/// [canonical order](crate::canonical_order). Each character is
/// paired with the region at the same position.
///
/// A response with the wrong number of characters is rejected
/// rather than truncated or padded.
pub fn decode_statuses(raw: &str) -> Result<RegionStatuses, StatusDecodeErr> {
    let codes = unframe(raw)?;

    let actual = codes.chars().count();
    if actual != REGION_COUNT {
        return Err(StatusDecodeErr::WrongLength {
            expected: REGION_COUNT,
            actual,
        });
    }

    let out = codes
        .chars()
        .zip(canonical_order())
        .map(|(code, region)| RegionStatus::from_code(region, code))
        .collect::<Result<RegionStatuses, _>>()?;

    trace!("decoded {} region statuses", out.len());
    Ok(out)
}

/// Decode a single status character
pub fn decode_status(code: char) -> Result<ActiveState, StatusDecodeErr> {
    ActiveState::try_from(code)
}

/// Decode a quoted single-region status response, like `"A"`
pub fn decode_status_framed(raw: &str) -> Result<ActiveState, StatusDecodeErr> {
    decode_status(unframe_single(raw)?)
}

/// Extract the one status character from a quoted response,
/// without decoding it
pub(crate) fn unframe_single(raw: &str) -> Result<char, StatusDecodeErr> {
    let codes = unframe(raw)?;
    let mut chars = codes.chars();
    match (chars.next(), chars.next()) {
        (Some(code), None) => Ok(code),
        _ => Err(StatusDecodeErr::WrongLength {
            expected: 1,
            actual: codes.chars().count(),
        }),
    }
}

/// Strip the quotation marks around a status response
///
/// Surrounding whitespace is ignored.
pub(crate) fn unframe(raw: &str) -> Result<&str, StatusDecodeErr> {
    raw.trim()
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or(StatusDecodeErr::Unframed)
}

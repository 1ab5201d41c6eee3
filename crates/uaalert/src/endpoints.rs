//! Service endpoints

use std::fmt;

/// Base URL of the production service
pub const DEFAULT_BASE_URL: &str = "https://api.alerts.in.ua/v1/";

/// A service endpoint
///
/// ```
/// use uaalert::Endpoint;
///
/// assert_eq!(
///     "https://api.alerts.in.ua/v1/regions/31/alerts/month_ago.json?token=abc",
///     Endpoint::History(31).url(uaalert::DEFAULT_BASE_URL, "abc")
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// All active alerts, at every tier
    ActiveAlerts,

    /// Positional status string for every oblast
    StatusesByOblast,

    /// Status string for the oblast with the given UID
    StatusInOblast(u32),

    /// Alerts for the oblast with the given UID over the last month
    History(u32),
}

impl Endpoint {
    /// Path relative to the base URL
    pub fn path(&self) -> String {
        match self {
            Endpoint::ActiveAlerts => "alerts/active.json".to_owned(),
            Endpoint::StatusesByOblast => "iot/active_air_raid_alerts_by_oblast.json".to_owned(),
            Endpoint::StatusInOblast(uid) => format!("iot/active_air_raid_alerts/{}.json", uid),
            Endpoint::History(uid) => format!("regions/{}/alerts/month_ago.json", uid),
        }
    }

    /// Full request URL, with `token` as a query parameter
    ///
    /// `base` should end with a slash. The token is percent-encoded.
    pub fn url(&self, base: &str, token: &str) -> String {
        format!("{}{}?token={}", base, self.path(), urlencoding::encode(token))
    }
}

impl fmt::Display for Endpoint {
    /// Displays the path only, never the token
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.path().fmt(f)
    }
}

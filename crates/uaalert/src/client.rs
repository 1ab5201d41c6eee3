//! Polling client

use std::fmt;

use log::debug;

use crate::alert::{decode_alerts_str, Alert};
use crate::endpoints::{Endpoint, DEFAULT_BASE_URL};
use crate::error::ClientError;
use crate::regions::{name_for, uid_for};
use crate::response::classify;
use crate::status::{decode_statuses, unframe, unframe_single, RegionStatus, RegionStatuses};
use crate::transport::Transport;

#[cfg(feature = "reqwest")]
use crate::transport::{HttpTransport, TransportError};

/// Client for the alerts.in.ua API
///
/// Each operation issues exactly one GET request through the
/// [`Transport`], classifies the response, and decodes it. There
/// is no caching and no retrying. Operations which accept a
/// region name resolve it before making any request.
///
/// ```
/// use uaalert::{AlertsClient, Response, Transport, TransportError};
///
/// struct Canned(&'static str);
///
/// impl Transport for Canned {
///     fn get(&self, _url: &str) -> Result<Response, TransportError> {
///         Ok(Response::new(200, self.0))
///     }
/// }
///
/// let client = AlertsClient::new("token", Canned("\"P\""));
/// let st = client.alert_status_by_name("Київ").unwrap();
/// assert!(st.is_partly_active());
/// assert_eq!("Київ", st.region());
///
/// assert!(client.alert_status_by_name("Атлантида").unwrap_err().is_invalid_argument());
/// ```
pub struct AlertsClient<T> {
    token: String,
    base_url: String,
    transport: T,
}

impl<T> AlertsClient<T>
where
    T: Transport,
{
    /// Create a client with an API `token`
    pub fn new<S>(token: S, transport: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            transport,
        }
    }

    /// Use a different service base URL
    ///
    /// A trailing slash is added if missing.
    pub fn with_base_url<S>(mut self, base_url: S) -> Self
    where
        S: Into<String>,
    {
        self.base_url = base_url.into();
        if !self.base_url.ends_with('/') {
            self.base_url.push('/');
        }
        self
    }

    /// Service base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// All active alerts, in oblasts, raions, cities, and hromadas
    pub fn active_alerts(&self) -> Result<Vec<Alert>, ClientError> {
        let body = self.request(Endpoint::ActiveAlerts)?;
        Ok(decode_alerts_str(&body)?)
    }

    /// Alert status of every oblast, in canonical order
    pub fn alert_statuses(&self) -> Result<RegionStatuses, ClientError> {
        let body = self.request(Endpoint::StatusesByOblast)?;
        Ok(decode_statuses(&body)?)
    }

    /// Alert status of every oblast, as the positional string
    ///
    /// Returns the status characters without their quotation
    /// marks, like `AAANNNNNNNNNANNNNNNNNPPPNNN`. The characters
    /// are not validated.
    pub fn raw_alert_statuses(&self) -> Result<String, ClientError> {
        let body = self.request(Endpoint::StatusesByOblast)?;
        Ok(unframe(&body)?.to_owned())
    }

    /// Alert status of the oblast with the given `uid`
    ///
    /// The status is labeled with the region's canonical name,
    /// or with "`Location with UID …`" if the UID is not one this
    /// crate knows.
    pub fn alert_status(&self, uid: u32) -> Result<RegionStatus, ClientError> {
        let code = self.raw_alert_status(uid)?;
        let name = match name_for(uid) {
            Some(name) => name.to_owned(),
            None => format!("Location with UID {}", uid),
        };
        Ok(RegionStatus::from_code(name, code)?)
    }

    /// Alert status of the oblast with the given `name`
    ///
    /// The status is labeled with `name` as given.
    pub fn alert_status_by_name(&self, name: &str) -> Result<RegionStatus, ClientError> {
        let code = self.raw_alert_status(uid_for(name)?)?;
        Ok(RegionStatus::from_code(name, code)?)
    }

    /// Status character of the oblast with the given `uid`
    ///
    /// The character is not validated.
    pub fn raw_alert_status(&self, uid: u32) -> Result<char, ClientError> {
        let body = self.request(Endpoint::StatusInOblast(uid))?;
        Ok(unframe_single(&body)?)
    }

    /// Status character of the oblast with the given `name`
    pub fn raw_alert_status_by_name(&self, name: &str) -> Result<char, ClientError> {
        self.raw_alert_status(uid_for(name)?)
    }

    /// Alerts in the oblast with the given `uid` over the last month
    pub fn alert_history(&self, uid: u32) -> Result<Vec<Alert>, ClientError> {
        let body = self.request(Endpoint::History(uid))?;
        Ok(decode_alerts_str(&body)?)
    }

    /// Alerts in the oblast with the given `name` over the last month
    pub fn alert_history_by_name(&self, name: &str) -> Result<Vec<Alert>, ClientError> {
        self.alert_history(uid_for(name)?)
    }

    fn request(&self, endpoint: Endpoint) -> Result<String, ClientError> {
        debug!("GET {}{}", self.base_url, endpoint);
        let response = self
            .transport
            .get(&endpoint.url(&self.base_url, &self.token))?;
        debug!("{}: HTTP {}", endpoint, response.status);
        Ok(classify(response)?)
    }
}

#[cfg(feature = "reqwest")]
impl AlertsClient<HttpTransport> {
    /// Create a client which uses a blocking HTTP transport
    ///
    /// Requires the `reqwest` feature.
    pub fn with_token<S>(token: S) -> Result<Self, TransportError>
    where
        S: Into<String>,
    {
        Ok(Self::new(token, HttpTransport::new()?))
    }
}

impl<T> fmt::Debug for AlertsClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlertsClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;
    use std::collections::VecDeque;

    use crate::alert::{AlertDecodeErr, AlertType};
    use crate::regions::UnknownRegion;
    use crate::response::ApiError;
    use crate::status::{ActiveState, StatusDecodeErr};
    use crate::transport::{Response, TransportError, TransportErrorKind};

    const STATUSES: &str = "\"AAANNNNNNNNNANNNNNNNNPPPNNN\"";

    const ALERTS: &str = r#"{"alerts": [
        {
            "id": 8757,
            "location_title": "Луганська область",
            "location_type": "oblast",
            "started_at": "2022-04-04T16:45:39.000Z",
            "finished_at": null,
            "updated_at": "2023-10-29T18:22:37.357Z",
            "alert_type": "air_raid",
            "location_uid": "16",
            "location_oblast": "Луганська область",
            "location_oblast_uid": 16,
            "notes": null,
            "calculated": null
        },
        {
            "id": 29921,
            "location_title": "Нікопольська територіальна громада",
            "location_type": "hromada",
            "started_at": "2023-10-29T11:09:41.000Z",
            "finished_at": "2023-10-29T11:40:16.000Z",
            "updated_at": "2023-10-29T11:40:16.290Z",
            "alert_type": "artillery_shelling",
            "location_uid": "351",
            "location_oblast": "Дніпропетровська область",
            "location_oblast_uid": 9,
            "notes": "",
            "calculated": false
        }
    ]}"#;

    /// Replays canned responses and records requested URLs
    #[derive(Default)]
    struct FakeTransport {
        responses: RefCell<VecDeque<Result<Response, TransportError>>>,
        urls: RefCell<Vec<String>>,
    }

    impl FakeTransport {
        fn replying(status: u16, body: &str) -> Self {
            let out = Self::default();
            out.push(Ok(Response::new(status, body)));
            out
        }

        fn push(&self, rsp: Result<Response, TransportError>) {
            self.responses.borrow_mut().push_back(rsp);
        }

        fn urls(&self) -> Vec<String> {
            self.urls.borrow().clone()
        }
    }

    impl Transport for FakeTransport {
        fn get(&self, url: &str) -> Result<Response, TransportError> {
            self.urls.borrow_mut().push(url.to_owned());
            self.responses
                .borrow_mut()
                .pop_front()
                .expect("unexpected request")
        }
    }

    fn client(transport: &FakeTransport) -> AlertsClient<&FakeTransport> {
        AlertsClient::new("s3cret", transport).with_base_url("http://test")
    }

    #[test]
    fn test_active_alerts() {
        let tx = FakeTransport::replying(200, ALERTS);
        let alerts = client(&tx).active_alerts().expect("bad alerts");

        assert_eq!(2, alerts.len());
        assert_eq!(8757, alerts[0].id());
        assert!(!alerts[0].is_finished());
        assert_eq!(AlertType::ArtilleryShelling, alerts[1].alert_type());
        assert!(alerts[1].is_finished());
        assert_eq!(
            vec!["http://test/alerts/active.json?token=s3cret".to_owned()],
            tx.urls()
        );
    }

    #[test]
    fn test_alert_statuses() {
        let tx = FakeTransport::replying(200, STATUSES);
        let all = client(&tx).alert_statuses().expect("bad statuses");
        assert_eq!(27, all.len());
        assert_eq!(4, all.active().len());
        assert_eq!(
            vec!["http://test/iot/active_air_raid_alerts_by_oblast.json?token=s3cret".to_owned()],
            tx.urls()
        );

        let tx = FakeTransport::replying(200, STATUSES);
        assert_eq!(
            "AAANNNNNNNNNANNNNNNNNPPPNNN",
            client(&tx).raw_alert_statuses().unwrap()
        );
    }

    #[test]
    fn test_alert_status_by_uid() {
        let tx = FakeTransport::replying(200, "\"A\"");
        let st = client(&tx).alert_status(31).unwrap();
        assert_eq!("м. Київ", st.region());
        assert_eq!(ActiveState::Active, st.state());
        assert_eq!(
            vec!["http://test/iot/active_air_raid_alerts/31.json?token=s3cret".to_owned()],
            tx.urls()
        );

        // unknown uid still gets a label
        let tx = FakeTransport::replying(200, "\"N\"");
        let st = client(&tx).alert_status(99).unwrap();
        assert_eq!("Location with UID 99", st.region());
        assert!(st.is_no_alert());
    }

    #[test]
    fn test_alert_status_by_name() {
        let tx = FakeTransport::replying(200, "\"P\"");
        let st = client(&tx).alert_status_by_name("Севастополь").unwrap();
        assert_eq!("Севастополь", st.region());
        assert!(st.is_partly_active());
        assert_eq!(
            vec!["http://test/iot/active_air_raid_alerts/30.json?token=s3cret".to_owned()],
            tx.urls()
        );
    }

    #[test]
    fn test_unknown_name_makes_no_request() {
        let tx = FakeTransport::default();
        let c = client(&tx);

        assert_eq!(
            Err(ClientError::UnknownRegion(UnknownRegion("Марс".to_owned()))),
            c.alert_status_by_name("Марс")
        );
        assert!(c.raw_alert_status_by_name("Марс").is_err());
        assert!(c.alert_history_by_name("Марс").is_err());
        assert!(tx.urls().is_empty());
    }

    #[test]
    fn test_invalid_status_character() {
        let tx = FakeTransport::replying(200, "\"X\"");
        let err = client(&tx).alert_status(14).unwrap_err();
        assert_eq!(
            ClientError::StatusFormat(StatusDecodeErr::InvalidStatus('X')),
            err
        );
        assert!(err.is_invalid_argument());

        // but the raw call passes it through
        let tx = FakeTransport::replying(200, "\"X\"");
        assert_eq!(Ok('X'), client(&tx).raw_alert_status_by_name("Київська область"));
    }

    #[test]
    fn test_alert_history() {
        let tx = FakeTransport::replying(200, ALERTS);
        let alerts = client(&tx).alert_history_by_name("Київ").unwrap();
        assert_eq!(2, alerts.len());
        assert_eq!(
            vec!["http://test/regions/31/alerts/month_ago.json?token=s3cret".to_owned()],
            tx.urls()
        );
    }

    #[test]
    fn test_api_errors() {
        for (status, expect) in [
            (401, ApiError::AuthenticationFailure),
            (403, ApiError::AccessDenied),
            (429, ApiError::RateLimited),
            (
                500,
                ApiError::UnexpectedStatus {
                    code: 500,
                    reason: None,
                },
            ),
        ] {
            let tx = FakeTransport::replying(status, STATUSES);
            assert_eq!(
                Err(ClientError::Api(expect)),
                client(&tx).alert_statuses()
            );
        }
    }

    #[test]
    fn test_transport_error_propagates() {
        let tx = FakeTransport::default();
        let err = TransportError::new(TransportErrorKind::Timeout, "slow");
        tx.push(Err(err.clone()));
        assert_eq!(
            Err(ClientError::Transport(err)),
            client(&tx).active_alerts()
        );
    }

    #[test]
    fn test_bad_batch_fails_whole() {
        let body = ALERTS.replacen("\"id\": 29921,", "", 1);
        let tx = FakeTransport::replying(200, &body);
        assert_eq!(
            Err(ClientError::AlertFormat(AlertDecodeErr::MissingField("id"))),
            client(&tx).active_alerts()
        );
    }

    #[test]
    fn test_base_url_and_debug() {
        let tx = FakeTransport::default();
        let c = AlertsClient::new("s3cret", &tx);
        assert_eq!(DEFAULT_BASE_URL, c.base_url());

        let c = c.with_base_url("http://localhost:9000/v1");
        assert_eq!("http://localhost:9000/v1/", c.base_url());

        let dbg = format!("{:?}", c);
        assert!(!dbg.contains("s3cret"));
    }
}

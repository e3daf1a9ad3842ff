use crate::{
    data::{
        api_error::{ApiErrorDetail, ErrorEnvelope},
        lat_lng::{location_list, LatLng},
        place_ids::PlaceIds,
    },
    error::Error,
    retry::RetryPolicy,
};
use serde::Deserialize;
use serde_json::Value;
use std::{
    fmt,
    thread,
    time::{Duration, Instant},
};
type ReqwestClient = reqwest::blocking::Client;

const DEFAULT_BASE_URL: &str = "https://roads.googleapis.com";
const USER_AGENT: &str = concat!("roads-client-rust/", env!("CARGO_PKG_VERSION"));
const API_KEY_PREFIX: &str = "AIza";

/// Enterprise credentials. The Roads endpoints don't accept them, but a client
/// may still be built with them.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Builder used to build a RoadsClient instance
#[derive(Debug, Clone, Default)]
pub struct RoadsClientBuilder {
    key: Option<String>,
    client_credentials: Option<ClientCredentials>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    retry_policy: Option<RetryPolicy>,
    http_client: Option<ReqwestClient>,
}

impl RoadsClientBuilder {
    /// Create a new RoadsClientBuilder instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Authenticate with an API key. Keys start with `AIza`.
    pub fn with_key<T: Into<String>>(mut self, key: T) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Authenticate with enterprise client id credentials.
    pub fn with_client_id<T1: Into<String>, T2: Into<String>>(
        mut self,
        client_id: T1,
        client_secret: T2,
    ) -> Self {
        self.client_credentials = Some(ClientCredentials {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        });
        self
    }

    /// Use the given scheme and host instead of `https://roads.googleapis.com`.
    ///
    /// # Arguments
    /// `base_url` - a URL such as `http://localhost:8080`, without a path.
    ///
    /// # Returns
    /// This builder.
    pub fn with_base_url<T: Into<String>>(mut self, base_url: T) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Timeout for each HTTP request. Ignored when a preconfigured client is
    /// supplied with [`with_http_client`](Self::with_http_client).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = Some(retry_policy);
        self
    }

    /// Use the given blocking reqwest client when building a RoadsClient instance.
    ///
    /// # Arguments
    /// `client` - a pre-configured blocking reqwest client.
    ///
    /// # Returns
    /// This builder.
    pub fn with_http_client(mut self, client: ReqwestClient) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Consume the builder and create a RoadsClient instance using all of the previously configured values or
    /// their defaults.
    ///
    /// # Returns
    /// A RoadsClient instance, or an error when the credentials are missing or malformed.
    pub fn build(self) -> Result<RoadsClient, Error> {
        let key = self.key.filter(|key| !key.is_empty());
        let client_credentials = self.client_credentials.filter(|credentials| {
            !credentials.client_id.is_empty() && !credentials.client_secret.is_empty()
        });

        if key.is_none() && client_credentials.is_none() {
            return Err(Error::MissingCredentials);
        }

        if let Some(key) = &key {
            if !key.starts_with(API_KEY_PREFIX) {
                return Err(Error::InvalidApiKey);
            }
        }

        let base_url = self
            .base_url
            .unwrap_or_else(|| String::from(DEFAULT_BASE_URL));
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(Error::InvalidBaseUrl(base_url));
        }

        let http = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = ReqwestClient::builder().user_agent(USER_AGENT);
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(RoadsClient {
            http,
            base_url: base_url.trim_end_matches('/').into(),
            key,
            client_credentials,
            retry_policy: self.retry_policy.unwrap_or_default(),
        })
    }
}

/// Struct that represents a Roads API client.
#[derive(Debug, Clone)]
pub struct RoadsClient {
    http: ReqwestClient,
    base_url: String,
    key: Option<String>,
    client_credentials: Option<ClientCredentials>,
    retry_policy: RetryPolicy,
}

impl RoadsClient {
    /// Create a RoadsClient authenticated with `key`, using the default reqwest client.
    pub fn new<T: Into<String>>(key: T) -> Result<Self, Error> {
        RoadsClientBuilder::new().with_key(key).build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn client_credentials(&self) -> Option<&ClientCredentials> {
        self.client_credentials.as_ref()
    }

    /// Snaps a GPS trace to the most likely roads travelled.
    ///
    /// # Arguments
    /// `path` - the points collected along the route.
    /// `interpolate` - also return points that fill in the road geometry.
    ///
    /// # Returns
    /// The `snappedPoints` of the answer, empty when the API returned none.
    pub fn snap_to_roads<I, L>(&self, path: I, interpolate: bool) -> Result<Vec<Value>, Error>
    where
        I: IntoIterator<Item = L>,
        L: Into<LatLng>,
    {
        let mut params = vec![("path", location_list(path))];
        if interpolate {
            params.push(("interpolate", String::from("true")));
        }

        let body = self.get("/v1/snapToRoads", params)?;

        Ok(take_list(body, "snappedPoints"))
    }

    /// Finds the closest road segment for each point independently.
    pub fn nearest_roads<I, L>(&self, points: I) -> Result<Vec<Value>, Error>
    where
        I: IntoIterator<Item = L>,
        L: Into<LatLng>,
    {
        let body = self.get("/v1/nearestRoads", vec![("points", location_list(points))])?;

        Ok(take_list(body, "snappedPoints"))
    }

    /// Snaps `path` to roads and returns the posted speed limits along it.
    ///
    /// # Returns
    /// The whole answer, holding both `snappedPoints` and `speedLimits`.
    pub fn snapped_speed_limits<I, L>(&self, path: I) -> Result<Value, Error>
    where
        I: IntoIterator<Item = L>,
        L: Into<LatLng>,
    {
        self.get("/v1/speedLimits", vec![("path", location_list(path))])
    }

    /// Returns the posted speed limits for one or more road segments.
    ///
    /// # Returns
    /// The `speedLimits` of the answer, empty when the API returned none.
    pub fn speed_limits<P: Into<PlaceIds>>(&self, place_ids: P) -> Result<Vec<Value>, Error> {
        let params = place_ids
            .into()
            .iter()
            .map(|place_id| ("placeId", String::from(place_id)))
            .collect();

        let body = self.get("/v1/speedLimits", params)?;

        Ok(take_list(body, "speedLimits"))
    }

    fn get(&self, path: &str, mut params: Vec<(&'static str, String)>) -> Result<Value, Error> {
        let key = self.key.as_ref().ok_or(Error::ApiKeyRequired)?;
        params.push(("key", key.clone()));

        let url = format!("{}{}", self.base_url, path);
        let started = Instant::now();
        let mut retry: u32 = 0;

        loop {
            if retry > 0 {
                if started.elapsed() > self.retry_policy.retry_timeout {
                    return Err(Error::Timeout(self.retry_policy.retry_timeout));
                }

                let delay = self.retry_policy.delay(retry, &mut rand::thread_rng());
                tracing::warn!(%url, retry, ?delay, "retrying Roads API request");
                thread::sleep(delay);
            }

            tracing::debug!(%url, retry, "sending Roads API request");
            let response = self.http.get(&url).query(&params).send()?;
            let status_code = response.status().as_u16();

            if RetryPolicy::is_retriable_status(status_code) {
                tracing::debug!(%url, status_code, "retriable status");
                retry = retry.saturating_add(1);
                continue;
            }

            let body = response.text()?;

            match extract(status_code, &body) {
                Err(Error::OverQueryLimit { .. }) if self.retry_policy.retry_over_query_limit => {
                    retry = retry.saturating_add(1);
                }
                result => return result,
            }
        }
    }
}

/// Turn a Roads API answer into its JSON body or the error it carries.
pub(crate) fn extract(status_code: u16, body: &str) -> Result<Value, Error> {
    let json: Value = match serde_json::from_str(body) {
        Ok(json) => json,
        Err(_) if status_code != 200 => return Err(Error::Http(status_code)),
        Err(_) => {
            return Err(Error::Api {
                status: String::from("UNKNOWN_ERROR"),
                message: Some(String::from("Received a malformed response.")),
            })
        }
    };

    if json.get("error").is_some() {
        let ApiErrorDetail { status, message } = ErrorEnvelope::deserialize(&json)
            .map(|envelope| envelope.error)
            .unwrap_or_else(|_| ApiErrorDetail {
                status: String::from("UNKNOWN_ERROR"),
                message: None,
            });

        if status == "RESOURCE_EXHAUSTED" {
            return Err(Error::OverQueryLimit { status, message });
        }

        return Err(Error::Api { status, message });
    }

    if status_code != 200 {
        return Err(Error::Http(status_code));
    }

    Ok(json)
}

fn take_list(mut body: Value, field: &str) -> Vec<Value> {
    match body.get_mut(field).map(Value::take) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

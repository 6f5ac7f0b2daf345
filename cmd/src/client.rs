use std::time::Duration;

use async_trait::async_trait;
use exposition::forecast::ForecastPoint;
use serde::Deserialize;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

pub const DEFAULT_BASE_URL: &str = "https://api.stromgedacht.de/v1";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request to {url} failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("response has no state")]
    MissingState,
    #[error("failed to format forecast bound")]
    Format(#[from] time::error::Format),
}

/// Response of `GET /now`.
///
/// State codes: -1 supergreen, 1 green, 2 yellow, 3 orange, 4 red.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Now {
    #[serde(default)]
    pub state: Option<i64>,
}

/// Response of `GET /forecast`. Each series may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    #[serde(default)]
    pub load: Option<Vec<ForecastPoint>>,
    #[serde(default)]
    pub renewable_energy: Option<Vec<ForecastPoint>>,
    #[serde(default)]
    pub residual_load: Option<Vec<ForecastPoint>>,
    #[serde(default)]
    pub super_green_threshold: Option<Vec<ForecastPoint>>,
}

/// The grid state API as seen by the request handler.
///
/// Implementations are shared by all in-flight requests.
#[async_trait]
pub trait GridApi: Send + Sync {
    async fn now(&self, zip: &str) -> Result<Now, ClientError>;

    async fn forecast(
        &self,
        zip: &str,
        from: OffsetDateTime,
        to: OffsetDateTime,
    ) -> Result<Forecast, ClientError>;
}

/// HTTP client for the StromGedacht API.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    async fn get<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, ClientError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}/{path}", self.base_url);
        let wrap = |source: reqwest::Error| ClientError::Http {
            url: url.clone(),
            source,
        };
        tracing::debug!(%url, ?query, "calling grid api");
        self.http
            .get(&url)
            .query(query)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(wrap)?
            .json()
            .await
            .map_err(wrap)
    }
}

#[async_trait]
impl GridApi for Client {
    async fn now(&self, zip: &str) -> Result<Now, ClientError> {
        self.get("now", &[("zip", zip)]).await
    }

    async fn forecast(
        &self,
        zip: &str,
        from: OffsetDateTime,
        to: OffsetDateTime,
    ) -> Result<Forecast, ClientError> {
        let from = from.format(&Rfc3339)?;
        let to = to.format(&Rfc3339)?;
        self.get("forecast", &[("zip", zip), ("from", from.as_str()), ("to", to.as_str())])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    #[test]
    fn test_deserialize_forecast() {
        let forecast: Forecast = serde_json::from_str(
            r#"{
                "load": [
                    {"dateTime": "2023-05-04T12:00:00+02:00", "value": 6712.5},
                    {"dateTime": "2023-05-04T12:15:00+02:00", "value": 6790.0}
                ],
                "renewableEnergy": [],
                "residualLoad": null
            }"#,
        )
        .unwrap();
        assert_eq!(forecast.load.as_deref().map(<[_]>::len), Some(2));
        assert_eq!(forecast.renewable_energy.as_deref().map(<[_]>::len), Some(0));
        assert!(forecast.residual_load.is_none());
        assert!(forecast.super_green_threshold.is_none());
    }

    #[test]
    fn test_deserialize_now() {
        let now: Now = serde_json::from_str(r#"{"state": -1}"#).unwrap();
        assert_eq!(now.state, Some(-1));
        let now: Now = serde_json::from_str("{}").unwrap();
        assert_eq!(now.state, None);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = Client::new("http://localhost:8080/v1/", Duration::from_secs(1)).unwrap();
        expect![[r#"
            "http://localhost:8080/v1"
        "#]]
        .assert_debug_eq(&client.base_url);
    }
}

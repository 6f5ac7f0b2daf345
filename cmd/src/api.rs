// Copyright 2022 Zinc Labs Inc. and Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use exposition::{forecast, forecast::ForecastPoint, Gauge, Metric, Metrics};
use time::OffsetDateTime;

use crate::{client::ClientError, error::Error, AppState};

pub const METRICS_PREFIX: &str = "stromgedacht";

const DESC_NOW: &str = "Current state (supergreen, green, yellow, orange or red)";
const DESC_LOAD: &str = "Current in kWh";
const DESC_RENEWABLE_ENERGY: &str = "Current supply of renewables in kWh";
const DESC_RESIDUAL_LOAD: &str = "Current residual load in kWh";
const DESC_SUPERGREEN_THRESHOLD: &str = "Current threshold on kWh for supergreen state";

/// The first `zip` value wins; an empty one counts as missing.
fn first_zip(params: Vec<(String, String)>) -> Option<String> {
    params
        .into_iter()
        .find_map(|(key, value)| (key == "zip").then_some(value))
        .filter(|zip| !zip.is_empty())
}

/// `GET /metrics?zip=<postal code>`
pub async fn metrics(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, Error> {
    let start_time = time::Instant::now();
    let zip = first_zip(params).ok_or(Error::MissingZip)?;

    let mut metrics = Metrics::new();
    metrics.push(fetch_now_state(&state, &zip).await?);
    metrics.extend(fetch_forecast(&state, &zip, OffsetDateTime::now_utc()).await?);
    metrics.sort();

    let body = metrics.to_string();
    tracing::info!(%zip, metrics = metrics.len(), "scrape time: {}", start_time.elapsed());
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body))
}

async fn fetch_now_state(state: &AppState, zip: &str) -> Result<Metric, Error> {
    let wrap = |source: ClientError| Error::Now {
        zip: zip.to_owned(),
        source,
    };
    let now = state.api.now(zip).await.map_err(wrap)?;
    let code = now.state.ok_or_else(|| wrap(ClientError::MissingState))?;
    Ok(Gauge::new(format!("{METRICS_PREFIX}_state_now"), code, DESC_NOW).into())
}

/// Requests the forecast window around `now` and turns the point closest
/// to `now` of every series into a gauge. Fails unless all four series
/// yield a point.
async fn fetch_forecast(
    state: &AppState,
    zip: &str,
    now: OffsetDateTime,
) -> Result<Vec<Metric>, Error> {
    let window = state
        .api
        .forecast(zip, now, now)
        .await
        .map_err(|source| Error::Forecast {
            zip: zip.to_owned(),
            source,
        })?;

    let series: [(&'static str, Option<Vec<ForecastPoint>>, &'static str); 4] = [
        ("load", window.load, DESC_LOAD),
        ("renewable_energy", window.renewable_energy, DESC_RENEWABLE_ENERGY),
        ("residual_load", window.residual_load, DESC_RESIDUAL_LOAD),
        (
            "supergreen_threshold",
            window.super_green_threshold,
            DESC_SUPERGREEN_THRESHOLD,
        ),
    ];

    series
        .into_iter()
        .map(|(name, points, desc)| -> Result<Metric, Error> {
            let value = forecast::closest_value(points.as_deref().unwrap_or_default(), now)
                .map_err(|source| Error::Selection {
                    zip: zip.to_owned(),
                    series: name,
                    source,
                })?;
            Ok(Gauge::new(format!("{METRICS_PREFIX}_{name}"), value, desc).into())
        })
        .collect()
}

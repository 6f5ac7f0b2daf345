//! Picking the forecast point closest to a reference instant.

use serde::Deserialize;
use time::{Duration, OffsetDateTime};

/// One entry of a forecast series. Upstream data has gaps, so both fields
/// are optional.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub date_time: Option<OffsetDateTime>,
    #[serde(default)]
    pub value: Option<f64>,
}

impl ForecastPoint {
    pub fn new(date_time: OffsetDateTime, value: f64) -> Self {
        Self {
            date_time: Some(date_time),
            value: Some(value),
        }
    }

    /// Absolute distance to `reference`, `None` without a timestamp.
    pub fn distance(&self, reference: OffsetDateTime) -> Option<Duration> {
        self.date_time.map(|t| (t - reference).abs())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("forecast series is empty")]
    Empty,
    #[error("closest forecast point has no timestamp")]
    MissingTimestamp,
    #[error("closest forecast point has no value")]
    MissingValue,
}

/// Returns the point with the smallest distance to `reference`.
///
/// On equal distances the earlier point in `points` wins. Points without a
/// timestamp rank after all timestamped ones.
pub fn closest(points: &[ForecastPoint], reference: OffsetDateTime) -> Option<&ForecastPoint> {
    points
        .iter()
        .min_by_key(|p| match p.distance(reference) {
            Some(d) => (false, d),
            None => (true, Duration::ZERO),
        })
}

/// Selects the closest point and returns its value truncated to an integer.
pub fn closest_value(
    points: &[ForecastPoint],
    reference: OffsetDateTime,
) -> Result<i64, SelectionError> {
    let point = closest(points, reference).ok_or(SelectionError::Empty)?;
    let date_time = point.date_time.ok_or(SelectionError::MissingTimestamp)?;
    let value = point.value.ok_or(SelectionError::MissingValue)?;
    tracing::trace!(%date_time, value, "selected forecast point");
    Ok(value as i64)
}

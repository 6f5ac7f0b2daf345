use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use exposition::forecast::SelectionError;

use crate::client::ClientError;

/// Reasons a scrape fails. All of them end the request; none are retried.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("zip parameter is required")]
    MissingZip,
    #[error("failed to fetch now state for zip {zip}")]
    Now {
        zip: String,
        #[source]
        source: ClientError,
    },
    #[error("failed to fetch forecast for zip {zip}")]
    Forecast {
        zip: String,
        #[source]
        source: ClientError,
    },
    #[error("failed to select {series} forecast point for zip {zip}")]
    Selection {
        zip: String,
        series: &'static str,
        #[source]
        source: SelectionError,
    },
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::MissingZip => StatusCode::BAD_REQUEST,
            Error::Now { .. } | Error::Forecast { .. } | Error::Selection { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Error::MissingZip => {
                tracing::debug!("rejecting scrape without zip");
                (status, Error::MissingZip.to_string()).into_response()
            }
            error => {
                tracing::error!(error = &error as &dyn std::error::Error, "scrape failed");
                status.into_response()
            }
        }
    }
}

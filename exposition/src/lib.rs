//! Hand-rolled Prometheus text exposition: gauges, labels, and a collection
//! that renders them with one HELP/TYPE header per metric name.

mod collection;
pub mod forecast;
mod labels;
pub mod metric;

pub use {
    collection::Metrics,
    labels::{Label, Labels},
    metric::{Gauge, Metric},
};

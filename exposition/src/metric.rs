use std::borrow::Cow;

use crate::labels::{Label, Labels};

pub const TYPE_GAUGE: &str = "gauge";

/// A single exported metric.
///
/// Every variant exposes the same three operations: a sort/dedup
/// [`key`](Metric::key), a HELP/TYPE [`header`](Metric::header) and a
/// [`sample`](Metric::sample) line.
#[derive(Debug, Clone, PartialEq)]
pub enum Metric {
    Gauge(Gauge),
}

impl Metric {
    /// Identity used for ordering and header deduplication; always the
    /// exposed metric name.
    pub fn key(&self) -> &str {
        match self {
            Metric::Gauge(g) => &g.name,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Metric::Gauge(_) => TYPE_GAUGE,
        }
    }

    fn description(&self) -> &str {
        match self {
            Metric::Gauge(g) => &g.description,
        }
    }

    /// Two lines, without a trailing newline:
    ///
    /// ```text
    /// # HELP <name> <description>
    /// # TYPE <name> <type>
    /// ```
    pub fn header(&self) -> String {
        let name = self.key();
        format!(
            "# HELP {name} {}\n# TYPE {name} {}",
            self.description(),
            self.type_name()
        )
    }

    /// `<name><labels> <value>`, without a trailing newline.
    pub fn sample(&self) -> String {
        match self {
            Metric::Gauge(g) => format!("{}{} {}", g.name, g.labels, g.value),
        }
    }
}

impl From<Gauge> for Metric {
    fn from(gauge: Gauge) -> Self {
        Metric::Gauge(gauge)
    }
}

/// Point-in-time integer value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gauge {
    pub name: String,
    pub value: i64,
    pub description: Cow<'static, str>,
    pub labels: Labels,
}

impl Gauge {
    pub fn new(
        name: impl Into<String>,
        value: i64,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            name: name.into(),
            value,
            description: description.into(),
            labels: Labels::default(),
        }
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.push(Label::new(key, value));
        self
    }
}

use std::fmt;

use rustc_hash::FxHashSet;

use crate::metric::Metric;

/// An ordered list of metrics that renders to the Prometheus text format.
///
/// Rendering walks the list in its current order; call [`Metrics::sort`]
/// first to get the canonical name order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metrics(Vec<Metric>);

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, metric: impl Into<Metric>) {
        self.0.push(metric.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Metric> {
        self.0.iter()
    }

    /// Sorts by key, byte-wise ascending. Stable: samples sharing a name
    /// keep their relative order.
    pub fn sort(&mut self) {
        self.0.sort_by(|a, b| a.key().cmp(b.key()));
    }

    pub fn sorted(mut self) -> Self {
        self.sort();
        self
    }
}

impl Extend<Metric> for Metrics {
    fn extend<T: IntoIterator<Item = Metric>>(&mut self, iter: T) {
        self.0.extend(iter)
    }
}

impl FromIterator<Metric> for Metrics {
    fn from_iter<T: IntoIterator<Item = Metric>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<Metric>> for Metrics {
    fn from(metrics: Vec<Metric>) -> Self {
        Self(metrics)
    }
}

/// Emits the HELP/TYPE header of a name the first time it is seen, then
/// one sample line per metric. Every line ends with `\n`.
impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut headered = FxHashSet::default();
        for metric in &self.0 {
            if headered.insert(metric.key()) {
                writeln!(f, "{}", metric.header())?;
            }
            writeln!(f, "{}", metric.sample())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::Gauge;
    use expect_test::expect;

    fn gauge(name: &str, value: i64) -> Metric {
        Gauge::new(name, value, format!("{name} help")).into()
    }

    #[test]
    fn test_empty() {
        assert_eq!(Metrics::new().to_string(), "");
        assert_eq!(Metrics::new().sorted().to_string(), "");
    }

    #[test]
    fn test_sort_by_name() {
        let metrics = Metrics::from(vec![
            gauge("b", 1),
            gauge("a_b", 2),
            gauge("a", 3),
            gauge("B", 4),
        ])
        .sorted();
        let keys = metrics.iter().map(Metric::key).collect::<Vec<_>>();
        // byte-wise: uppercase sorts before lowercase, `a` before `a_b`
        assert_eq!(keys, ["B", "a", "a_b", "b"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let metrics = Metrics::from(vec![
            Metric::from(Gauge::new("m", 1, "d").with_label("n", "1")),
            gauge("a", 0),
            Metric::from(Gauge::new("m", 2, "d").with_label("n", "2")),
            Metric::from(Gauge::new("m", 3, "d").with_label("n", "3")),
        ])
        .sorted();
        expect![[r#"
            # HELP a a help
            # TYPE a gauge
            a 0
            # HELP m d
            # TYPE m gauge
            m{n="1"} 1
            m{n="2"} 2
            m{n="3"} 3
        "#]]
        .assert_eq(&metrics.to_string());
    }

    #[test]
    fn test_header_once_per_name() {
        let mut metrics = Metrics::new();
        for i in 0..5 {
            metrics.push(Gauge::new("load", i, "Current in kWh").with_label("i", i.to_string()));
        }
        metrics.push(gauge("state", 1));
        let out = metrics.sorted().to_string();
        assert_eq!(out.matches("# HELP load ").count(), 1);
        assert_eq!(out.matches("# TYPE load gauge").count(), 1);
        assert_eq!(out.matches("# HELP state ").count(), 1);
        assert_eq!(out.lines().count(), 2 + 5 + 2 + 1);
    }

    #[test]
    fn test_unsorted_input_repeats_no_header() {
        // headers are keyed on name, even when the samples are not adjacent
        let metrics = Metrics::from(vec![gauge("x", 1), gauge("y", 2), gauge("x", 3)]);
        expect![[r#"
            # HELP x x help
            # TYPE x gauge
            x 1
            # HELP y y help
            # TYPE y gauge
            y 2
            x 3
        "#]]
        .assert_eq(&metrics.to_string());
    }

    #[test]
    fn test_print_is_idempotent() {
        let mut metrics = Metrics::from(vec![gauge("c", 3), gauge("a", 1), gauge("b", 2)]);
        metrics.sort();
        let first = metrics.to_string();
        // no state survives a render
        assert_eq!(metrics.to_string(), first);
        metrics.sort();
        assert_eq!(metrics.to_string(), first);
    }
}

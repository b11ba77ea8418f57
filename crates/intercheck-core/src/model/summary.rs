use std::collections::BTreeMap;

use intercheck_api::SummaryResponse;

/// Metrics shown for every summary window.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum SummaryMetric {
    Ping,
    Download,
    Upload,
    Downtime,
}

impl SummaryMetric {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Aggregate statistics as last received from the server.
///
/// Replaced wholesale on every successful refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct SummarySnapshot {
    stats: BTreeMap<String, BTreeMap<String, Vec<f64>>>,
    interval_label: String,
}

impl SummarySnapshot {
    pub fn new(
        stats: BTreeMap<String, BTreeMap<String, Vec<f64>>>,
        interval_label: impl Into<String>,
    ) -> Self {
        Self {
            stats,
            interval_label: interval_label.into(),
        }
    }

    /// Interval identifiers (days), in ascending numeric order when numeric.
    pub fn intervals(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.stats.keys().map(String::as_str).collect();
        keys.sort_by_key(|k| (k.parse::<u64>().unwrap_or(u64::MAX), *k));
        keys
    }

    /// Most recent value of `metric` over `interval`, if reported.
    pub fn latest(&self, interval: &str, metric: SummaryMetric) -> Option<f64> {
        self.stats
            .get(interval)?
            .get(metric.as_str())?
            .first()
            .copied()
    }

    pub fn interval_label(&self) -> &str {
        &self.interval_label
    }

    /// Raw metric series keyed by interval, then metric name.
    pub fn stats(&self) -> &BTreeMap<String, BTreeMap<String, Vec<f64>>> {
        &self.stats
    }
}

impl From<SummaryResponse> for SummarySnapshot {
    fn from(resp: SummaryResponse) -> Self {
        Self::new(resp.stats, resp.interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> SummarySnapshot {
        let mut stats = BTreeMap::new();
        stats.insert(
            "30".to_string(),
            BTreeMap::from([("ping".to_string(), vec![23.0, 2.0])]),
        );
        stats.insert(
            "1".to_string(),
            BTreeMap::from([("ping".to_string(), vec![21.5, 1.0]), ("upload".to_string(), vec![])]),
        );
        SummarySnapshot::new(stats, "30")
    }

    #[test]
    fn intervals_sort_numerically() {
        assert_eq!(snapshot().intervals(), vec!["1", "30"]);
    }

    #[test]
    fn latest_takes_head_of_series() {
        let snap = snapshot();
        assert_eq!(snap.latest("1", SummaryMetric::Ping), Some(21.5));
        assert_eq!(snap.latest("1", SummaryMetric::Upload), None);
        assert_eq!(snap.latest("1", SummaryMetric::Download), None);
        assert_eq!(snap.latest("7", SummaryMetric::Ping), None);
    }
}

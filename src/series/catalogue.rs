/// The fixed set of dashboard metrics and their chart presentation.
use chrono::NaiveDate;
use serde::Serialize;

use super::{MetricSeries, generate_with_spikes, month_start, MONTHS};
use crate::random::RandomSource;

/// Static definition of a charted metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSpec {
    pub key: &'static str,
    pub title: &'static str,
    pub color: &'static str,
    pub base_value: f64,
    pub volatility: f64,
    /// Divisor applied to raw values before charting.
    pub scale: f64,
}

pub static METRICS: [MetricSpec; 5] = [
    MetricSpec {
        key: "activeUsers",
        title: "Active Users (hundreds)",
        color: "#16db93",
        base_value: 1000.0,
        volatility: 500.0,
        scale: 100.0,
    },
    MetricSpec {
        key: "revenuePerUser",
        title: "Revenue per User ($)",
        color: "#efea5a",
        base_value: 50.0,
        volatility: 30.0,
        scale: 1.0,
    },
    MetricSpec {
        key: "conversionRate",
        title: "Conversion Rate (%)",
        color: "#f29e4c",
        base_value: 15.0,
        volatility: 8.0,
        scale: 1.0,
    },
    MetricSpec {
        key: "customerSatisfaction",
        title: "Customer Satisfaction (%)",
        color: "#1982c4",
        base_value: 85.0,
        volatility: 15.0,
        scale: 1.0,
    },
    MetricSpec {
        key: "churnRate",
        title: "Churn Rate (%)",
        color: "#ff595e",
        base_value: 5.0,
        volatility: 4.0,
        scale: 1.0,
    },
];

/// Chart y-axis range.
pub const Y_DOMAIN: (f64, f64) = (0.0, 100.0);

/// Chart x-axis range: first and last sample dates.
pub fn x_domain() -> (NaiveDate, NaiveDate) {
    (month_start(0), month_start(MONTHS - 1))
}

// ---------------------------------------------------------------------------
// Generated data
// ---------------------------------------------------------------------------

/// A generated series together with its definition.
#[derive(Debug, Clone)]
pub struct NamedSeries {
    pub spec: &'static MetricSpec,
    pub series: MetricSeries,
}

/// One chart point after scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: NaiveDate,
    pub y: f64,
}

impl NamedSeries {
    pub fn chart_points(&self) -> Vec<ChartPoint> {
        self.series
            .points()
            .iter()
            .map(|p| ChartPoint {
                x: p.date,
                y: p.value as f64 / self.spec.scale,
            })
            .collect()
    }
}

/// Generate every catalogue metric, in catalogue order.
pub fn generate_all(spike_chance: f64, rng: &mut dyn RandomSource) -> Vec<NamedSeries> {
    METRICS
        .iter()
        .map(|spec| NamedSeries {
            spec,
            series: generate_with_spikes(spec.base_value, spec.volatility, spike_chance, rng),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Key metric cards
// ---------------------------------------------------------------------------

/// A headline figure shown above the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeyMetric {
    pub title: &'static str,
    pub value: &'static str,
}

pub const KEY_METRICS: [KeyMetric; 3] = [
    KeyMetric {
        title: "Active Users",
        value: "1,234",
    },
    KeyMetric {
        title: "Total Revenue",
        value: "$45,678",
    },
    KeyMetric {
        title: "Conversion Rate",
        value: "2.4%",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ReplayRandom;

    #[test]
    fn generates_every_metric_in_order() {
        let all = generate_all(0.3, &mut ReplayRandom::new(vec![0.4, 0.6, 0.9]));
        let keys: Vec<&str> = all.iter().map(|n| n.spec.key).collect();
        assert_eq!(
            keys,
            [
                "activeUsers",
                "revenuePerUser",
                "conversionRate",
                "customerSatisfaction",
                "churnRate"
            ]
        );
        assert!(all.iter().all(|n| n.series.len() == 6));
    }

    #[test]
    fn active_users_are_charted_in_hundreds() {
        let all = generate_all(0.0, &mut ReplayRandom::constant(0.5));
        let points = all[0].chart_points();
        assert_eq!(points[0].y, 10.0);
        assert_eq!(all[1].chart_points()[0].y, 50.0);
    }

    #[test]
    fn x_domain_spans_january_to_june() {
        let (start, end) = x_domain();
        assert_eq!(start.to_string(), "2024-01-01");
        assert_eq!(end.to_string(), "2024-06-01");
    }
}

//! Mock metric series generation.
//!
//! A series is six monthly samples (January..June 2024) produced by a
//! bounded random walk that occasionally jumps ("spikes") to a randomly
//! signed offset from the baseline.

pub mod catalogue;

use chrono::NaiveDate;
use serde::Serialize;

use crate::random::RandomSource;

/// Number of monthly samples in every series.
pub const MONTHS: u32 = 6;

/// Year the series starts in.
pub const START_YEAR: i32 = 2024;

/// Default probability that a month is a spike.
pub const DEFAULT_SPIKE_CHANCE: f64 = 0.3;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One dated sample. Serializes the date as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricPoint {
    pub date: NaiveDate,
    pub value: u64,
}

/// Six chronological monthly samples for one metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MetricSeries {
    points: Vec<MetricPoint>,
}

impl MetricSeries {
    pub fn points(&self) -> &[MetricPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = u64> + '_ {
        self.points.iter().map(|p| p.value)
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// First day of the month at `index` (0 = January) in [`START_YEAR`].
pub fn month_start(index: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(START_YEAR, index + 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Generate a series with the default spike chance.
pub fn generate(base_value: f64, volatility: f64, rng: &mut dyn RandomSource) -> MetricSeries {
    generate_with_spikes(base_value, volatility, DEFAULT_SPIKE_CHANCE, rng)
}

/// Generate a six-month series.
///
/// Per month: a draw below `spike_chance` resets the running value to
/// `base ± volatility * (1 + r)`; otherwise the running value moves by
/// `(r - 0.5) * volatility / 2`. The result is rounded and floored at zero,
/// and that clamped value carries into the next month.
///
/// Never fails. Negative volatility or non-finite inputs still produce
/// six non-negative points.
pub fn generate_with_spikes(
    base_value: f64,
    volatility: f64,
    spike_chance: f64,
    rng: &mut dyn RandomSource,
) -> MetricSeries {
    let mut running = base_value;
    let mut points = Vec::with_capacity(MONTHS as usize);

    for index in 0..MONTHS {
        if rng.next_f64() < spike_chance {
            let sign = if rng.next_f64() < 0.5 { 1.0 } else { -1.0 };
            running = base_value + sign * volatility * (1.0 + rng.next_f64());
        } else {
            running += (rng.next_f64() - 0.5) * (volatility * 0.5);
        }

        running = clamp_sample(running);
        points.push(MetricPoint {
            date: month_start(index),
            value: running as u64,
        });
    }

    MetricSeries { points }
}

/// Round to the nearest integer and floor at zero. NaN and infinities map
/// to zero.
fn clamp_sample(value: f64) -> f64 {
    let rounded = value.round();
    if !rounded.is_finite() || rounded < 0.0 {
        0.0
    } else {
        rounded
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ReplayRandom, SeededRandom, ThreadRandom};

    #[test]
    fn series_has_six_monthly_points() {
        let series = generate(1000.0, 500.0, &mut ThreadRandom::new());
        assert_eq!(series.len(), 6);
        let dates: Vec<String> = series.points().iter().map(|p| p.date.to_string()).collect();
        assert_eq!(
            dates,
            [
                "2024-01-01",
                "2024-02-01",
                "2024-03-01",
                "2024-04-01",
                "2024-05-01",
                "2024-06-01"
            ]
        );
    }

    #[test]
    fn spike_then_walk_follows_draws() {
        // month 0: spike (0.1), positive sign (0.2), r = 0.5 -> 100 + 40 * 1.5
        // month 1: walk (0.9), r = 0.0 -> 160 - 0.5 * 20
        let mut rng = ReplayRandom::new(vec![0.1, 0.2, 0.5, 0.9, 0.0, 0.9, 0.5]);
        let series = generate_with_spikes(100.0, 40.0, 0.3, &mut rng);
        let values: Vec<u64> = series.values().collect();
        assert_eq!(values[0], 160);
        assert_eq!(values[1], 150);
    }

    #[test]
    fn negative_spike_is_clamped_to_zero() {
        // spike (0.0), negative sign (0.9), r = 0.9 -> 5 - 4 * 1.9 < 0
        let mut rng = ReplayRandom::new(vec![0.0, 0.9, 0.9]);
        let series = generate_with_spikes(5.0, 4.0, 0.3, &mut rng);
        assert!(series.values().all(|v| v == 0));
    }

    #[test]
    fn midpoint_walk_holds_baseline() {
        let mut rng = ReplayRandom::constant(0.5);
        let series = generate_with_spikes(85.0, 15.0, 0.0, &mut rng);
        assert!(series.values().all(|v| v == 85));
        assert_eq!(rng.consumed(), 12);
    }

    #[test]
    fn negative_volatility_still_clamps() {
        let series = generate(10.0, -500.0, &mut ThreadRandom::new());
        assert_eq!(series.len(), 6);
    }

    #[test]
    fn nan_baseline_clamps_to_zero() {
        let series = generate(f64::NAN, 10.0, &mut ThreadRandom::new());
        assert!(series.values().all(|v| v == 0));
    }

    #[test]
    fn inf_baseline_clamps_to_zero() {
        let series =
            generate_with_spikes(f64::INFINITY, 10.0, 0.0, &mut ReplayRandom::constant(0.5));
        assert_eq!(series.values().collect::<Vec<_>>(), [0; 6]);
    }

    #[test]
    fn inf_volatility_clamps_to_zero() {
        let series =
            generate_with_spikes(10.0, f64::INFINITY, 0.0, &mut ReplayRandom::constant(0.9));
        assert_eq!(series.values().collect::<Vec<_>>(), [0; 6]);

        // A spike to minus infinity floors the same way.
        let series =
            generate_with_spikes(10.0, f64::INFINITY, 1.0, &mut ReplayRandom::constant(0.9));
        assert!(series.values().all(|v| v == 0));
    }

    #[test]
    fn identical_seeds_give_identical_series() {
        let a = generate(50.0, 30.0, &mut SeededRandom::new(7));
        let b = generate(50.0, 30.0, &mut SeededRandom::new(7));
        assert_eq!(a, b);
    }

    #[test]
    fn series_serializes_as_point_array() {
        let series = generate_with_spikes(10.0, 0.0, 0.0, &mut ReplayRandom::constant(0.5));
        let json = serde_json::to_string(&series).unwrap();
        assert!(json.starts_with(r#"[{"date":"2024-01-01","value":10}"#));
    }
}

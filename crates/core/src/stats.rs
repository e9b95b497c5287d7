//! Statistics over completed speed-to-lead measurements: percentile
//! interpolation, contact rate, trend bucketing, and time-of-day
//! rendering.

use serde::{Deserialize, Serialize};

/// Interpolated percentile over an ascending-sorted slice.
///
/// Uses linear interpolation between order statistics (the "linear" /
/// R-7 method): for percentile P the fractional rank is
/// `(P/100) * (n-1)`, and the result interpolates between the two
/// nearest values, rounded to a whole minute. Returns `None` for an
/// empty slice.
pub fn percentile(sorted: &[i64], pct: f64) -> Option<i64> {
    if sorted.is_empty() {
        return None;
    }

    let index = (pct / 100.0) * (sorted.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;
    let weight = index - index.floor();

    let value = sorted[lower] as f64 * (1.0 - weight) + sorted[upper] as f64 * weight;
    Some(value.round() as i64)
}

/// The standard p50/p75/p90/p95 breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct Percentiles {
    pub p50: Option<i64>,
    pub p75: Option<i64>,
    pub p90: Option<i64>,
    pub p95: Option<i64>,
}

impl Percentiles {
    /// Compute the breakdown from an unsorted value set.
    pub fn compute(mut values: Vec<i64>) -> Self {
        values.sort_unstable();
        Self {
            p50: percentile(&values, 50.0),
            p75: percentile(&values, 75.0),
            p90: percentile(&values, 90.0),
            p95: percentile(&values, 95.0),
        }
    }
}

/// Share of leads contacted, as a whole percentage in `0..=100`.
/// Zero when there are no leads.
pub fn contact_rate(contacted: i64, total: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    ((contacted as f64 / total as f64) * 100.0).round() as i64
}

/// Round a fractional mean to a whole minute, passing `None` through.
pub fn round_mean(mean: Option<f64>) -> Option<i64> {
    mean.map(|m| m.round() as i64)
}

/// Calendar bucketing for trend rollups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendPeriod {
    #[default]
    Day,
    Week,
    Month,
}

impl TrendPeriod {
    /// PostgreSQL `to_char` pattern producing the period key. Weeks use
    /// the ISO year/week pair so days at a year boundary group with
    /// their ISO week's year.
    pub fn date_format(self) -> &'static str {
        match self {
            Self::Day => "YYYY-MM-DD",
            Self::Week => "IYYY-IW",
            Self::Month => "YYYY-MM",
        }
    }
}

/// Render an hour/minute pair as a 12-hour clock string (`"2:05 PM"`).
///
/// `hour` is a rounded mean of 0-23 hour values, `minute` of 0-59
/// minute values, each averaged independently (not a circular mean).
pub fn format_time_of_day(hour: i64, minute: i64) -> String {
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    let ampm = if hour >= 12 { "PM" } else { "AM" };
    format!("{hour12}:{minute:02} {ampm}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- percentile ----------------------------------------------------------

    #[test]
    fn percentile_of_empty_is_none() {
        assert_eq!(percentile(&[], 50.0), None);
        assert_eq!(percentile(&[], 0.0), None);
        assert_eq!(percentile(&[], 100.0), None);
    }

    #[test]
    fn percentile_endpoints_are_extremes() {
        let values = [3, 7, 12, 40, 99];
        assert_eq!(percentile(&values, 0.0), Some(3));
        assert_eq!(percentile(&values, 100.0), Some(99));
    }

    #[test]
    fn percentile_interpolates_between_order_statistics() {
        // index = 0.5 * 3 = 1.5 -> halfway between 20 and 30.
        assert_eq!(percentile(&[10, 20, 30, 40], 50.0), Some(25));
    }

    #[test]
    fn percentile_of_single_value_is_that_value() {
        assert_eq!(percentile(&[42], 50.0), Some(42));
        assert_eq!(percentile(&[42], 95.0), Some(42));
    }

    #[test]
    fn percentiles_compute_sorts_input() {
        let p = Percentiles::compute(vec![40, 10, 30, 20]);
        assert_eq!(p.p50, Some(25));
        // index = 0.75 * 3 = 2.25 -> 30 * 0.75 + 40 * 0.25 = 32.5 -> 33.
        assert_eq!(p.p75, Some(33));
    }

    #[test]
    fn percentiles_of_empty_are_all_none() {
        let p = Percentiles::compute(vec![]);
        assert_eq!(p.p50, None);
        assert_eq!(p.p75, None);
        assert_eq!(p.p90, None);
        assert_eq!(p.p95, None);
    }

    // -- contact_rate --------------------------------------------------------

    #[test]
    fn contact_rate_is_zero_without_leads() {
        assert_eq!(contact_rate(0, 0), 0);
    }

    #[test]
    fn contact_rate_rounds_to_whole_percent() {
        assert_eq!(contact_rate(1, 3), 33);
        assert_eq!(contact_rate(2, 3), 67);
        assert_eq!(contact_rate(5, 5), 100);
    }

    #[test]
    fn contact_rate_stays_in_bounds() {
        for contacted in 0..=10 {
            let rate = contact_rate(contacted, 10);
            assert!((0..=100).contains(&rate));
        }
    }

    // -- round_mean ----------------------------------------------------------

    #[test]
    fn round_mean_rounds_half_up() {
        assert_eq!(round_mean(Some(7.5)), Some(8));
        assert_eq!(round_mean(Some(7.4)), Some(7));
        assert_eq!(round_mean(None), None);
    }

    // -- TrendPeriod ---------------------------------------------------------

    #[test]
    fn trend_period_deserializes_lowercase() {
        assert_eq!(
            serde_json::from_str::<TrendPeriod>("\"week\"").unwrap(),
            TrendPeriod::Week
        );
        assert!(serde_json::from_str::<TrendPeriod>("\"fortnight\"").is_err());
    }

    #[test]
    fn trend_period_defaults_to_day() {
        assert_eq!(TrendPeriod::default(), TrendPeriod::Day);
        assert_eq!(TrendPeriod::Day.date_format(), "YYYY-MM-DD");
    }

    // -- format_time_of_day --------------------------------------------------

    #[test]
    fn formats_afternoon_with_pm() {
        assert_eq!(format_time_of_day(14, 5), "2:05 PM");
    }

    #[test]
    fn formats_midnight_and_noon() {
        assert_eq!(format_time_of_day(0, 30), "12:30 AM");
        assert_eq!(format_time_of_day(12, 0), "12:00 PM");
    }

    #[test]
    fn pads_single_digit_minutes() {
        assert_eq!(format_time_of_day(9, 7), "9:07 AM");
    }
}

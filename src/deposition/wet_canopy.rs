//! Wet-canopy override.
//!
//! After rain the canopy surface is wet and the stomatal pathway is
//! bypassed, so canopy resistance drops to zero for the rain hour and the
//! 3 hours that follow.
//!
//! `row_window` is the compatibility variant: it shifts the set of rain
//! row indices by 1..=3 positions and zeroes at each, which silently
//! narrows the window (in real hours) across gaps in the series.
//! `time_window` zeroes wherever the elapsed time since the last rain row
//! is within 3 hours and behaves correctly under irregular sampling.

use chrono::{Duration, NaiveDateTime};

use crate::utils::constants::WET_WINDOW_HOURS;

/// Positional wet window: rc zeroed at every rain row and the 3 rows
/// after it, truncated at the series end.
pub fn row_window(rc: &[f64], precipitation: &[f64]) -> Vec<f64> {
    debug_assert_eq!(rc.len(), precipitation.len());

    let mut rc_wet = rc.to_vec();
    for (i, p) in precipitation.iter().enumerate() {
        if *p > 0.0 {
            let end = (i + WET_WINDOW_HOURS).min(rc_wet.len().saturating_sub(1));
            for value in &mut rc_wet[i..=end] {
                *value = 0.0;
            }
        }
    }
    rc_wet
}

/// Time-based wet window: rc zeroed wherever the elapsed time since the
/// most recent rain row is at most 3 hours.
pub fn time_window(
    rc: &[f64],
    precipitation: &[f64],
    timestamps: &[NaiveDateTime],
) -> Vec<f64> {
    debug_assert_eq!(rc.len(), precipitation.len());
    debug_assert_eq!(rc.len(), timestamps.len());

    let window = Duration::hours(WET_WINDOW_HOURS as i64);
    let mut rc_wet = rc.to_vec();
    let mut last_rain: Option<NaiveDateTime> = None;

    for i in 0..rc_wet.len() {
        if precipitation[i] > 0.0 {
            last_rain = Some(timestamps[i]);
        }
        if let Some(rain_ts) = last_rain {
            if timestamps[i] - rain_ts <= window {
                rc_wet[i] = 0.0;
            }
        }
    }
    rc_wet
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn hourly(hours: &[u32]) -> Vec<NaiveDateTime> {
        hours
            .iter()
            .map(|h| {
                NaiveDate::from_ymd_opt(2023, 3, 1)
                    .unwrap()
                    .and_hms_opt(*h, 0, 0)
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_row_window_covers_three_following_rows() {
        let rc = vec![100.0; 8];
        let precip = vec![0.0, 0.4, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];

        let rc_wet = row_window(&rc, &precip);

        assert_eq!(rc_wet[0], 100.0);
        for i in 1..=4 {
            assert_eq!(rc_wet[i], 0.0, "row {} should be wet", i);
        }
        assert_eq!(rc_wet[5], 100.0);
    }

    #[test]
    fn test_row_window_truncates_at_series_end() {
        let rc = vec![100.0, 100.0];
        let precip = vec![0.0, 0.2];

        let rc_wet = row_window(&rc, &precip);
        assert_eq!(rc_wet, vec![100.0, 0.0]);
    }

    #[test]
    fn test_row_window_never_exceeds_dry_rc() {
        let rc = vec![50.0, 60.0, 70.0, 80.0, 90.0, 100.0];
        let precip = vec![0.0, 1.2, 0.0, 0.0, 0.5, 0.0];

        let rc_wet = row_window(&rc, &precip);
        for (wet, dry) in rc_wet.iter().zip(rc.iter()) {
            assert!(wet <= dry);
        }
        // no rain within the preceding 3 rows: untouched
        assert_eq!(rc_wet[0], rc[0]);
    }

    #[test]
    fn test_time_window_spans_real_hours_across_gap() {
        // rows at 01:00 (rain), 02:00, 06:00 - the 06:00 row is 5 real
        // hours after the rain and must stay dry
        let timestamps = hourly(&[1, 2, 6]);
        let rc = vec![100.0; 3];
        let precip = vec![0.5, 0.0, 0.0];

        let rc_wet = time_window(&rc, &precip, &timestamps);
        assert_eq!(rc_wet, vec![0.0, 0.0, 100.0]);

        // the positional variant wrongly wets the 06:00 row
        let rc_row = row_window(&rc, &precip);
        assert_eq!(rc_row, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_time_window_inclusive_three_hours() {
        let timestamps = hourly(&[0, 1, 2, 3, 4]);
        let rc = vec![100.0; 5];
        let precip = vec![0.3, 0.0, 0.0, 0.0, 0.0];

        let rc_wet = time_window(&rc, &precip, &timestamps);
        assert_eq!(rc_wet, vec![0.0, 0.0, 0.0, 0.0, 100.0]);
    }
}

//! Collapse the provider's 3-hourly feed into one entry per calendar day.

use std::collections::HashSet;

use chrono::{Local, NaiveDate, TimeZone};

use crate::types::{DailyForecast, ForecastPoint};

/// Number of days shown in the forecast strip
pub const MAX_FORECAST_DAYS: usize = 5;

/// Lazy iterator yielding the first point seen for each calendar day.
///
/// Stops pulling from the source once `max_days` dates have been produced.
pub struct Daily<I, Tz: TimeZone> {
    points: I,
    tz: Tz,
    seen: HashSet<NaiveDate>,
    max_days: usize,
}

impl<'a, I, Tz> Iterator for Daily<I, Tz>
where
    I: Iterator<Item = &'a ForecastPoint>,
    Tz: TimeZone,
{
    type Item = DailyForecast;

    fn next(&mut self) -> Option<Self::Item> {
        if self.seen.len() >= self.max_days {
            return None;
        }

        for point in self.points.by_ref() {
            let date = point.timestamp.with_timezone(&self.tz).date_naive();
            if self.seen.insert(date) {
                return Some(DailyForecast {
                    date,
                    point: point.clone(),
                });
            }
        }

        None
    }
}

/// Build a per-day iterator over `points` in the given timezone
pub fn daily<'a, I, Tz>(points: I, max_days: usize, tz: Tz) -> Daily<I::IntoIter, Tz>
where
    I: IntoIterator<Item = &'a ForecastPoint>,
    Tz: TimeZone,
{
    Daily {
        points: points.into_iter(),
        tz,
        seen: HashSet::new(),
        max_days,
    }
}

/// One entry per calendar day in `tz`, first-seen wins, at most `max_days`
pub fn reduce_daily_in<Tz: TimeZone>(
    points: &[ForecastPoint],
    max_days: usize,
    tz: Tz,
) -> Vec<DailyForecast> {
    daily(points, max_days, tz).collect()
}

/// One entry per calendar day in the viewer's local timezone
pub fn reduce_daily(points: &[ForecastPoint], max_days: usize) -> Vec<DailyForecast> {
    reduce_daily_in(points, max_days, Local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ConditionCategory;
    use chrono::{DateTime, FixedOffset, Utc};

    const DAY: i64 = 86_400;
    // 2024-03-04 12:00:00 UTC
    const T: i64 = 1_709_553_600;

    fn point(ts: i64, temp_max: f64) -> ForecastPoint {
        ForecastPoint {
            timestamp: DateTime::<Utc>::from_timestamp(ts, 0).unwrap(),
            temp_max,
            temp_min: temp_max - 8.0,
            condition: ConditionCategory::Clouds,
        }
    }

    fn feed() -> Vec<ForecastPoint> {
        vec![
            point(T, 20.0),
            point(T + 100, 99.0),
            point(T + DAY, 21.0),
            point(T + 2 * DAY, 22.0),
            point(T + 3 * DAY, 23.0),
            point(T + 4 * DAY, 24.0),
            point(T + 5 * DAY, 25.0),
        ]
    }

    #[test]
    fn test_six_days_with_duplicate_yields_five() {
        let daily = reduce_daily_in(&feed(), 5, Utc);

        assert_eq!(daily.len(), 5);
        assert_eq!(daily[0].point.timestamp.timestamp(), T);
        assert_eq!(daily[0].point.temp_max, 20.0);
        assert_eq!(daily[4].point.timestamp.timestamp(), T + 4 * DAY);
    }

    #[test]
    fn test_first_seen_wins_in_local_time() {
        let daily = reduce_daily(&feed(), MAX_FORECAST_DAYS);

        assert_eq!(daily.len(), 5);
        assert_eq!(daily[0].point.timestamp.timestamp(), T);
    }

    #[test]
    fn test_fewer_days_than_max_is_not_padded() {
        let points = vec![point(T, 20.0), point(T + 3 * 3600, 21.0), point(T + DAY, 22.0)];
        let daily = reduce_daily_in(&points, 5, Utc);

        assert_eq!(daily.len(), 2);
    }

    #[test]
    fn test_empty_feed() {
        assert!(reduce_daily_in(&[], 5, Utc).is_empty());
    }

    #[test]
    fn test_zero_max_days() {
        assert!(reduce_daily_in(&feed(), 0, Utc).is_empty());
    }

    #[test]
    fn test_dates_are_unique_and_capped() {
        // 3-hourly feed over 6 days
        let points: Vec<_> = (0..48).map(|i| point(T + i * 3 * 3600, i as f64)).collect();
        let daily = reduce_daily_in(&points, 5, Utc);

        assert_eq!(daily.len(), 5);
        let dates: HashSet<_> = daily.iter().map(|d| d.date).collect();
        assert_eq!(dates.len(), daily.len());
    }

    #[test]
    fn test_idempotent_on_reduced_output() {
        let once = reduce_daily_in(&feed(), 5, Utc);
        let points: Vec<_> = once.iter().map(|d| d.point.clone()).collect();
        let twice = reduce_daily_in(&points, 5, Utc);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_calendar_date_follows_timezone() {
        // 23:30 UTC on the 4th and 00:30 UTC on the 5th
        let late = T + 11 * 3600 + 1800;
        let points = vec![point(late, 1.0), point(late + 3600, 2.0)];

        assert_eq!(reduce_daily_in(&points, 5, Utc).len(), 2);

        // Both fall on the 4th in UTC-5
        let est = FixedOffset::west_opt(5 * 3600).unwrap();
        let daily = reduce_daily_in(&points, 5, est);
        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
    }

    #[test]
    fn test_iteration_short_circuits() {
        let points = feed();
        let mut source = points.iter();
        let collected: Vec<_> = daily(source.by_ref(), 2, Utc).collect();

        assert_eq!(collected.len(), 2);
        // Stopped right after the second distinct day (T, T+100, T+DAY)
        assert_eq!(source.len(), points.len() - 3);
    }
}

//! Rendering of publication times.

use std::fmt::Display;

use chrono::{DateTime, Duration, TimeZone, Utc};

/// Human readable age of an article, e.g. `"5 minutes ago"`.
///
/// Buckets are minutes below one hour, hours below one day, days otherwise.
/// Values are truncated, never rounded. A publication time in the future
/// renders as `"0 minutes ago"`.
pub fn relative_age(published: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(published).max(Duration::zero());

    if elapsed.num_minutes() < 60 {
        format!("{} minutes ago", elapsed.num_minutes())
    } else if elapsed.num_hours() < 24 {
        format!("{} hours ago", elapsed.num_hours())
    } else {
        format!("{} days ago", elapsed.num_days())
    }
}

/// Compact `M/dd HH:mm` rendering used on article cards.
pub fn short_timestamp<Tz>(instant: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    instant.format("%-m/%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn published() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 4, 1, 16, 18, 13).unwrap()
    }

    fn age_after(elapsed: Duration) -> String {
        relative_age(published(), published() + elapsed)
    }

    #[test]
    fn test_minutes_bucket() {
        assert_eq!(age_after(Duration::zero()), "0 minutes ago");
        assert_eq!(age_after(Duration::seconds(59)), "0 minutes ago");
        assert_eq!(age_after(Duration::minutes(59)), "59 minutes ago");
    }

    #[test]
    fn test_hour_boundary_is_not_pluralised() {
        assert_eq!(age_after(Duration::minutes(60)), "1 hours ago");
    }

    #[test]
    fn test_hours_bucket_truncates() {
        assert_eq!(
            age_after(Duration::hours(23) + Duration::minutes(59)),
            "23 hours ago"
        );
        assert_eq!(
            age_after(Duration::hours(2) + Duration::minutes(45)),
            "2 hours ago"
        );
    }

    #[test]
    fn test_days_bucket() {
        assert_eq!(age_after(Duration::hours(24)), "1 days ago");
        assert_eq!(age_after(Duration::hours(71)), "2 days ago");
        assert_eq!(age_after(Duration::days(400)), "400 days ago");
    }

    #[test]
    fn test_future_publication_clamps_to_zero() {
        assert_eq!(age_after(Duration::minutes(-30)), "0 minutes ago");
        assert_eq!(age_after(Duration::days(-3)), "0 minutes ago");
    }

    #[test]
    fn test_short_timestamp() {
        assert_eq!(short_timestamp(&published()), "4/01 16:18");

        let late = Utc.with_ymd_and_hms(2021, 12, 24, 9, 5, 0).unwrap();
        assert_eq!(short_timestamp(&late), "12/24 09:05");
    }
}

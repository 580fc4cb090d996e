//! Clock text and next sunrise/sunset countdown.

use chrono::{DateTime, Days, TimeZone, Utc};
use haneul_core::{Location, TimeFormat};

use crate::astronomy::AstronomyProvider;

const HOUR_MS: i64 = 3_600_000;
const MINUTE_MS: i64 = 60_000;

/// Format the wall clock for display.
pub fn format_clock<Tz: TimeZone>(now: &DateTime<Tz>, format: TimeFormat, seconds: bool) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let pattern = match (format, seconds) {
        (TimeFormat::TwentyFourHour, true) => "%H:%M:%S",
        (TimeFormat::TwentyFourHour, false) => "%H:%M",
        (TimeFormat::TwelveHour, true) => "%I:%M:%S %p",
        (TimeFormat::TwelveHour, false) => "%I:%M %p",
    };
    now.format(pattern).to_string()
}

/// Long-form date, e.g. "Saturday, October 17, 2026".
pub fn format_date<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%A, %B %d, %Y").to_string()
}

/// "sunrise in 1h 30m" / "sunset in 11h 45m" for the next day boundary.
///
/// Before today's sunrise counts down to it, before sunset counts down to
/// sunset, and after sunset asks `provider` for tomorrow's sunrise. Hours
/// and minutes are floored; seconds are dropped.
pub fn label<Tz, P>(
    now: &DateTime<Tz>,
    sunrise: Option<DateTime<Utc>>,
    sunset: Option<DateTime<Utc>>,
    provider: &P,
    location: Location,
) -> String
where
    Tz: TimeZone,
    P: AstronomyProvider + ?Sized,
{
    let now = now.with_timezone(&Utc);

    if let Some(rise) = sunrise
        && now < rise
    {
        return countdown("sunrise", rise - now);
    }
    if let Some(set) = sunset
        && now < set
    {
        return countdown("sunset", set - now);
    }
    if sunrise.is_none() && sunset.is_none() {
        return "no sunrise or sunset today".to_string();
    }

    let Some(tomorrow) = now.checked_add_days(Days::new(1)) else {
        return "no sunrise tomorrow".to_string();
    };
    match provider.times(tomorrow, location).sunrise {
        Some(rise) => countdown("sunrise", rise - now),
        None => "no sunrise tomorrow".to_string(),
    }
}

fn countdown(event: &str, diff: chrono::TimeDelta) -> String {
    let ms = diff.num_milliseconds().max(0);
    let hours = ms / HOUR_MS;
    let minutes = (ms % HOUR_MS) / MINUTE_MS;
    format!("{event} in {hours}h {minutes}m")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astronomy::{MoonIllumination, SunCalc, SunTimes};
    use chrono::FixedOffset;
    use haneul_core::Horizontal;
    use std::cell::RefCell;

    /// Provider that answers every `times` query with a fixed sunrise and
    /// records the instants it was asked about.
    struct FixedSunrise {
        sunrise: Option<DateTime<Utc>>,
        queries: RefCell<Vec<DateTime<Utc>>>,
    }

    impl AstronomyProvider for FixedSunrise {
        fn times(&self, at: DateTime<Utc>, _location: Location) -> SunTimes {
            self.queries.borrow_mut().push(at);
            SunTimes {
                sunrise: self.sunrise,
                ..Default::default()
            }
        }
        fn sun_position(&self, _at: DateTime<Utc>, _location: Location) -> Horizontal {
            Horizontal::default()
        }
        fn moon_position(&self, _at: DateTime<Utc>, _location: Location) -> Horizontal {
            Horizontal::default()
        }
        fn moon_illumination(&self, _at: DateTime<Utc>) -> MoonIllumination {
            MoonIllumination::default()
        }
    }

    fn local(day: u32, h: u32, m: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(9 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 10, day, h, m, 0)
            .unwrap()
    }

    fn utc(day: u32, h: u32, m: u32) -> DateTime<Utc> {
        local(day, h, m).with_timezone(&Utc)
    }

    fn provider(sunrise: Option<DateTime<Utc>>) -> FixedSunrise {
        FixedSunrise {
            sunrise,
            queries: RefCell::new(Vec::new()),
        }
    }

    #[test]
    fn test_before_sunrise() {
        let p = provider(None);
        let text = label(
            &local(17, 5, 0),
            Some(utc(17, 6, 30)),
            Some(utc(17, 19, 45)),
            &p,
            Location::default(),
        );
        assert_eq!(text, "sunrise in 1h 30m");
        assert!(p.queries.borrow().is_empty());
    }

    #[test]
    fn test_before_sunset() {
        let p = provider(None);
        let text = label(
            &local(17, 8, 0),
            Some(utc(17, 6, 30)),
            Some(utc(17, 19, 45)),
            &p,
            Location::default(),
        );
        assert_eq!(text, "sunset in 11h 45m");
    }

    #[test]
    fn test_after_sunset_uses_tomorrow() {
        let p = provider(Some(utc(18, 6, 31)));
        let now = local(17, 20, 0);
        let text = label(
            &now,
            Some(utc(17, 6, 30)),
            Some(utc(17, 19, 45)),
            &p,
            Location::default(),
        );
        assert_eq!(text, "sunrise in 10h 31m");
        let queries = p.queries.borrow();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0], utc(18, 20, 0));
    }

    #[test]
    fn test_minutes_are_floored() {
        let p = provider(None);
        let now = local(17, 5, 0) + chrono::TimeDelta::seconds(59);
        let text = label(&now, Some(utc(17, 6, 30)), None, &p, Location::default());
        assert_eq!(text, "sunrise in 1h 29m");
    }

    #[test]
    fn test_polar_labels() {
        let p = provider(None);
        let now = local(17, 12, 0);
        assert_eq!(
            label(&now, None, None, &p, Location::default()),
            "no sunrise or sunset today"
        );
        assert_eq!(
            label(&now, Some(utc(17, 6, 0)), Some(utc(17, 7, 0)), &p, Location::default()),
            "no sunrise tomorrow"
        );
    }

    #[test]
    fn test_with_suncalc_after_sunset() {
        let now = local(17, 23, 0);
        let times = SunCalc.times(now.with_timezone(&Utc), Location::default());
        let text = label(&now, times.sunrise, times.sunset, &SunCalc, Location::default());
        assert!(text.starts_with("sunrise in 7h"), "{text}");
    }

    #[test]
    fn test_format_clock() {
        let t = local(17, 14, 5) + chrono::TimeDelta::seconds(9);
        assert_eq!(format_clock(&t, TimeFormat::TwentyFourHour, true), "14:05:09");
        assert_eq!(format_clock(&t, TimeFormat::TwentyFourHour, false), "14:05");
        assert_eq!(format_clock(&t, TimeFormat::TwelveHour, true), "02:05:09 PM");
        assert_eq!(format_clock(&t, TimeFormat::TwelveHour, false), "02:05 PM");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(&local(17, 9, 0)), "Saturday, October 17, 2026");
    }
}

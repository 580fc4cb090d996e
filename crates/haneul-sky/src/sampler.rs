//! Wall-clock sampling.

use chrono::{DateTime, TimeZone, Timelike, Utc};
use haneul_core::{Location, TimeSample};

use crate::astronomy::AstronomyProvider;
use crate::location::LocationCell;

/// Local hour of day from wall-clock fields: `h + m/60 + s/3600`.
///
/// Always in `[0, 24)`.
pub fn fractional_hour<Tz: TimeZone>(now: &DateTime<Tz>) -> f32 {
    now.hour() as f32 + now.minute() as f32 / 60.0 + now.second() as f32 / 3600.0
}

/// Builds a [`TimeSample`] for "now" at the shared location.
#[derive(Debug, Clone)]
pub struct TimeSampler<P> {
    provider: P,
    location: LocationCell,
}

impl<P: AstronomyProvider> TimeSampler<P> {
    pub fn new(provider: P, location: LocationCell) -> Self {
        Self { provider, location }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn location(&self) -> Location {
        self.location.get()
    }

    pub fn location_cell(&self) -> &LocationCell {
        &self.location
    }

    /// Sample at the current shared location.
    pub fn sample<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> TimeSample {
        self.sample_at(now, self.location.get())
    }

    /// Sample at an explicit location.
    pub fn sample_at<Tz: TimeZone>(&self, now: &DateTime<Tz>, location: Location) -> TimeSample {
        let utc = now.with_timezone(&Utc);
        let times = self.provider.times(utc, location);
        let illumination = self.provider.moon_illumination(utc);

        TimeSample {
            instant: now.fixed_offset(),
            fractional_hour: fractional_hour(now),
            sun: self.provider.sun_position(utc, location),
            moon: self.provider.moon_position(utc, location),
            moon_illumination: illumination.fraction.clamp(0.0, 1.0) as f32,
            sunrise: times.sunrise,
            sunset: times.sunset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astronomy::SunCalc;
    use chrono::FixedOffset;

    fn seoul_time(h: u32, m: u32, s: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(9 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 17, h, m, s)
            .unwrap()
    }

    #[test]
    fn test_fractional_hour() {
        assert_eq!(fractional_hour(&seoul_time(0, 0, 0)), 0.0);
        assert!((fractional_hour(&seoul_time(13, 30, 36)) - 13.51).abs() < 1e-4);
        let late = fractional_hour(&seoul_time(23, 59, 59));
        assert!(late < 24.0 && late > 23.99);
    }

    #[test]
    fn test_fractional_hour_uses_local_fields() {
        let local = seoul_time(6, 0, 0);
        assert_eq!(fractional_hour(&local), 6.0);
        assert_eq!(fractional_hour(&local.with_timezone(&Utc)), 21.0);
    }

    #[test]
    fn test_sample_noon_sun_is_up() {
        let sampler = TimeSampler::new(SunCalc, LocationCell::default());
        let sample = sampler.sample(&seoul_time(12, 30, 0));
        assert!(sample.sun.altitude > 0.5);
        let (rise, set) = (sample.sunrise.unwrap(), sample.sunset.unwrap());
        assert!(rise < sample.instant && sample.instant < set);
    }

    #[test]
    fn test_sample_midnight_sun_is_down() {
        let sampler = TimeSampler::new(SunCalc, LocationCell::default());
        let sample = sampler.sample(&seoul_time(0, 30, 0));
        assert!(sample.sun.altitude < 0.0);
        assert!((0.0..=1.0).contains(&sample.moon_illumination));
    }
}

//! Sun and moon ephemeris.
//!
//! [`AstronomyProvider`] is the seam the rest of the engine talks to.
//! [`SunCalc`] implements it with the usual low-precision formulas (good to
//! roughly a minute for rise/set times), which is plenty for picking sky
//! colors.

use std::f64::consts::PI;

use chrono::{DateTime, Utc};
use haneul_core::{Horizontal, Location};

const RAD: f64 = PI / 180.0;
const DAY_MS: f64 = 1000.0 * 60.0 * 60.0 * 24.0;
const J1970: f64 = 2_440_588.0;
const J2000: f64 = 2_451_545.0;
const J0: f64 = 0.0009;

/// Obliquity of the ecliptic.
const OBLIQUITY: f64 = RAD * 23.4397;

/// Mean Earth–Sun distance in km.
const SUN_DISTANCE_KM: f64 = 149_598_000.0;

/// Sun altitude at sunrise/sunset, accounting for refraction and disk size.
const SUNRISE_ANGLE: f64 = -0.833;
/// Civil twilight.
const TWILIGHT_ANGLE: f64 = -6.0;
const GOLDEN_HOUR_ANGLE: f64 = 6.0;

/// Day-boundary events for one solar day. `None` where the sun never reaches
/// the event altitude (polar day or night).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SunTimes {
    pub solar_noon: Option<DateTime<Utc>>,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    pub dawn: Option<DateTime<Utc>>,
    pub dusk: Option<DateTime<Utc>>,
    pub golden_hour_end: Option<DateTime<Utc>>,
    pub golden_hour: Option<DateTime<Utc>>,
}

/// Lit portion of the moon.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoonIllumination {
    /// Illuminated fraction, 0 (new) to 1 (full).
    pub fraction: f64,
    /// Phase, 0 new, 0.25 first quarter, 0.5 full, 0.75 last quarter.
    pub phase: f64,
    /// Midpoint angle of the bright limb, radians.
    pub angle: f64,
}

/// Source of sun/moon positions and day-boundary times.
///
/// Angles are radians; altitude from the horizon, azimuth from south toward
/// west.
pub trait AstronomyProvider {
    fn times(&self, at: DateTime<Utc>, location: Location) -> SunTimes;
    fn sun_position(&self, at: DateTime<Utc>, location: Location) -> Horizontal;
    fn moon_position(&self, at: DateTime<Utc>, location: Location) -> Horizontal;
    fn moon_illumination(&self, at: DateTime<Utc>) -> MoonIllumination;
}

/// Closed-form ephemeris after Vladimir Agafonkin's suncalc.
#[derive(Debug, Clone, Copy, Default)]
pub struct SunCalc;

impl AstronomyProvider for SunCalc {
    fn times(&self, at: DateTime<Utc>, location: Location) -> SunTimes {
        let lw = RAD * -location.lng;
        let phi = RAD * location.lat;

        let d = to_days(at);
        let n = julian_cycle(d, lw);
        let ds = approx_transit(0.0, lw, n);

        let m = solar_mean_anomaly(ds);
        let l = ecliptic_longitude(m);
        let dec = declination(l, 0.0);

        let j_noon = solar_transit_j(ds, m, l);

        let event = |angle: f64| -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
            let j_set = get_set_j(angle * RAD, lw, phi, dec, n, m, l);
            let j_rise = j_noon - (j_set - j_noon);
            (from_julian(j_rise), from_julian(j_set))
        };

        let (sunrise, sunset) = event(SUNRISE_ANGLE);
        let (dawn, dusk) = event(TWILIGHT_ANGLE);
        let (golden_hour_end, golden_hour) = event(GOLDEN_HOUR_ANGLE);

        SunTimes {
            solar_noon: from_julian(j_noon),
            sunrise,
            sunset,
            dawn,
            dusk,
            golden_hour_end,
            golden_hour,
        }
    }

    fn sun_position(&self, at: DateTime<Utc>, location: Location) -> Horizontal {
        let lw = RAD * -location.lng;
        let phi = RAD * location.lat;
        let d = to_days(at);

        let c = sun_coords(d);
        let h = sidereal_time(d, lw) - c.ra;

        Horizontal {
            altitude: altitude(h, phi, c.dec),
            azimuth: azimuth(h, phi, c.dec),
        }
    }

    fn moon_position(&self, at: DateTime<Utc>, location: Location) -> Horizontal {
        let lw = RAD * -location.lng;
        let phi = RAD * location.lat;
        let d = to_days(at);

        let c = moon_coords(d);
        let h = sidereal_time(d, lw) - c.ra;
        let alt = altitude(h, phi, c.dec);

        Horizontal {
            altitude: alt + astro_refraction(alt),
            azimuth: azimuth(h, phi, c.dec),
        }
    }

    fn moon_illumination(&self, at: DateTime<Utc>) -> MoonIllumination {
        let d = to_days(at);
        let s = sun_coords(d);
        let m = moon_coords(d);

        let phi = (s.dec.sin() * m.dec.sin() + s.dec.cos() * m.dec.cos() * (s.ra - m.ra).cos())
            .clamp(-1.0, 1.0)
            .acos();
        let inc = (SUN_DISTANCE_KM * phi.sin()).atan2(m.dist - SUN_DISTANCE_KM * phi.cos());
        let angle = (s.dec.cos() * (s.ra - m.ra).sin()).atan2(
            s.dec.sin() * m.dec.cos() - s.dec.cos() * m.dec.sin() * (s.ra - m.ra).cos(),
        );
        let sign = if angle < 0.0 { -1.0 } else { 1.0 };

        MoonIllumination {
            fraction: (1.0 + inc.cos()) / 2.0,
            phase: 0.5 + 0.5 * inc * sign / PI,
            angle,
        }
    }
}

struct EquatorialCoords {
    ra: f64,
    dec: f64,
    /// Distance in km (moon only; zero for the sun).
    dist: f64,
}

fn to_julian(at: DateTime<Utc>) -> f64 {
    at.timestamp_millis() as f64 / DAY_MS - 0.5 + J1970
}

fn from_julian(j: f64) -> Option<DateTime<Utc>> {
    if !j.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(((j + 0.5 - J1970) * DAY_MS).round() as i64)
}

fn to_days(at: DateTime<Utc>) -> f64 {
    to_julian(at) - J2000
}

fn right_ascension(l: f64, b: f64) -> f64 {
    (l.sin() * OBLIQUITY.cos() - b.tan() * OBLIQUITY.sin()).atan2(l.cos())
}

fn declination(l: f64, b: f64) -> f64 {
    (b.sin() * OBLIQUITY.cos() + b.cos() * OBLIQUITY.sin() * l.sin()).asin()
}

fn azimuth(h: f64, phi: f64, dec: f64) -> f64 {
    h.sin().atan2(h.cos() * phi.sin() - dec.tan() * phi.cos())
}

fn altitude(h: f64, phi: f64, dec: f64) -> f64 {
    (phi.sin() * dec.sin() + phi.cos() * dec.cos() * h.cos()).asin()
}

fn sidereal_time(d: f64, lw: f64) -> f64 {
    RAD * (280.16 + 360.985_623_5 * d) - lw
}

fn astro_refraction(h: f64) -> f64 {
    // Formula is only valid above the horizon.
    let h = h.max(0.0);
    0.000_296_7 / (h + 0.003_125_36 / (h + 0.089_011_79)).tan()
}

fn solar_mean_anomaly(d: f64) -> f64 {
    RAD * (357.5291 + 0.985_600_28 * d)
}

fn ecliptic_longitude(m: f64) -> f64 {
    let center = RAD * (1.9148 * m.sin() + 0.02 * (2.0 * m).sin() + 0.0003 * (3.0 * m).sin());
    let perihelion = RAD * 102.9372;
    m + center + perihelion + PI
}

fn sun_coords(d: f64) -> EquatorialCoords {
    let m = solar_mean_anomaly(d);
    let l = ecliptic_longitude(m);
    EquatorialCoords {
        ra: right_ascension(l, 0.0),
        dec: declination(l, 0.0),
        dist: 0.0,
    }
}

fn moon_coords(d: f64) -> EquatorialCoords {
    let l = RAD * (218.316 + 13.176_396 * d);
    let m = RAD * (134.963 + 13.064_993 * d);
    let f = RAD * (93.272 + 13.229_350 * d);

    let lon = l + RAD * 6.289 * m.sin();
    let lat = RAD * 5.128 * f.sin();

    EquatorialCoords {
        ra: right_ascension(lon, lat),
        dec: declination(lon, lat),
        dist: 385_001.0 - 20_905.0 * m.cos(),
    }
}

fn julian_cycle(d: f64, lw: f64) -> f64 {
    (d - J0 - lw / (2.0 * PI)).round()
}

fn approx_transit(ht: f64, lw: f64, n: f64) -> f64 {
    J0 + (ht + lw) / (2.0 * PI) + n
}

fn solar_transit_j(ds: f64, m: f64, l: f64) -> f64 {
    J2000 + ds + 0.0053 * m.sin() - 0.0069 * (2.0 * l).sin()
}

/// Hour angle at which the sun reaches altitude `h`; NaN when it never does.
fn hour_angle(h: f64, phi: f64, dec: f64) -> f64 {
    ((h.sin() - phi.sin() * dec.sin()) / (phi.cos() * dec.cos())).acos()
}

fn get_set_j(h: f64, lw: f64, phi: f64, dec: f64, n: f64, m: f64, l: f64) -> f64 {
    let w = hour_angle(h, phi, dec);
    let a = approx_transit(w, lw, n);
    solar_transit_j(a, m, l)
}

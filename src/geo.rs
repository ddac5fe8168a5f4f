/*!
 * Geographic calculations.
 *
 * All distance comparisons in this crate happen in a planar (meters) coordinate system, so the
 * main job of this module is the fixed WGS84 → Web Mercator (EPSG:3857 equivalent) transform.
 * There is also a simple great circle distance calculation used for reporting.
 */

use crate::error::InvalidInputError;

/// WGS84 semi-major axis, the earth radius used by the spherical Web Mercator projection.
const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Conversion factor for the feet based distances used at the command line.
pub const METERS_PER_FOOT: f64 = 0.3048;

/**
 * A geographic coordinate in WGS84 degrees.
 */
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
    /// Latitude in degrees, valid range [-90, 90].
    pub lat: f64,
    /// Longitude in degrees, valid range [-180, 180].
    pub lon: f64,
}

impl Coord {
    /// Check that both values are inside their valid ranges. NaN values fail the check.
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lon >= -180.0 && self.lon <= 180.0
    }

    /// Return an [InvalidInputError] describing this coordinate if it is out of range.
    pub(crate) fn validate(&self) -> Result<(), InvalidInputError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(InvalidInputError::new(format!(
                "latitude / longitude out of range: ({}, {})",
                self.lat, self.lon
            )))
        }
    }

    /**
     * Project this coordinate into the planar Web Mercator system.
     *
     * The projection preserves local Euclidean distance well enough at mid-latitudes for the
     * fixed radius neighborhood queries this crate performs, which operate at scales of a few
     * hundred meters.
     */
    pub fn project(&self) -> ProjectedCoord {
        const DEG2RAD: f64 = std::f64::consts::PI / 180.0;

        let x = EARTH_RADIUS_M * self.lon * DEG2RAD;
        let y = EARTH_RADIUS_M * f64::ln(f64::tan(
            std::f64::consts::FRAC_PI_4 + self.lat * DEG2RAD / 2.0,
        ));

        ProjectedCoord { x, y }
    }
}

/**
 * A point in the planar (meters) Web Mercator coordinate system.
 *
 * Always derived from a [Coord], never read from upstream data.
 */
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedCoord {
    pub x: f64,
    pub y: f64,
}

impl ProjectedCoord {
    /// Euclidean distance to another projected point in meters.
    pub fn distance(&self, other: &ProjectedCoord) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        f64::sqrt(dx * dx + dy * dy)
    }
}

/**
 * The simple great circle distance calculation.
 *
 * #Arguments
 * * lat1 - the latitude of the first point in degrees.
 * * lon1 - the longitude of the first point in degrees.
 * * lat2 - the latitude of the second point in degrees.
 * * lon2 - the longitude of the second point in degrees.
 *
 * #Returns
 * The distance between the points in kilometers.
 */
pub fn great_circle_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    const DEG2RAD: f64 = 2.0 * std::f64::consts::PI / 360.0;
    const EARTH_RADIUS_KM: f64 = 6371.0090;

    let lat1_r = lat1 * DEG2RAD;
    let lon1_r = lon1 * DEG2RAD;
    let lat2_r = lat2 * DEG2RAD;
    let lon2_r = lon2 * DEG2RAD;

    let dlat2 = (lat2_r - lat1_r) / 2.0;
    let dlon2 = (lon2_r - lon1_r) / 2.0;

    let sin2_dlat = f64::powf(f64::sin(dlat2), 2.0);
    let sin2_dlon = f64::powf(f64::sin(dlon2), 2.0);

    let arc = 2.0
        * f64::asin(f64::sqrt(
            sin2_dlat + sin2_dlon * f64::cos(lat1_r) * f64::cos(lat2_r),
        ));

    arc * EARTH_RADIUS_KM
}

/*!
 * All the data related to a single rated damage observation.
 *
 * A DamagePoint is the geotag and severity rating extracted upstream from one image of disaster
 * damage. How the rating was produced (a vision model) and how the geotag was read (EXIF) are
 * outside this crate; both arrive here as plain values.
 */

use crate::geo::Coord;

/**
 * Represents one geotagged image of disaster damage together with its severity rating.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct DamagePoint {
    /// The source image name. Carried for traceability only, never used by the algorithms.
    pub image: String,
    /// The geotag of the image.
    pub coord: Coord,
    /// The severity rating assigned upstream, from 1 (minor) to 10 (catastrophic).
    pub rating: i32,
}

impl DamagePoint {
    /// True when the rating is inside the 1 to 10 scale the upstream assessor produces.
    pub fn rating_in_range(&self) -> bool {
        (1..=10).contains(&self.rating)
    }
}

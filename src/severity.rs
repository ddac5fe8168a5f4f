/*!
 * Per-cluster severity aggregation.
 *
 * The second stage of the pipeline. Given the cluster centroids and the full population of rated
 * damage points, every point is assigned to its nearest centroid and each centroid is scored
 * with the mean rating of the points assigned to it. The stage depends only on the centroid
 * values, not on clustering internals, so severity can be regenerated without re-clustering.
 */

use crate::{
    cluster::ClusterCentroid,
    damagepoint::DamagePoint,
    error::InvalidInputError,
    geo::{Coord, ProjectedCoord},
};

/**
 * The severity summary of one cluster.
 */
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeverityRecord {
    /// The cluster id of the centroid this record summarizes.
    pub cluster_id: u32,
    /// The centroid location, carried through unchanged from the input.
    pub centroid: Coord,
    /// Mean rating of the points assigned to this centroid, rounded to 2 decimal digits.
    /// Zero when no points were assigned.
    pub average_rating: f64,
    /// How many rated points were assigned to this centroid. May differ from the clustering
    /// time member count because assignment here is nearest-centroid over the full population,
    /// noise included.
    pub image_count: usize,
}

/**
 * Assign every rated point to its nearest centroid and average the ratings per centroid.
 *
 * Centroids and points are projected into the planar Web Mercator system and compared by
 * Euclidean distance. A point whose distance to two centroids is exactly equal goes to the
 * centroid that comes **first in the given centroid order**; the assignment is deterministic for
 * a fixed centroid order. A point's clustering time label plays no part here.
 *
 * Every centroid produces a record. A centroid with no assigned points gets an average rating
 * of 0 and an image count of 0, which is a valid result, not an error. The mean rating is
 * rounded to 2 decimal digits, rounding halves away from zero.
 *
 * #Returns
 * One [SeverityRecord] per input centroid, in centroid input order, or an [InvalidInputError]
 * when a rated point has an out of range coordinate or rating. Empty centroids yield an empty
 * result.
 */
pub fn aggregate_severity(
    centroids: &[ClusterCentroid],
    rated_points: &[DamagePoint],
) -> Result<Vec<SeverityRecord>, InvalidInputError> {
    for point in rated_points {
        point.coord.validate()?;

        if !point.rating_in_range() {
            return Err(InvalidInputError::new(format!(
                "rating out of range for {}: {}",
                point.image, point.rating
            )));
        }
    }

    if centroids.is_empty() {
        return Ok(vec![]);
    }

    let projected_centroids: Vec<ProjectedCoord> = centroids
        .iter()
        .map(|centroid| centroid.centroid.project())
        .collect();

    // (rating sum, assigned count) per centroid, indexed in centroid order.
    let mut totals = vec![(0_i64, 0_usize); centroids.len()];

    for point in rated_points {
        let projected = point.coord.project();

        let mut nearest = 0;
        let mut nearest_distance = projected.distance(&projected_centroids[0]);
        for (index, centroid) in projected_centroids.iter().enumerate().skip(1) {
            let distance = projected.distance(centroid);
            // Strict comparison keeps the earliest centroid on an exact tie.
            if distance < nearest_distance {
                nearest = index;
                nearest_distance = distance;
            }
        }

        totals[nearest].0 += i64::from(point.rating);
        totals[nearest].1 += 1;
    }

    let records = centroids
        .iter()
        .zip(&totals)
        .map(|(centroid, &(rating_sum, image_count))| {
            let average_rating = if image_count == 0 {
                0.0
            } else {
                round_to_hundredths(rating_sum as f64 / image_count as f64)
            };

            SeverityRecord {
                cluster_id: centroid.label,
                centroid: centroid.centroid,
                average_rating,
                image_count,
            }
        })
        .collect();

    Ok(records)
}

/// Round to 2 decimal digits, halves away from zero (the rounding `f64::round` performs).
fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

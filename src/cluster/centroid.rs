use rustc_hash::FxHashMap;

use crate::{cluster::ClusterLabel, geo::Coord};

/**
 * The mean geographic location and membership count of one cluster.
 */
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterCentroid {
    /// The cluster id this centroid summarizes. Noise has no centroid.
    pub label: u32,
    /// The unweighted arithmetic mean of the members' latitudes and longitudes.
    pub centroid: Coord,
    /// The number of points carrying this cluster id.
    pub count: usize,
}

impl ClusterCentroid {
    /**
     * Compute the centroid of every cluster present in the labels.
     *
     * Latitude and longitude are averaged independently, in geographic degrees. Averaging
     * degrees instead of projected meters is an intentional compatibility requirement of the
     * output files, even though it is geometrically inexact at large scales.
     *
     * Noise points contribute to no centroid, and a cluster id with no members simply does not
     * appear. The output is sorted by cluster id.
     *
     * Panics when `coords` and `labels` have different lengths, which indicates the labels were
     * not produced from these points.
     */
    pub fn from_labeled_points(coords: &[Coord], labels: &[ClusterLabel]) -> Vec<ClusterCentroid> {
        assert_eq!(
            coords.len(),
            labels.len(),
            "labels were not produced from these points"
        );

        let mut sums: FxHashMap<u32, (f64, f64, usize)> = FxHashMap::default();

        for (coord, label) in coords.iter().zip(labels) {
            if let ClusterLabel::Cluster(id) = label {
                let entry = sums.entry(*id).or_insert((0.0, 0.0, 0));
                entry.0 += coord.lat;
                entry.1 += coord.lon;
                entry.2 += 1;
            }
        }

        let mut centroids: Vec<ClusterCentroid> = sums
            .into_iter()
            .map(|(label, (lat_sum, lon_sum, count))| ClusterCentroid {
                label,
                centroid: Coord {
                    lat: lat_sum / count as f64,
                    lon: lon_sum / count as f64,
                },
                count,
            })
            .collect();

        centroids.sort_unstable_by_key(|centroid| centroid.label);

        centroids
    }
}

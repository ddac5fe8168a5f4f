/*!
 * Types and functions for working with clusters.
 *
 * A cluster is a spatially dense group of damage observations. Points that belong to no dense
 * group are labeled as noise and excluded from centroids.
 */

pub use centroid::ClusterCentroid;
pub use dbscan::{cluster_points, ClusterLabel};

mod centroid;
mod dbscan;

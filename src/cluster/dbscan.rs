use std::collections::VecDeque;

use crate::{
    error::InvalidInputError,
    geo::{Coord, ProjectedCoord},
};

/**
 * The label assigned to a point by [cluster_points].
 *
 * Cluster ids are small integers numbered in discovery order. The numbering is an implementation
 * detail; only the induced grouping of points is part of the contract.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClusterLabel {
    /// Member of the cluster with this id.
    Cluster(u32),
    /// Not part of any cluster.
    Noise,
}

impl ClusterLabel {
    pub fn is_noise(self) -> bool {
        matches!(self, ClusterLabel::Noise)
    }

    /// The conventional integer encoding used in the output files, with -1 for noise.
    pub fn as_i32(self) -> i32 {
        match self {
            ClusterLabel::Cluster(id) => id as i32,
            ClusterLabel::Noise => -1,
        }
    }
}

/**
 * Group geographic points into clusters by spatial density.
 *
 * Points are projected into the planar Web Mercator system and clustered with a density based
 * (DBSCAN) pass: a point is a core point when at least `min_samples` points lie within
 * `max_distance_m` meters of it, **counting the point itself**. Clusters are the maximal
 * connected groups of core points plus any point within `max_distance_m` of a core point.
 * Everything else is noise.
 *
 * The result has exactly one label per input point, in input order. Running this twice on the
 * same input yields the same partition; cluster ids are numbered in the order clusters are first
 * discovered while scanning the input. Coincident duplicate points each count toward density.
 *
 * #Arguments
 * * coords - the points to group.
 * * min_samples - minimum number of points (self inclusive) to form a dense neighborhood,
 *   must be at least 1.
 * * max_distance_m - neighborhood radius in meters of ground distance, must be positive.
 *
 * #Returns
 * One [ClusterLabel] per input point, or an [InvalidInputError] when a parameter or a
 * coordinate is out of range. Nothing is computed in the error case. An empty input yields an
 * empty result, not an error.
 */
pub fn cluster_points(
    coords: &[Coord],
    min_samples: usize,
    max_distance_m: f64,
) -> Result<Vec<ClusterLabel>, InvalidInputError> {
    if min_samples < 1 {
        return Err(InvalidInputError::new("min_samples must be at least 1"));
    }

    if !max_distance_m.is_finite() || max_distance_m <= 0.0 {
        return Err(InvalidInputError::new(format!(
            "max_distance_m must be positive and finite: {}",
            max_distance_m
        )));
    }

    for coord in coords {
        coord.validate()?;
    }

    let projected: Vec<ProjectedCoord> = coords.iter().map(Coord::project).collect();

    let mut labels = vec![ClusterLabel::Noise; projected.len()];
    let mut visited = vec![false; projected.len()];
    let mut next_id: u32 = 0;

    for start in 0..projected.len() {
        if visited[start] {
            continue;
        }
        visited[start] = true;

        let seeds = neighbors_of(&projected, start, max_distance_m);
        if seeds.len() < min_samples {
            // Stays noise unless a later cluster claims it as a border point.
            continue;
        }

        let label = ClusterLabel::Cluster(next_id);
        next_id += 1;
        labels[start] = label;

        // Breadth-first expansion from the core point. Border points get the label of the
        // first cluster that reaches them, which only affects numbering, not grouping.
        let mut frontier: VecDeque<usize> = seeds.into();
        while let Some(candidate) = frontier.pop_front() {
            if labels[candidate].is_noise() {
                labels[candidate] = label;
            }

            if visited[candidate] {
                continue;
            }
            visited[candidate] = true;

            let reachable = neighbors_of(&projected, candidate, max_distance_m);
            if reachable.len() >= min_samples {
                frontier.extend(reachable);
            }
        }
    }

    Ok(labels)
}

/// All indexes within the neighborhood radius of point `center`, including `center` itself.
fn neighbors_of(projected: &[ProjectedCoord], center: usize, max_distance_m: f64) -> Vec<usize> {
    let center_coord = projected[center];

    projected
        .iter()
        .enumerate()
        .filter(|(_, other)| center_coord.distance(other) <= max_distance_m)
        .map(|(index, _)| index)
        .collect()
}

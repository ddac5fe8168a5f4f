/*!
 * Serialization records for the files the command line tools read and write.
 *
 * These shapes match the JSON and CSV files the surrounding tooling (the upstream image
 * assessor, the dashboard, the map renderer) exchanges. They are an adapter layer only; the
 * core types in the rest of the crate carry no serialization concerns.
 */

use serde::{Deserialize, Serialize};

use crate::{
    cluster::{ClusterCentroid, ClusterLabel},
    damagepoint::DamagePoint,
    geo::Coord,
    severity::SeverityRecord,
};

/// The nested location object used in the assessments JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

/**
 * One entry of the damage assessments JSON produced by the upstream assessor.
 *
 * The `cluster` field is absent in fresh assessor output and added by `findclusters`, with -1
 * marking noise. The `factors` list records which assessment factors the upstream model was
 * prompted with; it is carried through untouched.
 */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub image_name: String,
    pub location: GeoLocation,
    pub rating: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<i32>,
}

impl AssessmentRecord {
    /// The geotag as a [Coord].
    pub fn coord(&self) -> Coord {
        Coord {
            lat: self.location.latitude,
            lon: self.location.longitude,
        }
    }

    /// View this record as the core [DamagePoint] value.
    pub fn to_damage_point(&self) -> DamagePoint {
        DamagePoint {
            image: self.image_name.clone(),
            coord: self.coord(),
            rating: self.rating,
        }
    }

    /// Record the cluster label this assessment was assigned.
    pub fn set_label(&mut self, label: ClusterLabel) {
        self.cluster = Some(label.as_i32());
    }
}

/**
 * One row of the cluster centroids CSV (`cluster,latitude,longitude,count`).
 */
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CentroidRow {
    pub cluster: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub count: usize,
}

impl From<&ClusterCentroid> for CentroidRow {
    fn from(centroid: &ClusterCentroid) -> Self {
        CentroidRow {
            cluster: centroid.label,
            latitude: centroid.centroid.lat,
            longitude: centroid.centroid.lon,
            count: centroid.count,
        }
    }
}

impl From<CentroidRow> for ClusterCentroid {
    fn from(row: CentroidRow) -> Self {
        ClusterCentroid {
            label: row.cluster,
            centroid: Coord {
                lat: row.latitude,
                lon: row.longitude,
            },
            count: row.count,
        }
    }
}

/**
 * One entry of the cluster severity JSON consumed by the map renderer.
 */
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityRow {
    pub cluster_id: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub average_rating: f64,
    pub image_count: usize,
}

impl From<&SeverityRecord> for SeverityRow {
    fn from(record: &SeverityRecord) -> Self {
        SeverityRow {
            cluster_id: record.cluster_id,
            latitude: record.centroid.lat,
            longitude: record.centroid.lon,
            average_rating: record.average_rating,
            image_count: record.image_count,
        }
    }
}

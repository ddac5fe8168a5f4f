pub use cluster::{cluster_points, ClusterCentroid, ClusterLabel};
pub use damagepoint::DamagePoint;
pub use error::{DamageMapResult, InvalidInputError};
pub use geo::{great_circle_distance, Coord, ProjectedCoord, METERS_PER_FOOT};
pub use report::{AssessmentRecord, CentroidRow, GeoLocation, SeverityRow};
pub use severity::{aggregate_severity, SeverityRecord};

/**************************************************************************************************
 * Private Implementation
 *************************************************************************************************/
mod cluster;
mod damagepoint;
mod error;
mod geo;
mod report;
mod severity;

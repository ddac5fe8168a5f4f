use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::PathBuf,
};

use clap::Parser;
use damagemap::{
    cluster_points, great_circle_distance, AssessmentRecord, CentroidRow, ClusterCentroid,
    ClusterLabel, Coord, DamageMapResult, METERS_PER_FOOT,
};
use log::LevelFilter;
use simple_logger::SimpleLogger;

/*-------------------------------------------------------------------------------------------------
 *                               Parse Command Line Arguments
 *-----------------------------------------------------------------------------------------------*/
///
/// Cluster geotagged damage assessments into incident sites.
///
/// This program reads the damage assessments JSON produced by the upstream image assessor,
/// groups the geotags by spatial density, annotates every assessment with the cluster it
/// belongs to (-1 for noise), and writes the cluster centroids to a CSV file for the severity
/// scoring and mapping tools.
///
#[derive(Debug, Parser)]
#[clap(name = "findclusters")]
#[clap(author, version, about)]
struct FindClustersOptions {
    /// The path to the damage assessments JSON file.
    ///
    /// If this is not specified, then the program will check for it in the "DAMAGE_ASSESSMENTS"
    /// environment variable.
    #[clap(short, long, default_value = "damage_assessments.json")]
    #[clap(env = "DAMAGE_ASSESSMENTS")]
    assessments: PathBuf,

    /// Where to write the assessments annotated with cluster ids.
    ///
    /// If this is not specified, the assessments file is rewritten in place.
    #[clap(short = 'o', long)]
    annotated: Option<PathBuf>,

    /// The path for the cluster centroids CSV this run produces.
    #[clap(short, long, default_value = "cluster_centroids.csv")]
    centroids: PathBuf,

    /// Minimum number of points, including the point itself, needed to form a cluster.
    #[clap(long, default_value_t = 4)]
    min_samples: usize,

    /// Maximum distance between neighboring cluster members in feet.
    #[clap(long, default_value_t = 600.0)]
    max_distance_ft: f64,

    /// Verbose output
    #[clap(short, long)]
    verbose: bool,
}

/*-------------------------------------------------------------------------------------------------
 *                                           Main
 *-----------------------------------------------------------------------------------------------*/
fn main() -> DamageMapResult<()> {
    let opts = FindClustersOptions::parse();

    let log_level = if opts.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    SimpleLogger::new().with_level(log_level).init()?;

    let mut assessments: Vec<AssessmentRecord> =
        serde_json::from_reader(BufReader::new(File::open(&opts.assessments)?))?;
    log::info!(
        "Loaded {} damage assessments from {}",
        assessments.len(),
        opts.assessments.display()
    );

    let coords: Vec<_> = assessments.iter().map(|record| record.coord()).collect();

    let max_distance_m = opts.max_distance_ft * METERS_PER_FOOT;
    log::debug!(
        "Clustering with min_samples = {} and max_distance = {:.1} m",
        opts.min_samples,
        max_distance_m
    );

    let labels = cluster_points(&coords, opts.min_samples, max_distance_m)?;

    for (record, label) in assessments.iter_mut().zip(&labels) {
        record.set_label(*label);
    }

    let centroids = ClusterCentroid::from_labeled_points(&coords, &labels);

    let annotated_path = opts.annotated.as_ref().unwrap_or(&opts.assessments);
    serde_json::to_writer_pretty(
        BufWriter::new(File::create(annotated_path)?),
        &assessments,
    )?;
    log::info!(
        "Wrote {} annotated assessments to {}",
        assessments.len(),
        annotated_path.display()
    );

    let mut writer = csv::Writer::from_path(&opts.centroids)?;
    for centroid in &centroids {
        writer.serialize(CentroidRow::from(centroid))?;
    }
    writer.flush()?;
    log::info!(
        "Wrote {} cluster centroids to {}",
        centroids.len(),
        opts.centroids.display()
    );

    log_summary(&coords, &labels, &centroids);

    Ok(())
}

/// Log the noise count and the properties of the largest cluster found.
fn log_summary(coords: &[Coord], labels: &[ClusterLabel], centroids: &[ClusterCentroid]) {
    let noise_count = labels.iter().filter(|label| label.is_noise()).count();

    if let Some(biggest) = centroids.iter().max_by_key(|centroid| centroid.count) {
        // The farthest member from the centroid, as a rough measure of the cluster's extent.
        let radius_km = coords
            .iter()
            .zip(labels)
            .filter(|(_, label)| **label == ClusterLabel::Cluster(biggest.label))
            .map(|(coord, _)| {
                great_circle_distance(
                    coord.lat,
                    coord.lon,
                    biggest.centroid.lat,
                    biggest.centroid.lon,
                )
            })
            .fold(0.0, f64::max);

        log::info!("");
        log::info!("Found {} clusters, {} noise points.", centroids.len(), noise_count);
        log::info!("Largest cluster:");
        log::info!("    cluster id - {:>12}", biggest.label);
        log::info!("      latitude - {:>12.6}", biggest.centroid.lat);
        log::info!("     longitude - {:>12.6}", biggest.centroid.lon);
        log::info!("         count - {:>12}", biggest.count);
        log::info!("    radius (m) - {:>12.1}", radius_km * 1000.0);
        log::info!("");
    } else {
        log::warn!("");
        log::warn!("No clusters found, all {} points are noise!", noise_count);
        log::warn!("");
    }
}

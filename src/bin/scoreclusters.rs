use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::PathBuf,
};

use clap::Parser;
use damagemap::{
    aggregate_severity, AssessmentRecord, CentroidRow, ClusterCentroid, DamageMapResult,
    DamagePoint, SeverityRow,
};
use log::LevelFilter;
use simple_logger::SimpleLogger;

/*-------------------------------------------------------------------------------------------------
 *                               Parse Command Line Arguments
 *-----------------------------------------------------------------------------------------------*/
///
/// Score cluster severity from damage assessments.
///
/// This program reads the cluster centroids CSV produced by findclusters together with the
/// damage assessments JSON, assigns every assessment to its nearest centroid, and writes the
/// average severity rating and assigned image count per cluster to a JSON file for the map
/// renderer. It only needs the centroid values, so it can be re-run to regenerate severity
/// scores without re-clustering.
///
#[derive(Debug, Parser)]
#[clap(name = "scoreclusters")]
#[clap(author, version, about)]
struct ScoreClustersOptions {
    /// The path to the cluster centroids CSV file.
    ///
    /// If this is not specified, then the program will check for it in the "CLUSTER_CENTROIDS"
    /// environment variable.
    #[clap(short, long, default_value = "cluster_centroids.csv")]
    #[clap(env = "CLUSTER_CENTROIDS")]
    centroids: PathBuf,

    /// The path to the damage assessments JSON file.
    ///
    /// If this is not specified, then the program will check for it in the "DAMAGE_ASSESSMENTS"
    /// environment variable.
    #[clap(short, long, default_value = "damage_assessments.json")]
    #[clap(env = "DAMAGE_ASSESSMENTS")]
    assessments: PathBuf,

    /// The path for the cluster severity JSON this run produces.
    #[clap(short, long, default_value = "cluster_severity.json")]
    output: PathBuf,

    /// Verbose output
    #[clap(short, long)]
    verbose: bool,
}

/*-------------------------------------------------------------------------------------------------
 *                                           Main
 *-----------------------------------------------------------------------------------------------*/
fn main() -> DamageMapResult<()> {
    let opts = ScoreClustersOptions::parse();

    let log_level = if opts.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    SimpleLogger::new().with_level(log_level).init()?;

    let mut reader = csv::Reader::from_path(&opts.centroids)?;
    let centroids: Vec<ClusterCentroid> = reader
        .deserialize::<CentroidRow>()
        .map(|row| row.map(ClusterCentroid::from))
        .collect::<Result<_, _>>()?;
    log::info!(
        "Loaded {} cluster centroids from {}",
        centroids.len(),
        opts.centroids.display()
    );

    let assessments: Vec<AssessmentRecord> =
        serde_json::from_reader(BufReader::new(File::open(&opts.assessments)?))?;
    log::info!(
        "Loaded {} damage assessments from {}",
        assessments.len(),
        opts.assessments.display()
    );

    let rated_points: Vec<DamagePoint> = assessments
        .iter()
        .map(AssessmentRecord::to_damage_point)
        .collect();

    let records = aggregate_severity(&centroids, &rated_points)?;

    let rows: Vec<SeverityRow> = records.iter().map(SeverityRow::from).collect();
    serde_json::to_writer_pretty(BufWriter::new(File::create(&opts.output)?), &rows)?;
    log::info!(
        "Wrote severity for {} clusters to {}",
        rows.len(),
        opts.output.display()
    );

    if let Some(worst) = records
        .iter()
        .max_by(|left, right| left.average_rating.total_cmp(&right.average_rating))
    {
        log::info!("");
        log::info!("Most severe cluster:");
        log::info!("        cluster id - {:>12}", worst.cluster_id);
        log::info!("          latitude - {:>12.6}", worst.centroid.lat);
        log::info!("         longitude - {:>12.6}", worst.centroid.lon);
        log::info!("    average rating - {:>12.2}", worst.average_rating);
        log::info!("       image count - {:>12}", worst.image_count);
        log::info!("");
    } else {
        log::warn!("");
        log::warn!("No centroids supplied, nothing to score!");
        log::warn!("");
    }

    Ok(())
}

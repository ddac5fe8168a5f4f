use damagemap::{
    aggregate_severity, cluster_points, ClusterCentroid, ClusterLabel, Coord, DamagePoint,
    METERS_PER_FOOT,
};

fn coord(lat: f64, lon: f64) -> Coord {
    Coord { lat, lon }
}

fn point(image: &str, lat: f64, lon: f64, rating: i32) -> DamagePoint {
    DamagePoint {
        image: image.to_owned(),
        coord: Coord { lat, lon },
        rating,
    }
}

#[test]
fn coincident_points_cluster_to_their_shared_location() {
    let points = vec![coord(41.7750, -87.6417); 5];

    let labels = cluster_points(&points, 4, 600.0 * METERS_PER_FOOT).unwrap();

    assert_eq!(labels.len(), 5);
    assert!(labels.iter().all(|label| !label.is_noise()));
    assert!(labels.iter().all(|label| *label == labels[0]));

    let centroids = ClusterCentroid::from_labeled_points(&points, &labels);

    assert_eq!(centroids.len(), 1);
    assert_eq!(centroids[0].count, 5);
    assert!((centroids[0].centroid.lat - 41.7750).abs() < 1.0e-9);
    assert!((centroids[0].centroid.lon - -87.6417).abs() < 1.0e-9);
}

#[test]
fn sparse_points_are_all_noise_and_yield_no_severity() {
    // Three points each well over a kilometer from the others.
    let points = vec![
        coord(41.7750, -87.6417),
        coord(41.7460, -87.6135),
        coord(41.9686, -87.7236),
    ];

    let labels = cluster_points(&points, 4, 600.0 * METERS_PER_FOOT).unwrap();
    assert!(labels.iter().all(|label| label.is_noise()));

    let centroids = ClusterCentroid::from_labeled_points(&points, &labels);
    assert!(centroids.is_empty());

    let rated: Vec<DamagePoint> = points
        .iter()
        .enumerate()
        .map(|(index, coord)| DamagePoint {
            image: format!("{}.jpg", index),
            coord: *coord,
            rating: 5,
        })
        .collect();

    let records = aggregate_severity(&centroids, &rated).unwrap();
    assert!(records.is_empty());
}

#[test]
fn rated_point_scores_its_strictly_nearest_centroid() {
    let centroids = vec![
        ClusterCentroid {
            label: 0,
            centroid: coord(0.0, 0.0),
            count: 4,
        },
        ClusterCentroid {
            label: 1,
            centroid: coord(0.0, 1.0),
            count: 4,
        },
    ];
    let rated = vec![point("a.jpg", 0.0, 0.4, 8)];

    let records = aggregate_severity(&centroids, &rated).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].cluster_id, 0);
    assert!((records[0].average_rating - 8.0).abs() < 1.0e-12);
    assert_eq!(records[0].image_count, 1);
    assert_eq!(records[1].average_rating, 0.0);
    assert_eq!(records[1].image_count, 0);
}

#[test]
fn two_stage_pipeline_over_three_neighborhoods() {
    // Three tight knots modeled on flood sites a few kilometers apart, plus two stray
    // observations that should come out as noise.
    let mut rated = vec![];

    let sites = [
        (41.7750, -87.6417, 8), // Englewood, heavy damage
        (41.7460, -87.6135, 5), // Chatham
        (41.8186, -87.6989, 2), // Brighton Park, light damage
    ];

    for (site_index, (lat, lon, rating)) in sites.iter().enumerate() {
        for member in 0..4 {
            // Offsets of a few dozen meters inside each site.
            let lat = lat + member as f64 * 0.0002;
            let lon = lon + member as f64 * 0.0001;
            rated.push(point(
                &format!("site{}_{}.jpg", site_index, member),
                lat,
                lon,
                *rating,
            ));
        }
    }

    rated.push(point("stray_0.jpg", 41.9686, -87.7236, 9));
    rated.push(point("stray_1.jpg", 41.8600, -87.7000, 1));

    let coords: Vec<Coord> = rated.iter().map(|p| p.coord).collect();
    let labels = cluster_points(&coords, 4, 600.0 * METERS_PER_FOOT).unwrap();

    assert_eq!(labels.len(), rated.len());
    let noise_count = labels.iter().filter(|label| label.is_noise()).count();
    assert_eq!(noise_count, 2);
    assert!(labels[12].is_noise());
    assert!(labels[13].is_noise());

    let centroids = ClusterCentroid::from_labeled_points(&coords, &labels);
    assert_eq!(centroids.len(), 3);

    // Centroid of each site is the mean of its four members.
    for (site_index, (lat, lon, _)) in sites.iter().enumerate() {
        let expected_lat = lat + (0.0 + 1.0 + 2.0 + 3.0) / 4.0 * 0.0002;
        let expected_lon = lon + (0.0 + 1.0 + 2.0 + 3.0) / 4.0 * 0.0001;

        let centroid = &centroids[site_index];
        assert_eq!(centroid.count, 4);
        assert!((centroid.centroid.lat - expected_lat).abs() < 1.0e-9);
        assert!((centroid.centroid.lon - expected_lon).abs() < 1.0e-9);
    }

    let records = aggregate_severity(&centroids, &rated).unwrap();

    // One record per centroid, and every rated point (noise included) is assigned somewhere.
    assert_eq!(records.len(), centroids.len());
    let assigned: usize = records.iter().map(|record| record.image_count).sum();
    assert_eq!(assigned, rated.len());

    // The strays land on their nearest sites: stray_0 is closest to Brighton Park, and
    // stray_1 sits between Brighton Park and Englewood but nearer Brighton Park.
    assert_eq!(records[0].image_count, 4);
    assert!((records[0].average_rating - 8.0).abs() < 1.0e-12);

    assert_eq!(records[1].image_count, 4);
    assert!((records[1].average_rating - 5.0).abs() < 1.0e-12);

    assert_eq!(records[2].image_count, 6);
    // (2 * 4 + 9 + 1) / 6 = 3.0
    assert!((records[2].average_rating - 3.0).abs() < 1.0e-12);
}

#[test]
fn severity_can_be_regenerated_without_reclustering() {
    let points = vec![
        point("a.jpg", 41.7750, -87.6417, 7),
        point("b.jpg", 41.7750, -87.6417, 8),
        point("c.jpg", 41.7751, -87.6417, 9),
        point("d.jpg", 41.7751, -87.6418, 4),
    ];

    let coords: Vec<Coord> = points.iter().map(|p| p.coord).collect();
    let labels = cluster_points(&coords, 4, 600.0 * METERS_PER_FOOT).unwrap();
    let centroids = ClusterCentroid::from_labeled_points(&coords, &labels);

    let first = aggregate_severity(&centroids, &points).unwrap();
    let second = aggregate_severity(&centroids, &points).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].image_count, 4);
    // (7 + 8 + 9 + 4) / 4 = 7.0
    assert!((first[0].average_rating - 7.0).abs() < 1.0e-12);
}

#[test]
fn clustering_partition_is_stable_across_runs() {
    let points = vec![
        coord(41.7750, -87.6417),
        coord(41.7750, -87.6417),
        coord(41.7751, -87.6417),
        coord(41.7751, -87.6418),
        coord(41.9686, -87.7236),
    ];

    let first = cluster_points(&points, 4, 600.0 * METERS_PER_FOOT).unwrap();
    let second = cluster_points(&points, 4, 600.0 * METERS_PER_FOOT).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), points.len());
    assert!(first[4].is_noise());
    assert!(!first[0].is_noise());
    assert_eq!(ClusterLabel::Noise.as_i32(), -1);
}

/// Integration-Tests für die Pfad-Projektion
use approx::assert_relative_eq;
use cam_follow_path::core::{closest_point_on_segment, segments, sine_wave_path};
use cam_follow_path::{project, ProjectionError};
use glam::DVec3;

fn query_grid() -> Vec<DVec3> {
    let mut points = Vec::new();
    for x in -2..=12 {
        for y in -4..=4 {
            for z in [-3.0, 0.0, 2.5] {
                points.push(DVec3::new(x as f64 * 9.7, y as f64 * 11.3, z));
            }
        }
    }
    points
}

/// Abstand eines Punkts zum nächsten Segment, unabhängig von `project` berechnet.
fn min_distance_to_segments(path: &[DVec3], query: DVec3) -> f64 {
    segments(path)
        .map(|(_, a, b)| closest_point_on_segment(a, b, query).distance)
        .fold(f64::INFINITY, f64::min)
}

#[test]
fn test_scenario_single_segment_perpendicular() {
    let path = [DVec3::ZERO, DVec3::new(10.0, 0.0, 0.0)];
    let hit = project(&path, DVec3::new(5.0, 5.0, 0.0)).expect("Projektion erwartet");

    assert_eq!(hit.closest_point, DVec3::new(5.0, 0.0, 0.0));
    assert_relative_eq!(hit.distance, 5.0);
}

#[test]
fn test_scenario_second_segment_wins() {
    let path = [
        DVec3::ZERO,
        DVec3::new(10.0, 0.0, 0.0),
        DVec3::new(10.0, 10.0, 0.0),
    ];
    let hit = project(&path, DVec3::new(11.0, 5.0, 0.0)).expect("Projektion erwartet");

    assert_eq!(hit.closest_point, DVec3::new(10.0, 5.0, 0.0));
    assert_relative_eq!(hit.distance, 1.0);
    assert_eq!(hit.segment_index, 1);
}

#[test]
fn test_short_paths_signal_not_enough_points_for_any_query() {
    for query in query_grid() {
        assert_eq!(
            project(&[], query),
            Err(ProjectionError::NotEnoughPoints { count: 0 })
        );
        assert_eq!(
            project(&[DVec3::new(3.0, 1.0, 0.0)], query),
            Err(ProjectionError::NotEnoughPoints { count: 1 })
        );
    }
}

#[test]
fn test_projection_lies_on_path_and_is_minimal() {
    let path = sine_wave_path(20, 100.0, 30.0);

    for query in query_grid() {
        let hit = project(&path, query).expect("Projektion erwartet");

        assert!(hit.distance >= 0.0);
        assert_relative_eq!(hit.distance, query.distance(hit.closest_point), epsilon = 1e-9);
        assert_relative_eq!(
            hit.distance,
            min_distance_to_segments(&path, query),
            epsilon = 1e-9
        );

        // Punkt liegt auf dem gemeldeten Segment
        assert!((0.0..=1.0).contains(&hit.segment_t));
        let a = path[hit.segment_index];
        let b = path[hit.segment_index + 1];
        let on_segment = a.lerp(b, hit.segment_t);
        assert!(on_segment.abs_diff_eq(hit.closest_point, 1e-9));
    }
}

#[test]
fn test_degenerate_segments_reduce_to_point_distance() {
    let p = DVec3::new(2.0, 2.0, 2.0);
    let path = [p, p];
    let hit = project(&path, DVec3::new(2.0, 5.0, 6.0)).expect("Projektion erwartet");

    assert_eq!(hit.closest_point, p);
    assert_relative_eq!(hit.distance, 5.0);
}

#[test]
fn test_distance_grows_moving_away_from_path() {
    let path = [DVec3::new(-5.0, 1.0, 0.0), DVec3::new(15.0, 1.0, 0.0)];
    let start = DVec3::new(3.0, 2.0, 1.0);
    let hit = project(&path, start).expect("Projektion erwartet");
    let direction = (start - hit.closest_point).normalize();

    let mut previous = hit.distance;
    for step in 1..=20 {
        let query = start + direction * step as f64 * 0.5;
        let distance = project(&path, query).expect("Projektion erwartet").distance;
        assert!(distance > previous);
        previous = distance;
    }
}

#[test]
fn test_projection_is_repeatable() {
    let path = sine_wave_path(20, 100.0, 30.0);
    let query = DVec3::new(42.0, -7.0, 3.0);

    assert_eq!(project(&path, query), project(&path, query));
}

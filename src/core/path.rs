//! Polyline-Hilfsfunktionen auf geordneten Pfadpunkten.

use glam::DVec3;

/// Liefert alle Segmente einer Polyline als `(Index, Start, Ende)`.
///
/// Segment `i` verläuft von `path[i]` nach `path[i + 1]`. Bei weniger als
/// zwei Punkten ist der Iterator leer.
pub fn segments(path: &[DVec3]) -> impl Iterator<Item = (usize, DVec3, DVec3)> + '_ {
    path.windows(2)
        .enumerate()
        .map(|(index, pair)| (index, pair[0], pair[1]))
}

/// Länge einer Polyline (Summe der Segmentlängen).
pub fn polyline_length(path: &[DVec3]) -> f64 {
    segments(path).map(|(_, a, b)| a.distance(b)).sum()
}

/// Erzeugt einen Sinus-Pfad in der XY-Ebene.
///
/// Punkt `i` liegt bei `x = i / count * length`,
/// `y = sin(i / count * 2π) * amplitude`, `z = 0`.
pub fn sine_wave_path(count: usize, length: f64, amplitude: f64) -> Vec<DVec3> {
    if count == 0 {
        return Vec::new();
    }

    (0..count)
        .map(|i| {
            let s = i as f64 / count as f64;
            DVec3::new(
                s * length,
                (s * std::f64::consts::TAU).sin() * amplitude,
                0.0,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn segments_of_short_paths_are_empty() {
        assert_eq!(segments(&[]).count(), 0);
        assert_eq!(segments(&[DVec3::ONE]).count(), 0);
    }

    #[test]
    fn segments_follow_insertion_order() {
        let path = [DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0)];
        let collected: Vec<_> = segments(&path).collect();

        assert_eq!(collected.len(), 2);
        assert_eq!(collected[0], (0, DVec3::ZERO, DVec3::X));
        assert_eq!(collected[1], (1, DVec3::X, DVec3::new(1.0, 1.0, 0.0)));
    }

    #[test]
    fn polyline_length_sums_segments() {
        let path = [
            DVec3::ZERO,
            DVec3::new(10.0, 0.0, 0.0),
            DVec3::new(10.0, 10.0, 0.0),
        ];
        assert_relative_eq!(polyline_length(&path), 20.0);
    }

    #[test]
    fn sine_wave_path_matches_expected_shape() {
        let path = sine_wave_path(20, 100.0, 30.0);

        assert_eq!(path.len(), 20);
        assert_eq!(path[0], DVec3::ZERO);
        assert_relative_eq!(path[5].x, 25.0);
        assert_relative_eq!(path[5].y, 30.0, epsilon = 1e-9);
        assert!(path.iter().all(|p| p.z == 0.0));
    }
}

//! Projektion eines Punkts auf die nächste Stelle einer Polyline.

use glam::DVec3;
use thiserror::Error;

use super::path::segments;

/// Fehler der Pfad-Projektion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProjectionError {
    /// Pfad hat keine Segmente
    #[error("Pfad hat {count} Punkt(e), mindestens 2 erforderlich")]
    NotEnoughPoints {
        /// Anzahl der vorhandenen Pfadpunkte
        count: usize,
    },
}

/// Nächster Punkt auf einem einzelnen Segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    /// Nächster Punkt auf dem geschlossenen Segment
    pub closest_point: DVec3,
    /// Segment-Parameter t ∈ [0, 1] (0 = Start, 1 = Ende)
    pub t: f64,
    /// Euklidische Distanz zum Suchpunkt
    pub distance: f64,
}

/// Ergebnis der Projektion auf die gesamte Polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathProjection {
    /// Nächster Punkt auf der Polyline
    pub closest_point: DVec3,
    /// Euklidische Distanz zwischen Suchpunkt und `closest_point`
    pub distance: f64,
    /// Index des Segments, auf dem `closest_point` liegt
    pub segment_index: usize,
    /// Parameter auf diesem Segment
    pub segment_t: f64,
}

/// Berechnet den nächsten Punkt auf dem Segment `a`–`b` zu `query`.
///
/// Der Projektionsparameter wird auf [0, 1] geklemmt. Bei entartetem
/// Segment (`a == b`) ist das Ergebnis `a` mit `t = 0`.
pub fn closest_point_on_segment(a: DVec3, b: DVec3, query: DVec3) -> SegmentProjection {
    let ab = b - a;
    let len_sq = ab.length_squared();

    let t = if len_sq > 0.0 {
        ((query - a).dot(ab) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let closest_point = a + ab * t;
    SegmentProjection {
        closest_point,
        t,
        distance: query.distance(closest_point),
    }
}

/// Projiziert `query` auf die Polyline `path`.
///
/// Lineare Suche über alle Segmente mit striktem `<`: bei exakt gleicher
/// Distanz gewinnt das Segment mit dem kleinsten Index.
pub fn project(path: &[DVec3], query: DVec3) -> Result<PathProjection, ProjectionError> {
    let mut best: Option<PathProjection> = None;

    for (segment_index, a, b) in segments(path) {
        let candidate = closest_point_on_segment(a, b, query);
        let is_better = best.is_none_or(|current| candidate.distance < current.distance);
        if is_better {
            best = Some(PathProjection {
                closest_point: candidate.closest_point,
                distance: candidate.distance,
                segment_index,
                segment_t: candidate.t,
            });
        }
    }

    best.ok_or(ProjectionError::NotEnoughPoints { count: path.len() })
}

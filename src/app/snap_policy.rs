//! Use-Case: Snap-Entscheidung aus Pfad, Tool-Position und Snap-Distanz.

use glam::DVec3;

use super::SnapError;
use crate::core::{project, Pose};

/// Entscheidet zwischen Identität und Translation.
///
/// `offset` zeigt vom Tool-Ursprung zum nächsten Pfadpunkt. Liegt das Tool
/// weiter als `threshold` vom Pfad entfernt (striktes `>`), wird nicht
/// korrigiert. Bei exakt gleicher Distanz wird noch eingerastet.
pub fn decide(offset: DVec3, threshold: f64) -> Pose {
    if offset.length() > threshold {
        Pose::Identity
    } else {
        Pose::Translation(offset)
    }
}

/// Berechnet die Ausgabe-Pose für einen Pfad-Snapshot und eine Tool-Position.
///
/// Deterministisch: gleiche Eingaben liefern immer dieselbe Pose.
pub fn compute_output_pose(
    path: &[DVec3],
    tracked_origin: DVec3,
    threshold: f64,
) -> Result<Pose, SnapError> {
    let hit = project(path, tracked_origin)?;
    let offset = hit.closest_point - tracked_origin;
    Ok(decide(offset, threshold))
}

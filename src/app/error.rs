//! Fehlerarten des Snap-Controllers.
//!
//! Kein Fehler ist fatal: jedes fehlgeschlagene Update wird übersprungen
//! und beim nächsten Pose-Update erneut versucht.

use thiserror::Error;

use crate::core::ProjectionError;
use crate::shared::OptionsError;

/// Externe Rolle, die der Controller für ein Update benötigt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingRole {
    /// Quelle der Pfadpunkte
    PathSource,
    /// Getrackte Pose (liefert Weltursprung und Update-Benachrichtigungen)
    TrackedPose,
    /// Ausgabe-Transform
    Output,
}

impl std::fmt::Display for BindingRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BindingRole::PathSource => "Pfadquelle",
            BindingRole::TrackedPose => "getrackte Pose",
            BindingRole::Output => "Ausgabe-Transform",
        };
        f.write_str(name)
    }
}

/// Fehler bei Konfiguration oder Update des Snap-Controllers.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SnapError {
    /// Pfad hat weniger als zwei Punkte
    #[error("Pfad hat {count} Punkt(e), mindestens 2 erforderlich")]
    NotEnoughPoints {
        /// Anzahl der vorhandenen Pfadpunkte
        count: usize,
    },
    /// Rolle nicht gebunden oder nicht mehr vorhanden
    #[error("Keine gültige Bindung für {0}")]
    MissingBinding(BindingRole),
    /// Objekt wird gerade vom Host verwendet (z.B. während es benachrichtigt)
    #[error("{0} ist gerade in Verwendung")]
    Busy(BindingRole),
    /// Snap-Distanz negativ oder nicht endlich
    #[error("Ungültige Snap-Distanz: {0}")]
    InvalidThreshold(f64),
    /// Update ohne aktive Session
    #[error("Snap ist nicht aktiviert")]
    NotEnabled,
}

impl From<ProjectionError> for SnapError {
    fn from(err: ProjectionError) -> Self {
        match err {
            ProjectionError::NotEnoughPoints { count } => SnapError::NotEnoughPoints { count },
        }
    }
}

impl From<OptionsError> for SnapError {
    fn from(err: OptionsError) -> Self {
        match err {
            OptionsError::InvalidThreshold(distance) => SnapError::InvalidThreshold(distance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validate_threshold;

    #[test]
    fn invalid_option_maps_to_snap_error() {
        let err: SnapError = validate_threshold(f64::NEG_INFINITY)
            .map_err(SnapError::from)
            .expect_err("Unendliche Distanz sollte scheitern");

        assert_eq!(err, SnapError::InvalidThreshold(f64::NEG_INFINITY));
        assert_eq!(
            SnapError::Busy(BindingRole::Output).to_string(),
            "Ausgabe-Transform ist gerade in Verwendung"
        );
    }
}

//! Ausgabe-Pose des Snap-Controllers (reine Translation oder Identität).

use glam::{DAffine3, DVec3};

/// Starre Transformation, die der Controller in die Ausgabe schreibt.
///
/// Enthält nie Rotation oder Skalierung.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Pose {
    /// Keine Korrektur
    #[default]
    Identity,
    /// Reine Verschiebung um den angegebenen Vektor
    Translation(DVec3),
}

impl Pose {
    /// Translationsanteil der Pose (`ZERO` für die Identität).
    pub fn translation(&self) -> DVec3 {
        match self {
            Pose::Identity => DVec3::ZERO,
            Pose::Translation(offset) => *offset,
        }
    }

    /// Gibt `true` zurück, wenn die Pose die Identität ist.
    pub fn is_identity(&self) -> bool {
        matches!(self, Pose::Identity)
    }

    /// Wandelt die Pose in eine affine Matrix um.
    pub fn to_affine(&self) -> DAffine3 {
        match self {
            Pose::Identity => DAffine3::IDENTITY,
            Pose::Translation(offset) => DAffine3::from_translation(*offset),
        }
    }

    /// Wendet die Pose auf einen Punkt an.
    pub fn transform_point(&self, point: DVec3) -> DVec3 {
        point + self.translation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_has_zero_translation() {
        let pose = Pose::Identity;

        assert!(pose.is_identity());
        assert_eq!(pose.translation(), DVec3::ZERO);
        assert_eq!(pose.to_affine(), DAffine3::IDENTITY);
    }

    #[test]
    fn translation_affine_has_no_rotation_or_scale() {
        let offset = DVec3::new(0.0, -5.0, 2.0);
        let affine = Pose::Translation(offset).to_affine();

        assert_eq!(affine.translation, offset);
        assert_eq!(affine.matrix3, glam::DMat3::IDENTITY);
        assert_eq!(
            Pose::Translation(offset).transform_point(DVec3::new(5.0, 5.0, 0.0)),
            DVec3::new(5.0, 0.0, 2.0)
        );
    }
}

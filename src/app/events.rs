//! Operator- und System-Eingaben für den Snap-Controller.

/// Eingaben aus UI/Host ohne direkte Mutationslogik.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapIntent {
    /// Checkbox "Snap aktivieren" umgeschaltet
    SnapToggled { enabled: bool },
    /// Snap-Distanz im Eingabefeld geändert
    ThresholdChanged { distance: f64 },
    /// Getrackte Pose hat sich geändert: wartende Updates verarbeiten
    PoseModified,
}

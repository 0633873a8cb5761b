//! Cam Follow Path Library.
//! Führt einen abhängigen Transform dem nächsten Punkt eines Pfads nach,
//! sobald ein getrackter Frame innerhalb der Snap-Distanz liegt.

pub mod app;
pub mod core;
pub mod shared;

pub use app::{
    BindingRole, MarkupPath, OutputTransform, PathSource, PoseModified, PoseSink, SnapController,
    SnapError, SnapIntent, SnapStats, SnapStatus, TrackedPoseSource, TrackedTransform,
};
pub use core::{project, PathProjection, Pose, ProjectionError};
pub use shared::{DemoOptions, OptionsError, SnapOptions};

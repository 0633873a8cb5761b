//! Core-Domänentypen: Pfad-Geometrie, Projektion und Ausgabe-Pose.

pub mod path;
pub mod pose;
/// Projektion eines Punkts auf eine Polyline
///
/// Reine Funktionen ohne Zustand:
/// - `closest_point_on_segment`: nächster Punkt auf einem Segment
/// - `project`: nächster Punkt über alle Segmente eines Pfads
pub mod projection;

pub use path::{polyline_length, segments, sine_wave_path};
pub use pose::Pose;
pub use projection::{
    closest_point_on_segment, project, PathProjection, ProjectionError, SegmentProjection,
};

//! Application-Layer: Controller, Bindungen, Zustand und Snap-Entscheidung.

pub mod bindings;
pub mod controller;
mod error;
pub mod events;
pub mod scene;
pub mod snap_policy;
pub mod state;

pub use bindings::{
    OutputHandle, PathHandle, PathSource, PoseListener, PoseModified, PoseSink, SnapBindings,
    SubscriptionId, TrackedHandle, TrackedPoseSource,
};
pub use controller::SnapController;
pub use error::{BindingRole, SnapError};
pub use events::SnapIntent;
pub use scene::{MarkupPath, OutputTransform, TrackedTransform};
pub use state::{SnapStats, SnapStatus};

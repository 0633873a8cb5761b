//! In-Memory-Implementierungen der drei Rollen.
//!
//! Ersetzen Markup-Liste und lineare Transform-Nodes eines Hosts, z.B. für
//! die Demo-Binary und Tests.

use glam::{DAffine3, DVec3};

use super::bindings::{
    PathSource, PoseListener, PoseModified, PoseSink, SubscriptionId, TrackedPoseSource,
};
use crate::core::Pose;

/// Geordnete Punktliste (Markup/Fiducial-Liste).
#[derive(Debug, Clone, Default)]
pub struct MarkupPath {
    points: Vec<DVec3>,
}

impl MarkupPath {
    /// Erstellt einen Pfad aus den übergebenen Punkten.
    pub fn new(points: Vec<DVec3>) -> Self {
        Self { points }
    }

    /// Ersetzt alle Punkte.
    pub fn set_points(&mut self, points: Vec<DVec3>) {
        self.points = points;
    }

    /// Anzahl der Punkte.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Gibt `true` zurück, wenn der Pfad keine Punkte hat.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl PathSource for MarkupPath {
    fn points(&self) -> Vec<DVec3> {
        self.points.clone()
    }
}

/// Getrackter Transform-Node (lokal → Welt) mit Listenern.
pub struct TrackedTransform {
    to_world: DAffine3,
    listeners: Vec<(SubscriptionId, PoseListener)>,
    next_subscription: u64,
    sequence: u64,
}

impl Default for TrackedTransform {
    fn default() -> Self {
        Self::new(DAffine3::IDENTITY)
    }
}

impl TrackedTransform {
    /// Erstellt einen Transform-Node mit gegebener Lokal-zu-Welt-Transformation.
    pub fn new(to_world: DAffine3) -> Self {
        Self {
            to_world,
            listeners: Vec::new(),
            next_subscription: 1,
            sequence: 0,
        }
    }

    /// Setzt die Transformation und benachrichtigt alle Listener.
    pub fn set_to_world(&mut self, to_world: DAffine3) {
        self.to_world = to_world;
        self.notify_modified();
    }

    /// Verschiebt den Ursprung auf `origin` (Rotation bleibt erhalten).
    pub fn set_origin(&mut self, origin: DVec3) {
        self.to_world.translation = origin;
        self.notify_modified();
    }

    /// Anzahl registrierter Listener.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify_modified(&mut self) {
        self.sequence += 1;
        let event = PoseModified {
            sequence: self.sequence,
        };
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
    }
}

impl TrackedPoseSource for TrackedTransform {
    fn current_world_origin(&self) -> Option<DVec3> {
        Some(self.to_world.transform_point3(DVec3::ZERO))
    }

    fn subscribe(&mut self, listener: PoseListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, listener));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }
}

/// Ausgabe-Transform, der die zuletzt geschriebene Pose hält.
#[derive(Debug, Clone, Default)]
pub struct OutputTransform {
    pose: Pose,
    write_count: u64,
}

impl OutputTransform {
    /// Erstellt einen Ausgabe-Transform mit Identität.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zuletzt geschriebene Pose.
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Transformation zum Parent als affine Matrix.
    pub fn to_parent(&self) -> DAffine3 {
        self.pose.to_affine()
    }

    /// Anzahl der Schreibvorgänge seit Erstellung.
    pub fn write_count(&self) -> u64 {
        self.write_count
    }
}

impl PoseSink for OutputTransform {
    fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
        self.write_count += 1;
    }
}

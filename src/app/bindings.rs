//! Schnittstellen zu den drei externen Rollen des Hosts.
//!
//! Der Host besitzt die Objekte (`Rc<RefCell<…>>`), der Controller hält
//! nur `Weak`-Referenzen darauf. Ein vom Host entferntes Objekt führt
//! beim nächsten Update zu `SnapError::MissingBinding` statt zu einem
//! hängenden Zeiger.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::DVec3;

use crate::core::Pose;

/// Benachrichtigung: die getrackte Pose hat sich geändert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoseModified {
    /// Fortlaufende Nummer der Änderung an der Quelle
    pub sequence: u64,
}

/// Callback, den eine `TrackedPoseSource` pro Pose-Änderung aufruft.
pub type PoseListener = Box<dyn FnMut(PoseModified)>;

/// Kennung einer Subscription an einer `TrackedPoseSource`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Liefert die geordneten Punkte eines Pfads.
pub trait PathSource {
    /// Aktueller Snapshot der Pfadpunkte (0, 1 oder mehr Punkte).
    fn points(&self) -> Vec<DVec3>;
}

/// Getrackter Frame mit Update-Benachrichtigungen.
pub trait TrackedPoseSource {
    /// Weltposition des lokalen Ursprungs. `None` wenn nicht verfügbar.
    fn current_world_origin(&self) -> Option<DVec3>;

    /// Registriert einen Listener für Pose-Änderungen.
    fn subscribe(&mut self, listener: PoseListener) -> SubscriptionId;

    /// Entfernt einen Listener. Gibt `false` zurück, wenn die Kennung unbekannt war.
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;
}

/// Ziel, in das der Controller die berechnete Pose schreibt.
pub trait PoseSink {
    /// Ersetzt die bisher gehaltene Transformation vollständig.
    fn set_pose(&mut self, pose: Pose);
}

/// Weak-Handle auf eine Pfadquelle.
pub type PathHandle = Weak<RefCell<dyn PathSource>>;
/// Weak-Handle auf eine getrackte Pose.
pub type TrackedHandle = Weak<RefCell<dyn TrackedPoseSource>>;
/// Weak-Handle auf ein Ausgabeziel.
pub type OutputHandle = Weak<RefCell<dyn PoseSink>>;

/// Auswahl des Operators: welche Objekte gebunden sind.
///
/// Die Auswahl bleibt über Aktivieren/Deaktivieren hinweg erhalten.
#[derive(Default, Clone)]
pub struct SnapBindings {
    /// Gebundene Pfadquelle
    pub path_source: Option<PathHandle>,
    /// Gebundene getrackte Pose
    pub tracked_source: Option<TrackedHandle>,
    /// Gebundenes Ausgabeziel
    pub output: Option<OutputHandle>,
}

impl SnapBindings {
    /// Erstellt eine leere Auswahl.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bindet eine Pfadquelle.
    pub fn bind_path_source<P: PathSource + 'static>(&mut self, source: &Rc<RefCell<P>>) {
        let handle: Weak<RefCell<P>> = Rc::downgrade(source);
        self.path_source = Some(handle);
    }

    /// Bindet eine getrackte Pose.
    pub fn bind_tracked_source<T: TrackedPoseSource + 'static>(&mut self, source: &Rc<RefCell<T>>) {
        let handle: Weak<RefCell<T>> = Rc::downgrade(source);
        self.tracked_source = Some(handle);
    }

    /// Bindet ein Ausgabeziel.
    pub fn bind_output<S: PoseSink + 'static>(&mut self, sink: &Rc<RefCell<S>>) {
        let handle: Weak<RefCell<S>> = Rc::downgrade(sink);
        self.output = Some(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::scene::{MarkupPath, OutputTransform, TrackedTransform};

    #[test]
    fn concrete_objects_bind_as_trait_handles() {
        let path = Rc::new(RefCell::new(MarkupPath::new(vec![DVec3::ZERO, DVec3::X])));
        let tracked = Rc::new(RefCell::new(TrackedTransform::default()));
        let output = Rc::new(RefCell::new(OutputTransform::new()));

        let mut bindings = SnapBindings::new();
        bindings.bind_path_source(&path);
        bindings.bind_tracked_source(&tracked);
        bindings.bind_output(&output);

        let path_handle = bindings
            .path_source
            .as_ref()
            .and_then(Weak::upgrade)
            .expect("Pfadquelle sollte auflösbar sein");
        assert_eq!(path_handle.borrow().points(), vec![DVec3::ZERO, DVec3::X]);

        let tracked_handle = bindings
            .tracked_source
            .as_ref()
            .and_then(Weak::upgrade)
            .expect("Getrackte Pose sollte auflösbar sein");
        assert_eq!(tracked_handle.borrow().current_world_origin(), Some(DVec3::ZERO));

        let output_handle = bindings
            .output
            .as_ref()
            .and_then(Weak::upgrade)
            .expect("Ausgabe sollte auflösbar sein");
        output_handle.borrow_mut().set_pose(Pose::Translation(DVec3::Y));
        assert_eq!(output.borrow().write_count(), 1);
    }

    #[test]
    fn bindings_do_not_keep_objects_alive() {
        let output = Rc::new(RefCell::new(OutputTransform::new()));
        let mut bindings = SnapBindings::new();
        bindings.bind_output(&output);

        drop(output);

        assert!(bindings.output.as_ref().and_then(Weak::upgrade).is_none());
    }
}

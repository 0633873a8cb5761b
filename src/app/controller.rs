//! Snap-Controller: Zustandsmaschine und Update-Verarbeitung.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::bindings::{PathSource, PoseSink, SnapBindings, TrackedPoseSource};
use super::snap_policy;
use super::state::{PoseSubscription, SnapSession, SnapStats, SnapStatus};
use super::{BindingRole, SnapError, SnapIntent};
use crate::core::Pose;
use crate::shared::{validate_threshold, SnapOptions, DEFAULT_THRESHOLD_DISTANCE};

/// Führt einen Ausgabe-Transform dem nächsten Punkt eines Pfads nach.
///
/// Jede Pose-Änderung der getrackten Quelle wird vom Listener nur gezählt;
/// `process_pending` fasst alle wartenden Änderungen zu einem Update zusammen.
pub struct SnapController {
    bindings: SnapBindings,
    threshold_distance: f64,
    session: Option<SnapSession>,
    /// Deaktivierte Subscriptions, deren Quelle beim Entfernen ausgeliehen war
    unreleased: Vec<PoseSubscription>,
    stats: SnapStats,
}

impl Default for SnapController {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapController {
    /// Erstellt einen deaktivierten Controller mit Standard-Snap-Distanz.
    pub fn new() -> Self {
        Self {
            bindings: SnapBindings::new(),
            threshold_distance: DEFAULT_THRESHOLD_DISTANCE,
            session: None,
            unreleased: Vec::new(),
            stats: SnapStats::default(),
        }
    }

    /// Erstellt einen Controller mit der Snap-Distanz aus den Optionen.
    ///
    /// `enabled` wird hier nicht angewendet, da noch keine Bindungen existieren.
    pub fn from_options(options: &SnapOptions) -> Result<Self, SnapError> {
        let mut controller = Self::new();
        controller.set_threshold(options.threshold_distance)?;
        Ok(controller)
    }

    /// Übernimmt Snap-Distanz und Aktivierungszustand aus den Optionen.
    pub fn apply_options(&mut self, options: &SnapOptions) -> Result<(), SnapError> {
        self.set_threshold(options.threshold_distance)?;
        self.set_enabled(options.enabled)
    }

    // ── Konfiguration ───────────────────────────────────────────────

    /// Aktuelle Snap-Distanz.
    pub fn threshold(&self) -> f64 {
        self.threshold_distance
    }

    /// Setzt die Snap-Distanz. Negative oder nicht endliche Werte werden abgelehnt.
    pub fn set_threshold(&mut self, distance: f64) -> Result<(), SnapError> {
        validate_threshold(distance)?;
        self.threshold_distance = distance;
        log::debug!("Snap-Distanz gesetzt: {}", distance);
        Ok(())
    }

    /// Aktuelle Operator-Auswahl der gebundenen Objekte.
    pub fn bindings(&self) -> &SnapBindings {
        &self.bindings
    }

    /// Bindet die Pfadquelle. Wirkt bei aktivem Snap erst beim nächsten Aktivieren.
    pub fn bind_path_source<P: PathSource + 'static>(&mut self, source: &Rc<RefCell<P>>) {
        self.bindings.bind_path_source(source);
    }

    /// Bindet die getrackte Pose. Wirkt bei aktivem Snap erst beim nächsten Aktivieren.
    pub fn bind_tracked_source<T: TrackedPoseSource + 'static>(
        &mut self,
        source: &Rc<RefCell<T>>,
    ) {
        self.bindings.bind_tracked_source(source);
    }

    /// Bindet den Ausgabe-Transform. Wirkt bei aktivem Snap erst beim nächsten Aktivieren.
    pub fn bind_output<S: PoseSink + 'static>(&mut self, sink: &Rc<RefCell<S>>) {
        self.bindings.bind_output(sink);
    }

    /// Entfernt die Auswahl der Pfadquelle.
    pub fn clear_path_source(&mut self) {
        self.bindings.path_source = None;
    }

    /// Entfernt die Auswahl der getrackten Pose.
    pub fn clear_tracked_source(&mut self) {
        self.bindings.tracked_source = None;
    }

    /// Entfernt die Auswahl des Ausgabe-Transforms.
    pub fn clear_output(&mut self) {
        self.bindings.output = None;
    }

    // ── Zustandsmaschine ────────────────────────────────────────────

    /// Aktueller Zustand.
    pub fn status(&self) -> SnapStatus {
        if self.session.is_some() {
            SnapStatus::Enabled
        } else {
            SnapStatus::Disabled
        }
    }

    /// Gibt `true` zurück, wenn Snap aktiv ist.
    pub fn is_enabled(&self) -> bool {
        self.session.is_some()
    }

    /// Zähler der bisher verarbeiteten Updates.
    pub fn stats(&self) -> SnapStats {
        self.stats
    }

    /// Schaltet Snap ein oder aus.
    pub fn set_enabled(&mut self, enabled: bool) -> Result<(), SnapError> {
        if enabled {
            self.enable()
        } else {
            self.disable();
            Ok(())
        }
    }

    /// Aktiviert Snap und abonniert Pose-Änderungen der getrackten Quelle.
    ///
    /// Pfadquelle, Ausgabe und getrackte Pose müssen gebunden und noch
    /// vorhanden sein, sonst bleibt der Controller deaktiviert.
    pub fn enable(&mut self) -> Result<(), SnapError> {
        self.retry_release();
        if self.session.is_some() {
            return Ok(());
        }

        let path_source = resolve(&self.bindings.path_source, BindingRole::PathSource)?;
        let output = resolve(&self.bindings.output, BindingRole::Output)?;
        let tracked_weak = resolve(&self.bindings.tracked_source, BindingRole::TrackedPose)?;
        let tracked = tracked_weak
            .upgrade()
            .ok_or(SnapError::MissingBinding(BindingRole::TrackedPose))?;

        let mut source = tracked
            .try_borrow_mut()
            .map_err(|_| SnapError::Busy(BindingRole::TrackedPose))?;
        let subscription =
            PoseSubscription::subscribe(tracked_weak.clone(), |listener| source.subscribe(listener));
        drop(source);

        self.session = Some(SnapSession {
            path_source,
            tracked_source: tracked_weak,
            output,
            subscription,
        });
        log::info!("Snap aktiviert (Snap-Distanz {})", self.threshold_distance);
        Ok(())
    }

    /// Deaktiviert Snap.
    ///
    /// Nach der Rückkehr nimmt die Subscription keine Benachrichtigung mehr
    /// an und nichts ist mehr ausstehend. Ist die getrackte Quelle gerade
    /// ausgeliehen (Aufruf aus einem ihrer Listener), wird der inaktive
    /// Listener beim nächsten `enable`, `disable` oder `process_pending`
    /// von der Quelle entfernt.
    pub fn disable(&mut self) {
        self.retry_release();
        if let Some(session) = self.session.take() {
            self.release(session.subscription);
            log::info!("Snap deaktiviert");
        }
    }

    /// Anzahl deaktivierter Subscriptions, die noch an ihrer Quelle hängen.
    pub fn unreleased_subscriptions(&self) -> usize {
        self.unreleased.len()
    }

    fn release(&mut self, subscription: PoseSubscription) {
        if !subscription.release() {
            log::warn!(
                "Getrackte Pose ausgeliehen, Subscription {:?} wird später entfernt",
                subscription.id()
            );
            self.unreleased.push(subscription);
        }
    }

    fn retry_release(&mut self) {
        self.unreleased.retain(|subscription| !subscription.release());
    }

    // ── Update-Verarbeitung ─────────────────────────────────────────

    /// Verarbeitet alle wartenden Benachrichtigungen.
    ///
    /// Da jedes Update den aktuellen Stand liest, ergibt eine Folge von
    /// Benachrichtigungen genau ein Update. Ein fehlgeschlagenes Update wird
    /// geloggt und übersprungen. Gibt die Anzahl entnommener
    /// Benachrichtigungen zurück.
    pub fn process_pending(&mut self) -> usize {
        self.retry_release();

        let Some(pending) = self
            .session
            .as_ref()
            .and_then(|session| session.subscription.take_pending())
        else {
            return 0;
        };

        if let Err(e) = self.on_pose_modified() {
            log::warn!(
                "Pose-Update #{} übersprungen ({} Benachrichtigung(en)): {}",
                pending.last_sequence,
                pending.count,
                e
            );
        }
        pending.count
    }

    /// Berechnet die Ausgabe-Pose für den aktuellen Zustand und schreibt sie.
    ///
    /// Ohne Schreibvorgang bei fehlender Bindung oder zu kurzem Pfad.
    pub fn on_pose_modified(&mut self) -> Result<Pose, SnapError> {
        let result = self.update_output();
        match result {
            Ok(Pose::Translation(_)) => self.stats.snapped += 1,
            Ok(Pose::Identity) => self.stats.passed_through += 1,
            Err(SnapError::NotEnabled) => {}
            Err(_) => self.stats.skipped += 1,
        }
        result
    }

    fn update_output(&self) -> Result<Pose, SnapError> {
        let session = self.session.as_ref().ok_or(SnapError::NotEnabled)?;

        let path_source = upgrade(&session.path_source, BindingRole::PathSource)?;
        let path = path_source
            .try_borrow()
            .map_err(|_| SnapError::Busy(BindingRole::PathSource))?
            .points();

        let tracked = upgrade(&session.tracked_source, BindingRole::TrackedPose)?;
        let tracked_origin = tracked
            .try_borrow()
            .map_err(|_| SnapError::Busy(BindingRole::TrackedPose))?
            .current_world_origin()
            .ok_or(SnapError::MissingBinding(BindingRole::TrackedPose))?;

        let pose = snap_policy::compute_output_pose(&path, tracked_origin, self.threshold_distance)?;

        let output = upgrade(&session.output, BindingRole::Output)?;
        output
            .try_borrow_mut()
            .map_err(|_| SnapError::Busy(BindingRole::Output))?
            .set_pose(pose);

        log::debug!(
            "Tool {:?} → Ausgabe {:?} (Snap-Distanz {})",
            tracked_origin,
            pose,
            self.threshold_distance
        );
        Ok(pose)
    }

    // ── Intents ─────────────────────────────────────────────────────

    /// Verarbeitet eine Operator- oder System-Eingabe.
    pub fn handle_intent(&mut self, intent: SnapIntent) -> anyhow::Result<()> {
        match intent {
            SnapIntent::SnapToggled { enabled } => self.set_enabled(enabled)?,
            SnapIntent::ThresholdChanged { distance } => self.set_threshold(distance)?,
            SnapIntent::PoseModified => {
                self.process_pending();
            }
        }

        Ok(())
    }
}

impl Drop for SnapController {
    fn drop(&mut self) {
        self.disable();
        if !self.unreleased.is_empty() {
            log::error!(
                "{} Subscription(s) konnten nicht entfernt werden, Listener bleiben inaktiv registriert",
                self.unreleased.len()
            );
        }
    }
}

/// Prüft, dass eine Rolle gebunden ist und das Objekt noch existiert.
fn resolve<T: ?Sized>(handle: &Option<Weak<T>>, role: BindingRole) -> Result<Weak<T>, SnapError> {
    match handle {
        Some(weak) if weak.strong_count() > 0 => Ok(weak.clone()),
        _ => Err(SnapError::MissingBinding(role)),
    }
}

fn upgrade<T: ?Sized>(handle: &Weak<T>, role: BindingRole) -> Result<Rc<T>, SnapError> {
    handle.upgrade().ok_or(SnapError::MissingBinding(role))
}

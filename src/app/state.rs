//! Laufzeitzustand des Snap-Controllers.

use std::cell::Cell;
use std::rc::Rc;

use super::bindings::{
    OutputHandle, PathHandle, PoseListener, PoseModified, SubscriptionId, TrackedHandle,
};

/// Zustand der Snap-Zustandsmaschine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapStatus {
    /// Keine Subscription, keine Updates
    #[default]
    Disabled,
    /// Subscription aktiv, Pose-Updates werden verarbeitet
    Enabled,
}

/// Zusammengefasste, noch nicht verarbeitete Benachrichtigungen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PendingUpdates {
    /// Anzahl der Benachrichtigungen seit der letzten Verarbeitung
    pub count: usize,
    /// Fortlaufende Nummer der jüngsten Benachrichtigung
    pub last_sequence: u64,
}

/// Zwischen Listener und Controller geteilter Posteingang.
///
/// Der Listener zählt nur mit; der Speicherbedarf bleibt unabhängig von der
/// Anzahl der Benachrichtigungen konstant.
#[derive(Debug)]
struct Inbox {
    active: Cell<bool>,
    count: Cell<usize>,
    last_sequence: Cell<u64>,
}

impl Inbox {
    fn new() -> Self {
        Self {
            active: Cell::new(true),
            count: Cell::new(0),
            last_sequence: Cell::new(0),
        }
    }

    fn push(&self, event: PoseModified) {
        if !self.active.get() {
            return;
        }
        self.count.set(self.count.get().saturating_add(1));
        self.last_sequence.set(event.sequence);
    }
}

/// Subscription an einer getrackten Pose.
///
/// Nach `release` nimmt der Listener nichts mehr an, auch wenn er wegen
/// einer ausgeliehenen Quelle noch registriert ist.
pub(crate) struct PoseSubscription {
    tracked_source: TrackedHandle,
    id: SubscriptionId,
    inbox: Rc<Inbox>,
}

impl PoseSubscription {
    /// Registriert einen Listener an `tracked` und liefert die Subscription.
    pub(crate) fn subscribe(
        tracked_source: TrackedHandle,
        register: impl FnOnce(PoseListener) -> SubscriptionId,
    ) -> Self {
        let inbox = Rc::new(Inbox::new());
        let listener_inbox = Rc::clone(&inbox);
        let id = register(Box::new(move |event| listener_inbox.push(event)));
        Self {
            tracked_source,
            id,
            inbox,
        }
    }

    /// Kennung an der Quelle.
    pub(crate) fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Entnimmt alle wartenden Benachrichtigungen.
    pub(crate) fn take_pending(&self) -> Option<PendingUpdates> {
        let count = self.inbox.count.replace(0);
        (count > 0).then(|| PendingUpdates {
            count,
            last_sequence: self.inbox.last_sequence.get(),
        })
    }

    /// Deaktiviert den Listener und entfernt ihn von der Quelle.
    ///
    /// Gibt `false` zurück, wenn die Quelle gerade ausgeliehen ist (z.B.
    /// während sie ihre Listener benachrichtigt). Der Listener bleibt dann
    /// inaktiv registriert, bis ein erneuter Aufruf gelingt.
    pub(crate) fn release(&self) -> bool {
        self.inbox.active.set(false);
        self.inbox.count.set(0);

        let Some(tracked) = self.tracked_source.upgrade() else {
            log::debug!("Getrackte Pose bereits entfernt, keine Subscription mehr vorhanden");
            return true;
        };
        let Ok(mut tracked) = tracked.try_borrow_mut() else {
            return false;
        };
        if !tracked.unsubscribe(self.id) {
            log::warn!("Subscription {:?} war nicht mehr registriert", self.id);
        }
        true
    }
}

/// Aktive Session: existiert nur im Zustand `Enabled`.
///
/// Hält die beim Aktivieren aufgelösten Handles und die Subscription an
/// der getrackten Pose.
pub(crate) struct SnapSession {
    pub(crate) path_source: PathHandle,
    pub(crate) tracked_source: TrackedHandle,
    pub(crate) output: OutputHandle,
    pub(crate) subscription: PoseSubscription,
}

/// Zähler der verarbeiteten Pose-Updates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapStats {
    /// Updates mit Translation auf den Pfad
    pub snapped: u64,
    /// Updates mit Identität (Tool außerhalb der Snap-Distanz)
    pub passed_through: u64,
    /// Übersprungene Updates (fehlende Bindung, zu kurzer Pfad)
    pub skipped: u64,
}

impl SnapStats {
    /// Gesamtzahl der Updates.
    pub fn total(&self) -> u64 {
        self.snapped + self.passed_through + self.skipped
    }
}

//=========================================================================
// Handle Events
//=========================================================================
//
// Session lifecycle notifications delivered over crossbeam channels.
//
// Architecture:
//   HandleManager ─▶ EventHub::emit(event)
//                        ├─ global subscribers      (every handle)
//                        └─ per-handle subscribers  (one handle only)
//
// Subscriptions are explicit: `subscribe*` hands back an id and a
// receiver, `unsubscribe` drops the sender. Per-handle subscriptions are
// dropped automatically right after that handle's `Destroyed` event, and
// subscribers whose receiver was dropped are pruned on the next send.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::trace;

//=== Internal Dependencies ===============================================

use super::types::HandleId;

//=== HandleEvent =========================================================

/// Lifecycle notification of one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleEvent {
    InteractionStarted(HandleId),
    /// Sent every frame a drag is in progress.
    Interacting(HandleId),
    InteractionEnded(HandleId),
    Destroyed(HandleId),
}

impl HandleEvent {
    pub fn handle(&self) -> HandleId {
        match *self {
            HandleEvent::InteractionStarted(id)
            | HandleEvent::Interacting(id)
            | HandleEvent::InteractionEnded(id)
            | HandleEvent::Destroyed(id) => id,
        }
    }
}

//=== SubscriptionId ======================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscriber {
    id: SubscriptionId,
    filter: Option<HandleId>,
    sender: Sender<HandleEvent>,
}

//=== EventHub ============================================================

/// Fan-out of [`HandleEvent`]s to registered receivers.
#[derive(Default)]
pub struct EventHub {
    subscribers: Vec<Subscriber>,
    next_id: u64,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Registration -----------------------------------------------------

    /// Receives events of every handle.
    pub fn subscribe(&mut self) -> (SubscriptionId, Receiver<HandleEvent>) {
        self.register(None)
    }

    /// Receives events of a single handle.
    pub fn subscribe_handle(&mut self, handle: HandleId) -> (SubscriptionId, Receiver<HandleEvent>) {
        self.register(Some(handle))
    }

    /// Returns `false` when the id was unknown or already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    //--- Dispatch ---------------------------------------------------------

    pub fn emit(&mut self, event: HandleEvent) {
        trace!("Emitting {:?}", event);
        let handle = event.handle();
        self.subscribers.retain(|s| {
            if s.filter.is_some_and(|f| f != handle) {
                return true;
            }
            s.sender.send(event).is_ok()
        });
    }

    /// Sends `Destroyed` and drops the handle's own subscriptions.
    pub fn handle_destroyed(&mut self, handle: HandleId) {
        self.emit(HandleEvent::Destroyed(handle));
        self.subscribers.retain(|s| s.filter != Some(handle));
    }

    //--- Internal Helpers -------------------------------------------------

    fn register(&mut self, filter: Option<HandleId>) -> (SubscriptionId, Receiver<HandleEvent>) {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        let (sender, receiver) = unbounded();
        self.subscribers.push(Subscriber { id, filter, sender });
        (id, receiver)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

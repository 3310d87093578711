use serde::Serialize;

/// Events the page delivers to the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// A field's value changed (radio group name or control name)
    Change { field: String },
    /// The form's submit control was activated
    Submit,
    /// The user is navigating away
    BeforeUnload,
}

/// What a listener is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum EventTarget {
    Change { field: String },
    Submit,
    BeforeUnload,
}

impl EventTarget {
    pub fn matches(&self, event: &PageEvent) -> bool {
        match (self, event) {
            (EventTarget::Change { field: a }, PageEvent::Change { field: b }) => a == b,
            (EventTarget::Submit, PageEvent::Submit) => true,
            (EventTarget::BeforeUnload, PageEvent::BeforeUnload) => true,
            _ => false,
        }
    }
}

/// The guard behavior a listener triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ListenerAction {
    WarnOnUnload,
    SubmitForm,
    OpenSubmitGate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ListenerId(pub u64);

#[derive(Debug, Clone)]
pub struct Listener {
    pub id: ListenerId,
    pub target: EventTarget,
    pub action: ListenerAction,
    pub once: bool,
}

/// Listeners owned by one guard. Every subscription hands back an id that can
/// unregister it; `clear` drops them all on teardown.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    next_id: u64,
    listeners: Vec<Listener>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, target: EventTarget, action: ListenerAction) -> ListenerId {
        self.push(target, action, false)
    }

    /// Subscribe a listener that is removed after its first delivery.
    pub fn subscribe_once(&mut self, target: EventTarget, action: ListenerAction) -> ListenerId {
        self.push(target, action, true)
    }

    fn push(&mut self, target: EventTarget, action: ListenerAction, once: bool) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.push(Listener {
            id,
            target,
            action,
            once,
        });
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    /// Actions to run for `event`, in subscription order. One-time listeners
    /// that match are consumed.
    pub fn deliver(&mut self, event: &PageEvent) -> Vec<(ListenerId, ListenerAction)> {
        let fired: Vec<(ListenerId, ListenerAction)> = self
            .listeners
            .iter()
            .filter(|l| l.target.matches(event))
            .map(|l| (l.id, l.action))
            .collect();

        self.listeners
            .retain(|l| !(l.once && l.target.matches(event)));

        fired
    }

    pub fn contains(&self, id: ListenerId) -> bool {
        self.listeners.iter().any(|l| l.id == id)
    }

    pub fn listeners(&self) -> &[Listener] {
        &self.listeners
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Unregister everything, returning how many listeners were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.listeners.len();
        self.listeners.clear();
        removed
    }
}

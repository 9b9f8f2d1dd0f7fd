//! The store: snapshot ownership, dispatch, observer attachment.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::action::{Action, ActionKind};
use crate::bindings::StoreHandle;
use crate::process::Dispatchable;
use crate::registry::ActionRegistry;
use crate::state::State;

type ObserverFn<S> = Arc<dyn Fn(&Arc<S>) + Send + Sync>;

/// Identifier returned by `subscribe`, used to detach an observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct StoreInner<K: ActionKind, S: State, E> {
    registry: ActionRegistry<K, S>,
    snapshot: Arc<Mutex<Arc<S>>>,
    observers: Mutex<Vec<(SubscriptionId, ObserverFn<S>)>>,
    next_subscription: AtomicU64,
    extra: Arc<E>,
}

/// A state container: the current snapshot plus the dispatch capability.
///
/// `Store` is a lightweight handle; clones share the same container. All
/// state transitions happen inside `dispatch`, serialized by the snapshot
/// lock, so concurrent readers of a snapshot are always safe.
pub struct Store<K: ActionKind, S: State, E = ()> {
    inner: Arc<StoreInner<K, S, E>>,
}

impl<K: ActionKind, S: State, E> Clone for Store<K, S, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K: ActionKind, S: State> Store<K, S, ()> {
    /// Create a container over `registry` with no extra argument.
    pub fn new(registry: ActionRegistry<K, S>) -> Self {
        Self::with_extra(registry, ())
    }
}

impl<K: ActionKind, S: State, E: Send + Sync + 'static> Store<K, S, E> {
    /// Create a container over `registry`.
    ///
    /// `extra` is the fixed context value handed to every process action.
    pub fn with_extra(registry: ActionRegistry<K, S>, extra: E) -> Self {
        let snapshot = registry.initial_snapshot();
        Self {
            inner: Arc::new(StoreInner {
                registry,
                snapshot: Arc::new(Mutex::new(snapshot)),
                observers: Mutex::new(Vec::new()),
                next_subscription: AtomicU64::new(0),
                extra: Arc::new(extra),
            }),
        }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<S> {
        Arc::clone(&self.inner.snapshot.lock())
    }

    /// A read-only accessor for the current snapshot.
    pub fn reader(&self) -> StateReader<S> {
        StateReader {
            slot: Arc::clone(&self.inner.snapshot),
        }
    }

    /// The extra argument handed to process actions.
    pub fn extra(&self) -> Arc<E> {
        Arc::clone(&self.inner.extra)
    }

    pub fn registry(&self) -> &ActionRegistry<K, S> {
        &self.inner.registry
    }

    /// The current snapshot paired with this dispatch capability.
    pub fn handle(&self) -> StoreHandle<K, S, E> {
        StoreHandle::new(self.snapshot(), self.clone())
    }

    /// Whether two handles refer to the same container.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Apply `action` through the reducer table and return it unchanged.
    ///
    /// The transition is visible to any read issued after this call
    /// returns. Unknown kinds leave the snapshot untouched and notify no
    /// observers. A panicking reducer propagates to the caller; the
    /// snapshot keeps its last successfully-applied value.
    pub fn dispatch(&self, action: Action<K>) -> Action<K> {
        let next = {
            let mut slot = self.inner.snapshot.lock();
            let next = self.inner.registry.reduce_shared(Arc::clone(&slot), &action);
            if Arc::ptr_eq(&slot, &next) {
                tracing::trace!(
                    container = self.inner.registry.name(),
                    kind = ?action.kind(),
                    "dispatch: no reducer registered, state unchanged"
                );
                return action;
            }
            *slot = Arc::clone(&next);
            next
        };
        tracing::trace!(
            container = self.inner.registry.name(),
            kind = ?action.kind(),
            "dispatch: applied"
        );
        self.notify(&next);
        action
    }

    /// Run a process action and return its result.
    ///
    /// The process receives a clone of this dispatch capability, a state
    /// reader, and the container's extra argument. It may dispatch zero or
    /// more times, synchronously or from a deferred task it moves its
    /// handles into, and may itself run further process actions.
    pub fn dispatch_process<R>(
        &self,
        process: impl FnOnce(Store<K, S, E>, StateReader<S>, Arc<E>) -> R,
    ) -> R {
        tracing::trace!(
            container = self.inner.registry.name(),
            "dispatch: running process action"
        );
        process(self.clone(), self.reader(), self.extra())
    }

    /// Dispatch either variant of the action/process union.
    ///
    /// Actions are applied and handed back; processes run fire-and-forget.
    pub fn dispatch_any(&self, dispatchable: Dispatchable<K, S, E>) -> Option<Action<K>> {
        match dispatchable {
            Dispatchable::Action(action) => Some(self.dispatch(action)),
            Dispatchable::Process(process) => {
                self.dispatch_process(process);
                None
            }
        }
    }

    /// Attach an observer invoked with each new snapshot.
    ///
    /// Observers run on the dispatching thread, after the snapshot swap
    /// and outside the state lock; they may dispatch or (un)subscribe.
    /// Dispatches that leave the snapshot unchanged deliver nothing.
    pub fn subscribe(&self, observer: impl Fn(&Arc<S>) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.inner.observers.lock().push((id, Arc::new(observer)));
        id
    }

    /// Detach an observer. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.inner.observers.lock();
        let before = observers.len();
        observers.retain(|(other, _)| *other != id);
        observers.len() != before
    }

    fn notify(&self, snapshot: &Arc<S>) {
        // Copy the list out so observers can re-enter the store.
        let observers: Vec<ObserverFn<S>> = self
            .inner
            .observers
            .lock()
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        for observer in observers {
            observer(snapshot);
        }
    }
}

/// Read-only accessor for a container's current snapshot.
///
/// Handed to process actions as their state reader; clones can be moved
/// into deferred tasks.
pub struct StateReader<S: State> {
    slot: Arc<Mutex<Arc<S>>>,
}

impl<S: State> Clone for StateReader<S> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<S: State> StateReader<S> {
    /// The snapshot at this moment.
    pub fn get(&self) -> Arc<S> {
        Arc::clone(&self.slot.lock())
    }
}

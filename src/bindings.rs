//! Binding layer: named callables over a snapshot/dispatch pair.

use std::sync::Arc;

use crate::action::{Action, ActionKind};
use crate::process::ProcessFn;
use crate::state::State;
use crate::store::Store;

/// A memoized snapshot/dispatch pair.
///
/// A handle captures the snapshot current at lookup time together with the
/// container's dispatch capability, and binds consumer shorthands into
/// callables that construct and dispatch in one step. Handles obtained
/// without an intervening state change are `same_pair`; a state-changing
/// dispatch makes the next lookup produce a fresh pair.
pub struct StoreHandle<K: ActionKind, S: State, E = ()> {
    snapshot: Arc<S>,
    store: Store<K, S, E>,
}

impl<K: ActionKind, S: State, E> Clone for StoreHandle<K, S, E> {
    fn clone(&self) -> Self {
        Self {
            snapshot: Arc::clone(&self.snapshot),
            store: self.store.clone(),
        }
    }
}

impl<K: ActionKind, S: State + std::fmt::Debug, E> std::fmt::Debug for StoreHandle<K, S, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreHandle")
            .field("snapshot", &self.snapshot)
            .finish_non_exhaustive()
    }
}

impl<K: ActionKind, S: State, E: Send + Sync + 'static> StoreHandle<K, S, E> {
    pub(crate) fn new(snapshot: Arc<S>, store: Store<K, S, E>) -> Self {
        Self { snapshot, store }
    }

    /// The state captured when this handle was produced.
    pub fn state(&self) -> &S {
        &self.snapshot
    }

    pub fn snapshot(&self) -> Arc<S> {
        Arc::clone(&self.snapshot)
    }

    /// The raw dispatch capability, for cases the bound shorthands do not
    /// cover.
    pub fn store(&self) -> &Store<K, S, E> {
        &self.store
    }

    pub fn dispatch(&self, action: Action<K>) -> Action<K> {
        self.store.dispatch(action)
    }

    /// Pointer identity on both halves of the pair.
    pub fn same_pair(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.snapshot, &other.snapshot) && self.store.ptr_eq(&other.store)
    }

    /// Bind an action shorthand.
    ///
    /// The returned callable constructs the action and dispatches it
    /// immediately; the dispatch result is discarded.
    pub fn bind_action<A>(
        &self,
        shorthand: impl Fn(A) -> Action<K> + Send + Sync + 'static,
    ) -> impl Fn(A) + Send + Sync + 'static {
        let store = self.store.clone();
        move |args| {
            let _ = store.dispatch(shorthand(args));
        }
    }

    /// Bind a zero-argument action shorthand.
    pub fn bind_simple(
        &self,
        shorthand: impl Fn() -> Action<K> + Send + Sync + 'static,
    ) -> impl Fn() + Send + Sync + 'static {
        let store = self.store.clone();
        move || {
            let _ = store.dispatch(shorthand());
        }
    }

    /// Bind a process-action shorthand.
    ///
    /// The returned callable constructs the process action and runs it
    /// through the dispatch capability, handing back its result.
    pub fn bind_process<A, R>(
        &self,
        shorthand: impl Fn(A) -> ProcessFn<K, S, E, R> + Send + Sync + 'static,
    ) -> impl Fn(A) -> R + Send + Sync + 'static {
        let store = self.store.clone();
        move |args| store.dispatch_process(shorthand(args))
    }
}

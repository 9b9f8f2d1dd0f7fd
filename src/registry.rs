//! Action registration and reducer resolution.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use crate::action::{Action, ActionKind, PayloadCreator, SimpleCreator};
use crate::state::State;

type ReducerFn<K, S> = Box<dyn Fn(S, &Action<K>) -> S + Send + Sync>;

/// Single source of truth for how action kinds map to state transitions
/// for one state shape.
///
/// A registry is constructed explicitly and mutated only during a setup
/// phase, while actions are registered; afterwards it is handed to a
/// `Store` or consumed into a standalone reducer. Registering the same
/// kind twice replaces the earlier reducer: last write wins. That is a
/// documented policy, not an error, and the replacement is logged.
pub struct ActionRegistry<K: ActionKind, S: State> {
    name: &'static str,
    initial_state: S,
    reducers: HashMap<K, ReducerFn<K, S>>,
}

impl<K: ActionKind, S: State> ActionRegistry<K, S> {
    /// Create an empty registry for `initial_state`.
    ///
    /// `name` labels this container in log events and error messages.
    pub fn new(name: &'static str, initial_state: S) -> Self {
        Self {
            name,
            initial_state,
            reducers: HashMap::new(),
        }
    }

    /// Register a reducer for a payload-carrying action kind.
    ///
    /// Returns the creator that builds actions of this kind. A dispatched
    /// action of this kind that carries no payload, or a payload of a
    /// different type, resolves to an identity transition.
    pub fn payload_action<P: Any + Send>(
        &mut self,
        kind: K,
        reduce: impl Fn(S, &P) -> S + Send + Sync + 'static,
    ) -> PayloadCreator<K, P> {
        self.install(
            kind,
            Box::new(move |state, action: &Action<K>| match action.payload::<P>() {
                Some(payload) => reduce(state, payload),
                None => state,
            }),
        );
        PayloadCreator::new(kind)
    }

    /// Register a reducer for a payload-less action kind.
    ///
    /// Returns the creator that builds actions of this kind. The reducer
    /// runs for any dispatched action of this kind; a payload, if one is
    /// present, is ignored.
    pub fn simple_action(
        &mut self,
        kind: K,
        reduce: impl Fn(S) -> S + Send + Sync + 'static,
    ) -> SimpleCreator<K> {
        self.install(kind, Box::new(move |state, _action: &Action<K>| reduce(state)));
        SimpleCreator::new(kind)
    }

    fn install(&mut self, kind: K, reducer: ReducerFn<K, S>) {
        if self.reducers.insert(kind, reducer).is_some() {
            tracing::debug!(
                container = self.name,
                kind = ?kind,
                "reducer replaced; last registration wins"
            );
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn initial_state(&self) -> &S {
        &self.initial_state
    }

    /// Whether a reducer is registered for `kind`.
    pub fn handles(&self, kind: K) -> bool {
        self.reducers.contains_key(&kind)
    }

    /// Number of registered action kinds.
    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }

    /// Resolve `action` against the reducer table and apply it.
    ///
    /// Unknown kinds return `state` unchanged; they are a no-op, not a
    /// failure.
    pub fn reduce(&self, state: S, action: &Action<K>) -> S {
        match self.reducers.get(&action.kind()) {
            Some(reduce) => reduce(state, action),
            None => state,
        }
    }

    /// Shared-snapshot resolution.
    ///
    /// The no-op path hands back the same allocation, so callers can
    /// detect "unchanged" by pointer identity.
    pub(crate) fn reduce_shared(&self, snapshot: Arc<S>, action: &Action<K>) -> Arc<S> {
        match self.reducers.get(&action.kind()) {
            Some(reduce) => Arc::new(reduce((*snapshot).clone(), action)),
            None => snapshot,
        }
    }

    pub(crate) fn initial_snapshot(&self) -> Arc<S> {
        Arc::new(self.initial_state.clone())
    }

    /// Consume the registry into a standalone pure resolution function.
    pub fn into_reducer(self) -> impl Fn(S, &Action<K>) -> S + Send + Sync {
        let reducers = self.reducers;
        move |state, action| match reducers.get(&action.kind()) {
            Some(reduce) => reduce(state, action),
            None => state,
        }
    }
}

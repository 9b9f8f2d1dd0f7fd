//! Process actions: thunk-style routines run through the store.

use std::sync::Arc;

use crate::action::{Action, ActionKind};
use crate::state::State;
use crate::store::{StateReader, Store};

/// A boxed process action.
///
/// A process action is not itself an action: it is a routine handed the
/// live dispatch capability, a state reader, and the container's extra
/// argument. It may dispatch further actions (or further process actions)
/// any number of times, synchronously or from deferred tasks it moves its
/// handles into, and its return value travels back through
/// `dispatch_process`.
pub type ProcessFn<K, S, E, R = ()> =
    Box<dyn FnOnce(Store<K, S, E>, StateReader<S>, Arc<E>) -> R + Send>;

/// Either a plain action or a process action.
///
/// The dual dispatch contract as an explicit union: dispatch acts on data
/// and executes functions, resolved by discriminant match.
pub enum Dispatchable<K: ActionKind, S: State, E = ()> {
    /// Applied through the reducer table.
    Action(Action<K>),
    /// Run with the dispatch capability, a state reader, and the extra
    /// argument. The result is discarded on this path.
    Process(ProcessFn<K, S, E>),
}

impl<K: ActionKind, S: State, E> Dispatchable<K, S, E> {
    /// Box a closure into the process variant.
    pub fn process(
        f: impl FnOnce(Store<K, S, E>, StateReader<S>, Arc<E>) + Send + 'static,
    ) -> Self {
        Self::Process(Box::new(f))
    }
}

impl<K: ActionKind, S: State, E> From<Action<K>> for Dispatchable<K, S, E> {
    fn from(action: Action<K>) -> Self {
        Self::Action(action)
    }
}

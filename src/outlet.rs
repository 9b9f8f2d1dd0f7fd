//! Distribution point: where consumers resolve the live container pair.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::action::ActionKind;
use crate::bindings::StoreHandle;
use crate::error::StoreError;
use crate::state::State;
use crate::store::Store;

/// Distribution point threaded through the host to descendant consumers.
///
/// An outlet starts with only a placeholder state and no dispatch
/// capability. The host provides the live store once one exists; consumers
/// then look the pair up with `handle()`. A lookup before a store was
/// provided fails with `ContainerNotInitialized`; the outlet never falls
/// back to a stale or placeholder pair.
pub struct StoreOutlet<K: ActionKind, S: State, E = ()> {
    inner: Arc<OutletInner<K, S, E>>,
}

struct OutletInner<K: ActionKind, S: State, E> {
    name: &'static str,
    default_state: Arc<S>,
    live: RwLock<Option<Store<K, S, E>>>,
}

impl<K: ActionKind, S: State, E> Clone for StoreOutlet<K, S, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K: ActionKind, S: State, E: Send + Sync + 'static> StoreOutlet<K, S, E> {
    /// Create an outlet with a placeholder `default_state`.
    ///
    /// `name` labels the container in log events and in the
    /// `ContainerNotInitialized` message.
    pub fn new(name: &'static str, default_state: S) -> Self {
        Self {
            inner: Arc::new(OutletInner {
                name,
                default_state: Arc::new(default_state),
                live: RwLock::new(None),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    /// The placeholder state half of the default pair.
    ///
    /// For hosts that render something before a store exists; it is never
    /// substituted for the live pair on lookup.
    pub fn default_state(&self) -> Arc<S> {
        Arc::clone(&self.inner.default_state)
    }

    /// Install the live store.
    pub fn provide(&self, store: Store<K, S, E>) {
        *self.inner.live.write() = Some(store);
        tracing::debug!(container = self.inner.name, "store provided to outlet");
    }

    /// Remove the live store, if any.
    pub fn clear(&self) {
        let removed = self.inner.live.write().take().is_some();
        if removed {
            tracing::debug!(container = self.inner.name, "store cleared from outlet");
        }
    }

    pub fn is_live(&self) -> bool {
        self.inner.live.read().is_some()
    }

    /// Look up the current snapshot/dispatch pair.
    ///
    /// Fails when no store has been provided yet.
    pub fn handle(&self) -> Result<StoreHandle<K, S, E>, StoreError> {
        match self.inner.live.read().as_ref() {
            Some(store) => Ok(store.handle()),
            None => {
                tracing::debug!(
                    container = self.inner.name,
                    "handle lookup on uninitialized outlet"
                );
                Err(StoreError::ContainerNotInitialized {
                    container: self.inner.name,
                })
            }
        }
    }
}

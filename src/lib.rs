//! Typed, modular state containers.
//!
//! This crate provides a small registry/dispatch core for building state
//! containers with unidirectional data flow.
//!
//! # Architecture
//!
//! ```text
//! ActionRegistry ──→ action creators
//!       │
//!       ▼ reduce(state, action)
//!     Store ──→ snapshot (Arc<S>) ──→ observers
//!       ▲
//!       │ dispatch / dispatch_process
//! StoreHandle ←── StoreOutlet (distribution point)
//! ```
//!
//! - **Action**: a tagged value naming a state transition, optionally
//!   carrying a payload
//! - **Reducer**: pure function that transforms state based on actions
//! - **Store**: owns the current snapshot and applies dispatched actions;
//!   also runs process actions (thunks) that may dispatch further actions
//! - **Binding layer**: turns the raw snapshot/dispatch pair into named
//!   callables consumers can invoke directly

pub mod action;
pub mod bindings;
pub mod error;
pub mod outlet;
pub mod process;
pub mod registry;
pub mod state;
pub mod store;

pub use action::{Action, ActionKind, PayloadCreator, SimpleCreator};
pub use bindings::StoreHandle;
pub use error::StoreError;
pub use outlet::StoreOutlet;
pub use process::{Dispatchable, ProcessFn};
pub use registry::ActionRegistry;
pub use state::State;
pub use store::{StateReader, Store, SubscriptionId};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::action::{Action, ActionKind, PayloadCreator, SimpleCreator};
    pub use crate::bindings::StoreHandle;
    pub use crate::error::StoreError;
    pub use crate::outlet::StoreOutlet;
    pub use crate::process::{Dispatchable, ProcessFn};
    pub use crate::registry::ActionRegistry;
    pub use crate::state::State;
    pub use crate::store::{StateReader, Store, SubscriptionId};
}

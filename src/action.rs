//! Actions and typed action creators.

use std::any::Any;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

/// Marker trait for action kind discriminants.
///
/// A kind distinguishes the state transitions of one container. Use a
/// field-less enum: variants are distinct by construction, cheap to copy,
/// and hashable for the reducer table.
pub trait ActionKind: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

type Payload = Box<dyn Any + Send>;

/// A dispatched unit of state transition.
///
/// Simple actions carry only their kind; payload actions additionally
/// carry a value that reducers read back by typed downcast. The kind is
/// fixed at construction.
pub struct Action<K: ActionKind> {
    kind: K,
    payload: Option<Payload>,
}

impl<K: ActionKind> Action<K> {
    /// Build a payload-less action.
    pub fn simple(kind: K) -> Self {
        Self { kind, payload: None }
    }

    /// Build an action carrying `payload`.
    pub fn with_payload<P: Any + Send>(kind: K, payload: P) -> Self {
        Self {
            kind,
            payload: Some(Box::new(payload)),
        }
    }

    pub fn kind(&self) -> K {
        self.kind
    }

    /// Typed view of the payload.
    ///
    /// Returns `None` for simple actions and for payloads of a type other
    /// than the one requested.
    pub fn payload<P: Any>(&self) -> Option<&P> {
        self.payload.as_deref().and_then(|p| p.downcast_ref::<P>())
    }

    pub fn has_payload(&self) -> bool {
        self.payload.is_some()
    }
}

impl<K: ActionKind> fmt::Debug for Action<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("kind", &self.kind)
            .field("payload", if self.payload.is_some() { &"<some>" } else { &"<none>" })
            .finish()
    }
}

/// Creator for payload-carrying actions of one kind.
///
/// Returned by registration; `create(payload)` builds a dispatchable
/// action of the registered kind.
pub struct PayloadCreator<K: ActionKind, P> {
    kind: K,
    _payload: PhantomData<fn(P)>,
}

impl<K: ActionKind, P: Any + Send> PayloadCreator<K, P> {
    pub(crate) fn new(kind: K) -> Self {
        Self {
            kind,
            _payload: PhantomData,
        }
    }

    pub fn create(&self, payload: P) -> Action<K> {
        Action::with_payload(self.kind, payload)
    }

    pub fn kind(&self) -> K {
        self.kind
    }
}

impl<K: ActionKind, P> Clone for PayloadCreator<K, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: ActionKind, P> Copy for PayloadCreator<K, P> {}

impl<K: ActionKind, P> fmt::Debug for PayloadCreator<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PayloadCreator")
            .field("kind", &self.kind)
            .finish()
    }
}

/// Creator for payload-less actions of one kind.
#[derive(Clone, Copy, Debug)]
pub struct SimpleCreator<K: ActionKind> {
    kind: K,
}

impl<K: ActionKind> SimpleCreator<K> {
    pub(crate) fn new(kind: K) -> Self {
        Self { kind }
    }

    pub fn create(&self) -> Action<K> {
        Action::simple(self.kind)
    }

    pub fn kind(&self) -> K {
        self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestKind {
        Put,
        Poke,
    }

    impl ActionKind for TestKind {}

    #[test]
    fn simple_action_has_no_payload() {
        let action = Action::simple(TestKind::Poke);
        assert_eq!(action.kind(), TestKind::Poke);
        assert!(!action.has_payload());
        assert_eq!(action.payload::<u32>(), None);
    }

    #[test]
    fn payload_reads_back_typed() {
        let action = Action::with_payload(TestKind::Put, 7_u32);
        assert!(action.has_payload());
        assert_eq!(action.payload::<u32>(), Some(&7));
    }

    #[test]
    fn payload_of_other_type_reads_none() {
        let action = Action::with_payload(TestKind::Put, 7_u32);
        assert_eq!(action.payload::<String>(), None);
    }

    #[test]
    fn creators_build_their_kind() {
        let put = PayloadCreator::<_, u32>::new(TestKind::Put);
        let poke = SimpleCreator::new(TestKind::Poke);

        let action = put.create(3);
        assert_eq!(action.kind(), TestKind::Put);
        assert_eq!(action.payload::<u32>(), Some(&3));

        let action = poke.create();
        assert_eq!(action.kind(), TestKind::Poke);
        assert!(!action.has_payload());
    }

    #[test]
    fn debug_formats_payload_presence() {
        let simple = format!("{:?}", Action::simple(TestKind::Poke));
        let carrying = format!("{:?}", Action::with_payload(TestKind::Put, 1_u8));
        assert!(simple.contains("<none>"));
        assert!(carrying.contains("<some>"));
    }
}

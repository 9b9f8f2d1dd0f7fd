use std::sync::Arc;

use storemod::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum CounterAction {
    Increment,
    Reset,
    Untracked,
}

impl ActionKind for CounterAction {}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CounterState {
    counter: i64,
}

impl State for CounterState {}

struct CounterModule {
    store: Store<CounterAction, CounterState>,
    increment: PayloadCreator<CounterAction, i64>,
    reset: SimpleCreator<CounterAction>,
}

fn counter_module() -> CounterModule {
    let mut registry = ActionRegistry::new("counter", CounterState { counter: 0 });
    let increment = registry.payload_action(
        CounterAction::Increment,
        |state: CounterState, amount: &i64| CounterState {
            counter: state.counter + amount,
        },
    );
    let reset = registry.simple_action(CounterAction::Reset, |_| CounterState { counter: 0 });
    CounterModule {
        store: Store::new(registry),
        increment,
        reset,
    }
}

fn counter_outlet() -> StoreOutlet<CounterAction, CounterState> {
    StoreOutlet::new("counter", CounterState { counter: 0 })
}

#[test]
fn lookup_before_provide_fails_loudly() {
    let outlet = counter_outlet();
    assert!(!outlet.is_live());

    let err = outlet.handle().expect_err("no store was provided");
    assert_eq!(
        err,
        StoreError::ContainerNotInitialized {
            container: "counter"
        }
    );
    assert!(err.to_string().contains("not initialized"));
}

#[test]
fn failed_lookup_does_not_mutate_state() {
    let module = counter_module();
    let outlet = counter_outlet();

    let _ = outlet.handle().expect_err("no store was provided");

    outlet.provide(module.store.clone());
    assert_eq!(module.store.snapshot().counter, 0);
}

#[test]
fn default_state_is_only_a_placeholder() {
    let module = counter_module();
    let outlet = counter_outlet();
    assert_eq!(outlet.default_state().counter, 0);

    // Advance the live store, then check the lookup never hands the
    // placeholder back once a store is provided.
    module.store.dispatch(module.increment.create(3));
    outlet.provide(module.store.clone());
    let handle = outlet.handle().expect("store is live");
    assert_eq!(handle.state().counter, 3);
    assert_eq!(outlet.default_state().counter, 0);
}

#[test]
fn bound_callables_construct_and_dispatch() {
    let module = counter_module();
    let outlet = counter_outlet();
    outlet.provide(module.store.clone());

    let handle = outlet.handle().expect("store is live");
    let increment = module.increment;
    let reset = module.reset;
    let add = handle.bind_action(move |amount: i64| increment.create(amount));
    let bump = handle.bind_simple(move || increment.create(1));
    let reset = handle.bind_simple(move || reset.create());

    add(5);
    add(2);
    bump();
    assert_eq!(module.store.snapshot().counter, 8);

    reset();
    assert_eq!(module.store.snapshot().counter, 0);
}

#[test]
fn bound_processes_run_through_dispatch() {
    let module = counter_module();
    let outlet = counter_outlet();
    outlet.provide(module.store.clone());

    let handle = outlet.handle().expect("store is live");
    let increment = module.increment;
    let add_and_report = handle.bind_process(
        move |amount: i64| -> ProcessFn<CounterAction, CounterState, (), i64> {
            Box::new(move |dispatch, read, _extra| {
                dispatch.dispatch(increment.create(amount));
                read.get().counter
            })
        },
    );

    assert_eq!(add_and_report(6), 6);
    assert_eq!(add_and_report(4), 10);
    assert_eq!(module.store.snapshot().counter, 10);
}

#[test]
fn handle_pair_is_memoized_on_state_identity() {
    let module = counter_module();
    let outlet = counter_outlet();
    outlet.provide(module.store.clone());

    let first = outlet.handle().expect("store is live");
    let second = outlet.handle().expect("store is live");
    assert!(first.same_pair(&second));
    assert!(Arc::ptr_eq(&first.snapshot(), &second.snapshot()));

    // An untracked kind leaves the snapshot untouched, so the pair
    // identity is stable across the dispatch.
    module.store.dispatch(Action::simple(CounterAction::Untracked));
    let third = outlet.handle().expect("store is live");
    assert!(first.same_pair(&third));

    module.store.dispatch(module.increment.create(1));
    let fourth = outlet.handle().expect("store is live");
    assert!(!first.same_pair(&fourth));
    assert_eq!(fourth.state().counter, 1);
}

#[test]
fn handle_exposes_raw_dispatch() {
    let module = counter_module();
    let outlet = counter_outlet();
    outlet.provide(module.store.clone());

    let handle = outlet.handle().expect("store is live");
    handle.dispatch(module.increment.create(8));
    assert_eq!(handle.store().snapshot().counter, 8);
    // The handle's own snapshot stays at lookup time.
    assert_eq!(handle.state().counter, 0);
}

#[test]
fn clear_returns_the_outlet_to_uninitialized() {
    let module = counter_module();
    let outlet = counter_outlet();
    outlet.provide(module.store.clone());
    assert!(outlet.is_live());

    outlet.clear();
    assert!(!outlet.is_live());
    let _ = outlet.handle().expect_err("store was cleared");
}

#[test]
fn outlet_clones_share_the_slot() {
    let module = counter_module();
    let outlet = counter_outlet();
    let descendant = outlet.clone();

    outlet.provide(module.store.clone());
    let handle = descendant.handle().expect("provided through the original");
    assert_eq!(handle.state().counter, 0);
    assert_eq!(descendant.name(), "counter");
}

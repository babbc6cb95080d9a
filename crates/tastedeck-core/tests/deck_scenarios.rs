//! End-to-end deck scenarios driven through the input adapters.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use tastedeck_core::{
    ActivationLatch, DeckConfig, InputAdapterSet, InputEvent, Intent, ManualScheduler, NavigationController,
    RecordingPresenter, TransitionOutcome,
};

type Deck = NavigationController<RecordingPresenter, ManualScheduler>;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

const COOLDOWN: Duration = Duration::from_millis(1200);

fn fresh_deck() -> Deck {
    init_tracing();
    let config = DeckConfig::default();
    let presenter = RecordingPresenter::with_cards(config.total_cards);
    let mut deck = NavigationController::new(config, presenter, ManualScheduler::new());
    deck.initialize();
    deck
}

fn counting_hook() -> (Rc<Cell<u32>>, impl FnMut()) {
    let count = Rc::new(Cell::new(0));
    let handle = Rc::clone(&count);
    (count, move || handle.set(handle.get() + 1))
}

fn key(k: &str) -> InputEvent {
    InputEvent::Key { key: k.to_string() }
}

fn swipe(
    adapters: &mut InputAdapterSet<impl FnMut()>,
    deck: &mut Deck,
    from: f64,
    to: f64,
) -> Option<TransitionOutcome> {
    adapters.handle(&InputEvent::TouchStart { y: from }, deck);
    adapters.handle(&InputEvent::TouchEnd { y: to }, deck).outcome
}

#[test]
fn fresh_initialize() {
    let deck = fresh_deck();
    assert_eq!(deck.current_card(), 1);
    assert_eq!(deck.presenter().container_attribute().as_deref(), Some("1"));
    assert_eq!(deck.presenter().indicator_opacity(), Some(0.7));
}

#[test]
fn eight_spaced_advances_reach_the_last_card() {
    let mut deck = fresh_deck();
    for expected in 2..=9 {
        assert!(deck.advance().is_accepted());
        assert_eq!(deck.current_card(), expected);
        deck.advance_clock(COOLDOWN);
    }
    assert_eq!(deck.current_card(), 9);
    assert_eq!(
        deck.advance(),
        TransitionOutcome::OutOfRange { target: 10 }
    );
    assert_eq!(deck.current_card(), 9);
    assert_eq!(deck.presenter().vibrations().len(), 8);
}

#[test]
fn rapid_advances_are_lossy() {
    let mut deck = fresh_deck();
    let (_, hook) = counting_hook();
    let mut adapters = InputAdapterSet::new(hook);
    for _ in 0..5 {
        adapters.handle(&key("ArrowDown"), &mut deck);
    }
    assert_eq!(deck.current_card(), 2);
    deck.advance_clock(COOLDOWN);
    adapters.handle(&key("ArrowDown"), &mut deck);
    assert_eq!(deck.current_card(), 3);
}

#[test]
fn end_key_jumps_directly() {
    let mut deck = fresh_deck();
    deck.request_transition(3);
    deck.advance_clock(COOLDOWN);

    let (_, hook) = counting_hook();
    let mut adapters = InputAdapterSet::new(hook);
    let disposition = adapters.handle(&key("End"), &mut deck);
    assert_eq!(disposition.intent, Some(Intent::JumpTo(9)));
    assert_eq!(
        disposition.outcome,
        Some(TransitionOutcome::Accepted { from: 3, to: 9 })
    );
    assert!(disposition.prevent_default);
    assert_eq!(deck.current_card(), 9);
    assert_eq!(deck.presenter().active_cards(), vec![9]);
}

#[test]
fn home_key_returns_to_first_card() {
    let mut deck = fresh_deck();
    deck.request_transition(7);
    deck.advance_clock(COOLDOWN);
    let (_, hook) = counting_hook();
    let mut adapters = InputAdapterSet::new(hook);
    adapters.handle(&key("Home"), &mut deck);
    assert_eq!(deck.current_card(), 1);
    assert_eq!(deck.presenter().indicator_opacity(), Some(0.7));
}

#[test]
fn handled_keys_suppress_default_and_others_pass() {
    let mut deck = fresh_deck();
    let (_, hook) = counting_hook();
    let mut adapters = InputAdapterSet::new(hook);
    for k in ["ArrowUp", "ArrowDown", " ", "Home", "End"] {
        assert!(adapters.handle(&key(k), &mut deck).prevent_default, "{k:?}");
    }
    for k in ["Tab", "Enter", "ArrowLeft", "PageDown"] {
        let disposition = adapters.handle(&key(k), &mut deck);
        assert!(!disposition.prevent_default, "{k:?}");
        assert_eq!(disposition.intent, None);
    }
}

#[test]
fn positive_wheel_always_advances_and_suppresses_scroll() {
    let (_, hook) = counting_hook();
    let mut adapters = InputAdapterSet::new(hook);
    for delta_y in [0.001, 1.0, 53.0, 4000.0] {
        let mut deck = fresh_deck();
        let disposition = adapters.handle(&InputEvent::Wheel { delta_y }, &mut deck);
        assert_eq!(disposition.intent, Some(Intent::Advance));
        assert!(disposition.prevent_default);
        assert_eq!(deck.current_card(), 2);
    }
}

#[test]
fn wheel_suppresses_scroll_even_when_dropped() {
    let mut deck = fresh_deck();
    let (_, hook) = counting_hook();
    let mut adapters = InputAdapterSet::new(hook);
    let disposition = adapters.handle(&InputEvent::Wheel { delta_y: -40.0 }, &mut deck);
    assert_eq!(disposition.intent, Some(Intent::Retreat));
    assert!(!disposition.outcome.is_some_and(|o| o.is_accepted()));
    assert!(disposition.prevent_default);
}

#[test]
fn swipe_boundary_is_inclusive() {
    let mut deck = fresh_deck();
    let (_, hook) = counting_hook();
    let mut adapters = InputAdapterSet::new(hook);

    assert_eq!(swipe(&mut adapters, &mut deck, 500.0, 451.0), None);
    assert_eq!(deck.current_card(), 1);

    let outcome = swipe(&mut adapters, &mut deck, 500.0, 450.0);
    assert_eq!(outcome, Some(TransitionOutcome::Accepted { from: 1, to: 2 }));
    deck.advance_clock(COOLDOWN);

    let outcome = swipe(&mut adapters, &mut deck, 300.0, 350.0);
    assert_eq!(outcome, Some(TransitionOutcome::Accepted { from: 2, to: 1 }));
}

#[test]
fn touch_never_suppresses_default() {
    let mut deck = fresh_deck();
    let (_, hook) = counting_hook();
    let mut adapters = InputAdapterSet::new(hook);
    let start = adapters.handle(&InputEvent::TouchStart { y: 600.0 }, &mut deck);
    let end = adapters.handle(&InputEvent::TouchEnd { y: 100.0 }, &mut deck);
    assert!(!start.prevent_default);
    assert!(!end.prevent_default);
    assert_eq!(deck.current_card(), 2);
}

#[test]
fn activation_invokes_hook_once_and_pulses() {
    let mut deck = fresh_deck();
    let (count, hook) = counting_hook();
    let mut adapters = InputAdapterSet::new(hook);

    adapters.handle(&InputEvent::Activate, &mut deck);
    assert_eq!(count.get(), 1);
    assert_eq!(deck.presenter().activation_scale(), Some(0.95));
    assert_eq!(deck.presenter().vibrations(), &[vec![50, 50, 50]]);
    assert_eq!(deck.current_card(), 1);

    deck.advance_clock(Duration::from_millis(150));
    assert_eq!(deck.presenter().activation_scale(), None);

    adapters.handle(&InputEvent::Activate, &mut deck);
    assert_eq!(count.get(), 2);
}

#[test]
fn latched_activation_runs_after_the_deck_is_released() {
    let deck = Rc::new(RefCell::new(fresh_deck()));
    let latch = ActivationLatch::new();
    let mut adapters = InputAdapterSet::new(latch.clone());
    {
        let mut guard = deck.try_borrow_mut().expect("idle deck");
        let disposition = adapters.handle(&InputEvent::Activate, &mut *guard);
        assert!(!disposition.prevent_default);
    }
    assert_eq!(latch.take(), 1);

    // The drained hook can read and drive the shared deck.
    assert_eq!(deck.borrow().current_card(), 1);
    assert!(deck.borrow_mut().advance().is_accepted());
    assert_eq!(deck.borrow().presenter().activation_scale(), Some(0.95));
    assert_eq!(latch.take(), 0);
}

#[test]
fn recorded_trace_replays_identically() {
    let trace = [
        r#"{"kind":"touch_start","y":640.0}"#,
        r#"{"kind":"touch_end","y":120.0}"#,
        r#"{"kind":"wheel","delta_y":100.0}"#,
        r#"{"kind":"key","key":"End"}"#,
    ];
    let events: Vec<InputEvent> = trace
        .iter()
        .map(|line| InputEvent::from_json_str(line).expect("trace line should parse"))
        .collect();

    let mut deck = fresh_deck();
    let (_, hook) = counting_hook();
    let mut adapters = InputAdapterSet::new(hook);
    let outcomes: Vec<_> = events
        .iter()
        .map(|event| {
            let outcome = adapters.handle(event, &mut deck).outcome;
            deck.advance_clock(COOLDOWN);
            outcome
        })
        .collect();

    assert_eq!(
        outcomes,
        vec![
            None,
            Some(TransitionOutcome::Accepted { from: 1, to: 2 }),
            Some(TransitionOutcome::Accepted { from: 2, to: 3 }),
            Some(TransitionOutcome::Accepted { from: 3, to: 9 }),
        ]
    );
}

#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tastedeck_core::{
    DeckConfig, InputAdapterSet, InputEvent, ManualScheduler, NavigationController,
    RecordingPresenter,
};

#[derive(Debug, Arbitrary)]
enum Step {
    TouchStart(i16),
    TouchEnd(i16),
    Wheel(i16),
    Key(u8),
    Activate,
    Jump(u16),
    Wait(u16),
}

#[derive(Debug, Arbitrary)]
struct Trace {
    total_cards: u8,
    steps: Vec<Step>,
}

const KEYS: &[&str] = &["ArrowUp", "ArrowDown", " ", "Home", "End", "Spacebar", "x"];

fuzz_target!(|trace: Trace| {
    let total = u16::from(trace.total_cards.max(1));
    let config = DeckConfig {
        total_cards: total,
        ..DeckConfig::default()
    };
    let mut deck = NavigationController::new(
        config,
        RecordingPresenter::with_cards(total),
        ManualScheduler::new(),
    );
    deck.initialize();
    let mut adapters = InputAdapterSet::new(|| {});

    for step in trace.steps {
        let event = match step {
            Step::TouchStart(y) => InputEvent::TouchStart { y: f64::from(y) },
            Step::TouchEnd(y) => InputEvent::TouchEnd { y: f64::from(y) },
            Step::Wheel(d) => InputEvent::Wheel {
                delta_y: f64::from(d),
            },
            Step::Key(k) => InputEvent::Key {
                key: KEYS[usize::from(k) % KEYS.len()].to_string(),
            },
            Step::Activate => InputEvent::Activate,
            Step::Jump(card) => {
                let _ = deck.request_transition(card);
                continue;
            }
            Step::Wait(ms) => {
                deck.advance_clock(Duration::from_millis(u64::from(ms)));
                continue;
            }
        };
        adapters.handle(&event, &mut deck);

        // Post-conditions that must always hold:
        let card = deck.current_card();
        assert!((1..=total).contains(&card), "current card out of range");
        assert_eq!(deck.presenter().active_cards(), vec![card]);
        let expected = if card == 1 { 0.7 } else { 0.0 };
        assert_eq!(deck.presenter().indicator_opacity(), Some(expected));
    }
});

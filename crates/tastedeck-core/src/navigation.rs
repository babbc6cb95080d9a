#![forbid(unsafe_code)]

//! Card navigation state machine.
//!
//! [`NavigationController`] is the single authority over which card is shown
//! and whether a transition is in flight. Input adapters only ever call into
//! it; nothing else mutates [`PresentationState`].
//!
//! # State Machine
//!
//! ```text
//!          request_transition(valid target)
//!   Idle ──────────────────────────────────▶ Transitioning
//!    ▲                                            │
//!    └──────── ReleaseTransitionLock fires ───────┘
//! ```
//!
//! # Invariants
//!
//! 1. `1 <= current_card <= total_cards` at all times.
//! 2. No transition begins while `Transitioning`; such requests are dropped,
//!    never queued.
//! 3. An accepted transition applies its side effects in one call, so two
//!    mutation sequences never interleave.
//! 4. The indicator is visible iff `current_card == 1`.
//! 5. Every accepted transition schedules exactly one lock release, and the
//!    release clears the lock unconditionally.
//!
//! # Failure Modes
//!
//! Rejected requests are not errors. They return a [`TransitionOutcome`]
//! describing the reason and are logged at `debug`.

use tracing::{debug, info, trace};

use crate::config::DeckConfig;
use crate::presenter::Presenter;
use crate::timers::{DeferredTask, ManualScheduler, Scheduler};

/// Whether a transition's cooldown window is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    Transitioning,
}

/// The deck's only mutable navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentationState {
    current_card: u16,
    total_cards: u16,
    phase: Phase,
}

impl PresentationState {
    fn new(total_cards: u16) -> Self {
        Self {
            current_card: 1,
            total_cards: total_cards.max(1),
            phase: Phase::Idle,
        }
    }

    /// 1-indexed card currently shown.
    #[must_use]
    pub const fn current_card(&self) -> u16 {
        self.current_card
    }

    #[must_use]
    pub const fn total_cards(&self) -> u16 {
        self.total_cards
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn is_transitioning(&self) -> bool {
        matches!(self.phase, Phase::Transitioning)
    }

    #[must_use]
    pub const fn contains(&self, card: u16) -> bool {
        card >= 1 && card <= self.total_cards
    }
}

/// Result of a navigation request.
///
/// Informational only: callers are free to ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionOutcome {
    /// The transition ran and the lock is now held.
    Accepted { from: u16, to: u16 },
    /// A previous transition's cooldown is still open.
    Locked,
    /// The target is outside `1..=total_cards`.
    OutOfRange { target: u16 },
    /// The target is already shown.
    AlreadyCurrent,
}

impl TransitionOutcome {
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Owns the deck state and drives the presentation through `P`.
#[derive(Debug)]
pub struct NavigationController<P, S> {
    config: DeckConfig,
    state: PresentationState,
    presenter: P,
    scheduler: S,
}

impl<P: Presenter, S: Scheduler> NavigationController<P, S> {
    /// Create a controller. No side effects run until [`initialize`](Self::initialize).
    pub fn new(config: DeckConfig, presenter: P, scheduler: S) -> Self {
        let state = PresentationState::new(config.total_cards);
        Self {
            config,
            state,
            presenter,
            scheduler,
        }
    }

    /// Reset to the first card and apply the initial presentation.
    pub fn initialize(&mut self) {
        if self.state.current_card != 1 {
            self.presenter.set_card_active(self.state.current_card, false);
        }
        self.state.current_card = 1;
        self.state.phase = Phase::Idle;
        self.presenter.set_card_active(1, true);
        self.sync_container_and_indicator();
        info!(
            total_cards = self.state.total_cards,
            current_card = self.state.current_card,
            "card deck initialized"
        );
    }

    /// Move to `target` if it is in range and no transition is in flight.
    pub fn request_transition(&mut self, target: u16) -> TransitionOutcome {
        let outcome = self.check_transition(target);
        if !outcome.is_accepted() {
            debug!(target, ?outcome, "transition request dropped");
            return outcome;
        }

        // Lock first: nothing below may observe an idle deck mid-sequence.
        self.state.phase = Phase::Transitioning;

        let from = self.state.current_card;
        self.presenter.set_card_active(from, false);
        self.presenter.set_card_active(target, true);
        self.state.current_card = target;
        self.sync_container_and_indicator();
        self.presenter.vibrate(&self.config.transition_haptic_ms);
        self.schedule_unlock(self.config.transition_cooldown());

        debug!(from, to = target, "transition started");
        outcome
    }

    fn check_transition(&self, target: u16) -> TransitionOutcome {
        if !self.state.contains(target) {
            TransitionOutcome::OutOfRange { target }
        } else if self.state.is_transitioning() {
            TransitionOutcome::Locked
        } else if target == self.state.current_card {
            TransitionOutcome::AlreadyCurrent
        } else {
            TransitionOutcome::Accepted {
                from: self.state.current_card,
                to: target,
            }
        }
    }

    /// Next card, unless already on the last one.
    pub fn advance(&mut self) -> TransitionOutcome {
        let target = self.state.current_card.saturating_add(1);
        if self.state.current_card >= self.state.total_cards {
            debug!(target, "advance at last card ignored");
            return TransitionOutcome::OutOfRange { target };
        }
        self.request_transition(target)
    }

    /// Previous card, unless already on the first one.
    pub fn retreat(&mut self) -> TransitionOutcome {
        if self.state.current_card <= 1 {
            debug!("retreat at first card ignored");
            return TransitionOutcome::OutOfRange { target: 0 };
        }
        self.request_transition(self.state.current_card - 1)
    }

    pub fn jump_to_first(&mut self) -> TransitionOutcome {
        self.request_transition(1)
    }

    pub fn jump_to_last(&mut self) -> TransitionOutcome {
        self.request_transition(self.state.total_cards)
    }

    /// Replace the content region of `card`. Unknown cards are ignored.
    pub fn update_card_content(&mut self, card: u16, content: &str) {
        if !self.state.contains(card) {
            debug!(card, "content update for unknown card ignored");
            return;
        }
        self.presenter.set_card_content(card, content);
    }

    /// Press feedback for the activation element: scale down, buzz, and
    /// schedule the scale restore.
    pub fn pulse_activation(&mut self) {
        self.presenter
            .set_activation_scale(Some(self.config.activation_scale));
        self.presenter.vibrate(&self.config.activation_haptic_ms);
        self.scheduler.schedule(
            self.config.activation_pulse(),
            DeferredTask::RestoreActivationScale,
        );
    }

    /// Deliver a task whose delay has elapsed.
    pub fn run_deferred(&mut self, task: DeferredTask) {
        trace!(?task, "deferred task due");
        match task {
            // Unconditional: the release never inspects what happened since
            // it was scheduled.
            DeferredTask::ReleaseTransitionLock => self.state.phase = Phase::Idle,
            DeferredTask::RestoreActivationScale => self.presenter.set_activation_scale(None),
        }
    }

    fn schedule_unlock(&mut self, duration: std::time::Duration) {
        self.scheduler
            .schedule(duration, DeferredTask::ReleaseTransitionLock);
    }

    fn sync_container_and_indicator(&mut self) {
        let card = self.state.current_card;
        self.presenter.set_container_card(card);
        self.presenter
            .set_indicator_opacity(self.config.indicator_opacity_for(card));
    }
}

impl<P, S> NavigationController<P, S> {
    #[must_use]
    pub const fn state(&self) -> &PresentationState {
        &self.state
    }

    #[must_use]
    pub const fn current_card(&self) -> u16 {
        self.state.current_card
    }

    #[must_use]
    pub const fn total_cards(&self) -> u16 {
        self.state.total_cards
    }

    #[must_use]
    pub const fn is_transitioning(&self) -> bool {
        self.state.is_transitioning()
    }

    #[must_use]
    pub const fn config(&self) -> &DeckConfig {
        &self.config
    }

    #[must_use]
    pub const fn presenter(&self) -> &P {
        &self.presenter
    }

    #[must_use]
    pub const fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

impl<P: Presenter> NavigationController<P, ManualScheduler> {
    /// Advance the virtual clock and run every task that became due.
    ///
    /// Returns the number of tasks delivered.
    pub fn advance_clock(&mut self, dt: std::time::Duration) -> usize {
        let due = self.scheduler.advance(dt);
        let count = due.len();
        for task in due {
            self.run_deferred(task);
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::RecordingPresenter;
    use std::time::Duration;

    type Deck = NavigationController<RecordingPresenter, ManualScheduler>;

    fn deck() -> Deck {
        let config = DeckConfig::default();
        let presenter = RecordingPresenter::with_cards(config.total_cards);
        let mut deck = NavigationController::new(config, presenter, ManualScheduler::new());
        deck.initialize();
        deck
    }

    fn settle(deck: &mut Deck) {
        deck.advance_clock(Duration::from_millis(1200));
    }

    #[test]
    fn initialize_shows_first_card() {
        let deck = deck();
        assert_eq!(deck.current_card(), 1);
        assert!(!deck.is_transitioning());
        assert_eq!(deck.presenter().container_attribute().as_deref(), Some("1"));
        assert_eq!(deck.presenter().indicator_opacity(), Some(0.7));
        assert_eq!(deck.presenter().active_cards(), vec![1]);
        assert!(deck.presenter().vibrations().is_empty());
    }

    #[test]
    fn accepted_transition_applies_every_side_effect() {
        let mut deck = deck();
        let outcome = deck.request_transition(4);
        assert_eq!(outcome, TransitionOutcome::Accepted { from: 1, to: 4 });
        assert_eq!(deck.current_card(), 4);
        assert!(deck.is_transitioning());
        assert_eq!(deck.presenter().active_cards(), vec![4]);
        assert_eq!(deck.presenter().container_attribute().as_deref(), Some("4"));
        assert_eq!(deck.presenter().indicator_opacity(), Some(0.0));
        assert_eq!(deck.presenter().vibrations(), &[vec![50]]);
        assert_eq!(
            deck.scheduler().pending().collect::<Vec<_>>(),
            vec![DeferredTask::ReleaseTransitionLock]
        );
    }

    #[test]
    fn lock_holds_for_full_cooldown() {
        let mut deck = deck();
        deck.request_transition(2);
        deck.advance_clock(Duration::from_millis(1199));
        assert!(deck.is_transitioning());
        assert_eq!(deck.request_transition(3), TransitionOutcome::Locked);
        assert_eq!(deck.current_card(), 2);
        deck.advance_clock(Duration::from_millis(1));
        assert!(!deck.is_transitioning());
        assert!(deck.request_transition(3).is_accepted());
    }

    #[test]
    fn out_of_range_targets_are_ignored() {
        let mut deck = deck();
        assert_eq!(
            deck.request_transition(0),
            TransitionOutcome::OutOfRange { target: 0 }
        );
        assert_eq!(
            deck.request_transition(10),
            TransitionOutcome::OutOfRange { target: 10 }
        );
        assert_eq!(deck.current_card(), 1);
        assert!(!deck.is_transitioning());
        assert_eq!(deck.scheduler().pending_len(), 0);
    }

    #[test]
    fn same_target_is_a_true_noop() {
        let mut deck = deck();
        let before = deck.presenter().clone();
        assert_eq!(deck.request_transition(1), TransitionOutcome::AlreadyCurrent);
        assert!(!deck.is_transitioning());
        assert_eq!(deck.presenter(), &before);
        assert_eq!(deck.scheduler().pending_len(), 0);
    }

    #[test]
    fn edges_are_noops() {
        let mut deck = deck();
        assert!(!deck.retreat().is_accepted());
        assert_eq!(deck.current_card(), 1);

        deck.jump_to_last();
        settle(&mut deck);
        assert_eq!(deck.current_card(), 9);
        assert!(!deck.advance().is_accepted());
        assert_eq!(deck.current_card(), 9);
        assert!(!deck.is_transitioning());
    }

    #[test]
    fn jump_to_first_restores_indicator() {
        let mut deck = deck();
        deck.request_transition(6);
        settle(&mut deck);
        assert!(deck.jump_to_first().is_accepted());
        assert_eq!(deck.presenter().indicator_opacity(), Some(0.7));
        assert_eq!(deck.presenter().active_cards(), vec![1]);
    }

    #[test]
    fn release_is_unconditional_after_reinitialize() {
        let mut deck = deck();
        deck.request_transition(5);
        deck.initialize();
        assert_eq!(deck.presenter().active_cards(), vec![1]);
        assert_eq!(deck.scheduler().pending_len(), 1);
        settle(&mut deck);
        assert!(!deck.is_transitioning());
    }

    #[test]
    fn update_card_content_targets_known_cards_only() {
        let mut deck = deck();
        deck.update_card_content(3, "<h2>Pinot Noir</h2>");
        deck.update_card_content(42, "<h2>nope</h2>");
        assert_eq!(deck.presenter().card_content(3), Some("<h2>Pinot Noir</h2>"));
        assert_eq!(deck.presenter().card_content(42), None);
    }

    #[test]
    fn activation_pulse_restores_scale() {
        let mut deck = deck();
        deck.pulse_activation();
        assert_eq!(deck.presenter().activation_scale(), Some(0.95));
        assert_eq!(deck.presenter().vibrations(), &[vec![50, 50, 50]]);
        deck.advance_clock(Duration::from_millis(149));
        assert_eq!(deck.presenter().activation_scale(), Some(0.95));
        deck.advance_clock(Duration::from_millis(1));
        assert_eq!(deck.presenter().activation_scale(), None);
        assert!(!deck.is_transitioning());
    }

    #[test]
    fn missing_card_element_does_not_block_state() {
        let config = DeckConfig::default();
        let presenter = RecordingPresenter::with_cards(9).without_card(3);
        let mut deck = NavigationController::new(config, presenter, ManualScheduler::new());
        deck.initialize();
        assert!(deck.request_transition(3).is_accepted());
        assert_eq!(deck.current_card(), 3);
        assert!(deck.presenter().active_cards().is_empty());
        assert_eq!(deck.presenter().container_attribute().as_deref(), Some("3"));
    }

    #[test]
    fn custom_cooldown_comes_from_config() {
        let config = DeckConfig {
            transition_cooldown_ms: 300,
            ..DeckConfig::default()
        };
        let presenter = RecordingPresenter::with_cards(9);
        let mut deck = NavigationController::new(config, presenter, ManualScheduler::new());
        deck.initialize();
        deck.advance();
        deck.advance_clock(Duration::from_millis(300));
        assert!(!deck.is_transitioning());
    }
}

#![forbid(unsafe_code)]

//! Input normalization: raw host events become navigation intents.
//!
//! The web host is expected to provide:
//! - the vertical client coordinate of the first touch point on touch start
//!   and of the first changed touch point on touch end,
//! - the wheel `deltaY` as reported by the browser, and
//! - the DOM `key` string for key presses.
//!
//! [`InputAdapterSet::handle`] turns each event into at most one call on the
//! [`NavigationController`] and reports whether the host must suppress the
//! browser's default action. Events are JSON-encodable (`kind`-tagged) so a
//! host can record an interaction trace and replay it deterministically.

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::navigation::{NavigationController, TransitionOutcome};
use crate::presenter::Presenter;
use crate::timers::Scheduler;

/// Raw host event, already stripped to the fields the deck uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputEvent {
    TouchStart { y: f64 },
    TouchEnd { y: f64 },
    Wheel { delta_y: f64 },
    Key { key: String },
    Activate,
}

impl InputEvent {
    /// Encode this event as a stable JSON string.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse an event previously produced by [`to_json_string`](Self::to_json_string).
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Whether the browser default for this event is suppressed, whether or
    /// not the deck gets to handle it. Wheel and navigation keys always are.
    #[must_use]
    pub fn captures_default(&self) -> bool {
        match self {
            Self::Wheel { .. } => true,
            Self::Key { key } => NavKey::from_dom_key(key).is_some(),
            Self::TouchStart { .. } | Self::TouchEnd { .. } | Self::Activate => false,
        }
    }
}

/// Direction or destination derived from an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Advance,
    Retreat,
    JumpTo(u16),
}

impl Intent {
    /// Forward this intent to the controller.
    pub fn apply<P: Presenter, S: Scheduler>(
        self,
        controller: &mut NavigationController<P, S>,
    ) -> TransitionOutcome {
        match self {
            Self::Advance => controller.advance(),
            Self::Retreat => controller.retreat(),
            Self::JumpTo(card) => controller.request_transition(card),
        }
    }
}

/// Navigation keys the deck reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKey {
    Up,
    Down,
    Space,
    Home,
    End,
}

impl NavKey {
    /// Normalize a DOM `KeyboardEvent.key` value. Unhandled keys yield `None`.
    #[must_use]
    pub fn from_dom_key(dom_key: &str) -> Option<Self> {
        match dom_key {
            "ArrowUp" | "Up" => Some(Self::Up),
            "ArrowDown" | "Down" => Some(Self::Down),
            " " | "Spacebar" => Some(Self::Space),
            "Home" => Some(Self::Home),
            "End" => Some(Self::End),
            _ => None,
        }
    }

    /// Intent for this key in a deck of `total_cards`.
    #[must_use]
    pub const fn intent(self, total_cards: u16) -> Intent {
        match self {
            Self::Up => Intent::Retreat,
            Self::Down | Self::Space => Intent::Advance,
            Self::Home => Intent::JumpTo(1),
            Self::End => Intent::JumpTo(total_cards),
        }
    }
}

/// One vertical touch gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeGesture {
    pub start_y: f64,
    pub end_y: f64,
}

impl SwipeGesture {
    /// Positive when the finger moved up the screen.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.start_y - self.end_y
    }

    /// Whether the gesture travelled at least `min_distance` (inclusive).
    #[must_use]
    pub fn is_significant(&self, min_distance: f64) -> bool {
        self.distance().abs() >= min_distance
    }

    /// Intent for this gesture, or `None` for taps and jitter.
    #[must_use]
    pub fn intent(&self, min_distance: f64) -> Option<Intent> {
        if !self.is_significant(min_distance) {
            return None;
        }
        Some(if self.distance() > 0.0 {
            Intent::Advance
        } else {
            Intent::Retreat
        })
    }
}

/// Tracks the start of the gesture in progress.
#[derive(Debug, Clone, Default)]
pub struct TouchAdapter {
    start_y: Option<f64>,
}

impl TouchAdapter {
    pub fn touch_start(&mut self, y: f64) {
        self.start_y = Some(y);
    }

    /// Close the gesture. A touch end without a recorded start yields nothing.
    pub fn touch_end(&mut self, y: f64) -> Option<SwipeGesture> {
        let start_y = self.start_y.take()?;
        Some(SwipeGesture { start_y, end_y: y })
    }
}

/// Wheel events map one-to-one onto intents; there is no threshold.
#[must_use]
pub fn wheel_intent(delta_y: f64) -> Intent {
    if delta_y > 0.0 {
        Intent::Advance
    } else {
        Intent::Retreat
    }
}

/// External collaborator invoked when the call-to-action surface is activated.
pub trait CallToAction {
    fn on_activate(&mut self);
}

impl<F: FnMut()> CallToAction for F {
    fn on_activate(&mut self) {
        self();
    }
}

/// Hook that only counts activations.
///
/// Hosts whose real call-to-action may call back into the deck install a
/// latch, release the deck, then drain it with [`take`](Self::take).
#[derive(Debug, Clone, Default)]
pub struct ActivationLatch {
    pending: Rc<Cell<u32>>,
}

impl ActivationLatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Activations recorded since the previous call.
    pub fn take(&self) -> u32 {
        self.pending.replace(0)
    }
}

impl CallToAction for ActivationLatch {
    fn on_activate(&mut self) {
        self.pending.set(self.pending.get().saturating_add(1));
    }
}

/// What the host should do with the raw event after the deck handled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputDisposition {
    /// Intent derived from the event, if any.
    pub intent: Option<Intent>,
    /// Controller's answer to the intent, if one was forwarded.
    pub outcome: Option<TransitionOutcome>,
    /// Whether the browser's default action must be suppressed.
    pub prevent_default: bool,
}

impl InputDisposition {
    const PASS: Self = Self {
        intent: None,
        outcome: None,
        prevent_default: false,
    };
}

/// All input adapters plus the call-to-action hook.
#[derive(Debug)]
pub struct InputAdapterSet<H> {
    touch: TouchAdapter,
    call_to_action: H,
}

impl<H: CallToAction> InputAdapterSet<H> {
    #[must_use]
    pub fn new(call_to_action: H) -> Self {
        Self {
            touch: TouchAdapter::default(),
            call_to_action,
        }
    }

    /// Handle one host event against `controller`.
    pub fn handle<P: Presenter, S: Scheduler>(
        &mut self,
        event: &InputEvent,
        controller: &mut NavigationController<P, S>,
    ) -> InputDisposition {
        trace!(?event, "input event");
        let prevent_default = event.captures_default();
        match event {
            InputEvent::TouchStart { y } => {
                self.touch.touch_start(*y);
                InputDisposition::PASS
            }
            InputEvent::TouchEnd { y } => {
                let min = controller.config().min_swipe_distance;
                let intent = self.touch.touch_end(*y).and_then(|g| g.intent(min));
                Self::forward(intent, prevent_default, controller)
            }
            InputEvent::Wheel { delta_y } => {
                Self::forward(Some(wheel_intent(*delta_y)), prevent_default, controller)
            }
            InputEvent::Key { key } => match NavKey::from_dom_key(key) {
                Some(nav) => {
                    let intent = nav.intent(controller.total_cards());
                    Self::forward(Some(intent), prevent_default, controller)
                }
                None => InputDisposition::PASS,
            },
            InputEvent::Activate => {
                controller.pulse_activation();
                self.call_to_action.on_activate();
                InputDisposition::PASS
            }
        }
    }

    fn forward<P: Presenter, S: Scheduler>(
        intent: Option<Intent>,
        prevent_default: bool,
        controller: &mut NavigationController<P, S>,
    ) -> InputDisposition {
        InputDisposition {
            intent,
            outcome: intent.map(|i| i.apply(controller)),
            prevent_default,
        }
    }

    #[must_use]
    pub const fn call_to_action(&self) -> &H {
        &self.call_to_action
    }
}

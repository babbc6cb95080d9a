#![forbid(unsafe_code)]

//! [`Scheduler`] backed by `window.setTimeout`.
//!
//! The timeout callback holds only a weak handle to the deck, so dropping the
//! JS-side handle lets pending timers fire into nothing.

use std::cell::RefCell;
use std::rc::Weak;
use std::time::Duration;

use tracing::trace;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use tastedeck_core::{DeferredTask, Scheduler};

use crate::WebDeck;

/// Delivers deferred tasks to a shared deck from the browser event loop.
#[derive(Debug, Clone)]
pub struct WindowScheduler {
    deck: Weak<RefCell<WebDeck>>,
}

impl WindowScheduler {
    #[must_use]
    pub fn new(deck: Weak<RefCell<WebDeck>>) -> Self {
        Self { deck }
    }

    fn set_timeout(deck: Weak<RefCell<WebDeck>>, delay: Duration, task: DeferredTask) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let callback = Closure::once_into_js(move || Self::deliver(deck, task));
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            millis,
        );
    }

    fn deliver(deck: Weak<RefCell<WebDeck>>, task: DeferredTask) {
        let Some(shared) = deck.upgrade() else {
            return;
        };
        match shared.try_borrow_mut() {
            Ok(mut controller) => controller.run_deferred(task),
            // A synchronous host callback still holds the deck. Retry on the
            // next turn so the task still fires.
            Err(_) => {
                trace!(?task, "deck busy, redelivering deferred task");
                Self::set_timeout(deck, Duration::ZERO, task);
            }
        }
    }
}

impl Scheduler for WindowScheduler {
    fn schedule(&mut self, delay: Duration, task: DeferredTask) {
        Self::set_timeout(self.deck.clone(), delay, task);
    }
}

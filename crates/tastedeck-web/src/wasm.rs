#![forbid(unsafe_code)]

//! `wasm-bindgen` exports: the [`TastingDeck`] handle and its listeners.
//!
//! The handle is constructed and owned by the page script; nothing is
//! registered on `window`.
//!
//! ```js
//! const deck = new TastingDeck();          // or new TastingDeck(configJson)
//! deck.setBookingHandler(() => openBookingForm());
//! deck.start();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Reflect;
use tracing::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Event, EventTarget, KeyboardEvent, TouchEvent, WheelEvent,
};

use tastedeck_core::{
    ActivationLatch, DeckConfig, InputAdapterSet, InputEvent, NavigationController,
};

use crate::WebDeck;
use crate::dom::{self, DomPresenter};
use crate::timer::WindowScheduler;

const DEFAULT_BOOKING_MESSAGE: &str = "Booking functionality will be implemented here!\n\n\
This could link to:\n- A booking form\n- Contact information\n- External booking system\n\
- Calendar integration";

const STARTUP_BANNER: &[&str] = &[
    "\u{1F377} Wine Tasting Landing Page Loaded!",
    "\u{1F4F1} Swipe up/down or use arrow keys to navigate",
    "\u{2328}\u{FE0F}  Keyboard shortcuts: \u{2191}\u{2193} arrows, Space, Home, End",
];

fn console_log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            web_sys::console::error_1(&JsValue::from_str(&msg));
        }));
    });
}

/// Booking flow: a host-installed JS function, or an `alert` placeholder.
///
/// Runs only after the deck and adapters are released, so the handler may
/// read or drive the handle.
#[derive(Debug, Clone, Default)]
struct Booking {
    handler: Rc<RefCell<Option<js_sys::Function>>>,
    latch: ActivationLatch,
}

impl Booking {
    fn run_pending(&self) {
        for _ in 0..self.latch.take() {
            let installed = self.handler.borrow().clone();
            if let Some(handler) = installed {
                // The hook reports its own failures.
                let _ = handler.call0(&JsValue::NULL);
            } else if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(DEFAULT_BOOKING_MESSAGE);
            }
        }
    }
}

type Listener = Closure<dyn FnMut(Event)>;

/// JS handle to one card deck bound to the current document.
#[wasm_bindgen]
pub struct TastingDeck {
    deck: Rc<RefCell<WebDeck>>,
    adapters: Rc<RefCell<InputAdapterSet<ActivationLatch>>>,
    booking: Booking,
    document: Document,
    listeners: Vec<(EventTarget, &'static str, Listener)>,
}

#[wasm_bindgen]
impl TastingDeck {
    /// Create a deck for the current document. `config_json` may override
    /// any subset of the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<TastingDeck, JsValue> {
        install_panic_hook();

        let config = match config_json.as_deref() {
            Some(json) => {
                DeckConfig::from_json_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?
            }
            None => DeckConfig::default(),
        };
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;

        let presenter = DomPresenter::new(document.clone());
        let deck = Rc::new_cyclic(|weak| {
            RefCell::new(NavigationController::new(
                config,
                presenter,
                WindowScheduler::new(weak.clone()),
            ))
        });
        let booking = Booking::default();

        Ok(Self {
            deck,
            adapters: Rc::new(RefCell::new(InputAdapterSet::new(booking.latch.clone()))),
            booking,
            document,
            listeners: Vec::new(),
        })
    }

    /// Apply the initial presentation and attach input listeners.
    ///
    /// Calling `start` again re-initializes without duplicating listeners.
    pub fn start(&mut self) {
        self.deck.borrow_mut().initialize();
        if self.listeners.is_empty() {
            self.attach_listeners();
        }
        for line in STARTUP_BANNER {
            console_log(line);
        }
        console_log(&format!(
            "\u{1F3AF} Current card: {}",
            self.deck.borrow().current_card()
        ));
    }

    #[wasm_bindgen(getter, js_name = currentCard)]
    pub fn current_card(&self) -> u16 {
        self.deck.borrow().current_card()
    }

    #[wasm_bindgen(getter, js_name = totalCards)]
    pub fn total_cards(&self) -> u16 {
        self.deck.borrow().total_cards()
    }

    #[wasm_bindgen(getter, js_name = isTransitioning)]
    pub fn is_transitioning(&self) -> bool {
        self.deck.borrow().is_transitioning()
    }

    pub fn next(&self) {
        let _ = self.deck.borrow_mut().advance();
    }

    pub fn previous(&self) {
        let _ = self.deck.borrow_mut().retreat();
    }

    #[wasm_bindgen(js_name = goToCard)]
    pub fn go_to_card(&self, card: u16) {
        let _ = self.deck.borrow_mut().request_transition(card);
    }

    #[wasm_bindgen(js_name = updateCardContent)]
    pub fn update_card_content(&self, card: u16, content: &str) {
        self.deck.borrow_mut().update_card_content(card, content);
    }

    /// Install the booking flow invoked on call-to-action activation.
    #[wasm_bindgen(js_name = setBookingHandler)]
    pub fn set_booking_handler(&self, handler: Option<js_sys::Function>) {
        *self.booking.handler.borrow_mut() = handler;
    }
}

impl TastingDeck {
    fn dispatch(
        deck: &Rc<RefCell<WebDeck>>,
        adapters: &Rc<RefCell<InputAdapterSet<ActivationLatch>>>,
        booking: &Booking,
        raw: &Event,
        input: InputEvent,
    ) {
        // Captured keys and wheel never reach the page, even when dropped.
        if input.captures_default() {
            raw.prevent_default();
        }
        {
            let (Ok(mut deck), Ok(mut adapters)) =
                (deck.try_borrow_mut(), adapters.try_borrow_mut())
            else {
                debug!(?input, "deck busy, input dropped");
                return;
            };
            adapters.handle(&input, &mut *deck);
        }
        booking.run_pending();
    }

    fn listen<F>(&mut self, target: EventTarget, kind: &'static str, passive: bool, translate: F)
    where
        F: Fn(&Event) -> Option<InputEvent> + 'static,
    {
        let deck = Rc::clone(&self.deck);
        let adapters = Rc::clone(&self.adapters);
        let booking = self.booking.clone();
        let listener: Listener = Closure::new(move |raw: Event| {
            if let Some(input) = translate(&raw) {
                Self::dispatch(&deck, &adapters, &booking, &raw, input);
            }
        });
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        let _ = target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            listener.as_ref().unchecked_ref(),
            &options,
        );
        self.listeners.push((target, kind, listener));
    }

    fn attach_listeners(&mut self) {
        let root: EventTarget = self.document.clone().into();

        self.listen(root.clone(), "touchstart", true, |raw| {
            let touch = raw.dyn_ref::<TouchEvent>()?.touches().get(0)?;
            Some(InputEvent::TouchStart {
                y: f64::from(touch.client_y()),
            })
        });
        self.listen(root.clone(), "touchend", true, |raw| {
            let touch = raw.dyn_ref::<TouchEvent>()?.changed_touches().get(0)?;
            Some(InputEvent::TouchEnd {
                y: f64::from(touch.client_y()),
            })
        });
        // Not passive: wheel scrolling is always captured.
        self.listen(root.clone(), "wheel", false, |raw| {
            let wheel = raw.dyn_ref::<WheelEvent>()?;
            Some(InputEvent::Wheel {
                delta_y: wheel.delta_y(),
            })
        });
        self.listen(root, "keydown", false, |raw| {
            let key = raw.dyn_ref::<KeyboardEvent>()?.key();
            Some(InputEvent::Key { key })
        });

        if let Some(button) = dom::query(&self.document, dom::ACTIVATION_SELECTOR) {
            self.listen(button.into(), "click", false, |_| Some(InputEvent::Activate));
        } else {
            debug!("no activation element, click adapter disabled");
        }
    }
}

impl Drop for TastingDeck {
    fn drop(&mut self) {
        for (target, kind, listener) in self.listeners.drain(..) {
            let _ = target
                .remove_event_listener_with_callback(kind, listener.as_ref().unchecked_ref());
        }
    }
}

/// Whether the host exposes `navigator.vibrate`.
#[wasm_bindgen(js_name = hapticsSupported)]
pub fn haptics_supported() -> bool {
    web_sys::window()
        .map(|w| Reflect::has(&w.navigator(), &JsValue::from_str("vibrate")).unwrap_or(false))
        .unwrap_or(false)
}

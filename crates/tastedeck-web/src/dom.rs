#![forbid(unsafe_code)]

//! [`Presenter`] over the live DOM.
//!
//! Markup contract:
//! - cards: `[data-card="N"]`, visual state toggled by the `active` class,
//!   content region `.card-content`;
//! - container: `.main-container[data-current-card]`;
//! - indicator: `.swipe-indicator`, inline `opacity`;
//! - activation element: `.cta-button`, inline `transform`.
//!
//! Every lookup that finds nothing is a silent no-op.

use js_sys::{Array, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

use tastedeck_core::Presenter;

pub(crate) const CARD_ACTIVE_CLASS: &str = "active";
pub(crate) const CONTAINER_SELECTOR: &str = ".main-container";
pub(crate) const CONTAINER_CARD_ATTR: &str = "data-current-card";
pub(crate) const INDICATOR_SELECTOR: &str = ".swipe-indicator";
pub(crate) const CARD_CONTENT_SELECTOR: &str = ".card-content";
pub(crate) const ACTIVATION_SELECTOR: &str = ".cta-button";

pub(crate) fn card_selector(card: u16) -> String {
    format!("[data-card=\"{card}\"]")
}

pub(crate) fn query(root: &Document, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

pub(crate) fn query_html(root: &Document, selector: &str) -> Option<HtmlElement> {
    query(root, selector)?.dyn_into::<HtmlElement>().ok()
}

/// Presenter that mutates the page the deck was started on.
#[derive(Debug, Clone)]
pub struct DomPresenter {
    document: Document,
}

impl DomPresenter {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn vibrate_pattern(pattern: &[u32]) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let navigator = window.navigator();
        if !Reflect::has(&navigator, &JsValue::from_str("vibrate")).unwrap_or(false) {
            return;
        }
        if let [single] = pattern {
            let _ = navigator.vibrate_with_duration(*single);
            return;
        }
        let steps = Array::new_with_length(pattern.len() as u32);
        for (idx, ms) in pattern.iter().enumerate() {
            steps.set(idx as u32, JsValue::from_f64(f64::from(*ms)));
        }
        let _ = navigator.vibrate_with_pattern(&steps);
    }
}

impl Presenter for DomPresenter {
    fn set_card_active(&mut self, card: u16, active: bool) {
        let Some(el) = query(&self.document, &card_selector(card)) else {
            return;
        };
        let classes = el.class_list();
        let _ = if active {
            classes.add_1(CARD_ACTIVE_CLASS)
        } else {
            classes.remove_1(CARD_ACTIVE_CLASS)
        };
    }

    fn set_container_card(&mut self, card: u16) {
        if let Some(el) = query(&self.document, CONTAINER_SELECTOR) {
            let _ = el.set_attribute(CONTAINER_CARD_ATTR, &card.to_string());
        }
    }

    fn set_indicator_opacity(&mut self, opacity: f64) {
        if let Some(el) = query_html(&self.document, INDICATOR_SELECTOR) {
            let _ = el.style().set_property("opacity", &opacity.to_string());
        }
    }

    fn set_card_content(&mut self, card: u16, content: &str) {
        let Some(el) = query(&self.document, &card_selector(card)) else {
            return;
        };
        if let Ok(Some(region)) = el.query_selector(CARD_CONTENT_SELECTOR) {
            region.set_inner_html(content);
        }
    }

    fn set_activation_scale(&mut self, scale: Option<f64>) {
        let Some(el) = query_html(&self.document, ACTIVATION_SELECTOR) else {
            return;
        };
        let value = scale.map(|s| format!("scale({s})")).unwrap_or_default();
        let _ = el.style().set_property("transform", &value);
    }

    fn vibrate(&mut self, pattern: &[u32]) {
        if !pattern.is_empty() {
            Self::vibrate_pattern(pattern);
        }
    }
}

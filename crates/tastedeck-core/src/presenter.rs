#![forbid(unsafe_code)]

//! Presentation side effects.
//!
//! [`Presenter`] is the seam between the navigation state machine and the
//! page. Every method is fire-and-forget: an implementation that cannot find
//! the element it needs does nothing.
//!
//! [`RecordingPresenter`] keeps an in-memory model of the markup contract so
//! headless hosts and tests can observe exactly what the page would show.

use std::collections::{BTreeMap, BTreeSet};

/// Page mutations the controller is allowed to perform.
pub trait Presenter {
    /// Toggle the `active` marker on card `card`.
    fn set_card_active(&mut self, card: u16, active: bool);

    /// Write `card` to the container's current-card attribute.
    fn set_container_card(&mut self, card: u16);

    /// Set the "more content below" indicator opacity.
    fn set_indicator_opacity(&mut self, opacity: f64);

    /// Replace the content region of card `card`.
    fn set_card_content(&mut self, card: u16, content: &str);

    /// Apply (`Some`) or clear (`None`) the press scale on the activation element.
    fn set_activation_scale(&mut self, scale: Option<f64>);

    /// Fire a haptic pattern (millisecond pulses). Unsupported hosts ignore it.
    fn vibrate(&mut self, pattern: &[u32]);
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    fn set_card_active(&mut self, card: u16, active: bool) {
        (**self).set_card_active(card, active);
    }

    fn set_container_card(&mut self, card: u16) {
        (**self).set_container_card(card);
    }

    fn set_indicator_opacity(&mut self, opacity: f64) {
        (**self).set_indicator_opacity(opacity);
    }

    fn set_card_content(&mut self, card: u16, content: &str) {
        (**self).set_card_content(card, content);
    }

    fn set_activation_scale(&mut self, scale: Option<f64>) {
        (**self).set_activation_scale(scale);
    }

    fn vibrate(&mut self, pattern: &[u32]) {
        (**self).vibrate(pattern);
    }
}

/// In-memory rendition of the page markup.
///
/// `cards` is the set of card numbers present in the markup. Mutations aimed
/// at a card that is not present are dropped, mirroring a DOM query that
/// finds nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingPresenter {
    cards: BTreeSet<u16>,
    active: BTreeSet<u16>,
    contents: BTreeMap<u16, String>,
    container_card: Option<u16>,
    indicator_opacity: Option<f64>,
    activation_scale: Option<f64>,
    vibrations: Vec<Vec<u32>>,
    haptics_supported: bool,
}

impl RecordingPresenter {
    /// Markup with cards `1..=total_cards` and haptics available.
    #[must_use]
    pub fn with_cards(total_cards: u16) -> Self {
        Self {
            cards: (1..=total_cards).collect(),
            haptics_supported: true,
            ..Self::default()
        }
    }

    /// Drop a card from the markup, as if its element were missing.
    #[must_use]
    pub fn without_card(mut self, card: u16) -> Self {
        self.cards.remove(&card);
        self
    }

    /// Model a host without `navigator.vibrate`.
    #[must_use]
    pub fn without_haptics(mut self) -> Self {
        self.haptics_supported = false;
        self
    }

    /// Cards currently carrying the active marker.
    #[must_use]
    pub fn active_cards(&self) -> Vec<u16> {
        self.active.iter().copied().collect()
    }

    /// Value of the container's current-card attribute, as the page renders it.
    #[must_use]
    pub fn container_attribute(&self) -> Option<String> {
        self.container_card.map(|card| card.to_string())
    }

    #[must_use]
    pub const fn indicator_opacity(&self) -> Option<f64> {
        self.indicator_opacity
    }

    #[must_use]
    pub const fn activation_scale(&self) -> Option<f64> {
        self.activation_scale
    }

    #[must_use]
    pub fn card_content(&self, card: u16) -> Option<&str> {
        self.contents.get(&card).map(String::as_str)
    }

    /// Every haptic pattern fired so far, oldest first.
    #[must_use]
    pub fn vibrations(&self) -> &[Vec<u32>] {
        &self.vibrations
    }
}

impl Presenter for RecordingPresenter {
    fn set_card_active(&mut self, card: u16, active: bool) {
        if !self.cards.contains(&card) {
            return;
        }
        if active {
            self.active.insert(card);
        } else {
            self.active.remove(&card);
        }
    }

    fn set_container_card(&mut self, card: u16) {
        self.container_card = Some(card);
    }

    fn set_indicator_opacity(&mut self, opacity: f64) {
        self.indicator_opacity = Some(opacity);
    }

    fn set_card_content(&mut self, card: u16, content: &str) {
        if self.cards.contains(&card) {
            self.contents.insert(card, content.to_owned());
        }
    }

    fn set_activation_scale(&mut self, scale: Option<f64>) {
        self.activation_scale = scale;
    }

    fn vibrate(&mut self, pattern: &[u32]) {
        if self.haptics_supported && !pattern.is_empty() {
            self.vibrations.push(pattern.to_vec());
        }
    }
}

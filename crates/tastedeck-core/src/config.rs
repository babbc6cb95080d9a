#![forbid(unsafe_code)]

//! Tunable parameters for the card deck as a single [`DeckConfig`].
//!
//! Every field defaults to the reference landing-page behaviour, so
//! `DeckConfig::default()` reproduces it exactly. Hosts may override any
//! subset from TOML or JSON:
//!
//! ```toml
//! total_cards = 12
//! transition_cooldown_ms = 900
//! ```
//!
//! ```rust,ignore
//! let config = DeckConfig::from_toml_file("tastedeck.toml")?;
//! let config = DeckConfig::from_json_str(json)?;
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Deck configuration.
///
/// Durations are stored in milliseconds so that the document formats stay
/// flat; use the accessor methods to get [`Duration`] values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Number of cards in the deck. Default: 9.
    pub total_cards: u16,
    /// Minimum vertical travel for a touch gesture to count as a swipe.
    /// The threshold is inclusive. Default: 50.0.
    pub min_swipe_distance: f64,
    /// Lock window after a transition; matches the CSS transition duration.
    /// Default: 1200.
    pub transition_cooldown_ms: u64,
    /// Haptic pattern fired on each accepted transition. Default: `[50]`.
    pub transition_haptic_ms: Vec<u32>,
    /// Length of the press animation on the activation element. Default: 150.
    pub activation_pulse_ms: u64,
    /// Scale applied to the activation element while pressed. Default: 0.95.
    pub activation_scale: f64,
    /// Haptic pattern fired on activation. Default: `[50, 50, 50]`.
    pub activation_haptic_ms: Vec<u32>,
    /// Indicator opacity on the first card. Default: 0.7.
    pub indicator_visible_opacity: f64,
    /// Indicator opacity everywhere else. Default: 0.0.
    pub indicator_hidden_opacity: f64,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            total_cards: 9,
            min_swipe_distance: 50.0,
            transition_cooldown_ms: 1200,
            transition_haptic_ms: vec![50],
            activation_pulse_ms: 150,
            activation_scale: 0.95,
            activation_haptic_ms: vec![50, 50, 50],
            indicator_visible_opacity: 0.7,
            indicator_hidden_opacity: 0.0,
        }
    }
}

impl DeckConfig {
    /// Load from a TOML string and validate.
    pub fn from_toml_str(s: &str) -> Result<Self, DeckConfigError> {
        let config: Self = toml::from_str(s).map_err(DeckConfigError::Toml)?;
        config.into_validated()
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, DeckConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(DeckConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string and validate.
    pub fn from_json_str(s: &str) -> Result<Self, DeckConfigError> {
        let config: Self = serde_json::from_str(s).map_err(DeckConfigError::Json)?;
        config.into_validated()
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DeckConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(DeckConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.total_cards == 0 {
            errors.push("total_cards must be > 0".into());
        }

        if !self.min_swipe_distance.is_finite() || self.min_swipe_distance <= 0.0 {
            errors.push(format!(
                "min_swipe_distance must be finite and > 0, got {}",
                self.min_swipe_distance
            ));
        }

        if !(self.activation_scale > 0.0 && self.activation_scale <= 1.0) {
            errors.push(format!(
                "activation_scale must be in (0, 1], got {}",
                self.activation_scale
            ));
        }

        for (name, value) in [
            ("indicator_visible_opacity", self.indicator_visible_opacity),
            ("indicator_hidden_opacity", self.indicator_hidden_opacity),
        ] {
            if !(0.0..=1.0).contains(&value) {
                errors.push(format!("{name} must be in [0, 1], got {value}"));
            }
        }

        errors
    }

    fn into_validated(self) -> Result<Self, DeckConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(DeckConfigError::Validation(errors))
        }
    }

    /// Lock window after an accepted transition.
    #[must_use]
    pub const fn transition_cooldown(&self) -> Duration {
        Duration::from_millis(self.transition_cooldown_ms)
    }

    /// Length of the activation press animation.
    #[must_use]
    pub const fn activation_pulse(&self) -> Duration {
        Duration::from_millis(self.activation_pulse_ms)
    }

    /// Indicator opacity for the given card: visible only on the first card.
    #[must_use]
    pub fn indicator_opacity_for(&self, card: u16) -> f64 {
        if card == 1 {
            self.indicator_visible_opacity
        } else {
            self.indicator_hidden_opacity
        }
    }
}

/// Errors that can occur when loading a deck configuration.
#[derive(Debug)]
pub enum DeckConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    Toml(toml::de::Error),
    /// JSON parse error.
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for DeckConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for DeckConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Toml(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

#![forbid(unsafe_code)]

//! Core: card navigation state machine, input normalization, and the seams
//! the page host plugs into.
//!
//! # Role in Tastedeck
//! `tastedeck-core` is host-agnostic and deterministic. It never touches the
//! DOM and never reads a clock; the host supplies a [`presenter::Presenter`]
//! for page mutations and a [`timers::Scheduler`] for deferred callbacks.
//!
//! # Primary responsibilities
//! - **NavigationController**: owns the current card and the transition lock.
//! - **InputAdapterSet**: turns touch, wheel, key and activation events into
//!   navigation intents.
//! - **DeckConfig**: every tunable constant, loadable from TOML or JSON.
//!
//! # How it fits in the system
//! `tastedeck-web` implements the presenter and scheduler on top of
//! `web-sys` and feeds browser events into [`input::InputAdapterSet`].
//! Headless hosts and tests use [`presenter::RecordingPresenter`] and
//! [`timers::ManualScheduler`] instead.

pub mod config;
pub mod customize;
pub mod input;
pub mod navigation;
pub mod presenter;
pub mod timers;

pub use config::{DeckConfig, DeckConfigError};
pub use input::{
    ActivationLatch, CallToAction, InputAdapterSet, InputDisposition, InputEvent, Intent,
};
pub use navigation::{NavigationController, Phase, PresentationState, TransitionOutcome};
pub use presenter::{Presenter, RecordingPresenter};
pub use timers::{DeferredTask, ManualScheduler, Scheduler};

#![forbid(unsafe_code)]

//! Browser frontend for Tastedeck.
//!
//! Binds [`tastedeck_core`] to a live page through `web-sys`:
//! - `dom`: [`tastedeck_core::Presenter`] over the markup contract,
//! - `timer`: [`tastedeck_core::Scheduler`] over `window.setTimeout`,
//! - `wasm`: the exported `TastingDeck` handle and its input listeners,
//! - `utils`: exported contact, social-link and logo helpers.
//!
//! Everything here is `wasm32` only; on other targets the crate is empty and
//! hosts should use the core crate directly.

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod timer;
#[cfg(target_arch = "wasm32")]
mod utils;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use dom::DomPresenter;
#[cfg(target_arch = "wasm32")]
pub use timer::WindowScheduler;
#[cfg(target_arch = "wasm32")]
pub use utils::{add_logo, add_social_links, update_contact_info};
#[cfg(target_arch = "wasm32")]
pub use wasm::{TastingDeck, haptics_supported};

/// Controller type driving the live page.
#[cfg(target_arch = "wasm32")]
pub type WebDeck = tastedeck_core::NavigationController<DomPresenter, WindowScheduler>;

//! Shared UI crate for the Pulz site: page/view state, scroll animation,
//! widgets and all markup. The `web` crate only launches [`components::Site`].

pub mod components;
pub mod core;
pub mod dom;
pub mod i18n;
pub mod motion;
pub mod site;
pub mod views;
pub mod widgets;

pub use components::Site;

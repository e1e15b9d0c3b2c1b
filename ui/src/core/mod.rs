//! Cross-cutting helpers shared by the controller, animation modules and widgets.

pub mod config;
pub mod error;
pub mod platform;
pub mod timing;

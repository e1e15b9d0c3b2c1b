//! Site behaviour: which view is shown, how interactions are routed and
//! when deferred work runs.

pub mod app;
pub mod controller;
pub mod deferred;
pub mod intent;
pub mod registry;
#[cfg(target_arch = "wasm32")]
pub mod runtime;
pub mod state;

pub use app::{Response, SiteApp};
pub use controller::{ShowOutcome, Transition, ViewController};
pub use deferred::{Deferred, Guard, Task};
pub use intent::{Intent, Interaction};
pub use registry::{site_registry, PageKey, PageRegistry};
pub use state::{TransitionToken, ViewState};

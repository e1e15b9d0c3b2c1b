//! Platform glue: task spawning and viewport classification.

use crate::dom::Viewport;

/// Fire-and-forget a future on the browser event loop.
#[cfg(target_arch = "wasm32")]
pub fn spawn_future<F>(future: F)
where
    F: std::future::Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

/// Equivalent of the `(max-width: N px)` media query.
pub fn is_narrow(viewport: Viewport, breakpoint_px: u32) -> bool {
    viewport.width <= f64::from(breakpoint_px)
}

/// Value of the `--vh` custom property: one percent of the viewport height.
pub fn viewport_unit(viewport: Viewport) -> String {
    format!("{}px", viewport.height / 100.0)
}

//! Scroll-linked animation.
//!
//! [`triggers::TriggerSet`] maps scroll position to progress and lifecycle
//! events. Each module below arms its bindings against the active view and
//! turns progress into [`Props`] through fixed piecewise curves.

pub mod curves;
pub mod entrance;
pub mod hero;
pub mod photos;
pub mod seam;
pub mod testimonials;
pub mod triggers;

use crate::core::error::SiteResult;
use crate::dom::Dom;

/// Visual properties an animation step may set. `None` leaves the property
/// untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Props {
    pub opacity: Option<f64>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub scale: Option<f64>,
    pub blur: Option<f64>,
    pub visible: Option<bool>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opacity(mut self, value: f64) -> Self {
        self.opacity = Some(value);
        self
    }

    pub fn x(mut self, px: f64) -> Self {
        self.x = Some(px);
        self
    }

    pub fn y(mut self, px: f64) -> Self {
        self.y = Some(px);
        self
    }

    pub fn scale(mut self, value: f64) -> Self {
        self.scale = Some(value);
        self
    }

    pub fn blur(mut self, px: f64) -> Self {
        self.blur = Some(px);
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    /// `autoAlpha`: opacity plus visibility hidden at zero.
    pub fn auto_alpha(self, value: f64) -> Self {
        self.opacity(value).visible(value > 0.0)
    }

    fn transform(&self) -> Option<String> {
        if self.x.is_none() && self.y.is_none() && self.scale.is_none() {
            return None;
        }
        let x = num(self.x.unwrap_or(0.0));
        let y = num(self.y.unwrap_or(0.0));
        let scale = num(self.scale.unwrap_or(1.0));
        Some(format!("translate3d({x}px, {y}px, 0) scale({scale})"))
    }
}

/// Compact number formatting for inline styles.
pub fn num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        // Avoid "-0".
        return "0".to_string();
    }
    format!("{rounded}")
}

/// Write `props` onto `node` as inline style.
pub fn apply<D: Dom>(dom: &D, node: &D::Node, props: &Props) -> SiteResult {
    if let Some(opacity) = props.opacity {
        dom.set_style(node, "opacity", &num(opacity))?;
    }
    if let Some(transform) = props.transform() {
        dom.set_style(node, "transform", &transform)?;
    }
    if let Some(blur) = props.blur {
        dom.set_style(node, "filter", &format!("blur({}px)", num(blur)))?;
    }
    if let Some(visible) = props.visible {
        dom.set_style(node, "visibility", if visible { "visible" } else { "hidden" })?;
    }
    Ok(())
}

pub fn apply_all<D: Dom>(dom: &D, nodes: &[D::Node], props: &Props) -> SiteResult {
    nodes.iter().try_for_each(|node| apply(dom, node, props))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;

    #[test]
    fn numbers_are_compact() {
        assert_eq!(num(1.0), "1");
        assert_eq!(num(0.30000000000000004), "0.3");
        assert_eq!(num(-0.0001), "0");
        assert_eq!(num(-15.5), "-15.5");
    }

    #[test]
    fn apply_writes_only_requested_properties() {
        let dom = MemoryDom::new();
        let node = dom.el(dom.body_node(), "div").node();
        apply(&dom, &node, &Props::new().opacity(0.5).blur(12.0)).unwrap();
        assert_eq!(dom.style(&node, "opacity").as_deref(), Some("0.5"));
        assert_eq!(dom.style(&node, "filter").as_deref(), Some("blur(12px)"));
        assert_eq!(dom.style(&node, "transform"), None);
    }

    #[test]
    fn transform_fills_identity_defaults() {
        let dom = MemoryDom::new();
        let node = dom.el(dom.body_node(), "div").node();
        apply(&dom, &node, &Props::new().y(60.0)).unwrap();
        assert_eq!(
            dom.style(&node, "transform").as_deref(),
            Some("translate3d(0px, 60px, 0) scale(1)")
        );
    }

    #[test]
    fn auto_alpha_hides_at_zero() {
        assert_eq!(Props::new().auto_alpha(0.0).visible, Some(false));
        assert_eq!(Props::new().auto_alpha(0.2).visible, Some(true));
    }
}

//! The document port.
//!
//! Everything that touches the page goes through [`Dom`], so the controller,
//! the scroll modules and the widgets run unchanged against the browser
//! ([`WebDom`], wasm only) and against [`MemoryDom`] in tests.
//!
//! Selectors passed to the query methods stick to a small grammar that both
//! backends understand (see [`selector`]).

pub mod fixture;
pub mod memory;
pub mod selector;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use memory::{MemoryDom, MemoryNode};
#[cfg(target_arch = "wasm32")]
pub use web::WebDom;

use std::fmt;

use crate::core::error::SiteResult;

/// Viewport-relative box, as returned by `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

pub trait Dom: 'static {
    type Node: Clone + PartialEq + fmt::Debug + 'static;

    // Lookup
    fn by_id(&self, id: &str) -> Option<Self::Node>;
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;
    fn query_all_in(&self, scope: &Self::Node, selector: &str) -> Vec<Self::Node>;
    fn closest(&self, node: &Self::Node, selector: &str) -> Option<Self::Node>;
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;
    fn body(&self) -> Option<Self::Node>;
    /// The `<html>` element.
    fn root(&self) -> Option<Self::Node>;

    fn query(&self, selector: &str) -> Option<Self::Node> {
        self.query_all(selector).into_iter().next()
    }

    fn query_in(&self, scope: &Self::Node, selector: &str) -> Option<Self::Node> {
        self.query_all_in(scope, selector).into_iter().next()
    }

    // Classes and attributes
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn add_class(&self, node: &Self::Node, class: &str) -> SiteResult;
    fn remove_class(&self, node: &Self::Node, class: &str) -> SiteResult;
    fn attr(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attr(&self, node: &Self::Node, name: &str, value: &str) -> SiteResult;

    fn toggle_class(&self, node: &Self::Node, class: &str, on: bool) -> SiteResult {
        if on {
            self.add_class(node, class)
        } else {
            self.remove_class(node, class)
        }
    }

    // Content
    fn text(&self, node: &Self::Node) -> String;
    fn set_text(&self, node: &Self::Node, text: &str) -> SiteResult;
    fn inner_html(&self, node: &Self::Node) -> String;
    fn set_inner_html(&self, node: &Self::Node, html: &str) -> SiteResult;

    // Inline style; custom properties (`--vh`) included.
    fn style(&self, node: &Self::Node, prop: &str) -> Option<String>;
    fn set_style(&self, node: &Self::Node, prop: &str, value: &str) -> SiteResult;
    fn clear_style(&self, node: &Self::Node, prop: &str) -> SiteResult;

    fn computed_style(&self, node: &Self::Node, prop: &str) -> Option<String> {
        self.style(node, prop)
    }

    // Forms
    fn value(&self, node: &Self::Node) -> String;
    fn reset_form(&self, form: &Self::Node) -> SiteResult;

    // Structure
    fn create_element(&self, tag: &str) -> SiteResult<Self::Node>;
    fn append(&self, parent: &Self::Node, child: &Self::Node) -> SiteResult;
    fn remove(&self, node: &Self::Node) -> SiteResult;

    // Geometry and scrolling
    fn rect(&self, node: &Self::Node) -> Rect;
    fn viewport(&self) -> Viewport;
    fn scroll_y(&self) -> f64;
    fn scroll_to_top(&self);
    fn scroll_into_view(&self, node: &Self::Node);

    // Document
    fn title(&self) -> String;
    fn set_title(&self, title: &str);
    /// Blocking user notification (`window.alert` in the browser).
    fn notify(&self, message: &str);
}

//! Expanding cards: a clicked card is cloned into a fixed layer that grows
//! to fill most of the viewport, then shrinks back onto the card.

use crate::core::config::SiteConfig;
use crate::core::error::{SiteError, SiteResult};
use crate::dom::{Dom, Rect};
use crate::i18n::{self, Lang};
use crate::site::deferred::{Deferred, Task};

pub const CARD_SELECTOR: &str = ".expand-card";
pub const CLONE_CLASS: &str = "expand-clone";
pub const DIM_ID: &str = "expand-dim";

const WIDTH_SHARE: f64 = 0.92;
const HEIGHT_SHARE: f64 = 0.82;
const EXPANDED_RADIUS: &str = "36px";
const FALLBACK_RADIUS: &str = "26px";
const TRANSITION: &str = "all 0.5s cubic-bezier(.25,.1,.25,1)";
/// Roughly one frame, so the clone is laid out before it starts growing.
const GROW_DELAY_MS: u32 = 16;

fn px(value: f64) -> String {
    format!("{value}px")
}

/// Centred target box for a viewport of `width` × `height`.
pub fn expanded_rect(width: f64, height: f64) -> Rect {
    let w = (width * WIDTH_SHARE).round();
    let h = (height * HEIGHT_SHARE).round();
    Rect::new(((width - w) / 2.0).round(), ((height - h) / 2.0).round(), w, h)
}

#[derive(Debug)]
struct Open<N> {
    card: N,
    clone: N,
    origin: Rect,
    closing: bool,
}

/// At most one card is expanded at a time.
#[derive(Debug)]
pub struct ExpandCard<N> {
    originals: Vec<(N, String)>,
    open: Option<Open<N>>,
}

impl<N> Default for ExpandCard<N> {
    fn default() -> Self {
        Self {
            originals: Vec::new(),
            open: None,
        }
    }
}

impl<N: Clone + PartialEq> ExpandCard<N> {
    /// Remember the markup of every card so a collapse can restore it.
    pub fn init<D: Dom<Node = N>>(&mut self, dom: &D) {
        self.originals = dom
            .query_all(CARD_SELECTOR)
            .into_iter()
            .map(|card| {
                let html = dom.inner_html(&card);
                (card, html)
            })
            .collect();
    }

    /// A clone is on screen, growing, expanded or collapsing.
    pub fn is_active(&self) -> bool {
        self.open.is_some()
    }

    /// A clone is expanded and accepts a collapse.
    pub fn is_open(&self) -> bool {
        self.open.as_ref().is_some_and(|open| !open.closing)
    }

    /// Whether `target` lies inside the clone.
    pub fn contains<D: Dom<Node = N>>(&self, dom: &D, target: &N) -> bool {
        self.open
            .as_ref()
            .is_some_and(|open| dom.contains(&open.clone, target))
    }

    pub fn open<D: Dom<Node = N>>(&mut self, dom: &D, card: &N, lang: Lang) -> SiteResult<Vec<Deferred>> {
        if self.open.is_some() {
            return Ok(Vec::new());
        }
        if !self.originals.iter().any(|(known, _)| known == card) {
            self.originals.push((card.clone(), dom.inner_html(card)));
        }

        let origin = dom.rect(card);
        let clone = dom.create_element("div")?;
        dom.add_class(&clone, CLONE_CLASS)?;
        place(dom, &clone, origin)?;
        let radius = dom
            .computed_style(card, "border-radius")
            .unwrap_or_else(|| FALLBACK_RADIUS.to_string());
        dom.set_style(&clone, "border-radius", &radius)?;

        let title = dom.attr(card, "data-title").unwrap_or_default();
        let placeholder = i18n::text(lang, "expand-clone-placeholder");
        dom.set_inner_html(
            &clone,
            &format!(
                r#"<div class="expand-clone-title">{}</div><div class="expand-clone-content">{}</div>"#,
                escape(&title),
                escape(&placeholder)
            ),
        )?;
        let body = dom
            .body()
            .ok_or_else(|| SiteError::MissingElement("body".into()))?;
        dom.append(&body, &clone)?;

        if let Err(err) = cover(dom, card) {
            if let Err(cleanup) = dom.remove(&clone) {
                tracing::warn!(%cleanup, "expand clone left behind");
            }
            dom.clear_style(card, "opacity").ok();
            return Err(err);
        }

        self.open = Some(Open {
            card: card.clone(),
            clone,
            origin,
            closing: false,
        });
        tracing::debug!(title = %title, "card expanded");
        Ok(vec![Deferred::always(GROW_DELAY_MS, Task::ExpandGrow)])
    }

    /// Animate the clone to its expanded box.
    pub fn grow<D: Dom<Node = N>>(&self, dom: &D) -> SiteResult {
        let Some(open) = self.open.as_ref().filter(|open| !open.closing) else {
            return Ok(());
        };
        let viewport = dom.viewport();
        dom.set_style(&open.clone, "transition", TRANSITION)?;
        place(dom, &open.clone, expanded_rect(viewport.width, viewport.height))?;
        dom.set_style(&open.clone, "border-radius", EXPANDED_RADIUS)
    }

    /// Shrink the clone back onto its card. The clean-up runs once the
    /// transition has finished.
    pub fn collapse<D: Dom<Node = N>>(&mut self, dom: &D, config: &SiteConfig) -> SiteResult<Vec<Deferred>> {
        let Some(open) = self.open.as_mut().filter(|open| !open.closing) else {
            return Ok(Vec::new());
        };
        open.closing = true;
        dom.set_style(&open.clone, "transition", TRANSITION)?;
        place(dom, &open.clone, open.origin)?;
        let radius = dom
            .computed_style(&open.card, "border-radius")
            .unwrap_or_else(|| FALLBACK_RADIUS.to_string());
        dom.set_style(&open.clone, "border-radius", &radius)?;
        Ok(vec![Deferred::always(
            config.expand_transition_ms,
            Task::ExpandSettle,
        )])
    }

    /// Remove the clone and restore the card.
    pub fn settle<D: Dom<Node = N>>(&mut self, dom: &D) -> SiteResult {
        let Some(open) = self.open.take_if(|open| open.closing) else {
            return Ok(());
        };
        dom.remove(&open.clone)?;
        dom.clear_style(&open.card, "opacity")?;
        if let Some((_, html)) = self.originals.iter().find(|(card, _)| *card == open.card) {
            dom.set_inner_html(&open.card, html)?;
        }
        if let Some(dim) = dom.by_id(DIM_ID) {
            dom.remove_class(&dim, "active")?;
        }
        Ok(())
    }
}

/// Hide the card under its clone and dim the page.
fn cover<D: Dom>(dom: &D, card: &D::Node) -> SiteResult {
    dom.set_style(card, "opacity", "0")?;
    if let Some(dim) = dom.by_id(DIM_ID) {
        dom.add_class(&dim, "active")?;
    }
    Ok(())
}

fn place<D: Dom>(dom: &D, node: &D::Node, rect: Rect) -> SiteResult {
    dom.set_style(node, "left", &px(rect.left))?;
    dom.set_style(node, "top", &px(rect.top))?;
    dom.set_style(node, "width", &px(rect.width))?;
    dom.set_style(node, "height", &px(rect.height))
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{MemoryDom, MemoryNode, Viewport};

    fn setup() -> (MemoryDom, MemoryNode, MemoryNode) {
        let dom = MemoryDom::new();
        dom.set_viewport(Viewport {
            width: 1000.0,
            height: 800.0,
        });
        let body = dom.body_node();
        let card = dom
            .el(body, "div")
            .class("expand-card")
            .attr("data-title", "Rehearsal")
            .rect(Rect::new(100.0, 200.0, 300.0, 150.0))
            .node();
        dom.el(card, "h3").text("Rehearsal");
        let dim = dom.el(body, "div").id(DIM_ID).node();
        (dom, card, dim)
    }

    #[test]
    fn expanded_box_is_centred() {
        let rect = expanded_rect(1000.0, 800.0);
        assert_eq!(rect, Rect::new(40.0, 72.0, 920.0, 656.0));
    }

    #[test]
    fn open_clones_and_dims() {
        let (dom, card, dim) = setup();
        let mut widget = ExpandCard::default();
        widget.init(&dom);
        let deferred = widget.open(&dom, &card, Lang::En).unwrap();
        assert_eq!(deferred[0].task, Task::ExpandGrow);

        let clone = dom.query(".expand-clone").unwrap();
        assert_eq!(dom.style(&clone, "left").as_deref(), Some("100px"));
        assert_eq!(dom.style(&clone, "border-radius").as_deref(), Some("26px"));
        assert!(dom.inner_html(&clone).contains("Rehearsal"));
        assert_eq!(dom.style(&card, "opacity").as_deref(), Some("0"));
        assert!(dom.has_class(&dim, "active"));

        widget.grow(&dom).unwrap();
        assert_eq!(dom.style(&clone, "width").as_deref(), Some("920px"));
        assert_eq!(dom.style(&clone, "border-radius").as_deref(), Some("36px"));
    }

    #[test]
    fn failed_cover_removes_the_clone() {
        let (dom, card, dim) = setup();
        dom.fail_writes(&dim);
        let mut widget = ExpandCard::default();
        widget.init(&dom);
        for _ in 0..2 {
            assert!(widget.open(&dom, &card, Lang::En).is_err());
            assert!(!widget.is_active());
        }
        assert!(dom.query(".expand-clone").is_none());
        assert_eq!(dom.style(&card, "opacity"), None);
    }

    #[test]
    fn only_one_clone_at_a_time() {
        let (dom, card, _) = setup();
        let mut widget = ExpandCard::default();
        widget.open(&dom, &card, Lang::En).unwrap();
        assert!(widget.open(&dom, &card, Lang::En).unwrap().is_empty());
        assert_eq!(dom.query_all(".expand-clone").len(), 1);
    }

    #[test]
    fn collapse_then_settle_restores_the_card() {
        let (dom, card, dim) = setup();
        let before = dom.inner_html(&card);
        let mut widget = ExpandCard::default();
        widget.init(&dom);
        widget.open(&dom, &card, Lang::En).unwrap();
        widget.grow(&dom).unwrap();
        dom.set_inner_html(&card, "<p>changed</p>").unwrap();

        let deferred = widget.collapse(&dom, &SiteConfig::default()).unwrap();
        assert_eq!(deferred, vec![Deferred::always(500, Task::ExpandSettle)]);
        assert!(widget.is_active());
        assert!(!widget.is_open());
        assert!(widget.collapse(&dom, &SiteConfig::default()).unwrap().is_empty());

        widget.settle(&dom).unwrap();
        assert!(!widget.is_active());
        assert!(dom.query(".expand-clone").is_none());
        assert_eq!(dom.inner_html(&card), before);
        assert_eq!(dom.style(&card, "opacity"), None);
        assert!(!dom.has_class(&dim, "active"));
    }

    #[test]
    fn settle_without_collapse_is_ignored() {
        let (dom, card, _) = setup();
        let mut widget = ExpandCard::default();
        widget.open(&dom, &card, Lang::En).unwrap();
        widget.settle(&dom).unwrap();
        assert!(widget.is_open());
    }

    #[test]
    fn clicks_inside_the_clone_are_detected() {
        let (dom, card, _) = setup();
        let mut widget = ExpandCard::default();
        widget.open(&dom, &card, Lang::En).unwrap();
        let clone = dom.query(".expand-clone").unwrap();
        let inner = dom.el(clone, "span").node();
        assert!(widget.contains(&dom, &inner));
        assert!(!widget.contains(&dom, &card));
    }
}

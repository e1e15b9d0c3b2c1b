//! `SiteApp` ties the view controller and the widgets to incoming
//! interactions.

use super::controller::ViewController;
use super::deferred::{Deferred, Task};
use super::intent::{ClickKind, ClickRoute, Intent, Interaction, CLICK_ROUTES};
use super::registry::PageRegistry;
use crate::core::config::SiteConfig;
use crate::core::error::{guard, SiteResult};
use crate::dom::Dom;
use crate::widgets::expand_card::ExpandCard;
use crate::widgets::{booking_form, bubble_grid};

const ESCAPE: &str = "Escape";

/// What the runtime has to do after an interaction was handled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    /// Suppress the browser's default action for the event.
    pub prevent_default: bool,
    pub deferred: Vec<Deferred>,
}

pub struct SiteApp<D: Dom> {
    controller: ViewController<D>,
    expand: ExpandCard<D::Node>,
}

impl<D: Dom> SiteApp<D> {
    pub fn new(dom: D, registry: PageRegistry, config: SiteConfig) -> Self {
        Self {
            controller: ViewController::new(dom, registry, config),
            expand: ExpandCard::default(),
        }
    }

    pub fn controller(&self) -> &ViewController<D> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ViewController<D> {
        &mut self.controller
    }

    pub fn dom(&self) -> &D {
        self.controller.dom()
    }

    pub fn expand_card(&self) -> &ExpandCard<D::Node> {
        &self.expand
    }

    pub fn start(&mut self) -> Vec<Deferred> {
        self.expand.init(self.controller.dom());
        self.controller.start()
    }

    pub fn handle(&mut self, interaction: Interaction<D::Node>) -> Response {
        let mut response = Response::default();
        match interaction {
            Interaction::Click { target } => self.click(&target, &mut response),
            Interaction::Submit { form } => {
                let outcome = guard("booking_submit", || {
                    booking_form::submit(self.controller.dom(), &form)
                });
                response.prevent_default = outcome.is_some_and(|outcome| outcome.handled());
            }
            Interaction::Key { key } if key == ESCAPE => self.escape(&mut response),
            Interaction::Key { .. } => {}
            Interaction::Scroll => self.controller.on_scroll(),
            Interaction::Resize => self.controller.on_resize(),
            Interaction::Load => response.deferred = self.controller.on_load(),
            Interaction::FrameLoaded { frame } => self.controller.on_frame_loaded(&frame),
        }
        response
    }

    /// Run deferred work. Widget work goes to its widget; the rest is the
    /// controller's.
    pub fn fire(&mut self, deferred: Deferred) -> Vec<Deferred> {
        let dom = self.controller.dom();
        match deferred.task {
            Task::ExpandGrow => {
                guard("expand_grow", || self.expand.grow(dom));
                Vec::new()
            }
            Task::ExpandSettle => {
                guard("expand_settle", || self.expand.settle(dom));
                Vec::new()
            }
            _ => self.controller.fire(deferred),
        }
    }

    fn click(&mut self, target: &D::Node, response: &mut Response) {
        // A click outside an expanded card closes it; the click itself still
        // goes through the routes below.
        let dom = self.controller.dom();
        if self.expand.is_open() && !self.expand.contains(dom, target) {
            let config = self.controller.config();
            if let Some(deferred) = guard("expand_collapse", || self.expand.collapse(dom, config)) {
                response.deferred.extend(deferred);
            }
        }

        let mut navigated = false;
        for route in CLICK_ROUTES {
            let Some(hit) = self.hit(route, target) else {
                continue;
            };
            match route.kind {
                ClickKind::PageLink => {
                    navigated = true;
                    response.prevent_default = true;
                    let intent = self
                        .controller
                        .dom()
                        .attr(&hit, "data-page")
                        .and_then(|raw| Intent::from_page_attr(&raw));
                    match intent {
                        Some(intent) => response
                            .deferred
                            .extend(self.controller.apply(intent).into_deferred()),
                        None => tracing::debug!("unknown page link target"),
                    }
                }
                ClickKind::LangToggle if !navigated => {
                    let intent = self
                        .controller
                        .dom()
                        .attr(&hit, "data-lang")
                        .and_then(|raw| Intent::from_lang_attr(&raw));
                    if let Some(intent) = intent {
                        response
                            .deferred
                            .extend(self.controller.apply(intent).into_deferred());
                    }
                }
                ClickKind::LangToggle => {}
                ClickKind::AnchorLink => {
                    if let Some(true) = guard("anchor_scroll", || self.scroll_to_anchor(&hit)) {
                        response.prevent_default = true;
                    }
                }
                ClickKind::ExpandCard => {
                    if self.expand.is_active() {
                        continue;
                    }
                    let lang = self.controller.state().lang;
                    let dom = self.controller.dom();
                    if let Some(deferred) = guard("expand_open", || self.expand.open(dom, &hit, lang)) {
                        response.deferred.extend(deferred);
                    }
                }
                ClickKind::BubbleItem => {
                    let lang = self.controller.state().lang;
                    guard("bubble_open", || bubble_grid::open(self.controller.dom(), &hit, lang));
                }
                ClickKind::OverlayClose | ClickKind::OverlayBackdrop => {
                    guard("bubble_close", || bubble_grid::close(self.controller.dom()));
                }
            }
        }
    }

    fn hit(&self, route: &ClickRoute, target: &D::Node) -> Option<D::Node> {
        let dom = self.controller.dom();
        let hit = dom.closest(target, route.selector)?;
        if route.exact && hit != *target {
            return None;
        }
        Some(hit)
    }

    /// Smooth-scroll to the element an in-page link points at. Returns
    /// whether the link was taken over.
    fn scroll_to_anchor(&self, link: &D::Node) -> SiteResult<bool> {
        let dom = self.controller.dom();
        if dom.attr(link, "data-page").is_some() {
            return Ok(false);
        }
        let href = dom.attr(link, "href").unwrap_or_default();
        let Some(id) = href.strip_prefix('#').filter(|id| !id.is_empty()) else {
            return Ok(false);
        };
        if let Some(target) = dom.by_id(id) {
            dom.scroll_into_view(&target);
        }
        Ok(true)
    }

    fn escape(&mut self, response: &mut Response) {
        let dom = self.controller.dom();
        if self.expand.is_open() {
            let config = self.controller.config();
            if let Some(deferred) = guard("expand_collapse", || self.expand.collapse(dom, config)) {
                response.deferred.extend(deferred);
            }
        }
        if bubble_grid::is_open(dom) {
            guard("bubble_close", || bubble_grid::close(dom));
        }
    }
}

//! The view controller: one instance owns the current view, the scroll
//! bindings armed for it and the token that keeps deferred work honest.

use super::deferred::{Deferred, Task};
use super::intent::Intent;
use super::registry::{PageKey, PageRegistry};
use super::state::{TransitionToken, ViewState};
use crate::core::config::SiteConfig;
use crate::core::error::{guard, SiteResult};
use crate::core::platform;
use crate::dom::Dom;
use crate::i18n::{self, Lang, CHROME_KEYS};
use crate::motion::triggers::TriggerSet;
use crate::motion::{entrance, hero, photos, seam, testimonials};

const ACTIVE: &str = "active";
const BOOKING_BODY_CLASS: &str = "booking-page";
const ACTIVE_VIEW: &str = ".page.active";
const META_DESCRIPTION: &str = r#"meta[name="description"]"#;
const EMBED_SELECTOR: &str = ".cal-embed";
const EMBED_HEIGHT: &str = "600px";

/// A completed page transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub token: TransitionToken,
    /// Work the caller must schedule.
    pub deferred: Vec<Deferred>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShowOutcome {
    Shown(Transition),
    /// The target has no view, or it refused to become active; nothing
    /// was touched.
    Ignored,
}

impl ShowOutcome {
    pub fn into_deferred(self) -> Vec<Deferred> {
        match self {
            ShowOutcome::Shown(transition) => transition.deferred,
            ShowOutcome::Ignored => Vec::new(),
        }
    }

    pub fn is_shown(&self) -> bool {
        matches!(self, ShowOutcome::Shown(_))
    }
}

pub struct ViewController<D: Dom> {
    dom: D,
    registry: PageRegistry,
    config: SiteConfig,
    state: ViewState,
    token: TransitionToken,
    triggers: TriggerSet<D>,
}

impl<D: Dom> ViewController<D> {
    pub fn new(dom: D, registry: PageRegistry, config: SiteConfig) -> Self {
        Self {
            dom,
            registry,
            config,
            state: ViewState::default(),
            token: TransitionToken::default(),
            triggers: TriggerSet::new(),
        }
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn token(&self) -> TransitionToken {
        self.token
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn triggers(&self) -> &TriggerSet<D> {
        &self.triggers
    }

    /// Boot the site: viewport unit, frame loading state, then Home in the
    /// default language.
    pub fn start(&mut self) -> Vec<Deferred> {
        guard("viewport_unit", || self.set_viewport_unit());
        guard("frame_loading", || self.dim_frames());
        guard("embed_fix", || self.fix_embed());
        let initial = ViewState::default();
        self.show_page(initial.page, Some(initial.lang))
            .into_deferred()
    }

    /// Make `(page, lang)` the visible view. `lang: None` keeps the current
    /// language.
    pub fn show_page(&mut self, page: PageKey, lang: Option<Lang>) -> ShowOutcome {
        let lang = lang.unwrap_or(self.state.lang);
        let Some(view_id) = self.registry.view_id(page, lang) else {
            tracing::debug!(%page, %lang, "no view registered; ignoring");
            return ShowOutcome::Ignored;
        };
        let Some(target) = self.dom.by_id(view_id) else {
            tracing::debug!(%page, %lang, view_id, "view element missing; ignoring");
            return ShowOutcome::Ignored;
        };

        if let Err(err) = self.activate(&target) {
            tracing::error!(%page, %lang, %err, "view swap failed; keeping the current view");
            return ShowOutcome::Ignored;
        }
        self.triggers.kill_all();
        guard("seam_dismiss", || seam::dismiss(&self.dom));

        self.state = ViewState { page, lang };
        self.token = self.token.next();
        let token = self.token;
        tracing::info!(%page, %lang, token = token.value(), "showing view");

        guard("update_meta", || self.update_meta());
        guard("update_footer", || self.update_footer());
        guard("update_nav", || self.update_nav());

        let mut deferred = Vec::new();
        guard("booking_layout", || self.booking_layout());
        if page == PageKey::Booking {
            deferred.push(Deferred::guarded(
                self.config.embed_fix_delay_ms,
                token,
                Task::EmbedFix,
            ));
        }

        guard("reset_scroll", || {
            if let Some(body) = self.dom.body() {
                self.dom.clear_style(&body, "overflow")?;
            }
            self.dom.scroll_to_top();
            Ok(())
        });

        if page == PageKey::Home {
            deferred.push(Deferred::guarded(
                self.config.rearm_delay_ms,
                token,
                Task::ArmHome,
            ));
        }
        deferred.push(Deferred::guarded(
            self.config.entrance_delay_ms,
            token,
            Task::Entrance,
        ));

        ShowOutcome::Shown(Transition { token, deferred })
    }

    pub fn apply(&mut self, intent: Intent) -> ShowOutcome {
        match intent {
            Intent::Navigate { page, lang } => self.show_page(page, lang),
            Intent::SwitchLanguage(lang) => self.show_page(self.state.page, Some(lang)),
        }
    }

    /// Run one piece of deferred work and return any follow-ups.
    pub fn fire(&mut self, deferred: Deferred) -> Vec<Deferred> {
        if !deferred.is_current(self.token) {
            tracing::debug!(task = ?deferred.task, "stale deferred work dropped");
            return Vec::new();
        }
        match deferred.task {
            Task::EmbedFix => {
                guard("embed_fix", || self.fix_embed());
                Vec::new()
            }
            Task::ArmHome => {
                self.arm_home();
                Vec::new()
            }
            Task::Entrance => self.run_entrance(),
            Task::Reveal(reveal) => {
                guard("reveal", || match self.active_view() {
                    Some(view) => entrance::reveal(&self.dom, &view, reveal),
                    None => Ok(()),
                });
                Vec::new()
            }
            Task::RearmPhotos => {
                if let Some(view) = self.active_view() {
                    guard("photos", || photos::arm(&self.dom, &view, &mut self.triggers));
                    self.triggers.update(&self.dom);
                }
                Vec::new()
            }
            Task::ExpandGrow | Task::ExpandSettle => {
                tracing::debug!(task = ?deferred.task, "widget task reached the controller");
                Vec::new()
            }
        }
    }

    pub fn on_scroll(&mut self) {
        self.triggers.update(&self.dom);
    }

    pub fn on_resize(&mut self) {
        guard("viewport_unit", || self.set_viewport_unit());
        guard("embed_fix", || self.fix_embed());
        self.triggers.refresh(&self.dom);
    }

    pub fn on_load(&mut self) -> Vec<Deferred> {
        self.triggers.refresh(&self.dom);
        if self.state.page != PageKey::Home {
            return Vec::new();
        }
        vec![Deferred::guarded(
            self.config.load_refresh_delay_ms,
            self.token,
            Task::RearmPhotos,
        )]
    }

    pub fn on_frame_loaded(&self, frame: &D::Node) {
        guard("frame_loaded", || self.dom.set_style(frame, "opacity", "1"));
    }

    fn active_view(&self) -> Option<D::Node> {
        self.dom.query(ACTIVE_VIEW)
    }

    /// Swap `active` onto `target`. On failure the previously active views
    /// are restored and the error is returned.
    fn activate(&self, target: &D::Node) -> SiteResult {
        let previous = self.dom.query_all(ACTIVE_VIEW);
        let was_active = previous.contains(target);
        self.dom.add_class(target, ACTIVE)?;
        let swapped = self
            .dom
            .query_all(".page")
            .into_iter()
            .filter(|view| view != target)
            .try_for_each(|view| self.dom.remove_class(&view, ACTIVE));
        if swapped.is_err() {
            if !was_active {
                guard("restore_view", || self.dom.remove_class(target, ACTIVE));
            }
            for view in previous.iter().filter(|view| *view != target) {
                guard("restore_view", || self.dom.add_class(view, ACTIVE));
            }
        }
        swapped
    }

    fn update_meta(&self) -> SiteResult {
        let lang = self.state.lang;
        self.dom.set_title(&i18n::text(lang, "page-title"));
        if let Some(meta) = self.dom.query(META_DESCRIPTION) {
            self.dom
                .set_attr(&meta, "content", &i18n::text(lang, "page-description"))?;
        }
        Ok(())
    }

    fn update_footer(&self) -> SiteResult {
        let lang = self.state.lang;
        for key in &CHROME_KEYS[2..] {
            if let Some(node) = self.dom.by_id(key) {
                self.dom.set_text(&node, &i18n::text(lang, key))?;
            }
        }
        Ok(())
    }

    fn update_nav(&self) -> SiteResult {
        let ViewState { page, lang } = self.state;
        for link in self.dom.query_all(".nav-link") {
            let current = self.dom.attr(&link, "data-page").as_deref() == Some(page.as_str());
            self.dom.toggle_class(&link, ACTIVE, current)?;
        }
        for button in self.dom.query_all(".lang-btn") {
            let pressed = self
                .dom
                .attr(&button, "data-lang")
                .and_then(|code| Lang::from_code(&code))
                == Some(lang);
            self.dom.toggle_class(&button, ACTIVE, pressed)?;
            self.dom
                .set_attr(&button, "aria-pressed", if pressed { "true" } else { "false" })?;
        }
        Ok(())
    }

    fn booking_layout(&self) -> SiteResult {
        let Some(body) = self.dom.body() else {
            return Ok(());
        };
        self.dom.toggle_class(
            &body,
            BOOKING_BODY_CLASS,
            self.state.page == PageKey::Booking,
        )
    }

    fn fix_embed(&self) -> SiteResult {
        if !platform::is_narrow(self.dom.viewport(), self.config.narrow_breakpoint_px) {
            return Ok(());
        }
        if let Some(embed) = self.dom.query(EMBED_SELECTOR) {
            self.dom.set_style(&embed, "overflow-y", "auto")?;
            self.dom.set_style(&embed, "height", EMBED_HEIGHT)?;
        }
        Ok(())
    }

    fn set_viewport_unit(&self) -> SiteResult {
        match self.dom.root() {
            Some(root) => self
                .dom
                .set_style(&root, "--vh", &platform::viewport_unit(self.dom.viewport())),
            None => Ok(()),
        }
    }

    fn dim_frames(&self) -> SiteResult {
        for frame in self.dom.query_all("iframe") {
            self.dom.set_style(&frame, "opacity", "0.5")?;
            self.dom.set_style(&frame, "transition", "opacity 0.3s ease")?;
        }
        Ok(())
    }

    fn arm_home(&mut self) {
        if self.state.page != PageKey::Home {
            return;
        }
        let Some(view) = self.active_view() else {
            tracing::debug!("no active view to arm");
            return;
        };
        let dom = &self.dom;
        let triggers = &mut self.triggers;
        guard("hero", || hero::arm(dom, &view, triggers));
        guard("photos", || photos::arm(dom, &view, triggers));
        guard("seam", || seam::arm(dom, &view, triggers));
        self.triggers.update(&self.dom);
    }

    fn run_entrance(&mut self) -> Vec<Deferred> {
        let Some(view) = self.active_view() else {
            return Vec::new();
        };
        let token = self.token;
        let reveals = guard("entrance", || entrance::prepare(&self.dom, &view, &self.config))
            .unwrap_or_default();
        guard("testimonials", || {
            testimonials::arm(&self.dom, &view, &mut self.triggers)
        });
        self.triggers.update(&self.dom);
        reveals
            .into_iter()
            .map(|(delay_ms, reveal)| Deferred::guarded(delay_ms, token, Task::Reveal(reveal)))
            .collect()
    }
}

//! Scroll triggers.
//!
//! A trigger watches one element and maps the scroll position onto a 0..1
//! progress between a start and an end marker. Markers use the familiar
//! `"<element edge> <viewport edge>"` form (`"top 85%"`, `"bottom top"`)
//! and the end may be relative to the start (`"+=200%"`).
//!
//! Bindings are grouped by the module that armed them so a module can be
//! re-armed on its own, and [`TriggerSet::kill_all`] drops everything when
//! the view changes.

use thiserror::Error;

use super::curves::clamp01;
use crate::core::error::SiteResult;
use crate::dom::Dom;

#[derive(Debug, Error, PartialEq)]
pub enum MarkerError {
    #[error("bad marker `{0}`")]
    Bad(String),
}

/// A point on an element or on the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Offset {
    Top,
    Center,
    Bottom,
    Percent(f64),
    Px(f64),
}

impl Offset {
    fn parse(raw: &str) -> Result<Self, MarkerError> {
        let bad = || MarkerError::Bad(raw.to_string());
        match raw {
            "top" => Ok(Self::Top),
            "center" => Ok(Self::Center),
            "bottom" => Ok(Self::Bottom),
            _ => {
                if let Some(num) = raw.strip_suffix('%') {
                    num.parse().map(Self::Percent).map_err(|_| bad())
                } else if let Some(num) = raw.strip_suffix("px") {
                    num.parse().map(Self::Px).map_err(|_| bad())
                } else {
                    raw.parse().map(Self::Px).map_err(|_| bad())
                }
            }
        }
    }

    /// Distance from the top of a box of height `extent`.
    pub fn resolve(self, extent: f64) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::Center => extent / 2.0,
            Self::Bottom => extent,
            Self::Percent(p) => extent * p / 100.0,
            Self::Px(px) => px,
        }
    }
}

/// `"<element> <viewport>"`: fires when that point of the element meets
/// that point of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub element: Offset,
    pub viewport: Offset,
}

impl Marker {
    pub fn parse(raw: &str) -> Result<Self, MarkerError> {
        let mut words = raw.split_whitespace();
        let element = words
            .next()
            .ok_or_else(|| MarkerError::Bad(raw.to_string()))?;
        let viewport = words.next().unwrap_or("top");
        if words.next().is_some() {
            return Err(MarkerError::Bad(raw.to_string()));
        }
        Ok(Self {
            element: Offset::parse(element)?,
            viewport: Offset::parse(viewport)?,
        })
    }

    /// Scroll position at which the marker is reached.
    fn scroll_at(&self, element_doc_top: f64, element_height: f64, viewport_height: f64) -> f64 {
        element_doc_top + self.element.resolve(element_height)
            - self.viewport.resolve(viewport_height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum End {
    At(Marker),
    /// `+=N%` of the viewport height or `+=Npx` past the start.
    After(Offset),
}

impl End {
    pub fn parse(raw: &str) -> Result<Self, MarkerError> {
        match raw.trim().strip_prefix("+=") {
            Some(rest) => Offset::parse(rest).map(Self::After),
            None => Marker::parse(raw).map(Self::At),
        }
    }
}

pub struct TriggerSpec<N> {
    pub trigger: N,
    pub start: Marker,
    pub end: End,
    /// Element the end marker refers to, when it is not `trigger`.
    pub end_trigger: Option<N>,
    /// Remove the binding after its first `Enter`.
    pub once: bool,
}

impl<N> TriggerSpec<N> {
    pub fn new(trigger: N, start: &str, end: &str) -> Result<Self, MarkerError> {
        Ok(Self {
            trigger,
            start: Marker::parse(start)?,
            end: End::parse(end)?,
            end_trigger: None,
            once: false,
        })
    }

    pub fn end_trigger(mut self, node: N) -> Self {
        self.end_trigger = Some(node);
        self
    }

    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriggerEvent {
    Enter,
    Leave,
    EnterBack,
    LeaveBack,
    Update(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Before,
    Active,
    After,
}

fn crossings(from: Option<Phase>, to: Phase) -> &'static [TriggerEvent] {
    use Phase::*;
    use TriggerEvent::*;
    match (from, to) {
        (None, Before) => &[],
        (None, Active) | (Some(Before), Active) => &[Enter],
        (None, After) | (Some(Before), After) => &[Enter, Leave],
        (Some(Active), After) => &[Leave],
        (Some(Active), Before) => &[LeaveBack],
        (Some(After), Active) => &[EnterBack],
        (Some(After), Before) => &[EnterBack, LeaveBack],
        _ => &[],
    }
}

pub type Effect<D> = Box<dyn FnMut(&D, TriggerEvent) -> SiteResult>;

struct Binding<D: Dom> {
    group: &'static str,
    spec: TriggerSpec<D::Node>,
    effect: Effect<D>,
    phase: Option<Phase>,
    progress: Option<f64>,
}

impl<D: Dom> Binding<D> {
    fn range(&self, dom: &D, scroll: f64, viewport_height: f64) -> (f64, f64) {
        let rect = dom.rect(&self.spec.trigger);
        let start = self
            .spec
            .start
            .scroll_at(rect.top + scroll, rect.height, viewport_height);
        let end = match self.spec.end {
            End::After(offset) => start + offset.resolve(viewport_height),
            End::At(marker) => {
                let rect = self
                    .spec
                    .end_trigger
                    .as_ref()
                    .map(|node| dom.rect(node))
                    .unwrap_or(rect);
                marker.scroll_at(rect.top + scroll, rect.height, viewport_height)
            }
        };
        (start, end)
    }

    /// Returns `true` when a `once` binding has fired and should be dropped.
    fn update(&mut self, dom: &D, scroll: f64, viewport_height: f64) -> bool {
        let (start, end) = self.range(dom, scroll, viewport_height);
        let phase = if scroll < start {
            Phase::Before
        } else if scroll > end {
            Phase::After
        } else {
            Phase::Active
        };
        let progress = if end > start {
            clamp01((scroll - start) / (end - start))
        } else if scroll >= start {
            1.0
        } else {
            0.0
        };

        let events = crossings(self.phase, phase);
        self.phase = Some(phase);
        let mut entered = false;
        for event in events {
            entered |= *event == TriggerEvent::Enter;
            self.emit(dom, *event);
        }

        let moved = match self.progress {
            Some(previous) => (previous - progress).abs() > f64::EPSILON,
            None => phase == Phase::Active || !events.is_empty(),
        };
        if moved {
            self.progress = Some(progress);
            self.emit(dom, TriggerEvent::Update(progress));
        }

        self.spec.once && entered
    }

    fn emit(&mut self, dom: &D, event: TriggerEvent) {
        if let Err(err) = (self.effect)(dom, event) {
            tracing::error!(group = self.group, ?event, %err, "trigger effect failed");
        }
    }
}

/// Every live scroll binding of the current view.
pub struct TriggerSet<D: Dom> {
    bindings: Vec<Binding<D>>,
}

impl<D: Dom> Default for TriggerSet<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Dom> TriggerSet<D> {
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Register a binding. It is evaluated on the next `update`.
    pub fn create(
        &mut self,
        group: &'static str,
        spec: TriggerSpec<D::Node>,
        effect: impl FnMut(&D, TriggerEvent) -> SiteResult + 'static,
    ) {
        self.bindings.push(Binding {
            group,
            spec,
            effect: Box::new(effect),
            phase: None,
            progress: None,
        });
    }

    pub fn kill_all(&mut self) {
        if !self.bindings.is_empty() {
            tracing::debug!(count = self.bindings.len(), "disposing scroll triggers");
        }
        self.bindings.clear();
    }

    pub fn kill_group(&mut self, group: &str) {
        self.bindings.retain(|binding| binding.group != group);
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn count(&self, group: &str) -> usize {
        self.bindings
            .iter()
            .filter(|binding| binding.group == group)
            .count()
    }

    /// Evaluate every binding against the current scroll position.
    pub fn update(&mut self, dom: &D) {
        let scroll = dom.scroll_y();
        let viewport_height = dom.viewport().height;
        let mut index = 0;
        while index < self.bindings.len() {
            if self.bindings[index].update(dom, scroll, viewport_height) {
                self.bindings.remove(index);
            } else {
                index += 1;
            }
        }
    }

    /// Forget cached positions and re-evaluate, as after a resize.
    pub fn refresh(&mut self, dom: &D) {
        for binding in &mut self.bindings {
            binding.progress = None;
        }
        self.update(dom);
    }
}

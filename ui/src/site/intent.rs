//! Interaction routing.
//!
//! Browser events arrive as [`Interaction`]s. Clicks are matched against
//! [`CLICK_ROUTES`], an ordered table from selector to [`ClickKind`]; every
//! matching route fires, mirroring independent document listeners. Page and
//! language clicks resolve to an [`Intent`] for the view controller.

use super::registry::PageKey;
use crate::i18n::Lang;

/// Suffix on `data-page` values that selects the German view.
const GERMAN_SUFFIX: &str = "-de";

#[derive(Debug, Clone, PartialEq)]
pub enum Interaction<N> {
    Click { target: N },
    Submit { form: N },
    Key { key: String },
    Scroll,
    Resize,
    Load,
    /// An embedded frame finished loading.
    FrameLoaded { frame: N },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    PageLink,
    LangToggle,
    AnchorLink,
    ExpandCard,
    BubbleItem,
    OverlayClose,
    /// Only when the click lands on the overlay itself, not its content.
    OverlayBackdrop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickRoute {
    pub selector: &'static str,
    pub kind: ClickKind,
    /// Match the target itself instead of its closest ancestor.
    pub exact: bool,
}

const fn route(selector: &'static str, kind: ClickKind) -> ClickRoute {
    ClickRoute {
        selector,
        kind,
        exact: false,
    }
}

pub const CLICK_ROUTES: &[ClickRoute] = &[
    route("[data-page]", ClickKind::PageLink),
    route(".lang-btn", ClickKind::LangToggle),
    route(r##"a[href^="#"]"##, ClickKind::AnchorLink),
    route(".expand-card", ClickKind::ExpandCard),
    route(".bubble-item", ClickKind::BubbleItem),
    route("#closeOverlay", ClickKind::OverlayClose),
    ClickRoute {
        selector: "#bubbleOverlay",
        kind: ClickKind::OverlayBackdrop,
        exact: true,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// `lang: None` keeps the current language.
    Navigate { page: PageKey, lang: Option<Lang> },
    SwitchLanguage(Lang),
}

impl Intent {
    /// Resolve a `data-page` value: `"booking"` or `"booking-de"`.
    pub fn from_page_attr(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (base, lang) = match raw.strip_suffix(GERMAN_SUFFIX) {
            Some(base) => (base, Some(Lang::De)),
            None => (raw, None),
        };
        let page = base.parse::<PageKey>().ok()?;
        Some(Self::Navigate { page, lang })
    }

    /// Resolve a `data-lang` value.
    pub fn from_lang_attr(raw: &str) -> Option<Self> {
        Lang::from_code(raw).map(Self::SwitchLanguage)
    }
}

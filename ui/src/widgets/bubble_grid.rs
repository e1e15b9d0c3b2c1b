//! Accompanying services grid: each bubble opens a shared overlay with the
//! details of its category.

use std::fmt;
use std::str::FromStr;

use crate::core::error::SiteResult;
use crate::dom::Dom;
use crate::i18n::{self, Lang};

pub const OVERLAY_ID: &str = "bubbleOverlay";
pub const CLOSE_ID: &str = "closeOverlay";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Vocal,
    Instrumental,
    Auditions,
    Recitals,
    Chamber,
    Recording,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Vocal,
        Category::Instrumental,
        Category::Auditions,
        Category::Recitals,
        Category::Chamber,
        Category::Recording,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Category::Vocal => "vocal",
            Category::Instrumental => "instrumental",
            Category::Auditions => "auditions",
            Category::Recitals => "recitals",
            Category::Chamber => "chamber",
            Category::Recording => "recording",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Category::Vocal => "🎤",
            Category::Instrumental => "🎻",
            Category::Auditions => "🎭",
            Category::Recitals => "🎹",
            Category::Chamber => "🎼",
            Category::Recording => "🎙️",
        }
    }

    pub fn title_key(self) -> String {
        format!("bubble-{}-title", self.slug())
    }

    pub fn description_key(self) -> String {
        format!("bubble-{}-description", self.slug())
    }

    pub fn title(self, lang: Lang) -> String {
        i18n::text(lang, &self.title_key())
    }

    pub fn description(self, lang: Lang) -> String {
        i18n::text(lang, &self.description_key())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.slug() == raw.trim())
            .ok_or(())
    }
}

pub fn is_open<D: Dom>(dom: &D) -> bool {
    dom.by_id(OVERLAY_ID)
        .is_some_and(|overlay| dom.has_class(&overlay, "active"))
}

/// Show the overlay for the bubble `item`. Returns `false` when the item
/// names no known category or the overlay is missing.
pub fn open<D: Dom>(dom: &D, item: &D::Node, lang: Lang) -> SiteResult<bool> {
    let Some(category) = dom
        .attr(item, "data-category")
        .and_then(|raw| raw.parse::<Category>().ok())
    else {
        return Ok(false);
    };
    let Some(overlay) = dom.by_id(OVERLAY_ID) else {
        return Ok(false);
    };

    for (selector, text) in [
        (".overlay-icon", category.icon().to_string()),
        (".overlay-title", category.title(lang)),
        (".overlay-description", category.description(lang)),
    ] {
        if let Some(slot) = dom.query_in(&overlay, selector) {
            dom.set_text(&slot, &text)?;
        }
    }
    dom.add_class(&overlay, "active")?;
    if let Some(body) = dom.body() {
        dom.set_style(&body, "overflow", "hidden")?;
    }
    tracing::debug!(category = category.slug(), "bubble overlay opened");
    Ok(true)
}

/// Hide the overlay and give scrolling back to the page.
pub fn close<D: Dom>(dom: &D) -> SiteResult {
    if let Some(overlay) = dom.by_id(OVERLAY_ID) {
        dom.remove_class(&overlay, "active")?;
        if let Some(body) = dom.body() {
            dom.clear_style(&body, "overflow")?;
        }
    }
    Ok(())
}

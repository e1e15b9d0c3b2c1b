//! Page registry: which element renders each (page, language) view.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::i18n::Lang;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKey {
    Home,
    Test,
    Testimonials,
    Booking,
    Biography,
}

impl PageKey {
    pub const ALL: [PageKey; 5] = [
        PageKey::Home,
        PageKey::Test,
        PageKey::Testimonials,
        PageKey::Booking,
        PageKey::Biography,
    ];

    /// Value used in `data-page` attributes.
    pub fn as_str(self) -> &'static str {
        match self {
            PageKey::Home => "home",
            PageKey::Test => "test",
            PageKey::Testimonials => "testimonials",
            PageKey::Booking => "booking",
            PageKey::Biography => "biography",
        }
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPage(pub String);

impl FromStr for PageKey {
    type Err = UnknownPage;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|page| page.as_str() == raw)
            .ok_or_else(|| UnknownPage(raw.to_string()))
    }
}

/// `{ page → { lang → view element id } }`. A missing entry is an invalid
/// navigation target.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageRegistry {
    views: BTreeMap<PageKey, BTreeMap<Lang, String>>,
}

impl PageRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with(mut self, page: PageKey, lang: Lang, view_id: impl Into<String>) -> Self {
        self.views
            .entry(page)
            .or_default()
            .insert(lang, view_id.into());
        self
    }

    pub fn view_id(&self, page: PageKey, lang: Lang) -> Option<&str> {
        self.views.get(&page)?.get(&lang).map(String::as_str)
    }

    pub fn contains(&self, page: PageKey, lang: Lang) -> bool {
        self.view_id(page, lang).is_some()
    }

    /// Distinct view ids with the first (page, lang) pair that maps to each.
    pub fn views(&self) -> Vec<(PageKey, Lang, &str)> {
        let mut seen = Vec::<&str>::new();
        let mut out = Vec::new();
        for (page, langs) in &self.views {
            for (lang, id) in langs {
                if !seen.contains(&id.as_str()) {
                    seen.push(id);
                    out.push((*page, *lang, id.as_str()));
                }
            }
        }
        out
    }
}

/// The site's pages. The accompanying (test) page has a single view shared by
/// both languages.
pub fn site_registry() -> PageRegistry {
    PageRegistry::empty()
        .with(PageKey::Home, Lang::En, "home-page")
        .with(PageKey::Home, Lang::De, "home-de-page")
        .with(PageKey::Test, Lang::En, "test-page")
        .with(PageKey::Test, Lang::De, "test-page")
        .with(PageKey::Testimonials, Lang::En, "testimonials-page")
        .with(PageKey::Testimonials, Lang::De, "testimonials-de-page")
        .with(PageKey::Booking, Lang::En, "booking-page")
        .with(PageKey::Booking, Lang::De, "booking-de-page")
        .with(PageKey::Biography, Lang::En, "biography-page")
        .with(PageKey::Biography, Lang::De, "biography-de-page")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_registry_covers_every_page_in_both_languages() {
        let registry = site_registry();
        for page in PageKey::ALL {
            for lang in Lang::ALL {
                assert!(registry.contains(page, lang), "{page}/{lang}");
            }
        }
        assert_eq!(registry.view_id(PageKey::Home, Lang::De), Some("home-de-page"));
    }

    #[test]
    fn shared_views_are_listed_once() {
        let registry = site_registry();
        let views = registry.views();
        assert_eq!(views.len(), 9);
        assert_eq!(views.iter().filter(|(_, _, id)| *id == "test-page").count(), 1);
    }

    #[test]
    fn partial_registry_has_holes() {
        let registry = PageRegistry::empty().with(PageKey::Home, Lang::En, "home-page");
        assert!(!registry.contains(PageKey::Home, Lang::De));
        assert!(!registry.contains(PageKey::Booking, Lang::En));
    }

    #[test]
    fn page_keys_parse_from_attributes() {
        assert_eq!("booking".parse::<PageKey>(), Ok(PageKey::Booking));
        assert!("contact".parse::<PageKey>().is_err());
    }
}

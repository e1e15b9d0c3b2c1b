//! Staggered entrance of the active view's text sections and glass cards.
//!
//! [`prepare`] resets everything to its hidden state and returns the
//! reveals to schedule; the caller runs [`reveal`] for each one after its
//! delay.

use super::num;
use crate::core::config::SiteConfig;
use crate::core::error::SiteResult;
use crate::dom::Dom;

pub const TEXT_SELECTOR: &str = ".text-section";
pub const CARD_SELECTOR: &str = ".glass-card:not(.text-section)";

const CARD_TRANSITION: &str = "opacity 0.8s ease, transform 0.8s ease";
const CARD_OFFSET_PX: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reveal {
    Text(usize),
    Card(usize),
}

/// Hide the entrance targets in `page` and list their reveals with delays
/// in milliseconds.
pub fn prepare<D: Dom>(dom: &D, page: &D::Node, config: &SiteConfig) -> SiteResult<Vec<(u32, Reveal)>> {
    let mut reveals = Vec::new();
    for (index, section) in dom.query_all_in(page, TEXT_SELECTOR).iter().enumerate() {
        dom.remove_class(section, "is-visible")?;
        reveals.push((config.text_reveal_delay(index), Reveal::Text(index)));
    }
    for (index, card) in dom.query_all_in(page, CARD_SELECTOR).iter().enumerate() {
        if dom.style(card, "transition").is_none() {
            dom.set_style(card, "transition", CARD_TRANSITION)?;
        }
        dom.set_style(card, "opacity", "0")?;
        dom.set_style(card, "transform", &format!("translateY({}px)", num(CARD_OFFSET_PX)))?;
        reveals.push((config.card_reveal_delay(index), Reveal::Card(index)));
    }
    Ok(reveals)
}

/// Run one reveal. Targets are looked up again so a re-rendered view is
/// handled; a target that no longer exists is skipped.
pub fn reveal<D: Dom>(dom: &D, page: &D::Node, reveal: Reveal) -> SiteResult {
    match reveal {
        Reveal::Text(index) => {
            if let Some(section) = dom.query_all_in(page, TEXT_SELECTOR).get(index) {
                dom.add_class(section, "is-visible")?;
            }
        }
        Reveal::Card(index) => {
            if let Some(card) = dom.query_all_in(page, CARD_SELECTOR).get(index) {
                dom.set_style(card, "opacity", "1")?;
                dom.set_style(card, "transform", "translateY(0)")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;

    fn page(dom: &MemoryDom) -> crate::dom::MemoryNode {
        let page = dom.el(dom.body_node(), "div").class("page active").node();
        dom.el(page, "div").class("glass-card text-section is-visible");
        dom.el(page, "div").class("glass-card text-section");
        dom.el(page, "div").class("glass-card");
        dom.el(page, "div").class("glass-card");
        page
    }

    #[test]
    fn text_sections_and_cards_get_separate_schedules() {
        let dom = MemoryDom::new();
        let page = page(&dom);
        let reveals = prepare(&dom, &page, &SiteConfig::default()).unwrap();
        assert_eq!(
            reveals,
            vec![
                (600, Reveal::Text(0)),
                (800, Reveal::Text(1)),
                (1400, Reveal::Card(0)),
                (1500, Reveal::Card(1)),
            ]
        );
        assert!(dom.query_all_in(&page, ".is-visible").is_empty());
    }

    #[test]
    fn cards_keep_an_existing_transition() {
        let dom = MemoryDom::new();
        let page = page(&dom);
        let card = dom.query_all_in(&page, CARD_SELECTOR)[0];
        dom.set_style(&card, "transition", "none").unwrap();
        prepare(&dom, &page, &SiteConfig::default()).unwrap();
        assert_eq!(dom.style(&card, "transition").as_deref(), Some("none"));
        assert_eq!(dom.style(&card, "transform").as_deref(), Some("translateY(30px)"));
    }

    #[test]
    fn reveal_targets_by_index() {
        let dom = MemoryDom::new();
        let page = page(&dom);
        prepare(&dom, &page, &SiteConfig::default()).unwrap();
        reveal(&dom, &page, Reveal::Text(1)).unwrap();
        reveal(&dom, &page, Reveal::Card(0)).unwrap();
        reveal(&dom, &page, Reveal::Card(9)).unwrap();

        let sections = dom.query_all_in(&page, TEXT_SELECTOR);
        assert!(!dom.has_class(&sections[0], "is-visible"));
        assert!(dom.has_class(&sections[1], "is-visible"));
        let card = dom.query_all_in(&page, CARD_SELECTOR)[0];
        assert_eq!(dom.style(&card, "opacity").as_deref(), Some("1"));
    }
}

//! Blur band that hides the hand-off between the hero and the photo
//! sequence. It is shown only between the end of the hero and the moment
//! the photos reach the top of the viewport, and follows whichever edge is
//! leading.

use super::triggers::{TriggerEvent, TriggerSet, TriggerSpec};
use crate::core::error::SiteResult;
use crate::dom::Dom;

pub const GROUP: &str = "seam";

const Y_OFFSET: f64 = -45.0;
/// Band height, as a share of the viewport, while the overlay has no layout.
const FALLBACK_BAND: f64 = 0.32;

/// Viewport-relative `top` of the band.
pub fn band_top(hero_bottom: f64, photos_top: f64, band_h: f64, viewport_h: f64) -> f64 {
    let centre_on = if photos_top <= 0.0 {
        0.0
    } else if photos_top < viewport_h && hero_bottom >= photos_top {
        photos_top
    } else {
        hero_bottom
    };
    centre_on - band_h / 2.0 + Y_OFFSET
}

fn place<D: Dom>(dom: &D, band: &D::Node, hero: &D::Node, photos: &D::Node) -> SiteResult {
    let viewport_h = dom.viewport().height;
    let band_h = match dom.rect(band).height {
        h if h > 0.0 => h,
        _ => viewport_h * FALLBACK_BAND,
    };
    let top = band_top(dom.rect(hero).bottom(), dom.rect(photos).top, band_h, viewport_h);
    dom.set_style(band, "top", &format!("{}px", top.round()))
}

/// Arm the seam band for `page`. The overlay itself lives outside the views.
pub fn arm<D: Dom>(dom: &D, page: &D::Node, triggers: &mut TriggerSet<D>) -> SiteResult<bool> {
    let band = dom.query(".apple-blur-overlay");
    let wrap = dom.query_in(page, ".scene");
    let photos = dom.query_in(page, ".photo-sequence-scene");
    let (Some(band), Some(wrap), Some(photos)) = (band, wrap, photos) else {
        return Ok(false);
    };
    let hero = dom.query_in(&wrap, ".hero").unwrap_or_else(|| wrap.clone());

    triggers.kill_group(GROUP);
    for (prop, value) in [
        ("position", "fixed"),
        ("left", "0"),
        ("right", "0"),
        ("z-index", "50"),
        ("pointer-events", "none"),
    ] {
        dom.set_style(&band, prop, value)?;
    }
    dom.clear_style(&band, "bottom")?;
    place(dom, &band, &hero, &photos)?;

    let spec = TriggerSpec::new(wrap, "bottom 55%", "top top")?.end_trigger(photos.clone());
    triggers.create(GROUP, spec, move |dom: &D, event| match event {
        TriggerEvent::Enter | TriggerEvent::EnterBack => {
            dom.add_class(&band, "show")?;
            place(dom, &band, &hero, &photos)
        }
        TriggerEvent::Update(_) => place(dom, &band, &hero, &photos),
        TriggerEvent::Leave | TriggerEvent::LeaveBack => dom.remove_class(&band, "show"),
    });
    Ok(true)
}

/// Hide the band. It lives outside the views, so a view change has to
/// clear it even when its binding is killed mid-hand-off.
pub fn dismiss<D: Dom>(dom: &D) -> SiteResult {
    match dom.query(".apple-blur-overlay") {
        Some(band) => dom.remove_class(&band, "show"),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{MemoryDom, Rect, Viewport};

    #[test]
    fn follows_hero_while_photos_are_far() {
        assert_eq!(band_top(500.0, 1200.0, 200.0, 800.0), 500.0 - 100.0 - 45.0);
    }

    #[test]
    fn follows_photos_once_they_lead() {
        assert_eq!(band_top(700.0, 600.0, 200.0, 800.0), 600.0 - 100.0 - 45.0);
        // hero edge still above photos: stay on the hero
        assert_eq!(band_top(300.0, 600.0, 200.0, 800.0), 300.0 - 100.0 - 45.0);
    }

    #[test]
    fn pins_to_viewport_top_after_hand_off() {
        assert_eq!(band_top(-50.0, -10.0, 200.0, 800.0), -145.0);
    }

    #[test]
    fn shows_only_inside_the_hand_off() {
        let dom = MemoryDom::new();
        dom.set_viewport(Viewport {
            width: 1280.0,
            height: 1000.0,
        });
        let body = dom.body_node();
        let band = dom.el(body, "div").class("apple-blur-overlay").node();
        let page = dom.el(body, "div").class("page active").node();
        let wrap = dom
            .el(page, "section")
            .class("scene")
            .rect(Rect::new(0.0, 0.0, 1280.0, 3000.0))
            .node();
        dom.el(wrap, "div")
            .class("hero")
            .rect(Rect::new(0.0, 0.0, 1280.0, 3000.0));
        dom.el(page, "section")
            .class("photo-sequence-scene")
            .rect(Rect::new(0.0, 3000.0, 1280.0, 2000.0));

        let mut triggers = TriggerSet::new();
        assert!(arm(&dom, &page, &mut triggers).unwrap());
        assert_eq!(dom.style(&band, "position").as_deref(), Some("fixed"));

        // start: 3000 - 550 = 2450, end: 3000
        dom.scroll_to(2600.0);
        triggers.update(&dom);
        assert!(dom.has_class(&band, "show"));
        // band height falls back to 320
        assert_eq!(dom.style(&band, "top").as_deref(), Some("195px"));

        dom.scroll_to(3200.0);
        triggers.update(&dom);
        assert!(!dom.has_class(&band, "show"));
    }

    #[test]
    fn dismiss_hides_a_shown_band() {
        let dom = MemoryDom::new();
        let band = dom
            .el(dom.body_node(), "div")
            .class("apple-blur-overlay show")
            .node();
        dismiss(&dom).unwrap();
        assert!(!dom.has_class(&band, "show"));
        // Nothing to hide is fine too.
        assert!(dismiss(&MemoryDom::new()).is_ok());
    }

    #[test]
    fn missing_overlay_skips_arming() {
        let dom = MemoryDom::new();
        let page = dom.el(dom.body_node(), "div").class("page active").node();
        let mut triggers = TriggerSet::new();
        assert!(!arm(&dom, &page, &mut triggers).unwrap());
        assert!(triggers.is_empty());
    }
}

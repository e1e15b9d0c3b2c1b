//! A [`MemoryDom`] laid out like the rendered site, for tests.
//!
//! Every (page, language) view exists with the elements the controller and
//! widgets look for. Only the English and German home views carry
//! geometry; everything else sits at the origin.

use super::{MemoryDom, MemoryNode, Rect};
use crate::i18n::Lang;

pub const HERO_HEIGHT: f64 = 2400.0;
pub const PHOTOS_TOP: f64 = 2400.0;
pub const PHOTO_HEIGHT: f64 = 1200.0;

const NAV: [&str; 5] = ["home", "biography", "testimonials", "booking", "test"];
const CATEGORIES: [&str; 6] = [
    "vocal",
    "instrumental",
    "auditions",
    "recitals",
    "chamber",
    "recording",
];

fn suffix(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "",
        Lang::De => "-de",
    }
}

/// Build the whole document.
pub fn site_document() -> MemoryDom {
    let dom = MemoryDom::new();
    let head = dom.head_node();
    dom.el(head, "meta")
        .attr("name", "description")
        .attr("content", "");

    let body = dom.body_node();
    let nav = dom.el(body, "nav").class("navbar").node();
    for page in NAV {
        dom.el(nav, "a")
            .class("nav-link")
            .attr("href", "#")
            .attr("data-page", page)
            .text(page);
    }
    for lang in Lang::ALL {
        dom.el(nav, "button")
            .class("lang-btn")
            .attr("data-lang", lang.code())
            .text(lang.code());
    }
    dom.el(body, "div").class("apple-blur-overlay");

    let main = dom.el(body, "main").node();
    home(&dom, main, "home-page", Lang::En);
    home(&dom, main, "home-de-page", Lang::De);
    biography(&dom, main, "biography-page");
    biography(&dom, main, "biography-de-page");
    testimonials(&dom, main, "testimonials-page");
    testimonials(&dom, main, "testimonials-de-page");
    booking(&dom, main, "booking-page", Lang::En);
    booking(&dom, main, "booking-de-page", Lang::De);
    accompanying(&dom, main);

    footer(&dom, body);
    dom.el(body, "div").id("expand-dim").class("expand-dim");
    let overlay = dom.el(body, "div").id("bubbleOverlay").class("bubble-overlay").node();
    let panel = dom.el(overlay, "div").class("overlay-content").node();
    dom.el(panel, "button").id("closeOverlay").text("×");
    dom.el(panel, "span").class("overlay-icon");
    dom.el(panel, "h3").class("overlay-title");
    dom.el(panel, "p").class("overlay-description");
    dom
}

fn view(dom: &MemoryDom, parent: MemoryNode, id: &str) -> MemoryNode {
    dom.el(parent, "div").id(id).class("page").node()
}

fn text_sections(dom: &MemoryDom, page: MemoryNode, count: usize) {
    for _ in 0..count {
        dom.el(page, "section").class("glass-card text-section");
    }
}

fn home(dom: &MemoryDom, main: MemoryNode, id: &str, lang: Lang) {
    let page = view(dom, main, id);
    let scene = dom
        .el(page, "section")
        .class("scene")
        .rect(Rect::new(0.0, 0.0, 1280.0, HERO_HEIGHT))
        .node();
    let hero = dom
        .el(scene, "div")
        .class("hero")
        .rect(Rect::new(0.0, 0.0, 1280.0, HERO_HEIGHT))
        .node();
    let backdrop = dom.el(hero, "div").class("hero__bg").node();
    dom.el(backdrop, "img").attr("src", "assets/hero.jpg");
    dom.el(hero, "div").class("bubble");

    let photos = dom
        .el(page, "section")
        .class("photo-sequence-scene")
        .rect(Rect::new(0.0, PHOTOS_TOP, 1280.0, PHOTO_HEIGHT * 3.0))
        .node();
    dom.el(photos, "div").class("photo-sequence-blur-edge top");
    dom.el(photos, "div").class("photo-sequence-blur-edge bottom");
    for n in 1..=3u8 {
        let top = PHOTOS_TOP + PHOTO_HEIGHT * f64::from(n - 1);
        let photo = dom
            .el(photos, "div")
            .id(&format!("photo{n}{}", suffix(lang)))
            .class("photo-sequence-item")
            .rect(Rect::new(0.0, top, 1280.0, PHOTO_HEIGHT))
            .node();
        if n < 3 {
            dom.el(photo, "img").class("photo-sequence-img-small");
            dom.el(photo, "div").class("photo-sequence-text");
        } else {
            dom.el(photo, "img").class("photo-sequence-img");
            dom.el(photo, "div").class("photo-sequence-text-center");
        }
    }
    text_sections(dom, page, 2);
    dom.el(page, "div").class("glass-card");
}

fn biography(dom: &MemoryDom, main: MemoryNode, id: &str) {
    let page = view(dom, main, id);
    text_sections(dom, page, 3);
}

fn testimonials(dom: &MemoryDom, main: MemoryNode, id: &str) {
    let page = view(dom, main, id);
    let grid = dom.el(page, "div").class("testimonial-grid").node();
    for _ in 0..3 {
        dom.el(grid, "figure")
            .class("glass-card testimonial-card")
            .rect(Rect::new(0.0, 200.0, 400.0, 300.0));
    }
}

fn booking(dom: &MemoryDom, main: MemoryNode, id: &str, lang: Lang) {
    let page = view(dom, main, id);
    let s = suffix(lang);
    let form = dom
        .el(page, "form")
        .id(&format!("booking-form{s}"))
        .class("booking-form")
        .node();
    for field in ["fullName", "email"] {
        dom.el(form, "input").id(&format!("{field}{s}"));
        dom.el(form, "span")
            .id(&format!("{field}{s}-error"))
            .class("error-message");
    }
    dom.el(form, "select").id(&format!("experience{s}"));
    dom.el(form, "span")
        .id(&format!("experience{s}-error"))
        .class("error-message");
    dom.el(form, "textarea").id(&format!("message{s}"));
    dom.el(page, "iframe").class("cal-embed");
}

fn accompanying(dom: &MemoryDom, main: MemoryNode) {
    let page = view(dom, main, "test-page");
    let grid = dom.el(page, "div").class("bubble-grid").node();
    for category in CATEGORIES {
        let item = dom
            .el(grid, "div")
            .class("bubble-item")
            .attr("data-category", category)
            .node();
        dom.el(item, "span").class("bubble-label").text(category);
    }
    for (title, left) in [("Rehearsal", 40.0), ("Concert", 480.0)] {
        let card = dom
            .el(page, "div")
            .class("expand-card glass-card")
            .attr("data-title", title)
            .rect(Rect::new(left, 300.0, 400.0, 240.0))
            .node();
        dom.el(card, "h3").text(title);
    }
    dom.el(page, "a").attr("href", "#contact").text("contact");
}

fn footer(dom: &MemoryDom, body: MemoryNode) {
    let footer = dom
        .el(body, "footer")
        .id("contact")
        .class("footer")
        .rect(Rect::new(0.0, 6000.0, 1280.0, 300.0))
        .node();
    for id in [
        "footer-contact-title",
        "footer-social-title",
        "footer-language-label",
        "current-language",
        "footer-rights",
    ] {
        dom.el(footer, "span").id(id);
    }
}

use dioxus::prelude::*;

use super::view_id;
use crate::i18n::Lang;
use crate::site::PageKey;
use crate::t;
use crate::widgets::bubble_grid::Category;

/// The accompanying page has one view shared by both languages; its copy is
/// English and the bubble overlay localizes itself on open.
#[component]
pub fn AccompanyingView() -> Element {
    let lang = Lang::En;
    let id = view_id(PageKey::Test, lang);
    let cards = [
        t!(lang, "test-card-rehearsal"),
        t!(lang, "test-card-concert"),
        t!(lang, "test-card-exam"),
    ];

    rsx! {
        div { id: "{id}", class: "page page-test",
            header { class: "page__header",
                h1 { {t!(lang, "test-title")} }
                p { class: "page__lead", {t!(lang, "test-intro")} }
            }
            div { class: "bubble-grid",
                for category in Category::ALL {
                    div {
                        key: "{category}",
                        class: "bubble-item",
                        "data-category": "{category}",
                        span { class: "bubble-icon", {category.icon()} }
                        span { class: "bubble-label", {category.title(lang)} }
                    }
                }
            }
            section { class: "expand-section",
                h2 { {t!(lang, "test-cards-title")} }
                div { class: "expand-grid",
                    for title in cards {
                        div {
                            key: "{title}",
                            class: "expand-card glass-card",
                            "data-title": "{title}",
                            h3 { "{title}" }
                        }
                    }
                }
                a { class: "button button--ghost", href: "#contact",
                    {t!(lang, "footer-contact-title")}
                }
            }
        }
    }
}

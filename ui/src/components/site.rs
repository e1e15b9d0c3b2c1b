use dioxus::prelude::*;

use super::{SiteFooter, SiteNavbar};
use crate::i18n::Lang;
use crate::t;
use crate::views::{AccompanyingView, BiographyView, BookingView, HomeView, TestimonialsView};
use crate::widgets::bubble_grid::{CLOSE_ID, OVERLAY_ID};
use crate::widgets::expand_card::DIM_ID;

const SITE_CSS: Asset = asset!("/assets/theme/main.css");
const SITE_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/theme/main.css"
));

/// Root component: every view rendered once, chrome around them. In the
/// browser it also starts the site runtime, which takes over the document.
#[component]
pub fn Site() -> Element {
    #[cfg(target_arch = "wasm32")]
    crate::site::runtime::use_site_runtime();

    let lang = Lang::En;
    let title = t!(lang, "page-title");

    rsx! {
        document::Title { "{title}" }
        document::Meta { name: "description", content: t!(lang, "page-description") }
        document::Link { rel: "stylesheet", href: SITE_CSS }
        if cfg!(all(not(debug_assertions), not(target_arch = "wasm32"))) {
            document::Style { "{SITE_CSS_INLINE}" }
        }

        SiteNavbar {}
        div { class: "apple-blur-overlay" }
        main { class: "site-main",
            for lang in Lang::ALL {
                HomeView { key: "home-{lang}", lang }
            }
            for lang in Lang::ALL {
                BiographyView { key: "biography-{lang}", lang }
            }
            for lang in Lang::ALL {
                TestimonialsView { key: "testimonials-{lang}", lang }
            }
            for lang in Lang::ALL {
                BookingView { key: "booking-{lang}", lang }
            }
            AccompanyingView {}
        }
        SiteFooter {}

        div { id: DIM_ID, class: "expand-dim" }
        div { id: OVERLAY_ID, class: "bubble-overlay",
            div { class: "overlay-content",
                button {
                    id: CLOSE_ID,
                    class: "overlay-close",
                    r#type: "button",
                    aria_label: t!(lang, "overlay-close-label"),
                    "×"
                }
                span { class: "overlay-icon" }
                h3 { class: "overlay-title" }
                p { class: "overlay-description" }
            }
        }
    }
}

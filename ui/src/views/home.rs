use dioxus::prelude::*;

use super::{page_link, view_id};
use crate::i18n::Lang;
use crate::site::PageKey;
use crate::t;

const HERO_IMAGE: &str = "/images/hero.jpg";
const PHOTO_IMAGES: [&str; 3] = [
    "/images/lesson-hands.jpg",
    "/images/lesson-score.jpg",
    "/images/studio-concert.jpg",
];

fn suffix(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "",
        Lang::De => "-de",
    }
}

/// Hero scene, three-photo sequence and the intro cards.
#[component]
pub fn HomeView(lang: Lang) -> Element {
    let id = view_id(PageKey::Home, lang);
    let booking = page_link(PageKey::Booking, lang);
    let suffix = suffix(lang);
    let sides = [
        (
            format!("photo1{suffix}"),
            PHOTO_IMAGES[0],
            t!(lang, "home-photo1-title"),
            t!(lang, "home-photo1-text"),
        ),
        (
            format!("photo2{suffix}"),
            PHOTO_IMAGES[1],
            t!(lang, "home-photo2-title"),
            t!(lang, "home-photo2-text"),
        ),
    ];
    let center_id = format!("photo3{suffix}");

    rsx! {
        div { id: "{id}", class: "page page-home",
            section { class: "scene",
                div { class: "hero",
                    div { class: "hero__bg",
                        img { src: HERO_IMAGE, alt: "" }
                    }
                    div { class: "hero__content",
                        h1 { {t!(lang, "home-hero-title")} }
                        p { {t!(lang, "home-hero-subtitle")} }
                    }
                    div { class: "bubble",
                        p { {t!(lang, "home-bubble-text")} }
                    }
                }
            }

            section { class: "photo-sequence-scene",
                div { class: "photo-sequence-blur-edge top" }
                div { class: "photo-sequence-blur-edge bottom" }
                for (photo_id, image, title, text) in sides {
                    div { key: "{photo_id}", id: "{photo_id}", class: "photo-sequence-item",
                        img { class: "photo-sequence-img-small", src: image, alt: "" }
                        div { class: "photo-sequence-text",
                            h2 { "{title}" }
                            p { "{text}" }
                        }
                    }
                }
                div { id: "{center_id}", class: "photo-sequence-item photo-sequence-item--center",
                    img { class: "photo-sequence-img", src: PHOTO_IMAGES[2], alt: "" }
                    div { class: "photo-sequence-text-center",
                        h2 { {t!(lang, "home-photo3-title")} }
                        p { {t!(lang, "home-photo3-text")} }
                    }
                }
            }

            section { class: "glass-card text-section",
                h2 { {t!(lang, "home-intro-title")} }
                p { {t!(lang, "home-intro-text")} }
            }
            section { class: "glass-card text-section",
                h2 { {t!(lang, "home-approach-title")} }
                p { {t!(lang, "home-approach-text")} }
            }
            div { class: "glass-card home-cta",
                a {
                    class: "button button--primary",
                    href: "#",
                    "data-page": "{booking}",
                    {t!(lang, "home-cta")}
                }
            }
        }
    }
}

use dioxus::prelude::*;

use super::view_id;
use crate::i18n::Lang;
use crate::site::PageKey;
use crate::t;

#[component]
pub fn TestimonialsView(lang: Lang) -> Element {
    let id = view_id(PageKey::Testimonials, lang);
    let quotes = [
        (t!(lang, "testimonial-1-quote"), t!(lang, "testimonial-1-author")),
        (t!(lang, "testimonial-2-quote"), t!(lang, "testimonial-2-author")),
        (t!(lang, "testimonial-3-quote"), t!(lang, "testimonial-3-author")),
    ];

    rsx! {
        div { id: "{id}", class: "page page-testimonials",
            header { class: "page__header",
                h1 { {t!(lang, "testimonials-title")} }
            }
            div { class: "testimonial-grid",
                for (index, (quote, author)) in quotes.into_iter().enumerate() {
                    figure { key: "{index}", class: "glass-card testimonial-card",
                        blockquote { "{quote}" }
                        figcaption { "{author}" }
                    }
                }
            }
        }
    }
}

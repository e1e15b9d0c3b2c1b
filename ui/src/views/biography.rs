use dioxus::prelude::*;

use super::view_id;
use crate::i18n::Lang;
use crate::site::PageKey;
use crate::t;

#[component]
pub fn BiographyView(lang: Lang) -> Element {
    let id = view_id(PageKey::Biography, lang);

    rsx! {
        div { id: "{id}", class: "page page-biography",
            header { class: "page__header",
                h1 { {t!(lang, "bio-title")} }
                p { class: "page__lead", {t!(lang, "bio-intro")} }
            }
            section { class: "glass-card text-section",
                h2 { {t!(lang, "bio-education-title")} }
                p { {t!(lang, "bio-education-text")} }
            }
            section { class: "glass-card text-section",
                h2 { {t!(lang, "bio-teaching-title")} }
                p { {t!(lang, "bio-teaching-text")} }
            }
            section { class: "glass-card text-section",
                h2 { {t!(lang, "bio-stage-title")} }
                p { {t!(lang, "bio-stage-text")} }
            }
        }
    }
}

use dioxus::prelude::*;

use crate::i18n::Lang;
use crate::site::PageKey;
use crate::t;

/// Navigation order, left to right.
const NAV_ORDER: [PageKey; 5] = [
    PageKey::Home,
    PageKey::Biography,
    PageKey::Testimonials,
    PageKey::Booking,
    PageKey::Test,
];

/// Page links and the language toggle. Links carry no language; the view
/// controller keeps the current one and marks the active link itself.
#[component]
pub fn SiteNavbar() -> Element {
    let lang = Lang::En;
    let label = |page: PageKey| match page {
        PageKey::Home => t!(lang, "nav-home"),
        PageKey::Biography => t!(lang, "nav-biography"),
        PageKey::Testimonials => t!(lang, "nav-testimonials"),
        PageKey::Booking => t!(lang, "nav-booking"),
        PageKey::Test => t!(lang, "nav-test"),
    };
    let toggle = |lang: Lang| match lang {
        Lang::En => t!(lang, "lang-toggle-en"),
        Lang::De => t!(lang, "lang-toggle-de"),
    };

    rsx! {
        header { id: "navbar", class: "navbar",
            div { class: "navbar__inner",
                a {
                    class: "navbar__brand",
                    href: "#",
                    "data-page": PageKey::Home.as_str(),
                    {t!(lang, "nav-brand")}
                }
                nav { class: "navbar__links",
                    for page in NAV_ORDER {
                        a {
                            key: "{page}",
                            class: if page == PageKey::Home { "nav-link active" } else { "nav-link" },
                            href: "#",
                            "data-page": page.as_str(),
                            {label(page)}
                        }
                    }
                }
                div { class: "navbar__locale",
                    for code in Lang::ALL {
                        button {
                            key: "{code}",
                            class: if code == Lang::En { "lang-btn active" } else { "lang-btn" },
                            r#type: "button",
                            "data-lang": code.code(),
                            aria_pressed: if code == Lang::En { "true" } else { "false" },
                            {toggle(code)}
                        }
                    }
                }
            }
        }
    }
}

use dioxus::prelude::*;

use crate::i18n::Lang;
use crate::t;

const CONTACT_EMAIL: &str = "lessons@martinpulz.com";
const INSTAGRAM: &str = "https://www.instagram.com/martinpulz";

/// Footer chrome. The spans with ids are rewritten on every page
/// transition for the active language.
#[component]
pub fn SiteFooter() -> Element {
    let lang = Lang::En;

    rsx! {
        footer { id: "contact", class: "footer",
            div { class: "footer__grid",
                div { class: "footer__column",
                    h3 { id: "footer-contact-title", {t!(lang, "footer-contact-title")} }
                    a { href: "mailto:{CONTACT_EMAIL}", "{CONTACT_EMAIL}" }
                }
                div { class: "footer__column",
                    h3 { id: "footer-social-title", {t!(lang, "footer-social-title")} }
                    a { href: INSTAGRAM, rel: "noopener", target: "_blank", "Instagram" }
                }
                div { class: "footer__column",
                    span { id: "footer-language-label", {t!(lang, "footer-language-label")} }
                    " "
                    span { id: "current-language", {t!(lang, "current-language")} }
                }
            }
            p { class: "footer__rights",
                "© Martin Pulz. "
                span { id: "footer-rights", {t!(lang, "footer-rights")} }
            }
        }
    }
}

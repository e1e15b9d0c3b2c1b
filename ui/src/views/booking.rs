use dioxus::prelude::*;

use super::view_id;
use crate::i18n::Lang;
use crate::site::PageKey;
use crate::t;
use crate::widgets::booking_form::{Field, FORMS};

const CALENDAR_EMBED: &str = "https://cal.com/martinpulz/lesson?embed=true";

fn form_id(lang: Lang) -> &'static str {
    FORMS
        .iter()
        .find(|(_, form_lang)| *form_lang == lang)
        .map(|(id, _)| *id)
        .unwrap_or("booking-form")
}

/// Request form and calendar embed. Validation runs in the site runtime,
/// which intercepts the submit.
#[component]
pub fn BookingView(lang: Lang) -> Element {
    let id = view_id(PageKey::Booking, lang);
    let name_id = Field::Name.input_id(lang);
    let email_id = Field::Email.input_id(lang);
    let experience_id = Field::Experience.input_id(lang);
    let message_id = match lang {
        Lang::En => "message",
        Lang::De => "message-de",
    };
    let levels = [
        ("beginner", t!(lang, "form-level-beginner")),
        ("intermediate", t!(lang, "form-level-intermediate")),
        ("advanced", t!(lang, "form-level-advanced")),
    ];

    rsx! {
        div { id: "{id}", class: "page page-booking",
            header { class: "page__header",
                h1 { {t!(lang, "booking-title")} }
                p { class: "page__lead", {t!(lang, "booking-intro")} }
            }
            form {
                id: form_id(lang),
                class: "glass-card text-section booking-form",
                novalidate: true,
                div { class: "form-group",
                    label { r#for: "{name_id}", {t!(lang, "form-name-label")} }
                    input { id: "{name_id}", r#type: "text", autocomplete: "name" }
                    span { id: Field::Name.error_id(lang), class: "error-message" }
                }
                div { class: "form-group",
                    label { r#for: "{email_id}", {t!(lang, "form-email-label")} }
                    input { id: "{email_id}", r#type: "email", autocomplete: "email" }
                    span { id: Field::Email.error_id(lang), class: "error-message" }
                }
                div { class: "form-group",
                    label { r#for: "{experience_id}", {t!(lang, "form-experience-label")} }
                    select { id: "{experience_id}",
                        option { value: "", {t!(lang, "form-experience-placeholder")} }
                        for (value, label) in levels {
                            option { key: "{value}", value: "{value}", "{label}" }
                        }
                    }
                    span { id: Field::Experience.error_id(lang), class: "error-message" }
                }
                div { class: "form-group",
                    label { r#for: "{message_id}", {t!(lang, "form-message-label")} }
                    textarea { id: "{message_id}", rows: "4" }
                }
                button { class: "button button--primary", r#type: "submit",
                    {t!(lang, "form-submit")}
                }
            }
            section { class: "glass-card booking-calendar",
                h2 { {t!(lang, "booking-calendar-title")} }
                iframe {
                    class: "cal-embed",
                    src: CALENDAR_EMBED,
                    title: t!(lang, "booking-calendar-title"),
                }
            }
        }
    }
}

//! Booking request form: validation and submission handling.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::error::SiteResult;
use crate::dom::Dom;
use crate::i18n::{self, Lang};

static EMAIL_PATTERN: Lazy<Option<Regex>> = Lazy::new(|| match Regex::new(r"\S+@\S+\.\S+") {
    Ok(pattern) => Some(pattern),
    Err(err) => {
        tracing::error!(%err, "email pattern failed to compile");
        None
    }
});

pub const FORMS: [(&str, Lang); 2] = [("booking-form", Lang::En), ("booking-form-de", Lang::De)];

/// Suffix the German form appends to every field id.
fn suffix(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "",
        Lang::De => "-de",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Experience,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Experience];

    fn base_id(self) -> &'static str {
        match self {
            Field::Name => "fullName",
            Field::Email => "email",
            Field::Experience => "experience",
        }
    }

    pub fn input_id(self, lang: Lang) -> String {
        format!("{}{}", self.base_id(), suffix(lang))
    }

    pub fn error_id(self, lang: Lang) -> String {
        format!("{}-error", self.input_id(lang))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    InvalidEmail,
}

/// Raw form values as read from the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingInput {
    pub name: String,
    pub email: String,
    pub experience: String,
}

impl BookingInput {
    pub fn new(name: &str, email: &str, experience: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            experience: experience.to_string(),
        }
    }
}

/// Every field that failed, with messages in the form's language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors {
    lang: Lang,
    errors: Vec<(Field, FieldError)>,
}

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, err)| *err)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn message(&self, field: Field) -> Option<String> {
        let key = match (field, self.get(field)?) {
            (Field::Name, _) => "form-error-name-required",
            (Field::Email, FieldError::Required) => "form-error-email-required",
            (Field::Email, FieldError::InvalidEmail) => "form-error-email-invalid",
            (Field::Experience, _) => "form-error-experience-required",
        };
        Some(i18n::text(self.lang, key))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, String)> + '_ {
        self.errors
            .iter()
            .filter_map(|(field, _)| Some((*field, self.message(*field)?)))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<String> = self
            .errors
            .iter()
            .map(|(field, _)| format!("{field:?}"))
            .collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(email))
}

/// Check a submission. Name and email are trimmed; experience must be a
/// selected, non-empty option.
pub fn validate(input: &BookingInput, lang: Lang) -> Result<(), FieldErrors> {
    let mut errors = Vec::new();
    if input.name.trim().is_empty() {
        errors.push((Field::Name, FieldError::Required));
    }
    let email = input.email.trim();
    if email.is_empty() {
        errors.push((Field::Email, FieldError::Required));
    } else if !is_valid_email(email) {
        errors.push((Field::Email, FieldError::InvalidEmail));
    }
    if input.experience.is_empty() {
        errors.push((Field::Experience, FieldError::Required));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(FieldErrors { lang, errors })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Not one of the booking forms; the browser handles it.
    Unhandled,
    /// A field element is missing from the page.
    Incomplete,
    Rejected(FieldErrors),
    Sent,
}

impl SubmitOutcome {
    pub fn handled(&self) -> bool {
        !matches!(self, SubmitOutcome::Unhandled)
    }
}

pub fn form_lang<D: Dom>(dom: &D, form: &D::Node) -> Option<Lang> {
    let id = dom.attr(form, "id")?;
    FORMS
        .iter()
        .find(|(form_id, _)| *form_id == id)
        .map(|(_, lang)| *lang)
}

/// Handle a submit of `form`.
pub fn submit<D: Dom>(dom: &D, form: &D::Node) -> SiteResult<SubmitOutcome> {
    let Some(lang) = form_lang(dom, form) else {
        return Ok(SubmitOutcome::Unhandled);
    };
    let lookup = |field: Field| dom.by_id(&field.input_id(lang));
    let (Some(name), Some(email), Some(experience)) = (
        lookup(Field::Name),
        lookup(Field::Email),
        lookup(Field::Experience),
    ) else {
        tracing::error!(%lang, "booking form fields not found");
        return Ok(SubmitOutcome::Incomplete);
    };

    let input = BookingInput {
        name: dom.value(&name).trim().to_string(),
        email: dom.value(&email).trim().to_string(),
        experience: dom.value(&experience),
    };

    for message in dom.query_all(".error-message") {
        dom.set_text(&message, "")?;
    }

    match validate(&input, lang) {
        Ok(()) => {
            tracing::info!(%lang, "booking request accepted");
            dom.notify(&i18n::text(lang, "form-success"));
            dom.reset_form(form)?;
            Ok(SubmitOutcome::Sent)
        }
        Err(errors) => {
            tracing::debug!(%lang, %errors, "booking request rejected");
            for (field, message) in errors.iter() {
                if let Some(slot) = dom.by_id(&field.error_id(lang)) {
                    dom.set_text(&slot, &message)?;
                }
            }
            Ok(SubmitOutcome::Rejected(errors))
        }
    }
}

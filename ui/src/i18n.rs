//! Internationalization (i18n) support for `pulz-ui`.
//!
//! This module wires together:
//! - `i18n-embed` (asset loading)
//! - `fluent` (message formatting)
//! - `rust-embed` (compile-time embedding of `.ftl` files)
//! - `i18n-embed-fl` (`fl!` macro for compile‑time checked lookups)
//!
//! Folder layout (relative to this crate root):
//! ```text
//! i18n.toml
//! i18n/
//!   en-US/pulz-ui.ftl   (fallback/reference)
//!   de-DE/pulz-ui.ftl
//! ```
//!
//! Every view on the site is rendered for one fixed language, and the footer
//! chrome is rewritten for whichever language is active. There is therefore
//! no "current language" in this module: each [`Lang`] owns its own
//! `FluentLanguageLoader`, built once and never switched.
//!
//! Usage:
//! ```ignore
//! use crate::i18n::Lang;
//! use crate::t;
//! let title = t!(Lang::De, "page-title");
//! ```
use std::fmt;

use i18n_embed::fluent::FluentLanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

pub use i18n_embed_fl::fl; // Re-export for convenience.

/// Compile-time checked lookup for a fixed language.
/// Examples:
///     t!(Lang::En, "nav-home")
///     t!(lang, "footer-rights")
#[macro_export]
macro_rules! t {
    ($lang:expr, $key:literal) => {
        $crate::i18n::fl!($crate::i18n::loader($lang), $key)
    };
}

/// Fluent "domain" (matches the crate / the fallback FTL filename).
const DOMAIN: &str = "pulz-ui";

const FALLBACK: &str = "en-US";

/// Keys rewritten on every page transition.
pub const CHROME_KEYS: [&str; 7] = [
    "page-title",
    "page-description",
    "footer-contact-title",
    "footer-social-title",
    "footer-language-label",
    "current-language",
    "footer-rights",
];

/// Embed all locale folders under `i18n/`.
#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    De,
}

impl Lang {
    pub const ALL: [Lang; 2] = [Lang::En, Lang::De];

    /// Short code used in `data-lang` attributes.
    pub fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::De => "de",
        }
    }

    /// Locale folder under `i18n/`.
    pub fn fluent_id(self) -> &'static str {
        match self {
            Lang::En => "en-US",
            Lang::De => "de-DE",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code.trim()))
    }

    fn langid(self) -> LanguageIdentifier {
        self.fluent_id().parse().unwrap_or_default()
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One loader per language. Read-only after construction.
pub struct Translations {
    en: FluentLanguageLoader,
    de: FluentLanguageLoader,
}

impl Translations {
    pub fn embedded() -> Self {
        Self {
            en: build_loader(Lang::En),
            de: build_loader(Lang::De),
        }
    }

    pub fn loader(&self, lang: Lang) -> &FluentLanguageLoader {
        match lang {
            Lang::En => &self.en,
            Lang::De => &self.de,
        }
    }

    /// Runtime lookup for keys that are only known at runtime (chrome keys,
    /// bubble categories). Unknown keys come back as the key itself.
    pub fn text(&self, lang: Lang, key: &str) -> String {
        self.loader(lang).get(key)
    }

    pub fn has(&self, lang: Lang, key: &str) -> bool {
        self.loader(lang).has(key)
    }
}

fn build_loader(lang: Lang) -> FluentLanguageLoader {
    let fallback: LanguageIdentifier = FALLBACK.parse().unwrap_or_default();
    let loader = FluentLanguageLoader::new(DOMAIN, fallback);
    if let Err(err) = i18n_embed::select(&loader, &Localizations, &[lang.langid()]) {
        tracing::warn!(lang = lang.code(), %err, "locale failed to load; using fallback");
    }
    loader
}

static TRANSLATIONS: Lazy<Translations> = Lazy::new(Translations::embedded);

/// Shared translation table.
pub fn translations() -> &'static Translations {
    &TRANSLATIONS
}

/// Loader for `lang`; target of the `t!` macro.
pub fn loader(lang: Lang) -> &'static FluentLanguageLoader {
    TRANSLATIONS.loader(lang)
}

pub fn text(lang: Lang, key: &str) -> String {
    TRANSLATIONS.text(lang, key)
}

/// List available (embedded) language identifiers.
pub fn available_languages() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(|s| s.to_string()))
        .collect::<Vec<_>>();
    langs.sort();
    langs.dedup();
    langs
}

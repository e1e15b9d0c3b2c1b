//! View state and transition tokens.

use serde::{Deserialize, Serialize};

use super::registry::PageKey;
use crate::i18n::Lang;

/// The page and language currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub page: PageKey,
    pub lang: Lang,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            page: PageKey::Home,
            lang: Lang::En,
        }
    }
}

/// Issued once per successful page transition. Deferred work carries the
/// token it was scheduled under and is dropped if a newer one exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransitionToken(u64);

impl TransitionToken {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

//! Markup for every (page, language) view.
//!
//! All views are rendered up front and hidden by the theme; the view
//! controller picks the visible one by toggling `.page.active`.

mod accompanying;
mod biography;
mod booking;
mod home;
mod testimonials;

pub use accompanying::AccompanyingView;
pub use biography::BiographyView;
pub use booking::BookingView;
pub use home::HomeView;
pub use testimonials::TestimonialsView;

use crate::i18n::Lang;
use crate::site::{site_registry, PageKey};

/// Element id of the view rendering `page` in `lang`.
pub(crate) fn view_id(page: PageKey, lang: Lang) -> String {
    site_registry()
        .view_id(page, lang)
        .unwrap_or(page.as_str())
        .to_string()
}

/// `data-page` value that keeps a link inside `lang`.
pub(crate) fn page_link(page: PageKey, lang: Lang) -> String {
    match lang {
        Lang::En => page.as_str().to_string(),
        Lang::De => format!("{}-de", page.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::Intent;

    #[test]
    fn page_links_resolve_back_to_their_language() {
        for lang in Lang::ALL {
            let link = page_link(PageKey::Booking, lang);
            assert_eq!(
                Intent::from_page_attr(&link),
                Some(Intent::Navigate {
                    page: PageKey::Booking,
                    lang: match lang {
                        Lang::En => None,
                        Lang::De => Some(Lang::De),
                    },
                })
            );
        }
    }

    #[test]
    fn view_ids_follow_the_registry() {
        assert_eq!(view_id(PageKey::Home, Lang::De), "home-de-page");
        assert_eq!(view_id(PageKey::Test, Lang::De), "test-page");
    }
}

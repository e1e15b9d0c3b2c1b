//! Site chrome and the root component.

mod site;
mod site_footer;
mod site_navbar;

pub use site::Site;
pub use site_footer::SiteFooter;
pub use site_navbar::SiteNavbar;

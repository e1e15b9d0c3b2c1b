//! Self-contained interactive pieces of the site.

pub mod booking_form;
pub mod bubble_grid;
pub mod expand_card;

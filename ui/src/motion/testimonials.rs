//! Testimonial cards rise into place one after another the first time they
//! scroll into view.

use super::curves::Ease;
use super::triggers::{TriggerEvent, TriggerSet, TriggerSpec};
use super::{apply, apply_all, num, Props};
use crate::core::error::SiteResult;
use crate::dom::Dom;

pub const GROUP: &str = "testimonials";

const DURATION_S: f64 = 0.8;
const STAGGER_S: f64 = 0.2;

pub fn hidden() -> Props {
    Props::new().opacity(0.0).y(60.0).scale(0.9)
}

pub fn shown() -> Props {
    Props::new().opacity(1.0).y(0.0).scale(1.0)
}

/// Start delay of the `index`-th card, in seconds.
pub fn stagger_delay(index: usize) -> f64 {
    index as f64 * STAGGER_S
}

fn transition(index: usize) -> String {
    let delay = num(stagger_delay(index));
    let ease = Ease::Power3Out.css();
    format!("opacity {DURATION_S}s {ease} {delay}s, transform {DURATION_S}s {ease} {delay}s")
}

/// Hide every testimonial card in `page` and arm a one-shot reveal for
/// each. Returns the number of cards armed.
pub fn arm<D: Dom>(dom: &D, page: &D::Node, triggers: &mut TriggerSet<D>) -> SiteResult<usize> {
    let cards = dom.query_all_in(page, ".testimonial-card");
    if cards.is_empty() {
        return Ok(0);
    }
    triggers.kill_group(GROUP);
    apply_all(dom, &cards, &hidden())?;

    for (index, card) in cards.iter().enumerate() {
        let spec = TriggerSpec::new(card.clone(), "top 85%", "top 60%")?.once();
        let card = card.clone();
        triggers.create(GROUP, spec, move |dom: &D, event| {
            if event != TriggerEvent::Enter {
                return Ok(());
            }
            dom.set_style(&card, "transition", &transition(index))?;
            apply(dom, &card, &shown())
        });
    }
    tracing::debug!(cards = cards.len(), "testimonial reveals armed");
    Ok(cards.len())
}

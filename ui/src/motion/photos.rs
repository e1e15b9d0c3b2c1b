//! Home photo sequence: two side-by-side cards that sharpen in, hold and
//! drift out, followed by a full-bleed photo with a centred caption.

use super::triggers::{TriggerEvent, TriggerSet, TriggerSpec};
use super::{apply, num, Props};
use crate::core::error::SiteResult;
use crate::dom::Dom;

pub const GROUP: &str = "photos";

const MAX_BLUR: f64 = 30.0;
const BG_MAX_BLUR: f64 = 99.0;
const BG_RAMP: f64 = 0.99;

/// Phase boundaries and drift direction of a side card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideTuning {
    /// Progress at which the card is fully opaque.
    pub fade_end: f64,
    /// Progress at which the card is fully sharp.
    pub blur_end: f64,
    /// Progress at which the exit starts.
    pub hold_end: f64,
    /// Horizontal image offset at progress 0.
    pub enter_x: f64,
    /// Horizontal image offset at progress 1.
    pub exit_x: f64,
}

pub const FIRST: SideTuning = SideTuning {
    fade_end: 0.75,
    blur_end: 0.20,
    hold_end: 0.75,
    enter_x: -20.0,
    exit_x: 15.0,
};

pub const SECOND: SideTuning = SideTuning {
    fade_end: 0.35,
    blur_end: 0.20,
    hold_end: 0.75,
    enter_x: 20.0,
    exit_x: -15.0,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideFrame {
    pub card: Props,
    pub image: Props,
    pub text: Props,
    pub active: bool,
}

pub fn side_frame(progress: f64, tuning: &SideTuning) -> SideFrame {
    let p = progress.clamp(0.0, 1.0);
    let entrance_end = tuning.fade_end.max(tuning.blur_end);
    if p <= entrance_end {
        let fade = (p / tuning.fade_end).min(1.0);
        let sharpen = (p / tuning.blur_end).min(1.0);
        SideFrame {
            card: Props::new()
                .opacity(fade)
                .blur(MAX_BLUR - MAX_BLUR * sharpen),
            image: Props::new()
                .scale(1.0 + 0.1 * fade)
                .x(tuning.enter_x * (1.0 - fade)),
            text: Props::new().opacity(0.5 + 0.5 * fade).y(20.0 - 20.0 * fade),
            active: false,
        }
    } else if p <= tuning.hold_end {
        SideFrame {
            card: Props::new().opacity(1.0).blur(0.0),
            image: Props::new().scale(1.1).x(0.0),
            text: Props::new().opacity(1.0).y(0.0),
            active: true,
        }
    } else {
        let out = (p - tuning.hold_end) / (1.0 - tuning.hold_end);
        SideFrame {
            card: Props::new().opacity(1.0 - out).blur(MAX_BLUR * out),
            image: Props::new()
                .scale(1.1 + 0.1 * out)
                .x(tuning.exit_x * out),
            text: Props::new().opacity(1.0 - out).y(-15.0 * out),
            active: false,
        }
    }
}

/// Scene background blur while the second card scrolls through: a slow
/// ramp to the maximum, then a quick release at the very end.
pub fn background_blur(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    if p <= BG_RAMP {
        BG_MAX_BLUR * (p / BG_RAMP)
    } else {
        BG_MAX_BLUR * (1.0 - (p - BG_RAMP) / (1.0 - BG_RAMP))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterFrame {
    pub card: Props,
    pub image: Props,
    pub text: Props,
}

const CENTER_IN: f64 = 0.15;
const CENTER_OUT: f64 = 0.75;

pub fn center_frame(progress: f64) -> CenterFrame {
    let p = progress.clamp(0.0, 1.0);
    if p <= CENTER_IN {
        let t = p / CENTER_IN;
        CenterFrame {
            card: Props::new().opacity(t).blur(MAX_BLUR - MAX_BLUR * t),
            image: Props::new().scale(1.2 + 0.3 * t),
            text: Props::new()
                .auto_alpha(t)
                .y(20.0 - 20.0 * t)
                .scale(0.85 + 0.1 * t),
        }
    } else if p <= CENTER_OUT {
        CenterFrame {
            card: Props::new().opacity(1.0).blur(0.0),
            image: Props::new().scale(1.5),
            text: Props::new().auto_alpha(1.0).y(0.0).scale(0.95),
        }
    } else {
        let f = (p - CENTER_OUT) / (1.0 - CENTER_OUT);
        CenterFrame {
            card: Props::new().opacity(1.0 - f).blur(MAX_BLUR * f),
            image: Props::new().scale(1.5 - 0.2 * f),
            text: Props::new()
                .auto_alpha(1.0 - f)
                .y(-80.0 * f)
                .scale(0.95 - 0.1 * f),
        }
    }
}

struct SideCard<N> {
    card: N,
    image: Option<N>,
    text: Option<N>,
}

impl<N: Clone> SideCard<N> {
    fn render<D: Dom<Node = N>>(&self, dom: &D, frame: &SideFrame) -> SiteResult {
        apply(dom, &self.card, &frame.card)?;
        dom.toggle_class(&self.card, "active", frame.active)?;
        if let Some(image) = &self.image {
            apply(dom, image, &frame.image)?;
        }
        if let Some(text) = &self.text {
            apply(dom, text, &frame.text)?;
        }
        Ok(())
    }
}

fn photo<D: Dom>(dom: &D, page: &D::Node, n: u8) -> Option<D::Node> {
    dom.query_in(page, &format!("#photo{n}"))
        .or_else(|| dom.query_in(page, &format!("#photo{n}-de")))
}

/// Arm the photo sequence inside `page`. Returns `false` when the view has
/// no sequence.
pub fn arm<D: Dom>(dom: &D, page: &D::Node, triggers: &mut TriggerSet<D>) -> SiteResult<bool> {
    for edge in dom.query_all_in(page, ".photo-sequence-blur-edge") {
        apply(dom, &edge, &Props::new().auto_alpha(0.0))?;
    }

    let scene = dom.query_in(page, ".photo-sequence-scene");
    let (Some(scene), Some(first), Some(second), Some(third)) = (
        scene,
        photo(dom, page, 1),
        photo(dom, page, 2),
        photo(dom, page, 3),
    ) else {
        tracing::debug!("photo sequence not present in active view");
        return Ok(false);
    };

    triggers.kill_group(GROUP);

    for card in [&first, &second, &third] {
        apply(dom, card, &Props::new().opacity(0.0).blur(MAX_BLUR))?;
    }
    dom.set_style(&third, "position", "sticky")?;
    dom.set_style(&third, "top", "0")?;

    let side = |card: &D::Node| SideCard {
        card: card.clone(),
        image: dom.query_in(card, ".photo-sequence-img-small"),
        text: dom.query_in(card, ".photo-sequence-text"),
    };
    let first = side(&first);
    let second = side(&second);
    for card in [&first, &second] {
        if let Some(image) = &card.image {
            apply(dom, image, &Props::new().scale(1.0).x(0.0).opacity(1.0))?;
        }
        if let Some(text) = &card.text {
            apply(dom, text, &Props::new().opacity(1.0).y(0.0))?;
        }
    }

    let center_image = dom.query_in(&third, ".photo-sequence-img");
    let center_text = dom.query_in(&third, ".photo-sequence-text-center");
    if let Some(image) = &center_image {
        apply(dom, image, &Props::new().scale(1.2).opacity(1.0))?;
        dom.set_style(image, "transform-origin", "center center")?;
    }
    if let Some(text) = &center_text {
        apply(dom, text, &Props::new().auto_alpha(0.0).scale(0.9))?;
    }

    let spec = TriggerSpec::new(first.card.clone(), "top bottom", "bottom top")?;
    triggers.create(GROUP, spec, move |dom: &D, event| match event {
        TriggerEvent::Update(p) => first.render(dom, &side_frame(p, &FIRST)),
        _ => Ok(()),
    });

    let spec = TriggerSpec::new(second.card.clone(), "top bottom", "bottom top")?;
    triggers.create(GROUP, spec, move |dom: &D, event| match event {
        TriggerEvent::Update(p) => {
            second.render(dom, &side_frame(p, &SECOND))?;
            dom.set_style(&scene, "--bg-blur", &format!("{}px", num(background_blur(p))))
        }
        _ => Ok(()),
    });

    let spec = TriggerSpec::new(third.clone(), "top bottom", "bottom bottom")?;
    triggers.create(GROUP, spec, move |dom: &D, event| {
        let TriggerEvent::Update(p) = event else {
            return Ok(());
        };
        let frame = center_frame(p);
        apply(dom, &third, &frame.card)?;
        if let Some(image) = &center_image {
            apply(dom, image, &frame.image)?;
        }
        if let Some(text) = &center_text {
            apply(dom, text, &frame.text)?;
        }
        Ok(())
    });

    Ok(true)
}

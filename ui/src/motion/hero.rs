//! Home hero: the bubble rises over the backdrop, holds, then lifts away
//! while the background image blurs out.
//!
//! The timeline runs over `TOTAL` time units and is scrubbed by a trigger
//! that starts when the scene reaches the top of the viewport and lasts two
//! viewport heights. The scene itself stays in place through `position:
//! sticky` in the stylesheet.

use super::curves::{segment, tween, Ease};
use super::triggers::{TriggerEvent, TriggerSet, TriggerSpec};
use super::{apply, Props};
use crate::core::error::SiteResult;
use crate::dom::Dom;

pub const GROUP: &str = "hero";

pub const TOTAL: f64 = 0.69;
const RISE: (f64, f64) = (0.0, 0.15);
const HOLD: (f64, f64) = (0.15, 0.27);
const LIFT: (f64, f64) = (0.27, 0.55);
const BUBBLE_FADE: (f64, f64) = (0.37, 0.49);
const IMAGE_OUT: (f64, f64) = (0.45, 0.69);

/// Bubble resting offset, in viewport-height percent.
const BUBBLE_START_VH: f64 = 120.0;
const BUBBLE_HOLD_VH: f64 = 45.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeroFrame {
    pub image: Props,
    pub bubble: Props,
    pub backdrop: Props,
}

/// State of the hero at scroll `progress` for a viewport `viewport_h` tall.
pub fn frame(progress: f64, viewport_h: f64) -> HeroFrame {
    let t = progress.clamp(0.0, 1.0) * TOTAL;
    let vh = viewport_h / 100.0;

    let image_scale = if t < HOLD.0 {
        tween(t, RISE.0, RISE.1, 1.0, 1.08, Ease::Power2Out)
    } else if t < IMAGE_OUT.0 {
        tween(t, HOLD.0, HOLD.1, 1.08, 1.10, Ease::Linear)
    } else {
        tween(t, IMAGE_OUT.0, IMAGE_OUT.1, 1.10, 0.86, Ease::Power2Out)
    };
    let image_out = Ease::Power2Out.apply(segment(t, IMAGE_OUT.0, IMAGE_OUT.1));

    let bubble_y = if t < LIFT.0 {
        tween(
            t,
            RISE.0,
            RISE.1,
            BUBBLE_START_VH * vh,
            BUBBLE_HOLD_VH * vh,
            Ease::Power2Out,
        )
    } else {
        tween(t, LIFT.0, LIFT.1, BUBBLE_HOLD_VH * vh, -viewport_h, Ease::Linear)
    };
    let bubble_opacity = if t < BUBBLE_FADE.0 {
        tween(t, RISE.0, RISE.1, 0.0, 1.0, Ease::Power2Out)
    } else {
        tween(t, BUBBLE_FADE.0, BUBBLE_FADE.1, 1.0, 0.0, Ease::Power2In)
    };

    HeroFrame {
        image: Props::new()
            .scale(image_scale)
            .blur(20.0 * image_out)
            .opacity(1.0 - image_out),
        bubble: Props::new().y(bubble_y).opacity(bubble_opacity),
        backdrop: Props::new().y(tween(t, LIFT.0, LIFT.1, 0.0, -viewport_h, Ease::Linear)),
    }
}

/// Arm the hero timeline inside `page`. Returns `false` when the view has
/// no hero.
pub fn arm<D: Dom>(dom: &D, page: &D::Node, triggers: &mut TriggerSet<D>) -> SiteResult<bool> {
    let (Some(scene), Some(_hero), Some(backdrop), Some(image), Some(bubble)) = (
        dom.query_in(page, ".scene"),
        dom.query_in(page, ".hero"),
        dom.query_in(page, ".hero__bg"),
        dom.query_in(page, ".hero__bg img"),
        dom.query_in(page, ".bubble"),
    ) else {
        tracing::debug!("hero elements not present in active view");
        return Ok(false);
    };

    triggers.kill_group(GROUP);
    dom.clear_style(&backdrop, "transform")?;
    dom.clear_style(&bubble, "transform")?;
    let initial = frame(0.0, dom.viewport().height);
    apply(dom, &image, &initial.image)?;
    apply(dom, &bubble, &initial.bubble)?;
    apply(dom, &backdrop, &initial.backdrop)?;

    let spec = TriggerSpec::new(scene, "top top", "+=200%")?;
    triggers.create(GROUP, spec, move |dom: &D, event| {
        if let TriggerEvent::Update(progress) = event {
            let frame = frame(progress, dom.viewport().height);
            apply(dom, &image, &frame.image)?;
            apply(dom, &bubble, &frame.bubble)?;
            apply(dom, &backdrop, &frame.backdrop)?;
        }
        Ok(())
    });
    Ok(true)
}

//! Easing and interpolation helpers.

pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Local 0..1 progress of `t` inside `[start, end]`.
pub fn segment(t: f64, start: f64, end: f64) -> f64 {
    if end <= start {
        return if t >= end { 1.0 } else { 0.0 };
    }
    clamp01((t - start) / (end - start))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ease {
    Linear,
    Power2In,
    Power2Out,
    Power3Out,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = clamp01(t);
        match self {
            Ease::Linear => t,
            Ease::Power2In => t * t,
            Ease::Power2Out => 1.0 - (1.0 - t).powi(2),
            Ease::Power3Out => 1.0 - (1.0 - t).powi(3),
        }
    }

    /// Closest CSS timing function, for transitions handed to the browser.
    pub fn css(self) -> &'static str {
        match self {
            Ease::Linear => "linear",
            Ease::Power2In => "cubic-bezier(0.55, 0.085, 0.68, 0.53)",
            Ease::Power2Out => "cubic-bezier(0.25, 0.46, 0.45, 0.94)",
            Ease::Power3Out => "cubic-bezier(0.215, 0.61, 0.355, 1)",
        }
    }
}

/// Value of a tween from `from` to `to` running over `[start, end]` of `t`.
pub fn tween(t: f64, start: f64, end: f64, from: f64, to: f64, ease: Ease) -> f64 {
    lerp(from, to, ease.apply(segment(t, start, end)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eases_hit_endpoints() {
        for ease in [Ease::Linear, Ease::Power2In, Ease::Power2Out, Ease::Power3Out] {
            assert_eq!(ease.apply(0.0), 0.0);
            assert_eq!(ease.apply(1.0), 1.0);
        }
    }

    #[test]
    fn out_eases_lead_in_eases_lag() {
        assert!(Ease::Power2Out.apply(0.5) > 0.5);
        assert!(Ease::Power2In.apply(0.5) < 0.5);
    }

    #[test]
    fn segment_clamps_outside_range() {
        assert_eq!(segment(0.1, 0.2, 0.4), 0.0);
        assert_eq!(segment(0.5, 0.2, 0.4), 1.0);
        assert!((segment(0.3, 0.2, 0.4) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn tween_holds_before_and_after() {
        assert_eq!(tween(0.0, 0.5, 1.0, 10.0, 20.0, Ease::Linear), 10.0);
        assert_eq!(tween(2.0, 0.5, 1.0, 10.0, 20.0, Ease::Linear), 20.0);
    }

    #[test]
    fn nan_clamps_to_zero() {
        assert_eq!(clamp01(f64::NAN), 0.0);
    }
}

//! Site configuration (timings and breakpoints).
//!
//! The defaults are embedded from `assets/site.json` at compile time so the
//! wasm bundle never has to fetch anything. A malformed file is logged and
//! the built-in defaults are used instead.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const EMBEDDED_CONFIG: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/site.json"));

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid site config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Delay before home-only scroll modules are re-armed after a page swap.
    pub rearm_delay_ms: u32,
    /// Delay before entrance and testimonial animations run after a page swap.
    pub entrance_delay_ms: u32,
    /// Delay before the booking calendar embed is adjusted on narrow viewports.
    pub embed_fix_delay_ms: u32,
    /// Delay before the photo sequence is re-armed once all assets loaded.
    pub load_refresh_delay_ms: u32,
    /// Viewports at or below this width count as narrow.
    pub narrow_breakpoint_px: u32,
    /// Duration of the expanding card grow/shrink transition.
    pub expand_transition_ms: u32,
    pub text_reveal_base_ms: u32,
    pub text_reveal_step_ms: u32,
    pub card_reveal_base_ms: u32,
    pub card_reveal_step_ms: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            rearm_delay_ms: 100,
            entrance_delay_ms: 200,
            embed_fix_delay_ms: 100,
            load_refresh_delay_ms: 200,
            narrow_breakpoint_px: 768,
            expand_transition_ms: 500,
            text_reveal_base_ms: 600,
            text_reveal_step_ms: 200,
            card_reveal_base_ms: 1400,
            card_reveal_step_ms: 100,
        }
    }
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Load the embedded configuration, falling back to defaults.
    pub fn load() -> Self {
        match Self::from_json(EMBEDDED_CONFIG) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(%err, "falling back to default site config");
                Self::default()
            }
        }
    }

    /// Delay of the `index`-th text section reveal.
    pub fn text_reveal_delay(&self, index: usize) -> u32 {
        stagger(self.text_reveal_base_ms, self.text_reveal_step_ms, index)
    }

    /// Delay of the `index`-th glass card reveal.
    pub fn card_reveal_delay(&self, index: usize) -> u32 {
        stagger(self.card_reveal_base_ms, self.card_reveal_step_ms, index)
    }
}

fn stagger(base: u32, step: u32, index: usize) -> u32 {
    let index = u32::try_from(index).unwrap_or(u32::MAX);
    base.saturating_add(step.saturating_mul(index))
}

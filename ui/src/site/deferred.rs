//! Work scheduled to run after a delay.
//!
//! The controller and widgets never sleep. They hand back [`Deferred`]
//! values; the runtime waits `delay_ms` and passes each one back to
//! `SiteApp::fire`. Work tied to a view carries the [`TransitionToken`] it
//! was issued under and is dropped once a newer transition has happened.

use super::state::TransitionToken;
use crate::motion::entrance::Reveal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Run only while this transition is still the current one.
    Transition(TransitionToken),
    /// Run unconditionally; the owner checks its own state.
    Always,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Make the booking calendar scrollable on narrow viewports.
    EmbedFix,
    /// Arm hero, photo sequence and seam band.
    ArmHome,
    /// Stage the entrance reveals and arm testimonials.
    Entrance,
    Reveal(Reveal),
    RearmPhotos,
    /// Grow the expanded card clone to its target size.
    ExpandGrow,
    /// Remove the collapsed card clone and restore the card.
    ExpandSettle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deferred {
    pub delay_ms: u32,
    pub guard: Guard,
    pub task: Task,
}

impl Deferred {
    pub fn guarded(delay_ms: u32, token: TransitionToken, task: Task) -> Self {
        Self {
            delay_ms,
            guard: Guard::Transition(token),
            task,
        }
    }

    pub fn always(delay_ms: u32, task: Task) -> Self {
        Self {
            delay_ms,
            guard: Guard::Always,
            task,
        }
    }

    /// Whether this work may still run when `current` is the live token.
    pub fn is_current(&self, current: TransitionToken) -> bool {
        match self.guard {
            Guard::Transition(token) => token == current,
            Guard::Always => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guarded_work_expires_with_its_transition() {
        let first = TransitionToken::default().next();
        let work = Deferred::guarded(100, first, Task::ArmHome);
        assert!(work.is_current(first));
        assert!(!work.is_current(first.next()));
    }

    #[test]
    fn unguarded_work_always_runs() {
        let work = Deferred::always(500, Task::ExpandSettle);
        assert!(work.is_current(TransitionToken::default().next().next()));
    }
}

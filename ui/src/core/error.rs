//! Error type and the fault boundary every handler runs inside.
//!
//! Nothing in the site surfaces an error to its caller: a failing handler is
//! logged and the next event is processed as usual.

use thiserror::Error;

use crate::motion::triggers::MarkerError;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("dom operation `{op}` failed: {detail}")]
    Dom { op: &'static str, detail: String },
    #[error("required element `{0}` is missing")]
    MissingElement(String),
    #[error(transparent)]
    Marker(#[from] MarkerError),
}

impl SiteError {
    pub fn dom(op: &'static str, detail: impl Into<String>) -> Self {
        Self::Dom {
            op,
            detail: detail.into(),
        }
    }
}

pub type SiteResult<T = ()> = Result<T, SiteError>;

/// Run `f`, log any error under `op` and swallow it.
pub fn guard<T>(op: &'static str, f: impl FnOnce() -> SiteResult<T>) -> Option<T> {
    match f() {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::error!(op, %err, "handler failed");
            None
        }
    }
}

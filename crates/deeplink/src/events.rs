//! Navigation lifecycle events.
//!
//! The engine fans these out to event listeners synchronously, in listener
//! add order, on the same logical thread that triggered the navigation.

use crate::error::NavigateError;

/// One observable step of the navigation lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterEvent {
    /// The engine has been activated.
    Activated,
    /// The engine may dispatch routes (any hold-until gate has opened).
    Ready,
    /// A navigation started; route listeners have not fired yet.
    Loading,
    /// The host reported the navigation complete without error.
    Loaded,
    /// After-navigate listeners have been dispatched.
    AfterLoaded,
    /// The navigation pass finished, successfully or not.
    Completed,
    /// The navigation could not be routed.
    Error(NavigateError),
}

impl RouterEvent {
    /// Stable event name, mainly for logging.
    pub fn name(&self) -> &'static str {
        match self {
            RouterEvent::Activated => "activated",
            RouterEvent::Ready => "ready",
            RouterEvent::Loading => "loading",
            RouterEvent::Loaded => "loaded",
            RouterEvent::AfterLoaded => "after_loaded",
            RouterEvent::Completed => "completed",
            RouterEvent::Error(_) => "error",
        }
    }
}

//! Driver lifecycle
//!
//! Initializing -> Running -> Stopped. A driver runs at most once; Stopped is
//! terminal and the transport has been closed by the time it is entered.

/// The current driver state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Constructed, transport open, nothing sent yet
    Initializing,
    /// Configuration sent, frames streaming
    Running,
    /// Transport closed
    Stopped,
}

impl Default for DriverState {
    fn default() -> Self {
        Self::Initializing
    }
}

impl DriverState {
    /// Whether moving from this state to `next` is allowed
    pub fn can_transition_to(self, next: DriverState) -> bool {
        matches!(
            (self, next),
            (Self::Initializing, Self::Running)
                | (Self::Initializing, Self::Stopped)
                | (Self::Running, Self::Stopped)
        )
    }

    pub fn is_stopped(self) -> bool {
        matches!(self, Self::Stopped)
    }
}

/// Why the frame loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The cancellation token was set
    Cancelled,
    /// The configured frame limit was reached
    FrameLimit,
}

impl StopReason {
    pub fn description(&self) -> &'static str {
        match self {
            Self::Cancelled => "Animation stopped",
            Self::FrameLimit => "Frame limit reached",
        }
    }
}

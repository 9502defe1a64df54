use crate::types::ListenerSlot;

/// Failure reported by an [`EventSource`](crate::platform::EventSource) when
/// adding or removing a listener. Never fatal to the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// The host refused the registration or removal.
    Rejected {
        event: &'static str,
        slot: ListenerSlot,
        reason: String,
    },
}

impl std::fmt::Display for BindingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BindingError::Rejected {
                event,
                slot,
                reason,
            } => write!(f, "host rejected {slot:?} listener for `{event}`: {reason}"),
        }
    }
}

impl std::error::Error for BindingError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOrientationError {
    pub value: String,
}

impl std::fmt::Display for ParseOrientationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown orientation `{}`; expected horizontal, vertical, h or v",
            self.value
        )
    }
}

impl std::error::Error for ParseOrientationError {}

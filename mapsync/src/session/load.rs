//! Config load state machine.

use crate::loader::LoadError;

/// Identifies one dispatched load. Later requests carry larger tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub(crate) fn first() -> Self {
        Self(1)
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Where the session stands with its layer configuration.
#[derive(Debug, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading {
        token: RequestToken,
    },
    Ready,
    Failed(LoadError),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    pub fn error(&self) -> Option<&LoadError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Token of the request the session is waiting on.
    pub fn pending_token(&self) -> Option<RequestToken> {
        match self {
            Self::Loading { token } => Some(*token),
            _ => None,
        }
    }
}

//! The core trait that decouples spacekeep from any specific window manager
//! or transport mechanism.
//!
//! Every concrete backend (yabai over its Unix socket, the in-memory test
//! model, …) implements [`WindowManager`].  The handle types and the
//! ordering algorithms only depend on this abstraction.
//!
//! The boundary also owns failure classification: a window manager rejects
//! commands with free-text messages, and [`WmFailure::classify`] is the one
//! place where those strings are pattern-matched.  Everything above the
//! boundary branches on [`FailureKind`] only.

use crate::records::{DisplayRecord, SpaceRecord, WindowRecord};
use crate::selector::{DisplaySelector, SpaceSelector, WindowSelector};

/// Why the window manager rejected a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The entity is already focused.  Benign for focus operations.
    AlreadyFocused,
    /// The command named the acted-on entity as its own target (move or
    /// swap with itself).  Benign for ordering operations.
    SelfTarget,
    /// The space already lives on the given display.  Benign for sends.
    AlreadyOnDisplay,
    /// The selector did not resolve to anything.
    NotFound,
    /// Anything else.  Always propagated.
    Other,
}

/// A rejected command, with the classified reason and the original message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct WmFailure {
    pub kind: FailureKind,
    /// The window manager's message, verbatim, for diagnostics.
    pub message: String,
}

impl WmFailure {
    /// Build a failure with a known kind (used by backends that know the
    /// reason structurally, such as the test model).
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Classify a raw failure message.
    ///
    /// This is the single point where yabai's free-text messages are
    /// matched; the substrings below are the ones yabai has printed for
    /// years, but any unrecognized message simply classifies as
    /// [`FailureKind::Other`] and propagates.
    pub fn classify(message: impl Into<String>) -> Self {
        let message = message.into();
        let kind = if message.contains("already focused") {
            FailureKind::AlreadyFocused
        } else if message.contains("to itself") || message.contains("with itself") {
            FailureKind::SelfTarget
        } else if message.contains("already located on the given display") {
            FailureKind::AlreadyOnDisplay
        } else if message.contains("could not locate") {
            FailureKind::NotFound
        } else {
            FailureKind::Other
        };
        Self { kind, message }
    }
}

/// Errors that can occur at the window-manager boundary.
#[derive(Debug, thiserror::Error)]
pub enum WmError {
    /// The transport failed (socket missing, connection refused, short
    /// read, …).
    #[error("transport error: {0}")]
    Transport(String),

    /// The response arrived but could not be understood.
    #[error("malformed response: {0}")]
    Protocol(String),

    /// The window manager executed the request and rejected it.
    #[error(transparent)]
    Rejected(#[from] WmFailure),
}

impl WmError {
    /// The classified rejection kind, if this error is a rejection.
    pub fn rejection(&self) -> Option<FailureKind> {
        match self {
            WmError::Rejected(failure) => Some(failure.kind),
            _ => None,
        }
    }
}

/// Abstraction over a window manager with queryable spaces, displays, and
/// windows.
///
/// Queries return snapshots ([`SpaceRecord`] and friends) and never mutate;
/// commands mutate and return nothing.  All methods are synchronous and
/// take `&self` — the external state is shared and mutable regardless, so
/// exclusive access would promise nothing.
pub trait WindowManager {
    //  Queries

    /// Snapshot of the space named by `sel`.
    fn space(&self, sel: &SpaceSelector) -> Result<SpaceRecord, WmError>;

    /// Snapshots of all spaces, ordered by mission-control index.
    fn spaces(&self) -> Result<Vec<SpaceRecord>, WmError>;

    /// Snapshot of the display named by `sel`.
    fn display(&self, sel: &DisplaySelector) -> Result<DisplayRecord, WmError>;

    /// Snapshots of all displays, ordered by arrangement index.
    fn displays(&self) -> Result<Vec<DisplayRecord>, WmError>;

    /// Snapshot of the window named by `sel`.
    fn window(&self, sel: &WindowSelector) -> Result<WindowRecord, WmError>;

    /// Snapshots of all windows.
    fn windows(&self) -> Result<Vec<WindowRecord>, WmError>;

    //  Commands

    /// Focus a space.
    fn focus_space(&self, sel: &SpaceSelector) -> Result<(), WmError>;

    /// Create a new space at the end of the given display.
    fn create_space(&self, display: &DisplaySelector) -> Result<(), WmError>;

    /// Destroy a space.  Fails if it is the last space on its display.
    fn destroy_space(&self, sel: &SpaceSelector) -> Result<(), WmError>;

    /// Move a space to the position of another space on the same display.
    fn move_space(&self, sel: &SpaceSelector, to: &SpaceSelector) -> Result<(), WmError>;

    /// Swap two spaces on the same display.
    fn swap_space(&self, sel: &SpaceSelector, with: &SpaceSelector) -> Result<(), WmError>;

    /// Send a space to another display (appended after its spaces).  Fails
    /// if the space is the last one on its display.
    fn send_space_to_display(
        &self,
        sel: &SpaceSelector,
        display: &DisplaySelector,
    ) -> Result<(), WmError>;

    /// Assign a label to a space.  The boundary performs no validation;
    /// see [`validate_label`](crate::selector::validate_label).
    fn label_space(&self, sel: &SpaceSelector, label: &str) -> Result<(), WmError>;

    /// Focus a display.
    fn focus_display(&self, sel: &DisplaySelector) -> Result<(), WmError>;

    /// Send a window to a space.
    fn send_window_to_space(
        &self,
        window: &WindowSelector,
        space: &SpaceSelector,
    ) -> Result<(), WmError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_known_messages() {
        let cases = [
            ("cannot focus an already focused space.", FailureKind::AlreadyFocused),
            ("cannot move space to itself.", FailureKind::SelfTarget),
            ("cannot swap space with itself.", FailureKind::SelfTarget),
            (
                "acting space is already located on the given display.",
                FailureKind::AlreadyOnDisplay,
            ),
            ("could not locate the selected display.", FailureKind::NotFound),
        ];
        for (message, kind) in cases {
            assert_eq!(WmFailure::classify(message).kind, kind, "{message}");
        }
    }

    #[test]
    fn classify_keeps_message_verbatim() {
        let failure = WmFailure::classify("some novel failure mode");
        assert_eq!(failure.kind, FailureKind::Other);
        assert_eq!(failure.message, "some novel failure mode");
    }

    #[test]
    fn rejection_kind_is_exposed() {
        let err = WmError::from(WmFailure::classify("cannot move space to itself."));
        assert_eq!(err.rejection(), Some(FailureKind::SelfTarget));
        let err = WmError::Transport("connect: refused".to_string());
        assert_eq!(err.rejection(), None);
    }
}

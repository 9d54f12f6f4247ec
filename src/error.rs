//! Error taxonomy shared by all components.
//!
//! Boundary failures ([`WmError`](crate::traits::WmError)) are wrapped
//! transparently; everything else falls into one of a small number of
//! categories so callers can react to the *kind* of failure without ever
//! inspecting message strings.

use crate::traits::WmError;

/// Errors produced by spacekeep operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A handle's referent no longer exists (destroyed, or never found).
    ///
    /// Never silently substituted: a stale handle fails here instead of
    /// resolving to whatever space happens to occupy the old index now.
    #[error("identity error: {0}")]
    Identity(String),

    /// A caller-supplied selector or label violates a precondition.
    ///
    /// Raised before any command is sent to the window manager, so a
    /// validation failure never leaves partial external state behind.
    #[error("validation error: {0}")]
    Validation(String),

    /// The operation would leave a display without any space, and the
    /// caller did not arrange for placeholder compensation.
    #[error("cannot move the last space away from display {display}")]
    WouldEmptyDisplay {
        /// Arrangement index of the display that would be emptied.
        display: u32,
    },

    /// The sorted-ness check found a display out of order.
    #[error("spaces out of order: found {found:?}, expected {expected:?}")]
    Unsorted {
        /// Labels in the order the display currently has them.
        found: Vec<String>,
        /// Labels in the order the rank function wants them.
        expected: Vec<String>,
    },

    /// The space-definition file could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// The window manager rejected a command or the transport failed.
    #[error(transparent)]
    Wm(#[from] WmError),
}

impl Error {
    /// Whether this error is an expected, user-facing refusal rather than a
    /// malfunction.  The CLI prints these on stdout and exits 1 without a
    /// backtrace-style error line.
    pub fn is_soft(&self) -> bool {
        matches!(self, Error::WouldEmptyDisplay { .. })
    }
}

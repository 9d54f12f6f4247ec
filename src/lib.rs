//! **spacekeep** — keeps yabai spaces labeled, ordered, and on their
//! preferred displays.
//!
//! yabai gives a space three names: a permanent uuid that cannot be used as
//! a selector, a mission-control index that changes whenever any space on
//! the same display moves, and an optional label that the user can change
//! at any time.  spacekeep's job is to keep addressing a space correctly
//! while it reorders spaces — which is exactly when indices shift.
//!
//! # Architecture
//!
//! The crate is organised around one core trait:
//!
//! * [`traits::WindowManager`] — abstracts the query/command surface of the
//!   window manager so that handles and the ordering algorithms are not
//!   coupled to yabai's socket protocol (and can run against an in-memory
//!   model in tests).
//!
//! On top of it sit the stable handles ([`space::Space`],
//! [`display::Display`], [`window::Window`]) and the two ordering
//! algorithms: [`sort`] (in-place label-order sort of one display) and
//! [`relocate`] (cross-display move that preserves label order and never
//! leaves a display without spaces).
//!
//! The concrete backend lives in [`yabai`] (Unix-socket IPC).

pub mod display;
pub mod error;
pub mod notify;
pub mod ops;
pub mod records;
pub mod relocate;
pub mod selector;
pub mod sort;
pub mod space;
pub mod spacedef;
pub mod traits;
pub mod window;
pub mod yabai;

#[cfg(test)]
pub(crate) mod fake;

pub use error::Error;

//! yabai backend.
//!
//! [`wm::YabaiWm`] implements [`WindowManager`](crate::traits::WindowManager)
//! by speaking yabai's message protocol over its Unix socket.

pub mod wm;

pub use wm::YabaiWm;

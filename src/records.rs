//! Records returned by window-manager queries.
//!
//! These mirror the JSON objects yabai prints for `query --spaces`,
//! `query --displays`, and `query --windows`.  A record is a snapshot: it is
//! accurate at the moment of the query and goes stale as soon as anything
//! moves.  Only the `uuid` (spaces, displays) and `id` (windows) fields are
//! permanent.
//!
//! Unknown fields are ignored so newer yabai releases can add fields
//! without breaking deserialization.

use serde::Deserialize;

/// Snapshot of one space, as reported by `query --spaces`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SpaceRecord {
    pub id: u64,
    /// Permanent identifier.  Never reused, but not accepted as a selector.
    pub uuid: String,
    /// Mission-control index (1-based).  Shifts whenever any space on the
    /// same display moves.
    pub index: u32,
    /// Empty string when the space is unlabeled.
    #[serde(default)]
    pub label: String,
    /// Layout type (`bsp`, `stack`, or `float`).
    #[serde(rename = "type", default)]
    pub layout: String,
    /// Arrangement index of the owning display.
    pub display: u32,
    /// Ids of the windows on this space.
    #[serde(default)]
    pub windows: Vec<u32>,
    #[serde(default)]
    pub first_window: u32,
    #[serde(default)]
    pub last_window: u32,
    #[serde(default)]
    pub has_focus: bool,
    #[serde(default)]
    pub is_visible: bool,
    #[serde(default)]
    pub is_native_fullscreen: bool,
}

/// Display frame in global coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Snapshot of one display, as reported by `query --displays`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DisplayRecord {
    pub id: u64,
    /// Permanent identifier.
    pub uuid: String,
    /// Arrangement index (1-based).  Stable while no display is added or
    /// removed.
    pub index: u32,
    #[serde(default)]
    pub frame: Frame,
    /// Mission-control indices of the spaces on this display, in order.
    /// Never empty — the window manager refuses to leave a display without
    /// a space.
    pub spaces: Vec<u32>,
    #[serde(default)]
    pub has_focus: bool,
}

/// Snapshot of one window, as reported by `query --windows`.
///
/// Only the fields spacekeep acts on; yabai reports many more.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WindowRecord {
    /// Permanent identifier, valid as a selector for the window's lifetime.
    pub id: u32,
    #[serde(default)]
    pub pid: i32,
    #[serde(default)]
    pub app: String,
    #[serde(default)]
    pub title: String,
    /// Arrangement index of the display the window is on.
    pub display: u32,
    /// Mission-control index of the space the window is on.
    pub space: u32,
    #[serde(default)]
    pub has_focus: bool,
    #[serde(default)]
    pub is_visible: bool,
    #[serde(default)]
    pub is_minimized: bool,
    #[serde(default)]
    pub is_floating: bool,
}

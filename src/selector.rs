//! Selectors — the vocabulary yabai understands when a command names a
//! space, display, or window.
//!
//! A selector is only valid at the instant it is used: indices shift when
//! spaces move, and labels change when the user relabels.  The handle types
//! ([`Space`](crate::space::Space), [`Display`](crate::display::Display))
//! produce a currently-correct selector on demand; this module only defines
//! the selector values themselves plus the label rules that keep the two
//! namespaces (labels and indices) from colliding.

use crate::error::Error;
use std::fmt;

/// Selector keywords reserved by the window manager.  A label must never
/// equal one of these, otherwise it could not be told apart from a relative
/// selector.
pub const RESERVED_SELECTORS: [&str; 6] = ["prev", "next", "first", "last", "recent", "mouse"];

/// Ways to name a space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpaceSelector {
    /// The currently focused space (the empty selector).
    Focused,
    /// By label.  Only unambiguous because labels are globally unique.
    Label(String),
    /// By mission-control index (1-based, not stable across moves).
    Index(u32),
    Prev,
    Next,
    First,
    Last,
    Recent,
    Mouse,
}

impl SpaceSelector {
    /// Parse user input.  Empty means "focused", a reserved keyword selects
    /// relatively, digits select by index, anything else is a label.
    pub fn parse(s: &str) -> Self {
        let t = s.trim();
        if t.is_empty() {
            return SpaceSelector::Focused;
        }
        match t.to_ascii_lowercase().as_str() {
            "prev" => return SpaceSelector::Prev,
            "next" => return SpaceSelector::Next,
            "first" => return SpaceSelector::First,
            "last" => return SpaceSelector::Last,
            "recent" => return SpaceSelector::Recent,
            "mouse" => return SpaceSelector::Mouse,
            _ => {}
        }
        if let Ok(index) = t.parse::<u32>() {
            SpaceSelector::Index(index)
        } else {
            SpaceSelector::Label(t.to_string())
        }
    }
}

impl fmt::Display for SpaceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpaceSelector::Focused => write!(f, ""),
            SpaceSelector::Label(label) => write!(f, "{}", label),
            SpaceSelector::Index(index) => write!(f, "{}", index),
            SpaceSelector::Prev => write!(f, "prev"),
            SpaceSelector::Next => write!(f, "next"),
            SpaceSelector::First => write!(f, "first"),
            SpaceSelector::Last => write!(f, "last"),
            SpaceSelector::Recent => write!(f, "recent"),
            SpaceSelector::Mouse => write!(f, "mouse"),
        }
    }
}

/// Ways to name a display.  Displays carry no labels; the arrangement index
/// is the only absolute selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplaySelector {
    /// The display of the currently focused space (the empty selector).
    Focused,
    /// By arrangement index (1-based, stable while no display is added or
    /// removed).
    Index(u32),
    Prev,
    Next,
    First,
    Last,
    Recent,
    Mouse,
}

impl DisplaySelector {
    /// Parse user input.  Unlike spaces there is no label fallback, so an
    /// unrecognised word is a validation error.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let t = s.trim();
        if t.is_empty() {
            return Ok(DisplaySelector::Focused);
        }
        match t.to_ascii_lowercase().as_str() {
            "prev" => return Ok(DisplaySelector::Prev),
            "next" => return Ok(DisplaySelector::Next),
            "first" => return Ok(DisplaySelector::First),
            "last" => return Ok(DisplaySelector::Last),
            "recent" => return Ok(DisplaySelector::Recent),
            "mouse" => return Ok(DisplaySelector::Mouse),
            _ => {}
        }
        t.parse::<u32>()
            .map(DisplaySelector::Index)
            .map_err(|_| Error::Validation(format!("not a display selector: {:?}", s)))
    }
}

impl fmt::Display for DisplaySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplaySelector::Focused => write!(f, ""),
            DisplaySelector::Index(index) => write!(f, "{}", index),
            DisplaySelector::Prev => write!(f, "prev"),
            DisplaySelector::Next => write!(f, "next"),
            DisplaySelector::First => write!(f, "first"),
            DisplaySelector::Last => write!(f, "last"),
            DisplaySelector::Recent => write!(f, "recent"),
            DisplaySelector::Mouse => write!(f, "mouse"),
        }
    }
}

/// Ways to name a window.  Window ids are permanent, so no caching dance is
/// needed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowSelector {
    /// The currently focused window (the empty selector).
    Focused,
    /// By window id.
    Id(u32),
}

impl fmt::Display for WindowSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowSelector::Focused => write!(f, ""),
            WindowSelector::Id(id) => write!(f, "{}", id),
        }
    }
}

/// Check that `label` may be assigned to a space.
///
/// A label must be non-empty, must not shadow a reserved selector keyword,
/// must not be purely numeric (it would collide with index selectors), and
/// must not already be in use.  `existing` is the set of labels currently
/// assigned to *other* spaces; comparison is case-insensitive because yabai
/// selectors are.
///
/// Fails with a validation error before any command reaches the window
/// manager.
pub fn validate_label<'a>(
    label: &str,
    existing: impl IntoIterator<Item = &'a str>,
) -> Result<(), Error> {
    let t = label.trim();
    if t.is_empty() {
        return Err(Error::Validation(
            "label cannot be the empty string".to_string(),
        ));
    }
    let lower = t.to_ascii_lowercase();
    if RESERVED_SELECTORS.contains(&lower.as_str()) {
        return Err(Error::Validation(format!(
            "label {:?} is a reserved selector keyword",
            t
        )));
    }
    if t.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::Validation(format!(
            "label {:?} cannot be a number",
            t
        )));
    }
    for used in existing {
        if used.eq_ignore_ascii_case(t) {
            return Err(Error::Validation(format!("label {:?} already exists", t)));
        }
    }
    Ok(())
}

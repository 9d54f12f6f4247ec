//! Stable space handles.
//!
//! Keeping track of a space is the hard part of this whole program:
//!
//! - not every space has a label;
//! - the label changes when the space is relabeled;
//! - the mission-control index changes when any space on the display moves;
//! - the uuid is permanent but yabai does not accept it as a selector.
//!
//! [`Space`] therefore caches the label and the uuid at resolution time.
//! A labeled space is addressed by its label with no further queries; an
//! unlabeled one needs a fresh uuid → index translation per use.  The cache
//! is updated on [`set_label`](Space::set_label), which is what keeps the
//! fast path correct after relabeling.

use crate::display::Display;
use crate::error::Error;
use crate::records::SpaceRecord;
use crate::selector::{validate_label, DisplaySelector, SpaceSelector};
use crate::traits::{FailureKind, WindowManager, WmError};
use log::{debug, info};
use std::fmt;

/// A stable reference to one space.
///
/// The handle stays usable across moves, relabels (through this handle),
/// and display changes.  If the space is destroyed externally, every
/// subsequent use fails with an identity error instead of silently acting
/// on whichever space inherited the index.
pub struct Space<'w, W: WindowManager> {
    wm: &'w W,
    /// Cached label; empty when the space is unlabeled.
    label: String,
    /// Permanent identifier, the fallback when no label is available.
    uuid: String,
}

impl<'w, W: WindowManager> Space<'w, W> {
    /// Resolve a selector to a handle with a single query.
    pub fn get(wm: &'w W, sel: &SpaceSelector) -> Result<Self, Error> {
        let record = wm.space(sel)?;
        Ok(Self::from_record(wm, &record))
    }

    /// Handle for the currently focused space.
    pub fn focused(wm: &'w W) -> Result<Self, Error> {
        Self::get(wm, &SpaceSelector::Focused)
    }

    /// Handles for all spaces, in mission-control order.
    pub fn all(wm: &'w W) -> Result<Vec<Self>, Error> {
        let records = wm.spaces()?;
        Ok(records.iter().map(|r| Self::from_record(wm, r)).collect())
    }

    /// Build a handle from an already-fetched record.
    pub(crate) fn from_record(wm: &'w W, record: &SpaceRecord) -> Self {
        Self {
            wm,
            label: record.label.clone(),
            uuid: record.uuid.clone(),
        }
    }

    pub(crate) fn wm(&self) -> &'w W {
        self.wm
    }

    /// The cached label (empty when unlabeled).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The permanent identifier.
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// A currently-correct, unique selector for this space, with minimal
    /// queries.
    ///
    /// Labeled spaces resolve to their label without touching the window
    /// manager; unlabeled spaces need one query to translate the uuid into
    /// the current mission-control index.  Fails with an identity error if
    /// the uuid can no longer be found (the space was destroyed).
    pub fn current_selector(&self) -> Result<SpaceSelector, Error> {
        if !self.label.is_empty() {
            return Ok(SpaceSelector::Label(self.label.clone()));
        }
        let records = self.wm.spaces()?;
        records
            .iter()
            .find(|r| r.uuid == self.uuid)
            .map(|r| SpaceSelector::Index(r.index))
            .ok_or_else(|| Error::Identity(format!("cannot find space with uuid {}", self.uuid)))
    }

    /// Fresh snapshot of this space.
    pub fn props(&self) -> Result<SpaceRecord, Error> {
        let sel = self.current_selector()?;
        Ok(self.wm.space(&sel)?)
    }

    /// Handle for the display this space currently lives on.
    pub fn display(&self) -> Result<Display<'w, W>, Error> {
        let props = self.props()?;
        Display::get(self.wm, &DisplaySelector::Index(props.display))
    }

    /// Focus this space.  Focusing the already-focused space is a no-op.
    pub fn focus(&self) -> Result<(), Error> {
        let sel = self.current_selector()?;
        allow(
            FailureKind::AlreadyFocused,
            self.wm.focus_space(&sel),
        )
    }

    /// Move this space to the position of `target` (same display).  Moving
    /// it to the position it already occupies is a no-op.
    pub fn move_to(&self, target: &SpaceSelector) -> Result<(), Error> {
        let sel = self.current_selector()?;
        allow(FailureKind::SelfTarget, self.wm.move_space(&sel, target))
    }

    /// Swap this space with `target` (same display).  Swapping it with
    /// itself is a no-op.
    pub fn swap_with(&self, target: &SpaceSelector) -> Result<(), Error> {
        let sel = self.current_selector()?;
        allow(FailureKind::SelfTarget, self.wm.swap_space(&sel, target))
    }

    /// Send this space to another display, appended after that display's
    /// spaces.  Sending it to the display it is on is a no-op.
    pub fn send_to_display(&self, display: &DisplaySelector) -> Result<(), Error> {
        let sel = self.current_selector()?;
        allow(
            FailureKind::AlreadyOnDisplay,
            self.wm.send_space_to_display(&sel, display),
        )
    }

    /// Relabel this space.
    ///
    /// The label is validated first — non-empty, not a reserved selector
    /// keyword, not numeric, not already used by another space — so an
    /// invalid label never reaches the window manager.  On success the
    /// cached label is updated; this is what keeps
    /// [`current_selector`](Space::current_selector) correct afterwards.
    pub fn set_label(&mut self, label: &str) -> Result<(), Error> {
        let others = self.wm.spaces()?;
        validate_label(
            label,
            others
                .iter()
                .filter(|r| r.uuid != self.uuid)
                .map(|r| r.label.as_str()),
        )?;
        let sel = self.current_selector()?;
        self.wm.label_space(&sel, label)?;
        debug!("space {} labeled {:?}", self.uuid, label);
        self.label = label.to_string();
        Ok(())
    }

    /// Create a new space on the same display as this space, returning a
    /// handle to it.  The new space is unlabeled and lands at the end of
    /// the display.
    pub fn create_here(&self) -> Result<Space<'w, W>, Error> {
        self.display()?.create_space()
    }

    /// Destroy this space, consuming the handle.
    ///
    /// Fails if this is the last space on its display — the window manager
    /// never leaves a display without spaces.
    pub fn destroy(self) -> Result<(), Error> {
        let sel = self.current_selector()?;
        info!("destroying space {}", self.describe());
        Ok(self.wm.destroy_space(&sel)?)
    }

    /// Short human-readable description for log lines.
    pub fn describe(&self) -> String {
        if self.label.is_empty() {
            format!("(unlabeled, uuid {})", self.uuid)
        } else {
            format!("{:?}", self.label)
        }
    }
}

/// Treat a rejection of the given kind as a benign no-op; everything else
/// propagates untouched.
fn allow(kind: FailureKind, result: Result<(), WmError>) -> Result<(), Error> {
    match result {
        Err(err) if err.rejection() == Some(kind) => {
            debug!("no-op: {}", err);
            Ok(())
        }
        other => Ok(other?),
    }
}

impl<W: WindowManager> PartialEq for Space<'_, W> {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl<W: WindowManager> fmt::Debug for Space<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Space")
            .field("label", &self.label)
            .field("uuid", &self.uuid)
            .finish()
    }
}

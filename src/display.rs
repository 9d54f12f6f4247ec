//! Stable display handles and the display accessor.
//!
//! A display is simpler than a space: it has no label and its arrangement
//! index only changes when displays are added or removed.  The handle still
//! caches the uuid rather than the index, so it keeps resolving correctly
//! across display reconfiguration.
//!
//! Everything here queries fresh on every call.  The space order on a
//! display is exactly the thing the sort and relocation algorithms must
//! observe consistently, so nothing is cached.

use crate::error::Error;
use crate::records::{DisplayRecord, SpaceRecord};
use crate::selector::{DisplaySelector, WindowSelector};
use crate::space::Space;
use crate::traits::{FailureKind, WindowManager};
use crate::window::Window;

/// A stable reference to one display.
pub struct Display<'w, W: WindowManager> {
    wm: &'w W,
    /// Permanent identifier.
    uuid: String,
}

impl<'w, W: WindowManager> Display<'w, W> {
    /// Resolve a selector to a handle with a single query.
    pub fn get(wm: &'w W, sel: &DisplaySelector) -> Result<Self, Error> {
        let record = wm.display(sel)?;
        Ok(Self::from_record(wm, &record))
    }

    /// Like [`get`](Display::get), but a selector that does not resolve to
    /// any display yields `None` instead of an error.
    pub fn try_get(wm: &'w W, sel: &DisplaySelector) -> Result<Option<Self>, Error> {
        match wm.display(sel) {
            Ok(record) => Ok(Some(Self::from_record(wm, &record))),
            Err(err) if err.rejection() == Some(FailureKind::NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Handle for the display of the currently focused space.
    pub fn focused(wm: &'w W) -> Result<Self, Error> {
        Self::get(wm, &DisplaySelector::Focused)
    }

    /// Handles for all displays, in arrangement order.
    pub fn all(wm: &'w W) -> Result<Vec<Self>, Error> {
        let records = wm.displays()?;
        Ok(records.iter().map(|r| Self::from_record(wm, r)).collect())
    }

    fn from_record(wm: &'w W, record: &DisplayRecord) -> Self {
        Self {
            wm,
            uuid: record.uuid.clone(),
        }
    }

    pub(crate) fn wm(&self) -> &'w W {
        self.wm
    }

    /// The permanent identifier.
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// Fresh snapshot of this display.
    ///
    /// Fails with an identity error if the display is gone (unplugged).
    pub fn props(&self) -> Result<DisplayRecord, Error> {
        let records = self.wm.displays()?;
        records
            .into_iter()
            .find(|r| r.uuid == self.uuid)
            .ok_or_else(|| Error::Identity(format!("cannot find display with uuid {}", self.uuid)))
    }

    /// A currently-correct selector for this display.
    pub fn current_selector(&self) -> Result<DisplaySelector, Error> {
        Ok(DisplaySelector::Index(self.props()?.index))
    }

    /// Fresh snapshots of the spaces on this display, in position order.
    pub fn space_records(&self) -> Result<Vec<SpaceRecord>, Error> {
        let props = self.props()?;
        let mut records: Vec<SpaceRecord> = self
            .wm
            .spaces()?
            .into_iter()
            .filter(|r| r.display == props.index)
            .collect();
        records.sort_by_key(|r| r.index);
        Ok(records)
    }

    /// Handles for the spaces on this display, in current position order.
    /// Always a fresh query.
    pub fn spaces(&self) -> Result<Vec<Space<'w, W>>, Error> {
        let records = self.space_records()?;
        Ok(records
            .iter()
            .map(|r| Space::from_record(self.wm, r))
            .collect())
    }

    /// Handles for the windows on this display.
    pub fn windows(&self) -> Result<Vec<Window<'w, W>>, Error> {
        let props = self.props()?;
        let records = self.wm.windows()?;
        Ok(records
            .iter()
            .filter(|r| r.display == props.index)
            .map(|r| Window::from_record(self.wm, r))
            .collect())
    }

    /// Focus this display.
    pub fn focus(&self) -> Result<(), Error> {
        let sel = self.current_selector()?;
        Ok(self.wm.focus_display(&sel)?)
    }

    /// Create a new space at the end of this display, returning a handle
    /// to it.
    pub fn create_space(&self) -> Result<Space<'w, W>, Error> {
        let sel = self.current_selector()?;
        self.wm.create_space(&sel)?;
        // The new space is the last one on this display.
        let last = self.props()?.spaces.last().copied().ok_or_else(|| {
            Error::Identity(format!("display {} reports no spaces", self.uuid))
        })?;
        Space::get(self.wm, &crate::selector::SpaceSelector::Index(last))
    }

    /// Handle for the window named by `sel` if it is on this display.
    pub fn window(&self, sel: &WindowSelector) -> Result<Option<Window<'w, W>>, Error> {
        let props = self.props()?;
        let record = self.wm.window(sel)?;
        Ok((record.display == props.index).then(|| Window::from_record(self.wm, &record)))
    }
}

impl<W: WindowManager> PartialEq for Display<'_, W> {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl<W: WindowManager> std::fmt::Debug for Display<'_, W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Display").field("uuid", &self.uuid).finish()
    }
}

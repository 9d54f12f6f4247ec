//! Window handles.
//!
//! Windows are the easy case: the window id is permanent *and* accepted as
//! a selector, so the handle is just the id and there is no caching dance.
//! Only the operations spacekeep actually needs are exposed — moving a
//! window to a space and reading its snapshot.

use crate::error::Error;
use crate::records::WindowRecord;
use crate::selector::{SpaceSelector, WindowSelector};
use crate::traits::WindowManager;
use std::fmt;

/// A stable reference to one window.
pub struct Window<'w, W: WindowManager> {
    wm: &'w W,
    id: u32,
}

impl<'w, W: WindowManager> Window<'w, W> {
    /// Resolve a selector to a handle with a single query.
    pub fn get(wm: &'w W, sel: &WindowSelector) -> Result<Self, Error> {
        let record = wm.window(sel)?;
        Ok(Self::from_record(wm, &record))
    }

    /// Handle for the currently focused window.
    pub fn focused(wm: &'w W) -> Result<Self, Error> {
        Self::get(wm, &WindowSelector::Focused)
    }

    pub(crate) fn from_record(wm: &'w W, record: &WindowRecord) -> Self {
        Self { wm, id: record.id }
    }

    /// The permanent window id.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Fresh snapshot of this window.
    ///
    /// Fails with an identity error once the window is closed.
    pub fn props(&self) -> Result<WindowRecord, Error> {
        match self.wm.window(&WindowSelector::Id(self.id)) {
            Ok(record) => Ok(record),
            Err(err) if err.rejection().is_some() => Err(Error::Identity(format!(
                "cannot find window with id {}",
                self.id
            ))),
            Err(err) => Err(err.into()),
        }
    }

    /// Send this window to the given space.
    pub fn send_to_space(&self, space: &SpaceSelector) -> Result<(), Error> {
        Ok(self
            .wm
            .send_window_to_space(&WindowSelector::Id(self.id), space)?)
    }
}

impl<W: WindowManager> PartialEq for Window<'_, W> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<W: WindowManager> fmt::Debug for Window<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window").field("id", &self.id).finish()
    }
}

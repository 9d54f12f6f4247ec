//! In-place label-order sort of one display's spaces.
//!
//! The engine computes the target order as a *stable* sort by rank (equal
//! ranks keep their current relative order, which is what makes a second
//! sort a no-op) and then replays it with the fewest moves: nothing is
//! touched before the first out-of-place space, and the final slot is never
//! moved into because placing everything else forces it.
//!
//! The rank function is passed in explicitly rather than read from global
//! state, so the engine can be exercised with any injected ranking.

use crate::display::Display;
use crate::error::Error;
use crate::selector::SpaceSelector;
use crate::space::Space;
use crate::traits::WindowManager;
use log::{debug, info};

/// Sort key of one space, derived from its label.
///
/// Spaces whose label is unknown to the ordering (including unlabeled
/// spaces) rank after every known label and keep their relative order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rank {
    /// Position in the wanted order.
    Ranked(usize),
    /// Not part of the wanted order; sorts last.
    Unranked,
}

impl Rank {
    /// Whether this is the "not found" sentinel.
    pub fn is_unranked(self) -> bool {
        self == Rank::Unranked
    }
}

/// Bring the spaces on `display` into the order given by `rank_of`.
///
/// Issues one move per space from the first divergence onward (at most
/// `n - 1` moves) and none at all when the display is already in order.
/// Some of those moves can be to a position the space already occupies —
/// the window manager treats that as a benign no-op and so does this
/// engine.
pub fn sort_display<W, F>(display: &Display<'_, W>, rank_of: F) -> Result<(), Error>
where
    W: WindowManager,
    F: Fn(&str) -> Rank,
{
    let current = display.space_records()?;
    let mut want = current.clone();
    want.sort_by_key(|r| rank_of(&r.label));

    let divergence = current
        .iter()
        .zip(&want)
        .position(|(have, wanted)| have.uuid != wanted.uuid);
    let Some(divergence) = divergence else {
        debug!("display already sorted, no moves");
        return Ok(());
    };

    // The smallest mission-control index occupied by this display.  Every
    // wanted position is an offset from it; indices past the divergence
    // shift with each move, which is why each space is re-addressed through
    // its handle rather than its stale index.
    let base = current[0].index;
    let last = want.len() - 1;
    for (i, record) in want.iter().enumerate().take(last).skip(divergence) {
        let target = base + i as u32;
        let space = Space::from_record(display.wm(), record);
        info!(
            "putting space {} at mission-control index {}",
            space.describe(),
            target
        );
        space.move_to(&SpaceSelector::Index(target))?;
    }
    Ok(())
}

/// Check that the spaces on `display` are in the order given by `rank_of`.
///
/// Read-only: computes the same target order as [`sort_display`] and fails
/// with a verification error carrying the found and expected label
/// sequences if they differ anywhere.
pub fn assert_sorted<W, F>(display: &Display<'_, W>, rank_of: F) -> Result<(), Error>
where
    W: WindowManager,
    F: Fn(&str) -> Rank,
{
    let current = display.space_records()?;
    let mut want = current.clone();
    want.sort_by_key(|r| rank_of(&r.label));

    if current.iter().zip(&want).any(|(have, wanted)| have.uuid != wanted.uuid) {
        return Err(Error::Unsorted {
            found: current.into_iter().map(|r| r.label).collect(),
            expected: want.into_iter().map(|r| r.label).collect(),
        });
    }
    Ok(())
}

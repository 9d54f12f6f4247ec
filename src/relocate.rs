//! Cross-display relocation that preserves label order.
//!
//! Sending a space to another display appends it after that display's
//! spaces, which breaks the label order, and it is refused outright when
//! the space is the last one on its display (a display must never be
//! empty).  [`send_to_display_keep_order`] handles both: it computes the
//! order-correct insertion point up front, and when the source display
//! would be emptied it parks a temporary *placeholder* space there first.
//!
//! The placeholder is a scoped resource.  [`PlaceholderGuard`] destroys it
//! on every exit path — explicitly after the compensating move on success,
//! and from `Drop` when any later step fails — so a failure can never leave
//! a stray unlabeled space behind.

use crate::display::Display;
use crate::error::Error;
use crate::selector::DisplaySelector;
use crate::sort::Rank;
use crate::space::Space;
use crate::traits::WindowManager;
use log::{debug, info, warn};

/// Move `space` to the display named by `target`, inserting it at the
/// position its rank calls for.
///
/// Benign situations resolve to a successful no-op without issuing a
/// single command: the space already lives on the target display, or the
/// target selector does not resolve to any display ("stay put").
///
/// When the source display holds only this space, a placeholder is created
/// there before the move, and afterwards the space that was last on the
/// target display *before* the move is pulled back to the source to
/// replace it; only then is the placeholder destroyed.
pub fn send_to_display_keep_order<W, F>(
    space: &Space<'_, W>,
    target: &DisplaySelector,
    rank_of: F,
) -> Result<(), Error>
where
    W: WindowManager,
    F: Fn(&str) -> Rank,
{
    let wm = space.wm();

    let Some(target) = Display::try_get(wm, target)? else {
        debug!("target display {} does not exist, staying put", target);
        return Ok(());
    };
    let target_index = target.props()?.index;

    let source_index = space.props()?.display;
    if source_index == target_index {
        debug!("space {} already on display {}", space.describe(), target_index);
        return Ok(());
    }
    let source = Display::get(wm, &DisplaySelector::Index(source_index))?;

    // A display must never be empty: if this is the only space on its
    // display, park a placeholder there before moving it away.
    let guard = if source.props()?.spaces.len() == 1 {
        info!("creating placeholder on display {}", source_index);
        Some(PlaceholderGuard::new(source.create_space()?))
    } else {
        None
    };

    let target_records = target.space_records()?;
    let moving_rank = rank_of(space.label());
    // First space ranked after the mover (or outside the order entirely):
    // the mover is inserted right before it.  None means "append".
    let insert_before = target_records
        .iter()
        .find(|r| {
            let rank = rank_of(&r.label);
            rank > moving_rank || rank.is_unranked()
        })
        .cloned();
    // Captured before the move: when compensating, the space that was last
    // on the target at this instant is the one pulled back to the source.
    let pull_back = target_records.last().cloned();

    info!(
        "sending space {} to display {}",
        space.describe(),
        target_index
    );
    space.send_to_display(&DisplaySelector::Index(target_index))?;

    if let Some(before) = insert_before {
        let before = Space::from_record(wm, &before);
        space.move_to(&before.current_selector()?)?;
    }

    if let Some(guard) = guard {
        if let Some(record) = pull_back {
            let back = Space::from_record(wm, &record);
            info!(
                "pulling space {} back to display {}",
                back.describe(),
                source_index
            );
            back.send_to_display(&DisplaySelector::Index(source_index))?;
        }
        guard.finish()?;
    }
    Ok(())
}

/// Owns a placeholder space and guarantees its destruction.
///
/// `finish` is the success path: destroy now and surface any error.  If
/// the guard is dropped without `finish` — an earlier step failed — the
/// placeholder is still destroyed, with the error downgraded to a warning
/// because the original failure is already propagating.
struct PlaceholderGuard<'w, W: WindowManager> {
    space: Option<Space<'w, W>>,
}

impl<'w, W: WindowManager> PlaceholderGuard<'w, W> {
    fn new(space: Space<'w, W>) -> Self {
        Self { space: Some(space) }
    }

    fn finish(mut self) -> Result<(), Error> {
        match self.space.take() {
            Some(space) => space.destroy(),
            None => Ok(()),
        }
    }
}

impl<W: WindowManager> Drop for PlaceholderGuard<'_, W> {
    fn drop(&mut self) {
        if let Some(space) = self.space.take() {
            if let Err(err) = space.destroy() {
                warn!("failed to destroy placeholder space: {}", err);
            }
        }
    }
}

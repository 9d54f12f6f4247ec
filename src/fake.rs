//! In-memory window manager used by the test suites.
//!
//! Models the parts of yabai the crate relies on: displays hold ordered
//! spaces, mission-control indices are global and 1-based, moves are
//! remove-and-insert, and a display is never left without a space — the
//! model *panics* if a command would empty one, so every test doubles as
//! an invariant check.
//!
//! Commands are recorded (queries are only counted), which lets tests
//! assert that fast paths issue zero commands and that sorting issues
//! exactly the expected moves.  `fail_next_matching` injects one failure
//! into the next matching command to exercise cleanup paths.

use crate::records::{DisplayRecord, Frame, SpaceRecord, WindowRecord};
use crate::selector::{DisplaySelector, SpaceSelector, WindowSelector};
use crate::traits::{FailureKind, WindowManager, WmError, WmFailure};
use std::cell::{Cell, RefCell};

struct FakeSpace {
    id: u64,
    uuid: String,
    label: String,
}

struct FakeDisplay {
    uuid: String,
    spaces: Vec<FakeSpace>,
}

/// Snapshot of one space's current location, used internally.
#[derive(Clone)]
struct Located {
    display: u32,
    global: u32,
    pos: usize,
    id: u64,
    uuid: String,
    label: String,
}

pub(crate) struct FakeWm {
    displays: RefCell<Vec<FakeDisplay>>,
    windows: RefCell<Vec<WindowRecord>>,
    commands: RefCell<Vec<String>>,
    queries: Cell<usize>,
    fail_matching: RefCell<Option<String>>,
    next_id: Cell<u64>,
    /// uuid of the focused space.
    focused: RefCell<String>,
}

impl FakeWm {
    /// Build a window manager with one entry per display; each entry lists
    /// the labels of its spaces in order (`""` = unlabeled).
    pub fn new(layout: &[&[&str]]) -> Self {
        let mut next_id = 1;
        let displays: Vec<FakeDisplay> = layout
            .iter()
            .enumerate()
            .map(|(d, labels)| FakeDisplay {
                uuid: format!("display-{}", d + 1),
                spaces: labels
                    .iter()
                    .map(|label| {
                        let id = next_id;
                        next_id += 1;
                        FakeSpace {
                            id,
                            uuid: format!("space-{}", id),
                            label: label.to_string(),
                        }
                    })
                    .collect(),
            })
            .collect();
        assert!(
            displays.iter().all(|d| !d.spaces.is_empty()),
            "every display needs at least one space"
        );
        let focused = displays[0].spaces[0].uuid.clone();
        Self {
            displays: RefCell::new(displays),
            windows: RefCell::new(Vec::new()),
            commands: RefCell::new(Vec::new()),
            queries: Cell::new(0),
            fail_matching: RefCell::new(None),
            next_id: Cell::new(next_id),
            focused: RefCell::new(focused),
        }
    }

    //  Test-support surface

    /// Labels on a display, in position order.
    pub fn labels_on(&self, display: u32) -> Vec<String> {
        self.displays.borrow()[display as usize - 1]
            .spaces
            .iter()
            .map(|s| s.label.clone())
            .collect()
    }

    /// Labels of every space, in mission-control order.
    pub fn all_labels(&self) -> Vec<String> {
        self.flat().into_iter().map(|l| l.label).collect()
    }

    /// Number of unlabeled spaces anywhere.
    pub fn unlabeled_count(&self) -> usize {
        self.flat().iter().filter(|l| l.label.is_empty()).count()
    }

    /// Every command issued so far, oldest first.
    pub fn commands(&self) -> Vec<String> {
        self.commands.borrow().clone()
    }

    pub fn command_count(&self) -> usize {
        self.commands.borrow().len()
    }

    /// Number of `--move` commands issued so far.
    pub fn moves_issued(&self) -> usize {
        self.commands
            .borrow()
            .iter()
            .filter(|c| c.contains("--move"))
            .count()
    }

    pub fn query_count(&self) -> usize {
        self.queries.get()
    }

    /// Make the next command whose rendered form contains `pattern` fail
    /// with an unclassified rejection.
    pub fn fail_next_matching(&self, pattern: &str) {
        *self.fail_matching.borrow_mut() = Some(pattern.to_string());
    }

    /// Remove a space without going through a command, as if the user
    /// destroyed it behind our back.
    pub fn force_remove_index(&self, global: u32) {
        let located = self.locate(&SpaceSelector::Index(global)).expect("index exists");
        self.displays.borrow_mut()[located.display as usize - 1]
            .spaces
            .remove(located.pos);
        self.assert_invariant();
    }

    pub fn add_window(
        &self,
        id: u32,
        app: &str,
        title: &str,
        display: u32,
        space: u32,
        has_focus: bool,
    ) {
        self.windows.borrow_mut().push(WindowRecord {
            id,
            pid: 1000 + id as i32,
            app: app.to_string(),
            title: title.to_string(),
            display,
            space,
            has_focus,
            is_visible: true,
            is_minimized: false,
            is_floating: false,
        });
    }

    pub fn remove_window(&self, id: u32) {
        self.windows.borrow_mut().retain(|w| w.id != id);
    }

    //  Internals

    fn flat(&self) -> Vec<Located> {
        let mut out = Vec::new();
        let mut global = 1;
        for (d, display) in self.displays.borrow().iter().enumerate() {
            for (pos, space) in display.spaces.iter().enumerate() {
                out.push(Located {
                    display: d as u32 + 1,
                    global,
                    pos,
                    id: space.id,
                    uuid: space.uuid.clone(),
                    label: space.label.clone(),
                });
                global += 1;
            }
        }
        out
    }

    fn not_found(what: &str) -> WmError {
        WmFailure::new(
            FailureKind::NotFound,
            format!("could not locate the selected {}.", what),
        )
        .into()
    }

    fn locate(&self, sel: &SpaceSelector) -> Result<Located, WmError> {
        let flat = self.flat();
        let focused = self.focused.borrow().clone();
        let found = match sel {
            SpaceSelector::Focused => flat.iter().find(|l| l.uuid == focused),
            SpaceSelector::Label(label) => flat.iter().find(|l| &l.label == label),
            SpaceSelector::Index(index) => flat.iter().find(|l| l.global == *index),
            SpaceSelector::First => flat.first(),
            SpaceSelector::Last => flat.last(),
            SpaceSelector::Prev => {
                let here = flat.iter().position(|l| l.uuid == focused);
                here.and_then(|p| p.checked_sub(1)).and_then(|p| flat.get(p))
            }
            SpaceSelector::Next => {
                let here = flat.iter().position(|l| l.uuid == focused);
                here.and_then(|p| flat.get(p + 1))
            }
            SpaceSelector::Recent | SpaceSelector::Mouse => None,
        };
        found.cloned().ok_or_else(|| Self::not_found("space"))
    }

    fn locate_display(&self, sel: &DisplaySelector) -> Result<u32, WmError> {
        let count = self.displays.borrow().len() as u32;
        match sel {
            DisplaySelector::Focused => Ok(self.locate(&SpaceSelector::Focused)?.display),
            DisplaySelector::Index(index) if (1..=count).contains(index) => Ok(*index),
            DisplaySelector::First => Ok(1),
            DisplaySelector::Last => Ok(count),
            _ => Err(Self::not_found("display")),
        }
    }

    fn space_record(&self, located: &Located) -> SpaceRecord {
        SpaceRecord {
            id: located.id,
            uuid: located.uuid.clone(),
            index: located.global,
            label: located.label.clone(),
            layout: "bsp".to_string(),
            display: located.display,
            windows: Vec::new(),
            first_window: 0,
            last_window: 0,
            has_focus: *self.focused.borrow() == located.uuid,
            is_visible: false,
            is_native_fullscreen: false,
        }
    }

    fn display_record(&self, index: u32) -> DisplayRecord {
        let focused_display = self
            .locate(&SpaceSelector::Focused)
            .map(|l| l.display)
            .unwrap_or(0);
        DisplayRecord {
            id: 100 + index as u64,
            uuid: self.displays.borrow()[index as usize - 1].uuid.clone(),
            index,
            frame: Frame::default(),
            spaces: self
                .flat()
                .into_iter()
                .filter(|l| l.display == index)
                .map(|l| l.global)
                .collect(),
            has_focus: focused_display == index,
        }
    }

    /// Record the command and apply any injected failure.
    fn command(&self, rendered: String) -> Result<(), WmError> {
        self.commands.borrow_mut().push(rendered.clone());
        let matched = self
            .fail_matching
            .borrow()
            .as_ref()
            .is_some_and(|pattern| rendered.contains(pattern));
        if matched {
            *self.fail_matching.borrow_mut() = None;
            return Err(WmFailure::new(
                FailureKind::Other,
                format!("injected failure for {:?}", rendered),
            )
            .into());
        }
        Ok(())
    }

    fn assert_invariant(&self) {
        assert!(
            self.displays.borrow().iter().all(|d| !d.spaces.is_empty()),
            "a display was left without spaces"
        );
    }

    fn bump_queries(&self) {
        self.queries.set(self.queries.get() + 1);
    }
}

impl WindowManager for FakeWm {
    fn space(&self, sel: &SpaceSelector) -> Result<SpaceRecord, WmError> {
        self.bump_queries();
        let located = self.locate(sel)?;
        Ok(self.space_record(&located))
    }

    fn spaces(&self) -> Result<Vec<SpaceRecord>, WmError> {
        self.bump_queries();
        Ok(self.flat().iter().map(|l| self.space_record(l)).collect())
    }

    fn display(&self, sel: &DisplaySelector) -> Result<DisplayRecord, WmError> {
        self.bump_queries();
        let index = self.locate_display(sel)?;
        Ok(self.display_record(index))
    }

    fn displays(&self) -> Result<Vec<DisplayRecord>, WmError> {
        self.bump_queries();
        let count = self.displays.borrow().len() as u32;
        Ok((1..=count).map(|i| self.display_record(i)).collect())
    }

    fn window(&self, sel: &WindowSelector) -> Result<WindowRecord, WmError> {
        self.bump_queries();
        let windows = self.windows.borrow();
        let found = match sel {
            WindowSelector::Focused => windows.iter().find(|w| w.has_focus),
            WindowSelector::Id(id) => windows.iter().find(|w| w.id == *id),
        };
        found.cloned().ok_or_else(|| Self::not_found("window"))
    }

    fn windows(&self) -> Result<Vec<WindowRecord>, WmError> {
        self.bump_queries();
        Ok(self.windows.borrow().clone())
    }

    fn focus_space(&self, sel: &SpaceSelector) -> Result<(), WmError> {
        self.command(format!("space --focus {}", sel))?;
        let located = self.locate(sel)?;
        if *self.focused.borrow() == located.uuid {
            return Err(
                WmFailure::classify("cannot focus an already focused space.").into(),
            );
        }
        *self.focused.borrow_mut() = located.uuid;
        Ok(())
    }

    fn create_space(&self, display: &DisplaySelector) -> Result<(), WmError> {
        self.command(format!("space --create {}", display))?;
        let index = self.locate_display(display)?;
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.displays.borrow_mut()[index as usize - 1]
            .spaces
            .push(FakeSpace {
                id,
                uuid: format!("space-{}", id),
                label: String::new(),
            });
        Ok(())
    }

    fn destroy_space(&self, sel: &SpaceSelector) -> Result<(), WmError> {
        self.command(format!("space --destroy {}", sel))?;
        let located = self.locate(sel)?;
        {
            let mut displays = self.displays.borrow_mut();
            let display = &mut displays[located.display as usize - 1];
            if display.spaces.len() == 1 {
                return Err(WmFailure::new(
                    FailureKind::Other,
                    "cannot destroy the last space of a display.",
                )
                .into());
            }
            display.spaces.remove(located.pos);
        }
        if *self.focused.borrow() == located.uuid {
            let first = self.displays.borrow()[located.display as usize - 1].spaces[0]
                .uuid
                .clone();
            *self.focused.borrow_mut() = first;
        }
        self.assert_invariant();
        Ok(())
    }

    fn move_space(&self, sel: &SpaceSelector, to: &SpaceSelector) -> Result<(), WmError> {
        self.command(format!("space {} --move {}", sel, to))?;
        let source = self.locate(sel)?;
        let target = self.locate(to)?;
        if source.uuid == target.uuid {
            return Err(WmFailure::classify("cannot move space to itself.").into());
        }
        if source.display != target.display {
            return Err(WmFailure::new(
                FailureKind::Other,
                "acting space and selected space must belong to the same display.",
            )
            .into());
        }
        let mut displays = self.displays.borrow_mut();
        let spaces = &mut displays[source.display as usize - 1].spaces;
        let moved = spaces.remove(source.pos);
        spaces.insert(target.pos, moved);
        Ok(())
    }

    fn swap_space(&self, sel: &SpaceSelector, with: &SpaceSelector) -> Result<(), WmError> {
        self.command(format!("space {} --swap {}", sel, with))?;
        let source = self.locate(sel)?;
        let target = self.locate(with)?;
        if source.uuid == target.uuid {
            return Err(WmFailure::classify("cannot swap space with itself.").into());
        }
        if source.display != target.display {
            return Err(WmFailure::new(
                FailureKind::Other,
                "acting space and selected space must belong to the same display.",
            )
            .into());
        }
        let mut displays = self.displays.borrow_mut();
        displays[source.display as usize - 1]
            .spaces
            .swap(source.pos, target.pos);
        Ok(())
    }

    fn send_space_to_display(
        &self,
        sel: &SpaceSelector,
        display: &DisplaySelector,
    ) -> Result<(), WmError> {
        self.command(format!("space {} --display {}", sel, display))?;
        let located = self.locate(sel)?;
        let target = self.locate_display(display)?;
        if located.display == target {
            return Err(WmFailure::classify(
                "acting space is already located on the given display.",
            )
            .into());
        }
        {
            let mut displays = self.displays.borrow_mut();
            if displays[located.display as usize - 1].spaces.len() == 1 {
                return Err(WmFailure::new(
                    FailureKind::Other,
                    "cannot send the last space of a display.",
                )
                .into());
            }
            let moved = displays[located.display as usize - 1]
                .spaces
                .remove(located.pos);
            displays[target as usize - 1].spaces.push(moved);
        }
        self.assert_invariant();
        Ok(())
    }

    fn label_space(&self, sel: &SpaceSelector, label: &str) -> Result<(), WmError> {
        self.command(format!("space {} --label {}", sel, label))?;
        let located = self.locate(sel)?;
        self.displays.borrow_mut()[located.display as usize - 1].spaces[located.pos].label =
            label.to_string();
        Ok(())
    }

    fn focus_display(&self, sel: &DisplaySelector) -> Result<(), WmError> {
        self.command(format!("display --focus {}", sel))?;
        let index = self.locate_display(sel)?;
        let first = self.displays.borrow()[index as usize - 1].spaces[0].uuid.clone();
        *self.focused.borrow_mut() = first;
        Ok(())
    }

    fn send_window_to_space(
        &self,
        window: &WindowSelector,
        space: &SpaceSelector,
    ) -> Result<(), WmError> {
        self.command(format!("window {} --space {}", window, space))?;
        let target = self.locate(space)?;
        let mut windows = self.windows.borrow_mut();
        let found = match window {
            WindowSelector::Focused => windows.iter_mut().find(|w| w.has_focus),
            WindowSelector::Id(id) => windows.iter_mut().find(|w| w.id == *id),
        };
        let record = found.ok_or_else(|| Self::not_found("window"))?;
        record.space = target.global;
        record.display = target.display;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_global_and_one_based() {
        let wm = FakeWm::new(&[&["a", "b"], &["c"]]);
        let spaces = wm.spaces().unwrap();
        let indices: Vec<u32> = spaces.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
        assert_eq!(spaces[2].display, 2);
    }

    #[test]
    fn move_lands_on_the_target_position() {
        let wm = FakeWm::new(&[&["a", "b", "c"]]);
        // Forward move: a to c's position.
        wm.move_space(&SpaceSelector::Index(1), &SpaceSelector::Index(3))
            .unwrap();
        assert_eq!(wm.labels_on(1), vec!["b", "c", "a"]);
        // Backward move: a back to the front.
        wm.move_space(&SpaceSelector::Index(3), &SpaceSelector::Index(1))
            .unwrap();
        assert_eq!(wm.labels_on(1), vec!["a", "b", "c"]);
    }

    #[test]
    fn send_rejects_emptying_a_display() {
        let wm = FakeWm::new(&[&["a"], &["b"]]);
        let err = wm
            .send_space_to_display(&SpaceSelector::Index(1), &DisplaySelector::Index(2))
            .unwrap_err();
        assert_eq!(err.rejection(), Some(FailureKind::Other));
        assert_eq!(wm.labels_on(1), vec!["a"]);
    }

    #[test]
    fn injected_failure_fires_once() {
        let wm = FakeWm::new(&[&["a", "b"]]);
        wm.fail_next_matching("--label");
        assert!(wm
            .label_space(&SpaceSelector::Index(1), "x")
            .is_err());
        assert!(wm.label_space(&SpaceSelector::Index(1), "x").is_ok());
    }
}

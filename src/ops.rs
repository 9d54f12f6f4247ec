//! Whole-arrangement operations: reconcile the defined spaces, send each
//! space to its preferred display, sort everything, and derive space
//! properties from one another.
//!
//! These combine the handles with the ordering algorithms; the CLI
//! subcommands are thin wrappers around them.

use crate::display::Display;
use crate::error::Error;
use crate::selector::{DisplaySelector, SpaceSelector};
use crate::sort;
use crate::space::Space;
use crate::spacedef::SpaceDefs;
use crate::traits::WindowManager;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Make the set of existing labels equal the set of defined labels.
///
/// Spaces whose label matches a definition are kept.  Excess spaces are
/// relabeled to missing definitions while both lists last; remaining
/// excess spaces are destroyed; remaining missing definitions get fresh
/// spaces created on the first display.
pub fn create_spaces<W: WindowManager>(wm: &W, defs: &SpaceDefs) -> Result<(), Error> {
    let mut excess: Vec<Space<'_, W>> = Vec::new();
    let mut found: HashSet<String> = HashSet::new();
    for space in Space::all(wm)? {
        if defs.get(space.label()).is_some() {
            found.insert(space.label().to_string());
        } else {
            excess.push(space);
        }
    }
    let mut missing = defs.iter().filter(|d| !found.contains(&d.label));
    debug!(
        "{} space(s) match a definition, {} excess",
        found.len(),
        excess.len()
    );

    let mut leftover = Vec::new();
    for mut space in excess {
        match missing.next() {
            Some(def) => {
                info!("relabeling space {} to {:?}", space.describe(), def.label);
                space.set_label(&def.label)?;
            }
            None => leftover.push(space),
        }
    }

    for space in leftover {
        info!("destroying excess space {}", space.describe());
        space.destroy()?;
    }

    let first = Display::get(wm, &DisplaySelector::Index(1))?;
    for def in missing {
        info!("creating missing space {:?}", def.label);
        let mut space = first.create_space()?;
        space.set_label(&def.label)?;
    }
    Ok(())
}

/// Send every space whose definition names another display to that display.
///
/// Spaces with unknown labels stay put, as do spaces whose preferred
/// display is not connected.  A space that is the last one on its display
/// is reported and skipped — this sweep does not arrange placeholder
/// compensation, and the order is restored by a subsequent sort anyway.
pub fn send_spaces_to_displays<W: WindowManager>(wm: &W, defs: &SpaceDefs) -> Result<(), Error> {
    let displays = Display::all(wm)?;
    let mut connected: HashSet<u32> = HashSet::new();
    // Snapshot everything first so each space is handled exactly once even
    // as the sweep moves spaces between displays.
    let mut per_display: Vec<(u32, Vec<Space<'_, W>>)> = Vec::new();
    for display in &displays {
        let props = display.props()?;
        connected.insert(props.index);
        per_display.push((props.index, display.spaces()?));
    }

    for (display_index, spaces) in per_display {
        for space in spaces {
            let Some(want) = defs.preferred_display(space.label()) else {
                debug!("space {} has no definition, staying put", space.describe());
                continue;
            };
            if want == display_index {
                debug!("space {} already on display {}", space.describe(), want);
                continue;
            }
            if !connected.contains(&want) {
                info!(
                    "space {} prefers display {}, which is not connected",
                    space.describe(),
                    want
                );
                continue;
            }
            match send_unless_last(&space, want) {
                Ok(()) => {}
                Err(err @ Error::WouldEmptyDisplay { .. }) => warn!("{}", err),
                Err(err) => return Err(err),
            }
        }
    }
    Ok(())
}

/// Send `space` to display `want`, refusing (rather than attempting) a move
/// that would leave its current display empty.
fn send_unless_last<W: WindowManager>(space: &Space<'_, W>, want: u32) -> Result<(), Error> {
    let source = space.props()?.display;
    let occupancy = space.display()?.props()?.spaces.len();
    if occupancy == 1 {
        return Err(Error::WouldEmptyDisplay { display: source });
    }
    info!("sending space {} to display {}", space.describe(), want);
    space.send_to_display(&DisplaySelector::Index(want))
}

/// Sort the spaces on every display.
pub fn sort_displays<W: WindowManager>(wm: &W, defs: &SpaceDefs) -> Result<(), Error> {
    for display in Display::all(wm)? {
        sort::sort_display(&display, defs.rank_fn())?;
    }
    Ok(())
}

/// Check that every display is sorted.
pub fn assert_displays_sorted<W: WindowManager>(wm: &W, defs: &SpaceDefs) -> Result<(), Error> {
    for display in Display::all(wm)? {
        sort::assert_sorted(&display, defs.rank_fn())?;
    }
    Ok(())
}

/// Properties a space can be identified by or asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceProp {
    Label,
    Index,
    /// A space selector (label, index, or a relative keyword).  Input only.
    Selector,
    Display,
    Key,
    Icon,
    Color,
    Name,
    Abbr,
}

impl FromStr for SpaceProp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.trim().to_ascii_lowercase().as_str() {
            "label" => Ok(SpaceProp::Label),
            "index" => Ok(SpaceProp::Index),
            "selector" => Ok(SpaceProp::Selector),
            "display" => Ok(SpaceProp::Display),
            "key" => Ok(SpaceProp::Key),
            "icon" => Ok(SpaceProp::Icon),
            "color" => Ok(SpaceProp::Color),
            "name" => Ok(SpaceProp::Name),
            "abbr" => Ok(SpaceProp::Abbr),
            _ => Err(Error::Validation(format!("unknown space property: {:?}", s))),
        }
    }
}

impl fmt::Display for SpaceProp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpaceProp::Label => "label",
            SpaceProp::Index => "index",
            SpaceProp::Selector => "selector",
            SpaceProp::Display => "display",
            SpaceProp::Key => "key",
            SpaceProp::Icon => "icon",
            SpaceProp::Color => "color",
            SpaceProp::Name => "name",
            SpaceProp::Abbr => "abbr",
        };
        write!(f, "{}", name)
    }
}

/// Find the space identified by `value` interpreted as property `prop`.
///
/// The in-going property must identify the space uniquely; a display, for
/// instance, only works when it holds exactly one space.
pub fn space_from_property<'w, W: WindowManager>(
    wm: &'w W,
    defs: &SpaceDefs,
    prop: SpaceProp,
    value: &str,
) -> Result<Space<'w, W>, Error> {
    match prop {
        SpaceProp::Label => Space::get(wm, &SpaceSelector::Label(value.to_string())),
        SpaceProp::Index => {
            let index: u32 = value
                .trim()
                .parse()
                .map_err(|_| Error::Validation(format!("not a space index: {:?}", value)))?;
            Space::get(wm, &SpaceSelector::Index(index))
        }
        SpaceProp::Selector => Space::get(wm, &SpaceSelector::parse(value)),
        SpaceProp::Key | SpaceProp::Icon | SpaceProp::Color | SpaceProp::Abbr => {
            let def = defs
                .iter()
                .find(|d| match prop {
                    SpaceProp::Key => d.key == value,
                    SpaceProp::Icon => d.icon == value,
                    SpaceProp::Color => d.color == value,
                    SpaceProp::Abbr => d.abbr() == value,
                    _ => unreachable!(),
                })
                .ok_or_else(|| {
                    Error::Validation(format!("no space definition with {} {:?}", prop, value))
                })?;
            Space::get(wm, &SpaceSelector::Label(def.label.clone()))
        }
        SpaceProp::Display => {
            let display = Display::get(wm, &DisplaySelector::parse(value)?)?;
            let spaces = display.props()?.spaces;
            match spaces.as_slice() {
                [only] => Space::get(wm, &SpaceSelector::Index(*only)),
                _ => Err(Error::Validation(
                    "a display only identifies a space when it has exactly one".to_string(),
                )),
            }
        }
        SpaceProp::Name => Err(Error::Validation(
            "cannot identify a space by name".to_string(),
        )),
    }
}

/// Return property `prop` of `space`.
///
/// Definition-backed properties (key, icon, color, name, abbr) resolve to
/// the empty string when the space's label has no definition.
pub fn property_of_space<W: WindowManager>(
    space: &Space<'_, W>,
    defs: &SpaceDefs,
    prop: SpaceProp,
) -> Result<String, Error> {
    match prop {
        SpaceProp::Label => Ok(space.label().to_string()),
        SpaceProp::Index => Ok(space.props()?.index.to_string()),
        SpaceProp::Display => Ok(space.props()?.display.to_string()),
        SpaceProp::Selector => Err(Error::Validation(
            "a selector identifies a space, it is not a property of one".to_string(),
        )),
        SpaceProp::Key => Ok(def_field(defs, space, |d| d.key.clone())),
        SpaceProp::Icon => Ok(def_field(defs, space, |d| d.icon.clone())),
        SpaceProp::Color => Ok(def_field(defs, space, |d| d.color.clone())),
        SpaceProp::Name => Ok(def_field(defs, space, |d| d.name.clone())),
        SpaceProp::Abbr => Ok(def_field(defs, space, |d| d.abbr())),
    }
}

fn def_field<W: WindowManager>(
    defs: &SpaceDefs,
    space: &Space<'_, W>,
    field: impl Fn(&crate::spacedef::SpaceDef) -> String,
) -> String {
    defs.get(space.label()).map(field).unwrap_or_default()
}

//! Command-line entry point for **spacekeep**.
//!
//! Every subcommand is a thin wrapper over the library: resolve handles,
//! run the operation, print a one-line status.  Exit code 0 on success, 1
//! otherwise; recognized soft refusals (like "cannot move the last space")
//! go to stdout, genuine errors to stderr.

use clap::{Parser, Subcommand};
use log::info;
use spacekeep::display::Display;
use spacekeep::notify::notify;
use spacekeep::ops::{self, SpaceProp};
use spacekeep::relocate;
use spacekeep::selector::{DisplaySelector, SpaceSelector};
use spacekeep::sort;
use spacekeep::space::Space;
use spacekeep::spacedef::SpaceDefs;
use spacekeep::window::Window;
use spacekeep::yabai::YabaiWm;
use spacekeep::Error;

#[derive(Debug, Parser)]
#[command(name = "spacekeep", version)]
#[command(about = "Keeps yabai spaces labeled, ordered, and on their preferred displays")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create, relabel, and destroy spaces until exactly the defined set
    /// exists, send each to its preferred display, and sort every display.
    Prepare,

    /// Focus a space.
    FocusSpace {
        /// LABEL | index | prev | next | first | last | recent | mouse
        space: String,
    },

    /// Move the focused window to a space and focus that space.
    WindowToSpace {
        /// LABEL | index | prev | next | first | last | recent | mouse
        space: String,
    },

    /// Send the focused space to a display, keeping the label order
    /// intact on both displays.
    SpaceToDisplay {
        /// Arrangement index | prev | next | first | last | recent | mouse
        display: String,
    },

    /// Send every space to its preferred display, then sort all displays.
    SpacesToDisplays,

    /// Sort the spaces on one display by label order.
    SortDisplay {
        /// Display to sort (default: the focused one).
        display: Option<String>,
    },

    /// Sort the spaces on all displays.
    SortDisplays,

    /// Derive one property of a space from another property of it.
    ///
    /// Properties: label, index, selector, display, key, icon, color,
    /// name, abbr.  The in-going property must identify the space
    /// uniquely.
    SpaceProp {
        prop_in: String,
        value: String,
        prop_out: String,
    },
}

/// Resolve the config directory (`$XDG_CONFIG_HOME/spacekeep`).
fn config_dir() -> std::path::PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    std::path::PathBuf::from(base).join("spacekeep")
}

/// Try to load the space definitions from
/// `$XDG_CONFIG_HOME/spacekeep/spaces.json`, falling back to the
/// compiled-in defaults.
fn load_defs() -> SpaceDefs {
    let path = config_dir().join("spaces.json");
    match SpaceDefs::load(&path) {
        Ok(defs) => {
            info!("loaded {} space definitions from {}", defs.len(), path.display());
            defs
        }
        Err(e) => {
            info!("no space definitions ({}), using builtin defaults", e);
            SpaceDefs::builtin()
        }
    }
}

/// Notification-friendly name for a space: its definition's full name if
/// it has one, otherwise the label itself.
fn display_name(defs: &SpaceDefs, space: &Space<'_, YabaiWm>) -> String {
    defs.get(space.label())
        .map(|def| def.fullname(false))
        .unwrap_or_else(|| space.describe())
}

fn run(command: Command) -> Result<String, Error> {
    let defs = load_defs();
    let wm = YabaiWm::new()?;

    match command {
        Command::Prepare => {
            ops::create_spaces(&wm, &defs)?;
            ops::send_spaces_to_displays(&wm, &defs)?;
            ops::sort_displays(&wm, &defs)?;
            notify("Preparing spaces", None);
            Ok("prepared spaces".to_string())
        }

        Command::FocusSpace { space } => {
            let space = Space::get(&wm, &SpaceSelector::parse(&space))?;
            space.focus()?;
            notify(&display_name(&defs, &space), Some("Focusing"));
            Ok(format!("focused space {}", space.describe()))
        }

        Command::WindowToSpace { space } => {
            let window = Window::focused(&wm)?;
            let space = Space::get(&wm, &SpaceSelector::parse(&space))?;
            window.send_to_space(&space.current_selector()?)?;
            space.focus()?;
            notify(&display_name(&defs, &space), Some("Moving window to"));
            Ok(format!("moved window to space {}", space.describe()))
        }

        Command::SpaceToDisplay { display } => {
            let target = DisplaySelector::parse(&display)?;
            let space = Space::focused(&wm)?;
            relocate::send_to_display_keep_order(&space, &target, defs.rank_fn())?;
            // Follow the space, unless the target never existed.
            if let Some(target) = Display::try_get(&wm, &target)? {
                target.focus()?;
                let index = target.props()?.index;
                notify(
                    &format!("{} to display {}", display_name(&defs, &space), index),
                    Some("Moving space"),
                );
            }
            Ok(format!("sent space {} to display {}", space.describe(), display))
        }

        Command::SpacesToDisplays => {
            ops::send_spaces_to_displays(&wm, &defs)?;
            ops::sort_displays(&wm, &defs)?;
            notify("All spaces to their preferred displays", Some("Moving spaces"));
            Ok("sent all spaces to their preferred displays".to_string())
        }

        Command::SortDisplay { display } => {
            let sel = match display {
                Some(s) => DisplaySelector::parse(&s)?,
                None => DisplaySelector::Focused,
            };
            let display = Display::get(&wm, &sel)?;
            sort::sort_display(&display, defs.rank_fn())?;
            let index = display.props()?.index;
            notify(&format!("Display {}", index), Some("Sorting spaces"));
            Ok(format!("sorted display {}", index))
        }

        Command::SortDisplays => {
            ops::sort_displays(&wm, &defs)?;
            notify("All displays", Some("Sorting spaces"));
            Ok("sorted all displays".to_string())
        }

        Command::SpaceProp {
            prop_in,
            value,
            prop_out,
        } => {
            let prop_in: SpaceProp = prop_in.parse()?;
            let prop_out: SpaceProp = prop_out.parse()?;
            let space = ops::space_from_property(&wm, &defs, prop_in, &value)?;
            ops::property_of_space(&space, &defs, prop_out)
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli.command) {
        Ok(status) => println!("{}", status),
        Err(e) if e.is_soft() => {
            println!("{}", e);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

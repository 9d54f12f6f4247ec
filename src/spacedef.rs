//! Space definitions — which spaces should exist, in what order, and where.
//!
//! The definitions are loaded from a JSON file whose array order *is* the
//! wanted space order; everything that sorts or relocates derives its rank
//! function from here.  The file is read once per invocation and passed
//! down explicitly — no global state.
//!
//! # Example
//!
//! ```json
//! [
//!   { "label": "1_files",  "key": "1", "name": "Files",  "icon": "",  "display": 1 },
//!   { "label": "7_teams",  "key": "7", "name": "Teams",  "icon": "󰊻", "display": 2 }
//! ]
//! ```

use crate::error::Error;
use crate::sort::Rank;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One defined space.
///
/// Every field except the label is optional — a minimal `{"label": "x"}`
/// entry is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaceDef {
    /// The label the space carries in the window manager.
    pub label: String,
    /// Shortcut key for this space.
    #[serde(default)]
    pub key: String,
    /// Human-readable name, used in notifications.
    #[serde(default)]
    pub name: String,
    /// Status-bar icon.
    #[serde(default)]
    pub icon: String,
    /// Accent color as `#rrggbb`.
    #[serde(default)]
    pub color: String,
    /// Arrangement index of the preferred display, if any.
    #[serde(default)]
    pub display: Option<u32>,
}

impl SpaceDef {
    fn new(label: &str, key: &str, name: &str, icon: &str, display: u32) -> Self {
        Self {
            label: label.to_string(),
            key: key.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            color: String::new(),
            display: Some(display),
        }
    }

    /// Key plus icon, e.g. for a status bar item.
    pub fn abbr(&self) -> String {
        format!("{}{}", self.key, self.icon)
    }

    /// `"<key>: [<icon> ]<name>"`, the notification-friendly name.
    pub fn fullname(&self, include_icon: bool) -> String {
        if include_icon && !self.icon.is_empty() {
            format!("{}: {} {}", self.key, self.icon, self.name)
        } else {
            format!("{}: {}", self.key, self.name)
        }
    }
}

/// The ordered collection of space definitions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpaceDefs {
    defs: Vec<SpaceDef>,
}

impl SpaceDefs {
    /// Load definitions from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
        serde_json::from_str(&contents)
            .map_err(|e| Error::Config(format!("failed to parse {}: {}", path.display(), e)))
    }

    /// The compiled-in default layout, used when no config file exists.
    pub fn builtin() -> Self {
        Self {
            defs: vec![
                SpaceDef::new("1_files", "1", "Files", "", 1),
                SpaceDef::new("2_www", "2", "Browser", "", 1),
                SpaceDef::new("3_office", "3", "Office", "", 1),
                SpaceDef::new("4_terminal", "4", "Terminal", "", 1),
                SpaceDef::new("5_vscode", "5", "Code", "󰨞", 1),
                SpaceDef::new("6_", "6", "Scratch", " ", 1),
                SpaceDef::new("7_teams", "7", "Teams", "󰊻", 2),
                SpaceDef::new("8_email", "8", "Email", "󰇰", 2),
                SpaceDef::new("9_media", "9", "Media", "󰎈", 2),
            ],
        }
    }

    /// Definition for `label`, if one exists.
    pub fn get(&self, label: &str) -> Option<&SpaceDef> {
        self.defs.iter().find(|d| d.label == label)
    }

    /// Rank of `label` in the wanted order; the "not found" sentinel for
    /// unknown and empty labels.
    pub fn rank_of(&self, label: &str) -> Rank {
        self.defs
            .iter()
            .position(|d| d.label == label)
            .map_or(Rank::Unranked, Rank::Ranked)
    }

    /// The rank function, for handing to the sort engine and relocator.
    pub fn rank_fn(&self) -> impl Fn(&str) -> Rank + '_ {
        move |label| self.rank_of(label)
    }

    /// Preferred display of `label`, if defined.
    pub fn preferred_display(&self, label: &str) -> Option<u32> {
        self.get(label).and_then(|d| d.display)
    }

    /// All definitions, in rank order.
    pub fn iter(&self) -> impl Iterator<Item = &SpaceDef> {
        self.defs.iter()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

//! Artifact themes (biases)
//!
//! A theme steers which property families the forge favors. An item carries
//! at most one, written once per run: the first writer wins.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Thematic flavor of a random artifact
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Theme {
    Elec,
    Pois,
    Fire,
    Cold,
    Acid,
    #[strum(serialize = "STR")]
    Str,
    #[strum(serialize = "INT")]
    Int,
    #[strum(serialize = "WIS")]
    Wis,
    #[strum(serialize = "DEX")]
    Dex,
    #[strum(serialize = "CON")]
    Con,
    #[strum(serialize = "CHA")]
    Chr,
    Chaos,
    Priestly,
    Necromantic,
    Law,
    Rogue,
    Mage,
    Warrior,
    Ranger,
}

impl Theme {
    /// Name shown in wizard diagnostics
    pub fn name(self) -> String {
        self.to_string()
    }

    /// Parse a theme name, ignoring case
    pub fn from_name(name: &str) -> Option<Theme> {
        use strum::IntoEnumIterator;
        let wanted = name.trim();
        Theme::iter().find(|t| {
            t.to_string().eq_ignore_ascii_case(wanted) || format!("{t:?}").eq_ignore_ascii_case(wanted)
        })
    }
}

/// Diagnostic name of an optional theme
pub fn theme_name(theme: Option<Theme>) -> String {
    theme.map_or_else(|| "None".to_string(), Theme::name)
}

/// Theme field of an item under construction
///
/// There is no plain setter: `set_if_absent` writes only into an empty slot,
/// and `clear` is reserved for the reset at the start of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ThemeSlot(Option<Theme>);

impl ThemeSlot {
    pub fn get(&self) -> Option<Theme> {
        self.0
    }

    pub fn is_unset(&self) -> bool {
        self.0.is_none()
    }

    /// Store `theme` if the slot is empty; returns whether it was stored
    pub fn set_if_absent(&mut self, theme: Theme) -> bool {
        if self.0.is_none() {
            self.0 = Some(theme);
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }
}

//! Player context consulted by the forge
//!
//! Only the class and sex matter here: the class biases scroll-created
//! artifacts and decides whether an anti-magic curse is worth adding, and a
//! few fixed artifacts react to who picks them up.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::artifact::Theme;
use crate::rng::GameRng;

/// Player sex
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Sex {
    #[default]
    Female,
    Male,
}

/// Player class
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum PlayerClass {
    #[default]
    Warrior,
    Mage,
    Priest,
    Rogue,
    Ranger,
    Paladin,
    WarriorMage,
    ChaosWarrior,
    Monk,
    Mindcrafter,
    HighMage,
    Tourist,
    Imitator,
    Beastmaster,
    Sorcerer,
    Archer,
    MagicEater,
    Bard,
    RedMage,
    Samurai,
    ForceTrainer,
    BlueMage,
    Cavalry,
    Berserker,
    Smith,
    MirrorMaster,
    Ninja,
    Sniper,
}

impl PlayerClass {
    /// Classes with no spellcasting to lose
    pub const fn cannot_cast(self) -> bool {
        matches!(
            self,
            PlayerClass::Warrior
                | PlayerClass::Archer
                | PlayerClass::Cavalry
                | PlayerClass::Berserker
                | PlayerClass::Smith
        )
    }

    /// Classes whose wielders can bear the Terror Mask
    pub const fn is_warrior_type(self) -> bool {
        matches!(
            self,
            PlayerClass::Warrior
                | PlayerClass::Archer
                | PlayerClass::Cavalry
                | PlayerClass::Berserker
        )
    }

    /// Theme a scroll-created artifact leans toward for this class
    ///
    /// Returns the theme (if any) and the percentage chance that the forge
    /// overrides it with the warrior theme.
    pub fn scroll_bias(self, rng: &mut GameRng) -> (Option<Theme>, u32) {
        use PlayerClass::*;

        match self {
            Warrior | Berserker | Archer | Samurai | Cavalry | Smith => (Some(Theme::Warrior), 0),
            Mage | HighMage | Sorcerer | MagicEater | BlueMage => (Some(Theme::Mage), 0),
            Priest => (Some(Theme::Priestly), 0),
            Rogue | Ninja => (Some(Theme::Rogue), 25),
            Ranger | Sniper => (Some(Theme::Ranger), 30),
            Paladin => (Some(Theme::Priestly), 40),
            WarriorMage | RedMage => (Some(Theme::Mage), 40),
            ChaosWarrior => (Some(Theme::Chaos), 40),
            Monk | ForceTrainer => (Some(Theme::Priestly), 0),
            Mindcrafter | Bard => ((rng.rnd(5) > 2).then_some(Theme::Priestly), 0),
            Tourist => ((rng.rnd(5) > 2).then_some(Theme::Warrior), 0),
            Imitator => ((rng.rnd(2) > 1).then_some(Theme::Ranger), 0),
            Beastmaster => (Some(Theme::Chr), 50),
            MirrorMaster => {
                let theme = if rng.rnd(4) > 1 {
                    Theme::Mage
                } else {
                    Theme::Rogue
                };
                (Some(theme), 0)
            }
        }
    }

    /// Parse a class name, ignoring case, spaces, dashes and underscores
    pub fn from_name(name: &str) -> Option<PlayerClass> {
        let wanted: String = name
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect();
        PlayerClass::iter().find(|c| c.to_string().eq_ignore_ascii_case(&wanted))
    }
}

/// The player as the forge sees them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PlayerContext {
    pub class: PlayerClass,
    pub sex: Sex,
}

impl PlayerContext {
    pub fn new(class: PlayerClass, sex: Sex) -> Self {
        Self { class, sex }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_count() {
        assert_eq!(PlayerClass::iter().count(), 28);
    }

    #[test]
    fn test_cannot_cast() {
        let casters: Vec<_> = PlayerClass::iter().filter(|c| c.cannot_cast()).collect();
        assert_eq!(
            casters,
            vec![
                PlayerClass::Warrior,
                PlayerClass::Archer,
                PlayerClass::Cavalry,
                PlayerClass::Berserker,
                PlayerClass::Smith,
            ]
        );
    }

    #[test]
    fn test_scroll_bias_fixed_classes() {
        let mut rng = GameRng::new(42);
        assert_eq!(
            PlayerClass::Samurai.scroll_bias(&mut rng),
            (Some(Theme::Warrior), 0)
        );
        assert_eq!(
            PlayerClass::Ninja.scroll_bias(&mut rng),
            (Some(Theme::Rogue), 25)
        );
        assert_eq!(
            PlayerClass::Beastmaster.scroll_bias(&mut rng),
            (Some(Theme::Chr), 50)
        );
    }

    #[test]
    fn test_scroll_bias_random_classes() {
        let mut rng = GameRng::new(42);
        let mut none = 0;
        let mut priestly = 0;
        for _ in 0..1000 {
            match PlayerClass::Bard.scroll_bias(&mut rng).0 {
                None => none += 1,
                Some(Theme::Priestly) => priestly += 1,
                Some(other) => panic!("unexpected bard theme {other}"),
            }
        }
        // 3 in 5 priestly
        assert!((500..700).contains(&priestly), "priestly = {priestly}");
        assert_eq!(none + priestly, 1000);

        for _ in 0..100 {
            let (theme, _) = PlayerClass::MirrorMaster.scroll_bias(&mut rng);
            assert!(matches!(theme, Some(Theme::Mage) | Some(Theme::Rogue)));
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(
            PlayerClass::from_name("chaos-warrior"),
            Some(PlayerClass::ChaosWarrior)
        );
        assert_eq!(PlayerClass::from_name("MAGE"), Some(PlayerClass::Mage));
        assert_eq!(PlayerClass::from_name("wizard"), None);
    }
}

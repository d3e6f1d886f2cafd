//! Activations
//!
//! An activation is the one triggerable effect an artifact may carry. The
//! raw code space has 255 slots; `ACTIVATIONS` maps the used ones to their
//! acceptance tier, description, power value and recharge time.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::bias::Theme;
use crate::consts::ACTIVATION_CODES;
use crate::object::{Object, TrFlag};
use crate::rng::GameRng;

/// Activatable effect, discriminant is the raw activation code
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum Activation {
    Sunlight = 1,
    BoMiss1 = 2,
    BaPois1 = 3,
    BoElec1 = 4,
    BoAcid1 = 5,
    BoCold1 = 6,
    BoFire1 = 7,
    BaCold1 = 8,
    BaFire1 = 9,
    Hypodynamia1 = 10,
    BaCold2 = 11,
    BaElec2 = 12,
    Hypodynamia2 = 13,
    Drain1 = 14,
    BoMiss2 = 15,
    BaCold3 = 16,
    BaElec3 = 17,
    Whirlwind = 18,
    Drain2 = 19,
    CallChaos = 20,
    Rocket = 21,
    DispEvil = 22,
    BaMiss3 = 23,
    DispGood = 24,
    BoMana = 25,
    BaFire2 = 26,
    BaFire3 = 27,
    BaStar = 28,
    BrFire = 36,
    BrCold = 37,
    BrDragon = 38,
    Confuse = 50,
    Sleep = 51,
    Quake = 52,
    Terror = 53,
    TeleAway = 54,
    BanishEvil = 55,
    Genocide = 56,
    MassGeno = 57,
    CharmAnimal = 65,
    CharmUndead = 66,
    CharmOther = 67,
    CharmAnimals = 68,
    CharmOthers = 69,
    SummonAnimal = 70,
    SummonPhantom = 71,
    SummonElemental = 72,
    SummonDemon = 73,
    SummonUndead = 74,
    CureLw = 81,
    CureMw = 82,
    CurePoison = 83,
    RestLife = 84,
    RestAll = 85,
    Cure700 = 86,
    Cure1000 = 87,
    Esp = 91,
    Berserk = 92,
    ProtEvil = 93,
    ResistAll = 94,
    Speed = 95,
    XtraSpeed = 96,
    Wraith = 97,
    Invuln = 98,
    Light = 111,
    DetectAll = 113,
    DetectXtra = 114,
    IdFull = 115,
    IdPlain = 116,
    RuneExplo = 117,
    RuneProt = 118,
    Satiate = 119,
    DestDoor = 120,
    StoneMud = 121,
    Recharge = 122,
    Alchemy = 123,
    DimDoor = 124,
    Teleport = 125,
    Recall = 126,
    Muramasa = 253,
    BloodyMoon = 254,
    Crimson = 255,
}

/// Static data for one activation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationInfo {
    pub activation: Activation,
    pub desc: &'static str,
    /// Percent acceptance in `one_activation`; 0 is never, 101 is always
    pub random_chance: u32,
    /// Added to the flag cost of an item carrying it
    pub value: i32,
    /// Recharge: `timeout + d(dice)` turns
    pub timeout: u16,
    pub dice: u16,
}

const fn info(
    activation: Activation,
    desc: &'static str,
    random_chance: u32,
    value: i32,
    timeout: u16,
    dice: u16,
) -> ActivationInfo {
    ActivationInfo {
        activation,
        desc,
        random_chance,
        value,
        timeout,
        dice,
    }
}

use Activation as A;

/// Every activation, in code order
pub static ACTIVATIONS: &[ActivationInfo] = &[
    info(A::Sunlight, "beam of sunlight", 101, 250, 10, 0),
    info(A::BoMiss1, "magic missile (2d6)", 101, 250, 2, 0),
    info(A::BaPois1, "stinking cloud (12)", 101, 300, 4, 4),
    info(A::BoElec1, "lightning bolt (4d8)", 101, 250, 5, 5),
    info(A::BoAcid1, "acid bolt (5d8)", 101, 250, 6, 6),
    info(A::BoCold1, "frost bolt (6d8)", 101, 250, 7, 7),
    info(A::BoFire1, "fire bolt (9d8)", 101, 250, 8, 8),
    info(A::BaCold1, "ball of cold (48)", 85, 750, 400, 0),
    info(A::BaFire1, "ball of fire (72)", 85, 1000, 400, 0),
    info(A::Hypodynamia1, "a strangling attack (100)", 85, 500, 100, 100),
    info(A::BaCold2, "ball of cold (100)", 0, 1250, 300, 0),
    info(A::BaElec2, "ball of lightning (100)", 0, 1000, 500, 0),
    info(A::Hypodynamia2, "a strangling attack (120)", 66, 750, 400, 0),
    info(A::Drain1, "drain life (3*50)", 66, 1000, 400, 0),
    info(A::BoMiss2, "arrows (150)", 66, 1000, 90, 90),
    info(A::BaCold3, "ball of cold (400)", 50, 4000, 300, 0),
    info(A::BaElec3, "ball of lightning (400)", 50, 4000, 300, 0),
    info(A::Whirlwind, "whirlwind attack", 50, 7500, 250, 0),
    info(A::Drain2, "drain life (100+level)", 50, 2500, 400, 0),
    info(A::CallChaos, "call chaos", 25, 5000, 350, 0),
    info(A::Rocket, "launch rocket (120+level)", 25, 5000, 400, 0),
    info(A::DispEvil, "dispel evil (x5)", 33, 4000, 300, 300),
    info(A::BaMiss3, "elemental breath (300)", 33, 10000, 500, 0),
    info(A::DispGood, "dispel good (x5)", 33, 3500, 300, 300),
    info(A::BoMana, "a magical arrow (150)", 0, 3500, 200, 0),
    info(A::BaFire2, "fire ball (120)", 66, 2500, 15, 15),
    info(A::BaFire3, "fire ball (300)", 50, 5000, 40, 40),
    info(A::BaStar, "star ball (200)", 0, 5000, 50, 50),
    info(A::BrFire, "fire breath (200)", 0, 5000, 200, 0),
    info(A::BrCold, "cold breath (200)", 0, 5000, 200, 0),
    info(A::BrDragon, "breathe", 0, 5000, 0, 0),
    info(A::Confuse, "confuse monster", 101, 500, 15, 0),
    info(A::Sleep, "sleep nearby monsters", 101, 750, 55, 0),
    info(A::Quake, "earthquake", 101, 600, 50, 0),
    info(A::Terror, "terror", 75, 2500, 200, 0),
    info(A::TeleAway, "teleport away", 85, 2000, 150, 0),
    info(A::BanishEvil, "banish evil", 33, 4000, 250, 250),
    info(A::Genocide, "genocide", 33, 10000, 500, 0),
    info(A::MassGeno, "mass genocide", 33, 10000, 1000, 0),
    info(A::CharmAnimal, "charm animal", 50, 7500, 200, 0),
    info(A::CharmUndead, "enslave undead", 33, 10000, 333, 0),
    info(A::CharmOther, "charm monster", 33, 10000, 400, 0),
    info(A::CharmAnimals, "animal friendship", 25, 12500, 500, 0),
    info(A::CharmOthers, "mass charm", 25, 17500, 750, 0),
    info(A::SummonAnimal, "summon animal", 40, 10000, 200, 300),
    info(A::SummonPhantom, "summon phantasmal servant", 33, 12000, 200, 200),
    info(A::SummonElemental, "summon elemental", 25, 15000, 750, 0),
    info(A::SummonDemon, "summon demon", 5, 20000, 666, 0),
    info(A::SummonUndead, "summon undead", 5, 20000, 666, 0),
    info(A::CureLw, "cure light wounds & fear", 101, 500, 10, 0),
    info(A::CureMw, "cure serious wounds", 101, 750, 3, 3),
    info(A::CurePoison, "remove fear and cure poison", 101, 1000, 5, 0),
    info(A::RestLife, "restore life levels", 66, 7500, 450, 0),
    info(A::RestAll, "restore stats and life levels", 33, 15000, 750, 0),
    info(A::Cure700, "heal 700 hit points", 25, 10000, 250, 0),
    info(A::Cure1000, "heal 1000 hit points", 10, 15000, 888, 0),
    info(A::Esp, "telepathy", 85, 1500, 100, 0),
    info(A::Berserk, "heroism and berserk", 101, 800, 100, 100),
    info(A::ProtEvil, "protect evil", 75, 5000, 225, 225),
    info(A::ResistAll, "resist elements", 85, 5000, 111, 0),
    info(A::Speed, "speed", 25, 15000, 250, 0),
    info(A::XtraSpeed, "heavy speed", 10, 25000, 200, 200),
    info(A::Wraith, "wraith form", 5, 25000, 1000, 0),
    info(A::Invuln, "invulnerability", 5, 25000, 1000, 0),
    info(A::Light, "light area (damage 2d15)", 101, 500, 10, 10),
    info(A::DetectAll, "detection", 85, 10000, 55, 55),
    info(A::DetectXtra, "detection, probing and identify true", 10, 12500, 1000, 0),
    info(A::IdFull, "identify true", 25, 10000, 75, 0),
    info(A::IdPlain, "identify spell", 75, 1250, 10, 0),
    info(A::RuneExplo, "explosive rune", 33, 4000, 200, 0),
    info(A::RuneProt, "rune of protection", 25, 10000, 400, 0),
    info(A::Satiate, "satisfy hunger", 85, 2000, 200, 0),
    info(A::DestDoor, "destroy doors", 101, 100, 10, 0),
    info(A::StoneMud, "stone to mud", 101, 1000, 3, 0),
    info(A::Recharge, "recharging", 85, 1000, 70, 0),
    info(A::Alchemy, "alchemy", 5, 10000, 500, 0),
    info(A::DimDoor, "dimension door", 10, 10000, 100, 0),
    info(A::Teleport, "teleport", 101, 2000, 25, 0),
    info(A::Recall, "word of recall", 85, 7500, 200, 0),
    info(A::Muramasa, "increase STR", 0, 0, 0, 0),
    info(A::BloodyMoon, "change zokusei", 0, 0, 0, 0),
    info(A::Crimson, "fire!", 0, 0, 15, 0),
];

impl Activation {
    /// Raw activation code
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Map a raw code to its activation, if the slot is used
    pub fn from_code(code: u32) -> Option<Activation> {
        ACTIVATIONS
            .iter()
            .find(|i| i.activation.code() == code)
            .map(|i| i.activation)
    }

    pub fn info(self) -> Option<&'static ActivationInfo> {
        ACTIVATIONS.iter().find(|i| i.activation == self)
    }

    /// Acceptance tier in `one_activation`
    pub fn random_chance(self) -> u32 {
        self.info().map_or(0, |i| i.random_chance)
    }

    pub fn value(self) -> i32 {
        self.info().map_or(0, |i| i.value)
    }

    pub fn description(self) -> &'static str {
        self.info().map_or("nothing", |i| i.desc)
    }
}

fn set_activation(obj: &mut Object, activation: Activation) {
    obj.activation = Some(activation);
    obj.flags.add(TrFlag::Activate);
    obj.timeout = 0;
}

/// Unthemed activation by rejection sampling over the raw code space
///
/// Each round draws an accept roll against the current candidate's tier and,
/// on failure, a fresh code. Unused codes have tier 0 and never pass, so the
/// first round always draws. Stronger effects sit in lower tiers.
pub fn one_activation(obj: &mut Object, rng: &mut GameRng) {
    let mut chance = 0;
    let mut picked = None;

    while rng.rnd(100) >= chance {
        picked = Activation::from_code(rng.rnd(ACTIVATION_CODES));
        chance = picked.map_or(0, Activation::random_chance);
    }

    if let Some(activation) = picked {
        set_activation(obj, activation);
    }
}

/// Themed activation and the chance to keep it
fn themed_activation(theme: Theme, rng: &mut GameRng) -> Option<(Activation, u32)> {
    let pick = match theme {
        Theme::Elec => {
            let a = if !rng.one_in(3) {
                A::BoElec1
            } else if !rng.one_in(5) {
                A::BaElec2
            } else {
                A::BaElec3
            };
            (a, 101)
        }
        Theme::Pois => (A::BaPois1, 101),
        Theme::Fire => {
            let a = if !rng.one_in(3) {
                A::BoFire1
            } else if !rng.one_in(5) {
                A::BaFire1
            } else {
                A::BaFire2
            };
            (a, 101)
        }
        Theme::Cold => {
            let a = if !rng.one_in(3) {
                A::BoCold1
            } else if !rng.one_in(3) {
                A::BaCold1
            } else if !rng.one_in(3) {
                A::BaCold2
            } else {
                A::BaCold3
            };
            (a, 101)
        }
        Theme::Chaos => {
            let a = if rng.one_in(6) {
                A::SummonDemon
            } else {
                A::CallChaos
            };
            (a, 50)
        }
        Theme::Priestly => {
            let a = if rng.one_in(13) {
                A::CharmUndead
            } else if rng.one_in(12) {
                A::BanishEvil
            } else if rng.one_in(11) {
                A::DispEvil
            } else if rng.one_in(10) {
                A::ProtEvil
            } else if rng.one_in(9) {
                A::Cure1000
            } else if rng.one_in(8) {
                A::Cure700
            } else if rng.one_in(7) {
                A::RestAll
            } else if rng.one_in(6) {
                A::RestLife
            } else {
                A::CureMw
            };
            (a, 101)
        }
        Theme::Necromantic => {
            let a = if rng.one_in(66) {
                A::Wraith
            } else if rng.one_in(13) {
                A::DispGood
            } else if rng.one_in(9) {
                A::MassGeno
            } else if rng.one_in(8) {
                A::Genocide
            } else if rng.one_in(13) {
                A::SummonUndead
            } else if rng.one_in(9) {
                A::Hypodynamia2
            } else if rng.one_in(6) {
                A::CharmUndead
            } else {
                A::Hypodynamia1
            };
            (a, 101)
        }
        Theme::Law => {
            let a = if rng.one_in(8) {
                A::BanishEvil
            } else if rng.one_in(4) {
                A::DispEvil
            } else {
                A::ProtEvil
            };
            (a, 101)
        }
        Theme::Rogue => {
            let a = if rng.one_in(50) {
                A::Speed
            } else if rng.one_in(4) {
                A::Sleep
            } else if rng.one_in(3) {
                A::DetectAll
            } else if rng.one_in(8) {
                A::IdFull
            } else {
                A::IdPlain
            };
            (a, 101)
        }
        Theme::Mage => {
            let a = if rng.one_in(20) {
                A::SummonElemental
            } else if rng.one_in(10) {
                A::SummonPhantom
            } else if rng.one_in(5) {
                A::RuneExplo
            } else {
                A::Esp
            };
            (a, 66)
        }
        Theme::Warrior => {
            let a = if rng.one_in(100) {
                A::Invuln
            } else {
                A::Berserk
            };
            (a, 80)
        }
        Theme::Ranger => {
            let a = if rng.one_in(20) {
                A::CharmAnimals
            } else if rng.one_in(7) {
                A::SummonAnimal
            } else if rng.one_in(6) {
                A::CharmAnimal
            } else if rng.one_in(4) {
                A::ResistAll
            } else if rng.one_in(3) {
                A::Satiate
            } else {
                A::CurePoison
            };
            (a, 101)
        }
        _ => return None,
    };
    Some(pick)
}

/// Give an item an activation, themed when its theme has one
pub fn give_activation_power(obj: &mut Object, rng: &mut GameRng) {
    let themed = obj.bias.get().and_then(|t| themed_activation(t, rng));

    match themed {
        Some((activation, chance)) if rng.rnd(100) < chance => set_activation(obj, activation),
        _ => one_activation(obj, rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{SV_DAGGER, Tval};
    use std::collections::HashMap;
    use strum::IntoEnumIterator;

    fn dagger() -> Object {
        Object::lookup(Tval::Sword, SV_DAGGER).unwrap()
    }

    #[test]
    fn test_table_covers_every_activation() {
        assert_eq!(ACTIVATIONS.len(), Activation::iter().count());
        for a in Activation::iter() {
            let info = a.info().unwrap();
            assert_eq!(info.activation, a);
            assert!(a.code() >= 1 && a.code() <= ACTIVATION_CODES);
            assert!(matches!(
                info.random_chance,
                0 | 5 | 10 | 25 | 33 | 40 | 50 | 66 | 75 | 85 | 101
            ));
        }
        assert_eq!(Activation::from_code(7), Some(Activation::BoFire1));
        assert_eq!(Activation::from_code(200), None);
    }

    #[test]
    fn test_one_activation_sets_fields() {
        let mut rng = GameRng::new(42);
        let mut obj = dagger();
        obj.timeout = 40;
        one_activation(&mut obj, &mut rng);
        let a = obj.activation.unwrap();
        assert!(a.random_chance() > 0);
        assert!(obj.flags.has(TrFlag::Activate));
        assert_eq!(obj.timeout, 0);
    }

    #[test]
    fn test_one_activation_favors_weak_effects() {
        let mut rng = GameRng::new(42);
        let mut counts: HashMap<u32, u32> = HashMap::new();
        for _ in 0..5000 {
            let mut obj = dagger();
            one_activation(&mut obj, &mut rng);
            let a = obj.activation.unwrap();
            assert_ne!(a.random_chance(), 0, "never-tier activation {a} accepted");
            *counts.entry(a.random_chance()).or_default() += 1;
        }
        // 18 always-accepted codes vs 5 codes at tier 5
        let always = counts.get(&101).copied().unwrap_or(0);
        let rare = counts.get(&5).copied().unwrap_or(0);
        assert!(always > rare * 10, "always={always} rare={rare}");
    }

    #[test]
    fn test_themed_activation() {
        let mut rng = GameRng::new(42);
        for _ in 0..200 {
            let mut obj = dagger();
            obj.bias.set_if_absent(Theme::Pois);
            give_activation_power(&mut obj, &mut rng);
            assert_eq!(obj.activation, Some(Activation::BaPois1));
        }
    }

    #[test]
    fn test_warrior_activation_sometimes_falls_back() {
        let mut rng = GameRng::new(42);
        let mut themed = 0;
        for _ in 0..1000 {
            let mut obj = dagger();
            obj.bias.set_if_absent(Theme::Warrior);
            give_activation_power(&mut obj, &mut rng);
            if matches!(
                obj.activation,
                Some(Activation::Berserk) | Some(Activation::Invuln)
            ) {
                themed += 1;
            }
        }
        // 79% kept, plus fallback picks that land on berserk
        assert!((700..950).contains(&themed), "themed = {themed}");
    }

    #[test]
    fn test_unthemed_stat_theme_uses_fallback() {
        let mut rng = GameRng::new(42);
        let mut obj = dagger();
        obj.bias.set_if_absent(Theme::Str);
        give_activation_power(&mut obj, &mut rng);
        assert!(obj.activation.is_some());
    }
}

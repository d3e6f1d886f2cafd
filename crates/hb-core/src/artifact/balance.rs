//! Post-generation damage balancing
//!
//! Estimates a weapon's average hit and shaves dice or to-dam when the
//! estimate is over the ceiling for its blows and vampirism.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::consts::{
    DAMAGE_CEILING, DAMAGE_CEILING_BLOWS, SWORDFISH_LUCK, VAMPIRIC_DAMAGE_CEILING,
    VAMPIRIC_DAMAGE_CEILING_BLOWS, WEAKENING_TO_DAM_FLOOR,
};
use crate::object::{Object, TrFlag};
use crate::rng::GameRng;

/// How the balancer applies the weakening step
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WeakeningMode {
    /// Spin on the suppression check, then weaken exactly once
    #[default]
    Literal,
    /// Weaken inside the loop until safe, escaped, or nothing is left to shave
    UntilSafe,
}

impl WeakeningMode {
    pub fn from_name(name: &str) -> Option<WeakeningMode> {
        match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "literal" | "once" => Some(WeakeningMode::Literal),
            "until_safe" | "loop" => Some(WeakeningMode::UntilSafe),
            _ => None,
        }
    }
}

/// Every stage of the average damage estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DamageBreakdown {
    pub normal: i32,
    pub evil: i32,
    pub force: i32,
    pub vorpal: i32,
    pub total: i32,
}

impl std::fmt::Display for DamageBreakdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Normal:{}  Evil:{}  Force:{}  Vorpal:{}  Final:{}",
            self.normal, self.evil, self.force, self.vorpal, self.total
        )
    }
}

/// Average damage estimate with each multiplier stage
///
/// Multipliers apply to the running total in a fixed order: evil slaying,
/// force, vorpal. To-dam is added last.
pub fn damage_breakdown(obj: &Object) -> DamageBreakdown {
    let dice = i32::from(obj.dd) * i32::from(obj.ds) + i32::from(obj.dd);
    let normal = dice / 2;
    let mut dam = normal;

    if obj.flags.has(TrFlag::KillEvil) {
        dam = dam * 7 / 2;
    } else if obj.flags.has(TrFlag::SlayEvil) {
        dam *= 2;
    }
    let evil = dam;

    if obj.flags.has(TrFlag::ForceWeapon) {
        dam = dam * 3 / 2 + dice;
    }
    let force = dam;

    if obj.flags.has(TrFlag::Vorpal) {
        dam = dam * 11 / 9;
    }
    let vorpal = dam;

    DamageBreakdown {
        normal,
        evil,
        force,
        vorpal,
        total: dam + i32::from(obj.to_d),
    }
}

/// Average damage per hit
pub fn calc_arm_avgdamage(obj: &Object) -> i32 {
    damage_breakdown(obj).total
}

/// Average damage ceiling for this weapon's blows and vampirism
pub fn damage_ceiling(obj: &Object) -> i32 {
    let (by_blows, otherwise) = if obj.flags.has(TrFlag::Vampiric) {
        (VAMPIRIC_DAMAGE_CEILING_BLOWS, VAMPIRIC_DAMAGE_CEILING)
    } else {
        (DAMAGE_CEILING_BLOWS, DAMAGE_CEILING)
    };

    if obj.flags.has(TrFlag::Blows) {
        match obj.pval {
            1 => return by_blows[0],
            2 => return by_blows[1],
            p if p > 2 => return by_blows[2],
            _ => {}
        }
    }
    otherwise
}

/// Is this weapon over its damage ceiling?
pub fn suppression_evil_dam(obj: &Object) -> bool {
    calc_arm_avgdamage(obj) > damage_ceiling(obj)
}

/// Shave one step of damage; returns whether anything changed
///
/// Dice above the base item's lose a pip from the larger of dd/ds. Otherwise
/// to-dam above the floor drops by 1d6, never below the floor.
pub fn weakening_artifact(obj: &mut Object, rng: &mut GameRng) -> bool {
    let (base_dd, base_ds) = obj.kind().map_or((obj.dd, obj.ds), |k| (k.dd, k.ds));

    if base_dd < obj.dd || base_ds < obj.ds {
        let (pre_dd, pre_ds) = (obj.dd, obj.ds);
        if obj.dd > obj.ds {
            obj.dd = obj.dd.saturating_sub(1);
        } else {
            obj.ds = obj.ds.saturating_sub(1);
        }
        log::debug!(
            "Dice Suppress {}d{} -> {}d{}",
            pre_dd,
            pre_ds,
            obj.dd,
            obj.ds
        );
        return true;
    }

    if obj.to_d > WEAKENING_TO_DAM_FLOOR {
        let pre = obj.to_d;
        obj.to_d = (obj.to_d - rng.dice(1, 6) as i16).max(WEAKENING_TO_DAM_FLOOR);
        log::debug!("Damage Suppress {} -> {}", pre, obj.to_d);
        return true;
    }

    false
}

/// Run the damage balancing step; returns how many weakening steps ran
pub fn balance_damage(obj: &mut Object, mode: WeakeningMode, rng: &mut GameRng) -> u32 {
    log::debug!("{}", damage_breakdown(obj));

    match mode {
        WeakeningMode::Literal => {
            while suppression_evil_dam(obj) && !rng.one_in(SWORDFISH_LUCK) {}
            weakening_artifact(obj, rng);
            1
        }
        WeakeningMode::UntilSafe => {
            let mut steps = 0;
            while suppression_evil_dam(obj) && !rng.one_in(SWORDFISH_LUCK) {
                steps += 1;
                if !weakening_artifact(obj, rng) {
                    break;
                }
            }
            steps
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{SV_KATANA, SV_LONG_SWORD, Tval};

    fn long_sword() -> Object {
        Object::lookup(Tval::Sword, SV_LONG_SWORD).unwrap()
    }

    #[test]
    fn test_avgdamage_plain() {
        let mut obj = long_sword();
        // 2d5: (10 + 2) / 2
        assert_eq!(calc_arm_avgdamage(&obj), 6);
        obj.to_d = 9;
        assert_eq!(calc_arm_avgdamage(&obj), 15);
    }

    #[test]
    fn test_avgdamage_multiplier_order() {
        let mut obj = long_sword();
        obj.flags.add_all([TrFlag::KillEvil, TrFlag::SlayEvil, TrFlag::ForceWeapon, TrFlag::Vorpal]);
        obj.to_d = 5;
        let b = damage_breakdown(&obj);
        assert_eq!(b.normal, 6);
        assert_eq!(b.evil, 21); // kill evil wins over slay evil
        assert_eq!(b.force, 21 * 3 / 2 + 12);
        assert_eq!(b.vorpal, b.force * 11 / 9);
        assert_eq!(b.total, b.vorpal + 5);
        assert!(b.to_string().starts_with("Normal:6  Evil:21"));
    }

    #[test]
    fn test_ceilings() {
        let mut obj = long_sword();
        assert_eq!(damage_ceiling(&obj), 75);
        obj.flags.add(TrFlag::Blows);
        obj.pval = 1;
        assert_eq!(damage_ceiling(&obj), 65);
        obj.pval = 2;
        assert_eq!(damage_ceiling(&obj), 52);
        obj.pval = 3;
        assert_eq!(damage_ceiling(&obj), 40);
        obj.flags.add(TrFlag::Vampiric);
        assert_eq!(damage_ceiling(&obj), 33);
        obj.pval = 0;
        assert_eq!(damage_ceiling(&obj), 63);
    }

    #[test]
    fn test_suppression() {
        let mut obj = long_sword();
        obj.to_d = 69;
        assert!(!suppression_evil_dam(&obj));
        obj.to_d = 70;
        assert!(suppression_evil_dam(&obj));
    }

    #[test]
    fn test_weakening_dice_first() {
        let mut rng = GameRng::new(42);
        let mut obj = long_sword();
        obj.dd = 4;
        obj.to_d = 30;
        assert!(weakening_artifact(&mut obj, &mut rng));
        // 4d5: ds is larger
        assert_eq!((obj.dd, obj.ds), (4, 4));
        assert!(weakening_artifact(&mut obj, &mut rng));
        assert_eq!((obj.dd, obj.ds), (4, 3));
        assert!(weakening_artifact(&mut obj, &mut rng));
        assert_eq!((obj.dd, obj.ds), (3, 3));
        assert_eq!(obj.to_d, 30);
    }

    #[test]
    fn test_weakening_to_dam_floor() {
        let mut rng = GameRng::new(42);
        let mut obj = long_sword();
        obj.to_d = 12;
        for _ in 0..10 {
            weakening_artifact(&mut obj, &mut rng);
            assert!(obj.to_d >= WEAKENING_TO_DAM_FLOOR);
        }
        assert_eq!(obj.to_d, WEAKENING_TO_DAM_FLOOR);
        assert!(!weakening_artifact(&mut obj, &mut rng));
    }

    #[test]
    fn test_literal_weakens_once() {
        let mut rng = GameRng::new(42);
        for _ in 0..100 {
            let mut obj = long_sword();
            obj.to_d = 40;
            let steps = balance_damage(&mut obj, WeakeningMode::Literal, &mut rng);
            assert_eq!(steps, 1);
            assert!((34..=39).contains(&obj.to_d));
        }

        // Safe weapons are weakened too
        let mut obj = long_sword();
        obj.to_d = 15;
        balance_damage(&mut obj, WeakeningMode::Literal, &mut rng);
        assert!(obj.to_d < 15);
    }

    #[test]
    fn test_until_safe_leaves_safe_weapons_alone() {
        let mut rng = GameRng::new(42);
        let mut obj = long_sword();
        obj.to_d = 15;
        assert_eq!(balance_damage(&mut obj, WeakeningMode::UntilSafe, &mut rng), 0);
        assert_eq!(obj.to_d, 15);
    }

    #[test]
    fn test_until_safe_shaves_more() {
        let mut rng = GameRng::new(42);
        let mut total_steps = 0;
        for _ in 0..200 {
            let mut obj = Object::lookup(Tval::Sword, SV_KATANA).unwrap();
            obj.dd = 6;
            obj.to_d = 60;
            obj.flags.add(TrFlag::SlayEvil);
            total_steps += balance_damage(&mut obj, WeakeningMode::UntilSafe, &mut rng);
        }
        assert!(total_steps > 200);
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(WeakeningMode::from_name("until-safe"), Some(WeakeningMode::UntilSafe));
        assert_eq!(WeakeningMode::from_name("Literal"), Some(WeakeningMode::Literal));
        assert_eq!(WeakeningMode::UntilSafe.to_string(), "until_safe");
        assert_eq!(WeakeningMode::from_name("never"), None);
    }
}

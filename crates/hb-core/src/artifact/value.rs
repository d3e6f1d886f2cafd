//! Flag cost
//!
//! Scores an artifact's special properties. The forge only uses the score
//! to pick a naming tier; it never feeds back into generation.

use crate::object::{FlagSet, Object, TrFlag};

/// Power score of an item's special properties
pub trait FlagCost {
    /// Score `obj`, scaling pval-based bonuses by `plusses`
    fn flag_cost(&self, obj: &Object, plusses: i32) -> i32;
}

/// Standard scoring table
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFlagCost;

/// Cost per point of pval
const PVAL_COSTS: &[(TrFlag, i32)] = &[
    (TrFlag::Str, 1500),
    (TrFlag::Int, 1500),
    (TrFlag::Wis, 1500),
    (TrFlag::Dex, 1500),
    (TrFlag::Con, 1500),
    (TrFlag::Chr, 750),
    (TrFlag::MagicMastery, 600),
    (TrFlag::Stealth, 250),
    (TrFlag::Search, 100),
    (TrFlag::Infra, 150),
    (TrFlag::Tunnel, 175),
];

/// Melee flags scored as a group: sum of costs times how many there are
const SLAY_COSTS: &[(TrFlag, i32)] = &[
    (TrFlag::ForceWeapon, 2500),
    (TrFlag::KillAnimal, 2800),
    (TrFlag::SlayAnimal, 1800),
    (TrFlag::KillEvil, 3300),
    (TrFlag::SlayEvil, 2300),
    (TrFlag::KillHuman, 2800),
    (TrFlag::SlayHuman, 1800),
    (TrFlag::KillUndead, 2800),
    (TrFlag::SlayUndead, 1800),
    (TrFlag::KillDemon, 2800),
    (TrFlag::SlayDemon, 1800),
    (TrFlag::KillOrc, 2500),
    (TrFlag::SlayOrc, 1500),
    (TrFlag::KillTroll, 2800),
    (TrFlag::SlayTroll, 1800),
    (TrFlag::KillGiant, 2800),
    (TrFlag::SlayGiant, 1800),
    (TrFlag::KillDragon, 2800),
    (TrFlag::SlayDragon, 1800),
    (TrFlag::Vorpal, 2500),
    (TrFlag::Impact, 2500),
    (TrFlag::BrandPois, 3800),
    (TrFlag::BrandAcid, 3800),
    (TrFlag::BrandElec, 3800),
    (TrFlag::BrandFire, 2500),
    (TrFlag::BrandCold, 2500),
];

/// Defensive flags scored as a group; the third field is the count weight
const RESIST_COSTS: &[(TrFlag, i32, i32)] = &[
    (TrFlag::ImAcid, 15000, 2),
    (TrFlag::ImElec, 15000, 2),
    (TrFlag::ImFire, 15000, 2),
    (TrFlag::ImCold, 15000, 2),
    (TrFlag::Reflect, 5000, 2),
    (TrFlag::ResAcid, 500, 1),
    (TrFlag::ResElec, 500, 1),
    (TrFlag::ResFire, 500, 1),
    (TrFlag::ResCold, 500, 1),
    (TrFlag::ResPois, 1000, 2),
    (TrFlag::ResFear, 1000, 2),
    (TrFlag::ResLite, 800, 2),
    (TrFlag::ResDark, 800, 2),
    (TrFlag::ResBlind, 900, 2),
    (TrFlag::ResConf, 900, 2),
    (TrFlag::ResSound, 900, 2),
    (TrFlag::ResShards, 900, 2),
    (TrFlag::ResNether, 900, 2),
    (TrFlag::ResNexus, 900, 2),
    (TrFlag::ResChaos, 1000, 2),
    (TrFlag::ResDisen, 2000, 2),
];

const FLAT_COSTS: &[(TrFlag, i32)] = &[
    (TrFlag::Chaotic, 5000),
    (TrFlag::Vampiric, 6500),
    (TrFlag::SustStr, 850),
    (TrFlag::SustInt, 850),
    (TrFlag::SustWis, 850),
    (TrFlag::SustDex, 850),
    (TrFlag::SustCon, 850),
    (TrFlag::SustChr, 250),
    (TrFlag::EasySpell, 1500),
    (TrFlag::Throw, 5000),
    (TrFlag::FreeAct, 4500),
    (TrFlag::HoldExp, 8500),
    (TrFlag::ShFire, 5000),
    (TrFlag::ShElec, 5000),
    (TrFlag::ShCold, 5000),
    (TrFlag::NoTele, -15000),
    (TrFlag::NoMagic, 2500),
    (TrFlag::TyCurse, -15000),
    (TrFlag::Levitation, 1250),
    (TrFlag::Lite1, 1500),
    (TrFlag::Lite2, 2500),
    (TrFlag::Lite3, 5000),
    (TrFlag::LiteM1, -1500),
    (TrFlag::LiteM2, -2500),
    (TrFlag::LiteM3, -5000),
    (TrFlag::SeeInvis, 2000),
    (TrFlag::Telepathy, 20000),
    (TrFlag::EspAnimal, 1000),
    (TrFlag::EspUndead, 1000),
    (TrFlag::EspDemon, 1000),
    (TrFlag::EspOrc, 1000),
    (TrFlag::EspTroll, 1000),
    (TrFlag::EspGiant, 1000),
    (TrFlag::EspDragon, 1000),
    (TrFlag::EspHuman, 1000),
    (TrFlag::EspEvil, 15000),
    (TrFlag::EspGood, 2000),
    (TrFlag::EspNonliving, 2000),
    (TrFlag::EspUnique, 10000),
    (TrFlag::SlowDigest, 750),
    (TrFlag::Regen, 2500),
    (TrFlag::Warning, 2000),
    (TrFlag::DecMana, 10000),
    (TrFlag::XtraMight, 2250),
    (TrFlag::XtraShots, 10000),
    (TrFlag::Activate, 100),
    (TrFlag::DrainExp, -15000),
    (TrFlag::DrainHp, -15000),
    (TrFlag::DrainMana, -15000),
    (TrFlag::Aggravate, -10000),
    (TrFlag::Blessed, 750),
    (TrFlag::AddLCurse, -1500),
    (TrFlag::AddHCurse, -10000),
    (TrFlag::CallAnimal, -10000),
    (TrFlag::CallDemon, -10000),
    (TrFlag::CallDragon, -10000),
    (TrFlag::CallUndead, -10000),
    (TrFlag::Cowardice, -5000),
    (TrFlag::LowMelee, -5000),
    (TrFlag::LowAc, -5000),
    (TrFlag::LowMagic, -15000),
    (TrFlag::FastDigest, -10000),
    (TrFlag::SlowRegen, -10000),
];

impl StandardFlagCost {
    /// Flags the item gained beyond its base kind
    fn scored_flags(obj: &Object) -> FlagSet {
        obj.kind()
            .map_or(obj.flags, |kind| obj.flags.difference(&kind.flag_set()))
    }
}

impl FlagCost for StandardFlagCost {
    fn flag_cost(&self, obj: &Object, plusses: i32) -> i32 {
        let flags = Self::scored_flags(obj);
        let mut total = 0;

        for &(flag, cost) in PVAL_COSTS {
            if flags.has(flag) {
                total += cost * plusses;
            }
        }
        if plusses > 0 {
            if flags.has(TrFlag::Speed) {
                total += 10000 + 2500 * plusses;
            }
            if flags.has(TrFlag::Blows) {
                total += 10000 + 2500 * plusses;
            }
        }

        let mut group = 0;
        let mut count = 0;
        for &(flag, cost) in SLAY_COSTS {
            if flags.has(flag) {
                group += cost;
                count += 1;
            }
        }
        // Chaotic and vampiric count toward the group size at a flat price
        for flag in [TrFlag::Chaotic, TrFlag::Vampiric] {
            if flags.has(flag) {
                count += 1;
            }
        }
        total += group * count;

        let mut group = 0;
        let mut count = 0;
        for &(flag, cost, weight) in RESIST_COSTS {
            if flags.has(flag) {
                group += cost;
                count += weight;
            }
        }
        total += group * count;

        for &(flag, cost) in FLAT_COSTS {
            if flags.has(flag) {
                total += cost;
            }
        }

        if flags.has(TrFlag::Teleport) {
            total += if obj.is_cursed() { -7500 } else { 250 };
        }

        if flags.has(TrFlag::Activate) {
            total += obj.activation.map_or(0, |a| a.value());
        }

        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::Activation;
    use crate::object::{BaseItem, CurseFlags, SV_DAGGER, SV_LONG_SWORD, Tval};

    fn sword() -> Object {
        Object::lookup(Tval::Sword, SV_LONG_SWORD).unwrap()
    }

    #[test]
    fn test_plain_item_costs_nothing() {
        let cost = StandardFlagCost;
        assert_eq!(cost.flag_cost(&sword(), 0), 0);
        // Inherent flags are not scored
        let dagger = Object::lookup(Tval::Sword, SV_DAGGER).unwrap();
        assert!(dagger.flags.has(TrFlag::Throw));
        assert_eq!(cost.flag_cost(&dagger, 0), 0);
        let ring = Object::from_kind(BaseItem::by_name("Ring of Strength").unwrap());
        assert_eq!(cost.flag_cost(&ring, 1), 0);
    }

    #[test]
    fn test_stats_scale_with_pval() {
        let cost = StandardFlagCost;
        let mut obj = sword();
        obj.flags.add(TrFlag::Str);
        assert_eq!(cost.flag_cost(&obj, 1), 1500);
        assert_eq!(cost.flag_cost(&obj, 3), 4500);
        obj.flags.add(TrFlag::Speed);
        assert_eq!(cost.flag_cost(&obj, 2), 3000 + 15000);
        assert_eq!(cost.flag_cost(&obj, -2), -3000);
    }

    #[test]
    fn test_slay_group_multiplies() {
        let cost = StandardFlagCost;
        let mut obj = sword();
        obj.flags.add(TrFlag::SlayEvil);
        assert_eq!(cost.flag_cost(&obj, 0), 2300);
        obj.flags.add(TrFlag::BrandFire);
        assert_eq!(cost.flag_cost(&obj, 0), (2300 + 2500) * 2);
        obj.flags.add(TrFlag::Vampiric);
        assert_eq!(cost.flag_cost(&obj, 0), (2300 + 2500) * 3 + 6500);
    }

    #[test]
    fn test_resist_group_weights() {
        let cost = StandardFlagCost;
        let mut obj = sword();
        obj.flags.add_all([TrFlag::ResFire, TrFlag::ResPois]);
        assert_eq!(cost.flag_cost(&obj, 0), (500 + 1000) * 3);
    }

    #[test]
    fn test_curses_are_negative() {
        let cost = StandardFlagCost;
        let mut obj = sword();
        obj.flags.add_all([TrFlag::Aggravate, TrFlag::Teleport]);
        assert_eq!(cost.flag_cost(&obj, 0), -10000 + 250);
        obj.curse_flags |= CurseFlags::CURSED;
        assert_eq!(cost.flag_cost(&obj, 0), -10000 - 7500);
    }

    #[test]
    fn test_activation_value_counts() {
        let cost = StandardFlagCost;
        let mut obj = sword();
        obj.activation = Some(Activation::Speed);
        obj.flags.add(TrFlag::Activate);
        assert_eq!(cost.flag_cost(&obj, 0), 100 + 15000);
    }
}

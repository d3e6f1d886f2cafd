//! Base item templates (k_info)
//!
//! Read-only store of the un-enchanted item kinds the forge starts from.
//! The balancer compares an artifact's dice against its kind to decide what
//! can be shaved, and the forge copies the kind's inherent flags in at the
//! start of every run.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::flags::{FlagSet, TrFlag};
use crate::errors::ObjectError;
use crate::rng::GameRng;

/// Item category (tval)
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
#[repr(u8)]
pub enum Tval {
    Shot = 16,
    Arrow = 17,
    Bolt = 18,
    Bow = 19,
    Digging = 20,
    Hafted = 21,
    Polearm = 22,
    #[default]
    Sword = 23,
    Boots = 30,
    Gloves = 31,
    Helm = 32,
    Crown = 33,
    Shield = 34,
    Cloak = 35,
    SoftArmor = 36,
    HardArmor = 37,
    DragArmor = 38,
    Lite = 39,
    Amulet = 40,
    Ring = 45,
}

impl Tval {
    /// Weapons and ammunition, including bows
    pub const fn is_weapon_ammo(self) -> bool {
        let t = self as u8;
        t >= Tval::Shot as u8 && t <= Tval::Sword as u8
    }

    /// Weapons that strike in melee (digging tools count)
    pub const fn is_melee_weapon(self) -> bool {
        let t = self as u8;
        t >= Tval::Digging as u8 && t <= Tval::Sword as u8
    }

    pub const fn is_armour(self) -> bool {
        let t = self as u8;
        t >= Tval::Boots as u8 && t <= Tval::DragArmor as u8
    }

    /// Cloaks and body armour; the only kinds that may carry an aura
    pub const fn is_body_cover(self) -> bool {
        let t = self as u8;
        t >= Tval::Cloak as u8 && t <= Tval::HardArmor as u8
    }

    /// Kinds on which reflection is a legal random property
    pub const fn can_reflect(self) -> bool {
        matches!(
            self,
            Tval::Shield | Tval::Cloak | Tval::Helm | Tval::HardArmor
        )
    }

    pub const fn is_jewelry(self) -> bool {
        matches!(self, Tval::Amulet | Tval::Ring)
    }
}

// Sub-types the forge special-cases
pub const SV_DAGGER: u8 = 4;
pub const SV_LONG_SWORD: u8 = 17;
pub const SV_KATANA: u8 = 20;
pub const SV_DOKUBARI: u8 = 32;
pub const SV_HAYABUSA: u8 = 33;
pub const SV_SPEAR: u8 = 2;
pub const SV_SCYTHE: u8 = 17;
pub const SV_QUARTERSTAFF: u8 = 3;
pub const SV_ROBE: u8 = 2;
pub const SV_SOFT_LEATHER_ARMOUR: u8 = 4;
pub const SV_IRON_HELM: u8 = 5;
pub const SV_CLOAK: u8 = 1;

/// Un-enchanted item template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseItem {
    pub tval: Tval,
    pub sval: u8,
    pub name: &'static str,
    pub dd: u8,
    pub ds: u8,
    pub ac: i16,
    pub to_h: i16,
    pub to_d: i16,
    pub to_a: i16,
    pub pval: i16,
    pub weight: u16,
    /// Inherent properties every item of this kind has
    pub flags: &'static [TrFlag],
}

impl BaseItem {
    const fn weapon(tval: Tval, sval: u8, name: &'static str, dd: u8, ds: u8, weight: u16) -> Self {
        Self {
            tval,
            sval,
            name,
            dd,
            ds,
            ac: 0,
            to_h: 0,
            to_d: 0,
            to_a: 0,
            pval: 0,
            weight,
            flags: &[],
        }
    }

    const fn armour(tval: Tval, sval: u8, name: &'static str, ac: i16, weight: u16) -> Self {
        Self {
            tval,
            sval,
            name,
            dd: 0,
            ds: 0,
            ac,
            to_h: 0,
            to_d: 0,
            to_a: 0,
            pval: 0,
            weight,
            flags: &[],
        }
    }

    const fn with_flags(mut self, flags: &'static [TrFlag]) -> Self {
        self.flags = flags;
        self
    }

    const fn with_pval(mut self, pval: i16) -> Self {
        self.pval = pval;
        self
    }

    const fn with_to_h(mut self, to_h: i16) -> Self {
        self.to_h = to_h;
        self
    }

    const fn with_dice(mut self, dd: u8, ds: u8) -> Self {
        self.dd = dd;
        self.ds = ds;
        self
    }

    /// Inherent flags as a set
    pub fn flag_set(&self) -> FlagSet {
        FlagSet::from_flags(self.flags)
    }

    /// Find the template for a (tval, sval) pair
    pub fn lookup(tval: Tval, sval: u8) -> Result<&'static BaseItem, ObjectError> {
        BASE_ITEMS
            .iter()
            .find(|k| k.tval == tval && k.sval == sval)
            .ok_or(ObjectError::UnknownKind { tval, sval })
    }

    /// Find a template by name, ignoring case
    pub fn by_name(name: &str) -> Result<&'static BaseItem, ObjectError> {
        let wanted = name.trim();
        BASE_ITEMS
            .iter()
            .find(|k| k.name.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ObjectError::UnknownKindName(name.to_string()))
    }

    /// Pick a uniformly random template among those accepted by `filter`
    pub fn random<F>(rng: &mut GameRng, filter: F) -> Option<&'static BaseItem>
    where
        F: Fn(&BaseItem) -> bool,
    {
        let candidates: Vec<&'static BaseItem> = BASE_ITEMS.iter().filter(|k| filter(k)).collect();
        rng.choose(&candidates).copied()
    }
}

/// Every base item the forge knows about
pub static BASE_ITEMS: &[BaseItem] = &[
    // Ammunition
    BaseItem::weapon(Tval::Shot, 1, "Iron Shot", 1, 4, 4),
    BaseItem::weapon(Tval::Arrow, 1, "Arrow", 1, 4, 2),
    BaseItem::weapon(Tval::Arrow, 2, "Seeker Arrow", 4, 4, 2),
    BaseItem::weapon(Tval::Bolt, 1, "Bolt", 1, 5, 3),
    // Launchers
    BaseItem::weapon(Tval::Bow, 2, "Sling", 0, 0, 5),
    BaseItem::weapon(Tval::Bow, 12, "Short Bow", 0, 0, 30),
    BaseItem::weapon(Tval::Bow, 13, "Long Bow", 0, 0, 40),
    BaseItem::weapon(Tval::Bow, 23, "Light Crossbow", 0, 0, 110),
    // Diggers
    BaseItem::weapon(Tval::Digging, 1, "Shovel", 1, 2, 60)
        .with_pval(1)
        .with_flags(&[TrFlag::Tunnel]),
    BaseItem::weapon(Tval::Digging, 4, "Pick", 1, 3, 150)
        .with_pval(1)
        .with_flags(&[TrFlag::Tunnel]),
    // Hafted
    BaseItem::weapon(Tval::Hafted, SV_QUARTERSTAFF, "Quarterstaff", 1, 9, 150),
    BaseItem::weapon(Tval::Hafted, 5, "Mace", 2, 4, 120),
    BaseItem::weapon(Tval::Hafted, 8, "War Hammer", 3, 3, 120),
    BaseItem::weapon(Tval::Hafted, 12, "Morning Star", 2, 6, 150),
    BaseItem::weapon(Tval::Hafted, 13, "Flail", 2, 6, 150),
    // Polearms
    BaseItem::weapon(Tval::Polearm, SV_SPEAR, "Spear", 1, 6, 50).with_flags(&[TrFlag::Throw]),
    BaseItem::weapon(Tval::Polearm, 10, "Lance", 2, 8, 300),
    BaseItem::weapon(Tval::Polearm, 15, "Halberd", 3, 5, 190),
    BaseItem::weapon(Tval::Polearm, SV_SCYTHE, "Scythe", 5, 3, 250),
    // Swords
    BaseItem::weapon(Tval::Sword, SV_DAGGER, "Dagger", 1, 4, 12).with_flags(&[TrFlag::Throw]),
    BaseItem::weapon(Tval::Sword, 6, "Tanto", 1, 5, 18),
    BaseItem::weapon(Tval::Sword, 10, "Short Sword", 1, 7, 80),
    BaseItem::weapon(Tval::Sword, SV_LONG_SWORD, "Long Sword", 2, 5, 130),
    BaseItem::weapon(Tval::Sword, SV_KATANA, "Katana", 3, 5, 120),
    BaseItem::weapon(Tval::Sword, 25, "Two-Handed Sword", 3, 6, 200),
    BaseItem::weapon(Tval::Sword, SV_DOKUBARI, "Dokubari", 1, 1, 1),
    BaseItem::weapon(Tval::Sword, SV_HAYABUSA, "Hayabusa", 1, 6, 130),
    // Armour
    BaseItem::armour(Tval::Boots, 2, "Pair of Soft Leather Boots", 2, 20),
    BaseItem::armour(Tval::Boots, 6, "Pair of Metal Shod Boots", 6, 80),
    BaseItem::armour(Tval::Gloves, 1, "Set of Leather Gloves", 1, 10),
    BaseItem::armour(Tval::Gloves, 2, "Set of Gauntlets", 3, 25),
    BaseItem::armour(Tval::Helm, 2, "Hard Leather Cap", 2, 15),
    BaseItem::armour(Tval::Helm, SV_IRON_HELM, "Iron Helm", 7, 75),
    BaseItem::armour(Tval::Crown, 1, "Iron Crown", 0, 20),
    BaseItem::armour(Tval::Crown, 2, "Golden Crown", 0, 30),
    BaseItem::armour(Tval::Shield, 2, "Wicker Shield", 2, 30),
    BaseItem::armour(Tval::Shield, 5, "Large Metal Shield", 12, 120),
    BaseItem::armour(Tval::Cloak, SV_CLOAK, "Cloak", 1, 10),
    BaseItem::armour(Tval::Cloak, 3, "Fur Cloak", 3, 40),
    BaseItem::armour(Tval::SoftArmor, SV_ROBE, "Robe", 2, 20),
    BaseItem::armour(Tval::SoftArmor, SV_SOFT_LEATHER_ARMOUR, "Soft Leather Armour", 8, 80),
    BaseItem::armour(Tval::HardArmor, 4, "Metal Scale Mail", 38, 250).with_to_h(-2),
    BaseItem::armour(Tval::HardArmor, 15, "Full Plate Armour", 60, 380).with_to_h(-3),
    BaseItem::armour(Tval::DragArmor, 3, "Red Dragon Scale Mail", 30, 100)
        .with_dice(2, 4)
        .with_flags(&[TrFlag::ResFire, TrFlag::Activate]),
    // Light sources and jewelry
    BaseItem::armour(Tval::Lite, 1, "Lantern", 0, 50).with_flags(&[TrFlag::Lite2]),
    BaseItem::armour(Tval::Amulet, 2, "Amulet of Resist Acid", 0, 3)
        .with_flags(&[TrFlag::ResAcid]),
    BaseItem::armour(Tval::Amulet, 5, "Amulet of Slow Digestion", 0, 3)
        .with_flags(&[TrFlag::SlowDigest]),
    BaseItem::armour(Tval::Ring, 4, "Ring of Free Action", 0, 1).with_flags(&[TrFlag::FreeAct]),
    BaseItem::armour(Tval::Ring, 24, "Ring of Strength", 0, 1)
        .with_pval(1)
        .with_flags(&[TrFlag::Str, TrFlag::SustStr]),
];

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_tval_predicates() {
        assert!(Tval::Arrow.is_weapon_ammo());
        assert!(!Tval::Arrow.is_melee_weapon());
        assert!(Tval::Digging.is_melee_weapon());
        assert!(Tval::DragArmor.is_armour());
        assert!(!Tval::Lite.is_armour());
        assert!(Tval::Cloak.is_body_cover());
        assert!(Tval::HardArmor.is_body_cover());
        assert!(!Tval::DragArmor.is_body_cover());
        assert!(Tval::Shield.can_reflect());
        assert!(!Tval::Boots.can_reflect());
        assert!(Tval::Ring.is_jewelry());
    }

    #[test]
    fn test_every_tval_has_a_kind() {
        for tval in Tval::iter() {
            assert!(
                BASE_ITEMS.iter().any(|k| k.tval == tval),
                "no base item for {tval}"
            );
        }
    }

    #[test]
    fn test_kinds_are_unique() {
        for (i, a) in BASE_ITEMS.iter().enumerate() {
            for b in &BASE_ITEMS[i + 1..] {
                assert!(
                    !(a.tval == b.tval && a.sval == b.sval),
                    "{} and {} share a (tval, sval)",
                    a.name,
                    b.name
                );
                assert!(!a.name.eq_ignore_ascii_case(b.name));
            }
        }
    }

    #[test]
    fn test_lookup() {
        let dagger = BaseItem::lookup(Tval::Sword, SV_DAGGER).unwrap();
        assert_eq!(dagger.name, "Dagger");
        assert!(dagger.flag_set().has(TrFlag::Throw));

        assert_eq!(
            BaseItem::lookup(Tval::Sword, 200),
            Err(ObjectError::UnknownKind {
                tval: Tval::Sword,
                sval: 200
            })
        );
    }

    #[test]
    fn test_by_name() {
        let robe = BaseItem::by_name("robe").unwrap();
        assert_eq!((robe.tval, robe.sval), (Tval::SoftArmor, SV_ROBE));
        assert!(BaseItem::by_name("Vorpal Blade").is_err());
    }

    #[test]
    fn test_random_respects_filter() {
        let mut rng = GameRng::new(42);
        for _ in 0..100 {
            let kind = BaseItem::random(&mut rng, |k| k.tval.is_armour()).unwrap();
            assert!(kind.tval.is_armour());
        }
        assert!(BaseItem::random(&mut rng, |_| false).is_none());
    }
}

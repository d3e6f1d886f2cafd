//! Object special-property flags (object-flags.h)
//!
//! `TrFlag` enumerates every special property an item can carry; `FlagSet`
//! is the fixed-size bitset holding them. Curse state lives in the separate
//! `CurseFlags` bitfield.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, IntoEnumIterator};

use crate::consts::TR_FLAG_SIZE;

/// Special property of an object
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumCount,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum TrFlag {
    // Pval-scaled bonuses
    Str = 0,
    Int,
    Wis,
    Dex,
    Con,
    Chr,
    MagicMastery,
    ForceWeapon,
    Stealth,
    Search,
    Infra,
    Tunnel,
    Speed,
    Blows,

    // Melee effects
    Chaotic,
    Vampiric,
    SlayAnimal,
    SlayEvil,
    SlayUndead,
    SlayDemon,
    SlayOrc,
    SlayTroll,
    SlayGiant,
    SlayDragon,
    KillDragon,
    Vorpal,
    Impact,
    BrandPois,
    BrandAcid,
    BrandElec,
    BrandFire,
    BrandCold,

    // Sustains
    SustStr,
    SustInt,
    SustWis,
    SustDex,
    SustCon,
    SustChr,
    Riding,
    EasySpell,

    // Immunities and resistances
    ImAcid,
    ImElec,
    ImFire,
    ImCold,
    Throw,
    Reflect,
    FreeAct,
    HoldExp,
    ResAcid,
    ResElec,
    ResFire,
    ResCold,
    ResPois,
    ResFear,
    ResLite,
    ResDark,
    ResBlind,
    ResConf,
    ResSound,
    ResShards,
    ResNether,
    ResNexus,
    ResChaos,
    ResDisen,

    // Auras
    ShFire,
    ShElec,
    SlayHuman,
    ShCold,

    // Misc
    NoTele,
    NoMagic,
    DecMana,
    TyCurse,
    Warning,
    HideType,
    ShowMods,
    SlayGood,
    Levitation,
    Lite1,
    SeeInvis,
    Telepathy,
    SlowDigest,
    Regen,
    XtraMight,
    XtraShots,
    IgnoreAcid,
    IgnoreElec,
    IgnoreFire,
    IgnoreCold,
    Activate,
    DrainExp,
    Teleport,
    Aggravate,
    Blessed,
    EsAttack,
    EsAc,
    KillGood,

    // Kill flags
    KillAnimal,
    KillEvil,
    KillUndead,
    KillDemon,
    KillOrc,
    KillTroll,
    KillGiant,
    KillHuman,

    // ESP family
    EspAnimal,
    EspUndead,
    EspDemon,
    EspOrc,
    EspTroll,
    EspGiant,
    EspDragon,
    EspHuman,
    EspEvil,
    EspGood,
    EspNonliving,
    EspUnique,

    FullName,
    FixedFlavor,

    // Curse-flavour flags
    AddLCurse,
    AddHCurse,
    DrainHp,
    DrainMana,

    // Light sources
    Lite2,
    Lite3,
    LiteM1,
    LiteM2,
    LiteM3,
    LiteFuel,

    CallAnimal,
    CallDemon,
    CallDragon,
    CallUndead,
    Cowardice,
    LowMelee,
    LowAc,
    LowMagic,
    FastDigest,
    SlowRegen,
    MightyThrow,
    EasyWeapon,
    DownSaving,
    NoAc,
    HeavySpell,
    ResTime,
    ResWater,
    InvulnArrow,
    DarkSource,
}

const _: () = assert!(TrFlag::COUNT <= TR_FLAG_SIZE * 32);

/// Immunities that exclude each other unless the poly-elemental roll succeeds
pub const ELEMENT_IMMUNITIES: [TrFlag; 4] =
    [TrFlag::ImAcid, TrFlag::ImElec, TrFlag::ImFire, TrFlag::ImCold];

/// Every flag that changes what a weapon does on hit
pub const COMBAT_FLAGS: [TrFlag; 34] = [
    TrFlag::Blows,
    TrFlag::ForceWeapon,
    TrFlag::Chaotic,
    TrFlag::Vampiric,
    TrFlag::SlayAnimal,
    TrFlag::SlayEvil,
    TrFlag::SlayUndead,
    TrFlag::SlayDemon,
    TrFlag::SlayOrc,
    TrFlag::SlayTroll,
    TrFlag::SlayGiant,
    TrFlag::SlayDragon,
    TrFlag::SlayHuman,
    TrFlag::SlayGood,
    TrFlag::KillDragon,
    TrFlag::KillAnimal,
    TrFlag::KillEvil,
    TrFlag::KillUndead,
    TrFlag::KillDemon,
    TrFlag::KillOrc,
    TrFlag::KillTroll,
    TrFlag::KillGiant,
    TrFlag::KillHuman,
    TrFlag::KillGood,
    TrFlag::Vorpal,
    TrFlag::Impact,
    TrFlag::BrandPois,
    TrFlag::BrandAcid,
    TrFlag::BrandElec,
    TrFlag::BrandFire,
    TrFlag::BrandCold,
    TrFlag::XtraMight,
    TrFlag::XtraShots,
    TrFlag::EsAttack,
];

/// Ignore-element flags every artifact carries
pub const IGNORE_ELEMENTS: [TrFlag; 4] = [
    TrFlag::IgnoreAcid,
    TrFlag::IgnoreElec,
    TrFlag::IgnoreFire,
    TrFlag::IgnoreCold,
];

/// Fixed-size set of `TrFlag`s
///
/// Only `add` and `remove` mutate a set; everything else is a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FlagSet {
    bits: [u32; TR_FLAG_SIZE],
}

impl FlagSet {
    /// Empty flag set
    pub const fn new() -> Self {
        Self {
            bits: [0; TR_FLAG_SIZE],
        }
    }

    /// Build a set from a slice of flags
    pub fn from_flags(flags: &[TrFlag]) -> Self {
        let mut set = Self::new();
        set.add_all(flags.iter().copied());
        set
    }

    #[inline]
    const fn slot(flag: TrFlag) -> (usize, u32) {
        let idx = flag as usize;
        (idx / 32, 1u32 << (idx % 32))
    }

    /// Check whether a flag is present
    pub fn has(&self, flag: TrFlag) -> bool {
        let (word, mask) = Self::slot(flag);
        self.bits[word] & mask != 0
    }

    /// Check whether any of the given flags is present
    pub fn has_any(&self, flags: &[TrFlag]) -> bool {
        flags.iter().any(|&f| self.has(f))
    }

    /// Add a flag. Adding a present flag is a no-op.
    pub fn add(&mut self, flag: TrFlag) {
        let (word, mask) = Self::slot(flag);
        self.bits[word] |= mask;
    }

    /// Remove a flag
    pub fn remove(&mut self, flag: TrFlag) {
        let (word, mask) = Self::slot(flag);
        self.bits[word] &= !mask;
    }

    /// Add every flag yielded by the iterator
    pub fn add_all(&mut self, flags: impl IntoIterator<Item = TrFlag>) {
        for flag in flags {
            self.add(flag);
        }
    }

    /// Iterate present flags in declaration order
    pub fn iter(&self) -> impl Iterator<Item = TrFlag> + '_ {
        TrFlag::iter().filter(move |&f| self.has(f))
    }

    /// Number of flags present
    pub fn len(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&w| w == 0)
    }

    /// Flags present in `self` but not in `other`
    pub fn difference(&self, other: &FlagSet) -> FlagSet {
        let mut out = *self;
        for (word, theirs) in out.bits.iter_mut().zip(other.bits.iter()) {
            *word &= !theirs;
        }
        out
    }

    /// True if every flag of `other` is also in `self`
    pub fn is_superset(&self, other: &FlagSet) -> bool {
        other.difference(self).is_empty()
    }
}

impl FromIterator<TrFlag> for FlagSet {
    fn from_iter<I: IntoIterator<Item = TrFlag>>(iter: I) -> Self {
        let mut set = FlagSet::new();
        set.add_all(iter);
        set
    }
}

bitflags! {
    /// Curse state of an object
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CurseFlags: u32 {
        const CURSED = 0x0000_0001;
        const HEAVY_CURSE = 0x0000_0002;
        const PERMA_CURSE = 0x0000_0004;

        // Random curses picked by `random_curse`
        const TY_CURSE = 0x0000_0010;
        const AGGRAVATE = 0x0000_0020;
        const DRAIN_EXP = 0x0000_0040;
        const SLOW_REGEN = 0x0000_0080;
        const ADD_L_CURSE = 0x0000_0100;
        const ADD_H_CURSE = 0x0000_0200;
        const CALL_ANIMAL = 0x0000_0400;
        const CALL_DEMON = 0x0000_0800;
        const CALL_DRAGON = 0x0000_1000;
        const COWARDICE = 0x0000_2000;
        const TELEPORT = 0x0000_4000;
        const LOW_MELEE = 0x0000_8000;
        const LOW_AC = 0x0001_0000;
        const LOW_MAGIC = 0x0002_0000;
        const FAST_DIGEST = 0x0004_0000;
        const DRAIN_HP = 0x0008_0000;
        const DRAIN_MANA = 0x0010_0000;

        /// Curses only a heavy curse may add
        const HEAVY_MASK = Self::TY_CURSE.bits()
            | Self::AGGRAVATE.bits()
            | Self::DRAIN_EXP.bits()
            | Self::ADD_H_CURSE.bits()
            | Self::CALL_DEMON.bits()
            | Self::CALL_DRAGON.bits();

        /// Curses too nasty for a power-1 roll
        const SPECIAL_MASK = Self::TY_CURSE.bits() | Self::AGGRAVATE.bits();
    }
}

// Manual serde impl for CurseFlags
impl Serialize for CurseFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CurseFlags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u32::deserialize(deserializer)?;
        Ok(CurseFlags::from_bits_truncate(bits))
    }
}

/// Single random curses, in bit order
pub const RANDOM_CURSES: [CurseFlags; 17] = [
    CurseFlags::TY_CURSE,
    CurseFlags::AGGRAVATE,
    CurseFlags::DRAIN_EXP,
    CurseFlags::SLOW_REGEN,
    CurseFlags::ADD_L_CURSE,
    CurseFlags::ADD_H_CURSE,
    CurseFlags::CALL_ANIMAL,
    CurseFlags::CALL_DEMON,
    CurseFlags::CALL_DRAGON,
    CurseFlags::COWARDICE,
    CurseFlags::TELEPORT,
    CurseFlags::LOW_MELEE,
    CurseFlags::LOW_AC,
    CurseFlags::LOW_MAGIC,
    CurseFlags::FAST_DIGEST,
    CurseFlags::DRAIN_HP,
    CurseFlags::DRAIN_MANA,
];

/// Graded curse level, mutually exclusive with blessed
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
    Display,
)]
pub enum CurseSeverity {
    #[default]
    None,
    Cursed,
    Heavy,
    Permanent,
}

impl CurseFlags {
    /// Strongest curse level present
    pub fn severity(&self) -> CurseSeverity {
        if self.contains(CurseFlags::PERMA_CURSE) {
            CurseSeverity::Permanent
        } else if self.contains(CurseFlags::HEAVY_CURSE) {
            CurseSeverity::Heavy
        } else if self.contains(CurseFlags::CURSED) {
            CurseSeverity::Cursed
        } else {
            CurseSeverity::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_has_remove() {
        let mut set = FlagSet::new();
        assert!(set.is_empty());
        set.add(TrFlag::SlayEvil);
        set.add(TrFlag::DarkSource);
        assert!(set.has(TrFlag::SlayEvil));
        assert!(set.has(TrFlag::DarkSource));
        assert!(!set.has(TrFlag::SlayUndead));
        assert_eq!(set.len(), 2);

        set.remove(TrFlag::SlayEvil);
        assert!(!set.has(TrFlag::SlayEvil));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut once = FlagSet::new();
        once.add(TrFlag::ResFire);
        let mut twice = once;
        twice.add(TrFlag::ResFire);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_every_flag_fits() {
        let all: FlagSet = TrFlag::iter().collect();
        assert_eq!(all.len(), TrFlag::COUNT);
        assert_eq!(all.iter().count(), TrFlag::COUNT);
    }

    #[test]
    fn test_difference_and_superset() {
        let big = FlagSet::from_flags(&[TrFlag::Str, TrFlag::Con, TrFlag::ResPois]);
        let small = FlagSet::from_flags(&[TrFlag::Con]);
        assert!(big.is_superset(&small));
        assert!(!small.is_superset(&big));
        let diff = big.difference(&small);
        assert_eq!(
            diff.iter().collect::<Vec<_>>(),
            vec![TrFlag::Str, TrFlag::ResPois]
        );
    }

    #[test]
    fn test_flag_display() {
        assert_eq!(TrFlag::SlayEvil.to_string(), "SLAY_EVIL");
        assert_eq!(TrFlag::ImFire.to_string(), "IM_FIRE");
    }

    #[test]
    fn test_curse_severity() {
        assert_eq!(CurseFlags::empty().severity(), CurseSeverity::None);
        assert_eq!(CurseFlags::CURSED.severity(), CurseSeverity::Cursed);
        assert_eq!(
            (CurseFlags::CURSED | CurseFlags::HEAVY_CURSE).severity(),
            CurseSeverity::Heavy
        );
        assert_eq!(
            (CurseFlags::CURSED | CurseFlags::PERMA_CURSE).severity(),
            CurseSeverity::Permanent
        );
    }

    #[test]
    fn test_curse_flags_serde() {
        let flags = CurseFlags::CURSED | CurseFlags::TY_CURSE;
        let json = serde_json::to_string(&flags).unwrap();
        let back: CurseFlags = serde_json::from_str(&json).unwrap();
        assert_eq!(flags, back);
    }
}

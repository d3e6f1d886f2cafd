//! Fixed (named) artifacts
//!
//! Named artifacts are stamped from a static table. When one is created,
//! `random_artifact_resistance` applies the per-artifact rules that depend on
//! who finds it, then any extra power or resistance its generation flags ask
//! for.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::curse::random_curse;
use super::pickers::{one_ability, one_high_resistance, one_resistance};
use crate::errors::ObjectError;
use crate::object::{
    BaseItem, CurseFlags, FlagSet, IGNORE_ELEMENTS, Object, SV_CLOAK, SV_DAGGER, SV_IRON_HELM,
    SV_KATANA, SV_LONG_SWORD, SV_QUARTERSTAFF, SV_ROBE, SV_SCYTHE, SV_SOFT_LEATHER_ARMOUR,
    TrFlag, Tval,
};
use crate::player::{PlayerClass, PlayerContext, Sex};
use crate::rng::GameRng;

/// Identity of a fixed artifact
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum FixedArtifactId {
    TerrorMask,
    Muramasa,
    Xiaolong,
    BloodyMoon,
    HeavenlyMaiden,
    Narthanc,
    Thalkettoth,
    Colluin,
    Ringil,
}

/// Extra powers rolled when a fixed artifact is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenFlags(u32);

impl GenFlags {
    pub const NONE: Self = Self(0x0000_0000);
    /// One random ability
    pub const XTRA_POWER: Self = Self(0x0000_0001);
    /// One random high resistance
    pub const XTRA_H_RES: Self = Self(0x0000_0002);
    /// Either of the above, even odds
    pub const XTRA_RES_OR_POWER: Self = Self(0x0000_0004);

    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

/// A fixed artifact definition
#[derive(Debug, Clone)]
pub struct FixedArtifact {
    pub id: FixedArtifactId,
    pub name: &'static str,
    /// Base item
    pub tval: Tval,
    pub sval: u8,
    pub pval: i16,
    pub to_h: i16,
    pub to_d: i16,
    pub to_a: i16,
    /// Flags beyond the base item's
    pub flags: &'static [TrFlag],
    pub gen_flags: GenFlags,
}

impl FixedArtifact {
    /// Table entry for an id
    pub fn get(id: FixedArtifactId) -> Option<&'static FixedArtifact> {
        FIXED_ARTIFACTS.iter().find(|a| a.id == id)
    }

    /// Find an artifact by name, ignoring case and a leading "the"
    pub fn by_name(name: &str) -> Result<&'static FixedArtifact, ObjectError> {
        let wanted = name.trim().to_lowercase();
        let wanted = wanted.strip_prefix("the ").unwrap_or(&wanted);
        let squashed: String = wanted.chars().filter(|c| !c.is_whitespace()).collect();

        FIXED_ARTIFACTS
            .iter()
            .find(|a| {
                let art_name = a.name.to_lowercase();
                let art_name = art_name.strip_prefix("the ").unwrap_or(&art_name);
                art_name == wanted || format!("{:?}", a.id).eq_ignore_ascii_case(&squashed)
            })
            .ok_or_else(|| ObjectError::UnknownArtifact(name.to_string()))
    }

    /// Base item flags, the artifact's own flags, and the ignore-element set
    pub fn own_flags(&self) -> FlagSet {
        let mut flags = BaseItem::lookup(self.tval, self.sval)
            .map(|k| k.flag_set())
            .unwrap_or_default();
        flags.add_all(self.flags.iter().copied());
        flags.add_all(IGNORE_ELEMENTS);
        flags
    }
}

/// Every fixed artifact the forge can stamp
pub static FIXED_ARTIFACTS: &[FixedArtifact] = &[
    FixedArtifact {
        id: FixedArtifactId::TerrorMask,
        name: "the Terror Mask",
        tval: Tval::Helm,
        sval: SV_IRON_HELM,
        pval: 2,
        to_h: 0,
        to_d: 0,
        to_a: 10,
        flags: &[TrFlag::Int, TrFlag::Wis, TrFlag::ResFear, TrFlag::ResNether, TrFlag::SeeInvis],
        gen_flags: GenFlags::NONE,
    },
    FixedArtifact {
        id: FixedArtifactId::Muramasa,
        name: "'Muramasa'",
        tval: Tval::Sword,
        sval: SV_KATANA,
        pval: 4,
        to_h: 20,
        to_d: 20,
        to_a: 0,
        flags: &[TrFlag::Str, TrFlag::Con, TrFlag::SlayHuman, TrFlag::Vorpal, TrFlag::ResFear],
        gen_flags: GenFlags::XTRA_H_RES,
    },
    FixedArtifact {
        id: FixedArtifactId::Xiaolong,
        name: "of Xiaolong",
        tval: Tval::Hafted,
        sval: SV_QUARTERSTAFF,
        pval: 2,
        to_h: 10,
        to_d: 12,
        to_a: 0,
        flags: &[TrFlag::Wis, TrFlag::Dex, TrFlag::SlayEvil, TrFlag::FreeAct],
        gen_flags: GenFlags::XTRA_POWER,
    },
    FixedArtifact {
        id: FixedArtifactId::BloodyMoon,
        name: "'Bloody Moon'",
        tval: Tval::Polearm,
        sval: SV_SCYTHE,
        pval: 3,
        to_h: 20,
        to_d: 15,
        to_a: 0,
        flags: &[TrFlag::ResNether, TrFlag::HoldExp, TrFlag::SeeInvis],
        gen_flags: GenFlags::NONE,
    },
    FixedArtifact {
        id: FixedArtifactId::HeavenlyMaiden,
        name: "of the Heavenly Maiden",
        tval: Tval::SoftArmor,
        sval: SV_ROBE,
        pval: 3,
        to_h: 0,
        to_d: 0,
        to_a: 15,
        flags: &[TrFlag::Chr, TrFlag::ResDark, TrFlag::Levitation, TrFlag::SeeInvis],
        gen_flags: GenFlags::XTRA_RES_OR_POWER,
    },
    FixedArtifact {
        id: FixedArtifactId::Narthanc,
        name: "'Narthanc'",
        tval: Tval::Sword,
        sval: SV_DAGGER,
        pval: 0,
        to_h: 4,
        to_d: 6,
        to_a: 0,
        flags: &[TrFlag::BrandFire, TrFlag::ResFire, TrFlag::Activate],
        gen_flags: GenFlags::XTRA_RES_OR_POWER,
    },
    FixedArtifact {
        id: FixedArtifactId::Thalkettoth,
        name: "of Thalkettoth",
        tval: Tval::SoftArmor,
        sval: SV_SOFT_LEATHER_ARMOUR,
        pval: 3,
        to_h: 0,
        to_d: 0,
        to_a: 25,
        flags: &[TrFlag::Dex, TrFlag::Search, TrFlag::ResAcid, TrFlag::ResShards],
        gen_flags: GenFlags::XTRA_H_RES,
    },
    FixedArtifact {
        id: FixedArtifactId::Colluin,
        name: "of Colluin",
        tval: Tval::Cloak,
        sval: SV_CLOAK,
        pval: 0,
        to_h: 0,
        to_d: 0,
        to_a: 15,
        flags: &[
            TrFlag::ResAcid,
            TrFlag::ResElec,
            TrFlag::ResFire,
            TrFlag::ResCold,
            TrFlag::ResPois,
            TrFlag::Activate,
        ],
        gen_flags: GenFlags::XTRA_POWER,
    },
    FixedArtifact {
        id: FixedArtifactId::Ringil,
        name: "'Ringil'",
        tval: Tval::Sword,
        sval: SV_LONG_SWORD,
        pval: 10,
        to_h: 22,
        to_d: 25,
        to_a: 0,
        flags: &[
            TrFlag::Speed,
            TrFlag::SlayEvil,
            TrFlag::SlayUndead,
            TrFlag::SlayDemon,
            TrFlag::BrandCold,
            TrFlag::ResCold,
            TrFlag::ResLite,
            TrFlag::SeeInvis,
            TrFlag::Regen,
            TrFlag::Lite1,
        ],
        gen_flags: GenFlags::NONE,
    },
];

/// Stamp a fixed artifact onto a fresh instance of its base item
pub fn make_fixed_artifact(id: FixedArtifactId) -> Result<Object, ObjectError> {
    let artifact =
        FixedArtifact::get(id).ok_or_else(|| ObjectError::UnknownArtifact(id.to_string()))?;
    let mut obj = Object::lookup(artifact.tval, artifact.sval)?;

    obj.pval = artifact.pval;
    obj.to_h = artifact.to_h;
    obj.to_d = artifact.to_d;
    obj.to_a = artifact.to_a;
    obj.flags = artifact.own_flags();
    obj.art_name = Some(artifact.name.to_string());
    obj.fixed_artifact = Some(id);

    Ok(obj)
}

/// Slays the Bloody Moon may roll, indexed by a 26-sided die
const BLOODY_MOON_SLAYS: [TrFlag; 26] = [
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
    TrFlag::KillDragon,
    TrFlag::Vorpal,
    TrFlag::Impact,
    TrFlag::BrandPois,
    TrFlag::BrandAcid,
    TrFlag::BrandElec,
    TrFlag::BrandFire,
    TrFlag::BrandCold,
    TrFlag::SlayHuman,
    TrFlag::KillAnimal,
    TrFlag::KillUndead,
    TrFlag::KillDemon,
    TrFlag::KillOrc,
    TrFlag::KillTroll,
    TrFlag::KillGiant,
    TrFlag::KillHuman,
];

/// Stat and utility pluses the Bloody Moon may roll
const BLOODY_MOON_PLUSES: [TrFlag; 11] = [
    TrFlag::Str,
    TrFlag::Int,
    TrFlag::Wis,
    TrFlag::Dex,
    TrFlag::Con,
    TrFlag::Chr,
    TrFlag::Stealth,
    TrFlag::Search,
    TrFlag::Infra,
    TrFlag::Tunnel,
    TrFlag::Speed,
];

/// Re-roll the Bloody Moon's flags from its own base set
pub fn get_bloody_moon_flags(obj: &mut Object, artifact: &FixedArtifact, rng: &mut GameRng) {
    obj.flags = artifact.own_flags();

    let slays = rng.rnd(2) + rng.rnd(2);
    for _ in 0..slays {
        obj.flags.add(BLOODY_MOON_SLAYS[rng.rn2(26) as usize]);
    }

    for _ in 0..rng.rnd(2) {
        one_resistance(obj, rng);
    }

    for _ in 0..2 {
        obj.flags.add(BLOODY_MOON_PLUSES[rng.rn2(11) as usize]);
    }
}

/// Apply a fixed artifact's creation-time rules
pub fn random_artifact_resistance(
    obj: &mut Object,
    artifact: &FixedArtifact,
    player: &PlayerContext,
    rng: &mut GameRng,
) {
    let mut give_power = false;
    let mut give_resistance = false;

    match artifact.id {
        FixedArtifactId::TerrorMask => {
            if player.class.is_warrior_type() {
                give_power = true;
                give_resistance = true;
            } else {
                obj.flags.add(TrFlag::Aggravate);
                obj.flags.add(TrFlag::TyCurse);
                obj.curse_flags |= CurseFlags::CURSED | CurseFlags::HEAVY_CURSE;
                obj.curse_flags |= random_curse(obj, 2, rng);
                log::debug!("{} turns on a {}", artifact.name, player.class);
                return;
            }
        }
        FixedArtifactId::Muramasa => {
            if player.class != PlayerClass::Samurai {
                obj.flags.add(TrFlag::NoMagic);
                obj.curse_flags |= CurseFlags::HEAVY_CURSE;
            }
        }
        FixedArtifactId::Xiaolong => {
            if player.class == PlayerClass::Monk {
                obj.flags.add(TrFlag::Blows);
            }
        }
        FixedArtifactId::BloodyMoon => get_bloody_moon_flags(obj, artifact, rng),
        FixedArtifactId::HeavenlyMaiden => {
            if player.sex != Sex::Female {
                obj.flags.add(TrFlag::Aggravate);
            }
        }
        _ => {}
    }

    if artifact.gen_flags.contains(GenFlags::XTRA_POWER) {
        give_power = true;
    }
    if artifact.gen_flags.contains(GenFlags::XTRA_H_RES) {
        give_resistance = true;
    }
    if artifact.gen_flags.contains(GenFlags::XTRA_RES_OR_POWER) {
        if rng.one_in(2) {
            give_resistance = true;
        } else {
            give_power = true;
        }
    }

    if give_power {
        one_ability(obj, rng);
    }
    if give_resistance {
        one_high_resistance(obj, rng);
    }
}

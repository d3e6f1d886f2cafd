//! Curses
//!
//! `curse_artifact` turns a freshly forged artifact into a cursed one;
//! `random_curse` picks a single curse bit for fixed artifacts that carry one.

use crate::object::{CurseFlags, Object, RANDOM_CURSES, TrFlag};
use crate::player::PlayerClass;
use crate::rng::GameRng;

/// Turn a positive bonus into a worse-than-zero malus
fn invert(value: &mut i16, rng: &mut GameRng) {
    if *value > 0 {
        *value = -(*value + rng.rnd(4) as i16);
    }
}

/// Curse an artifact
///
/// Every positive numeric bonus ends strictly negative. The item becomes
/// cursed and heavily cursed, loses any blessing, and picks up a handful of
/// independent curse-flavor properties.
pub fn curse_artifact(obj: &mut Object, class: PlayerClass, rng: &mut GameRng) {
    invert(&mut obj.pval, rng);
    invert(&mut obj.to_a, rng);
    invert(&mut obj.to_h, rng);
    invert(&mut obj.to_d, rng);

    obj.curse_flags |= CurseFlags::HEAVY_CURSE | CurseFlags::CURSED;
    obj.flags.remove(TrFlag::Blessed);

    if rng.one_in(4) {
        obj.curse_flags |= CurseFlags::PERMA_CURSE;
    }
    if rng.one_in(3) {
        obj.flags.add(TrFlag::TyCurse);
    }
    if rng.one_in(2) {
        obj.flags.add(TrFlag::Aggravate);
    }
    if rng.one_in(3) {
        obj.flags.add(TrFlag::DrainExp);
    }
    if rng.one_in(6) {
        obj.flags.add(TrFlag::AddLCurse);
    }
    if rng.one_in(9) {
        obj.flags.add(TrFlag::AddHCurse);
    }
    if rng.one_in(9) {
        obj.flags.add(TrFlag::DrainHp);
    }
    if rng.one_in(9) {
        obj.flags.add(TrFlag::DrainMana);
    }

    if rng.one_in(2) {
        obj.flags.add(TrFlag::Teleport);
    } else if rng.one_in(3) {
        obj.flags.add(TrFlag::NoTele);
    }

    if !class.cannot_cast() && rng.one_in(3) {
        obj.flags.add(TrFlag::NoMagic);
    }

    log::debug!("cursed artifact: {:?}", obj.curse_flags);
}

/// Pick one random curse suited to the item
///
/// Power 2 draws only heavy curses, power 1 anything but the special ones,
/// power 0 only light curses. The melee curse needs a weapon and the AC
/// curse needs armour.
pub fn random_curse(obj: &Object, power: u8, rng: &mut GameRng) -> CurseFlags {
    let candidates: Vec<CurseFlags> = RANDOM_CURSES
        .iter()
        .copied()
        .filter(|&curse| match power {
            2 => CurseFlags::HEAVY_MASK.contains(curse),
            1 => !CurseFlags::SPECIAL_MASK.contains(curse),
            _ => !CurseFlags::HEAVY_MASK.contains(curse),
        })
        .filter(|&curse| curse != CurseFlags::LOW_MELEE || obj.tval.is_melee_weapon())
        .filter(|&curse| curse != CurseFlags::LOW_AC || obj.tval.is_armour())
        .collect();

    rng.choose(&candidates)
        .copied()
        .unwrap_or(CurseFlags::empty())
}

//! Single-property pickers
//!
//! Each picker adds one flag drawn from a small fixed menu and returns it.
//! Adding a flag the item already has is a no-op, but the roll is spent.

use crate::object::{Object, TrFlag};
use crate::rng::GameRng;

const HIGH_RESISTANCES: [TrFlag; 12] = [
    TrFlag::ResPois,
    TrFlag::ResLite,
    TrFlag::ResDark,
    TrFlag::ResShards,
    TrFlag::ResBlind,
    TrFlag::ResConf,
    TrFlag::ResSound,
    TrFlag::ResNether,
    TrFlag::ResNexus,
    TrFlag::ResChaos,
    TrFlag::ResDisen,
    TrFlag::ResFear,
];

const ELEMENT_RESISTANCES: [TrFlag; 4] = [
    TrFlag::ResAcid,
    TrFlag::ResElec,
    TrFlag::ResCold,
    TrFlag::ResFire,
];

const LOW_ESP: [TrFlag; 9] = [
    TrFlag::EspAnimal,
    TrFlag::EspUndead,
    TrFlag::EspDemon,
    TrFlag::EspOrc,
    TrFlag::EspTroll,
    TrFlag::EspGiant,
    TrFlag::EspDragon,
    TrFlag::EspHuman,
    TrFlag::EspGood,
];

const ABILITIES: [TrFlag; 8] = [
    TrFlag::Levitation,
    TrFlag::Lite1,
    TrFlag::SeeInvis,
    TrFlag::Warning,
    TrFlag::SlowDigest,
    TrFlag::Regen,
    TrFlag::FreeAct,
    TrFlag::HoldExp,
];

fn grant(obj: &mut Object, flag: TrFlag) -> TrFlag {
    obj.flags.add(flag);
    flag
}

/// One of the twelve high resistances
pub fn one_high_resistance(obj: &mut Object, rng: &mut GameRng) -> TrFlag {
    let idx = rng.rn2(HIGH_RESISTANCES.len() as u32) as usize;
    grant(obj, HIGH_RESISTANCES[idx])
}

/// A high resistance short of disenchantment and fear
pub fn one_lordly_high_resistance(obj: &mut Object, rng: &mut GameRng) -> TrFlag {
    let idx = rng.rn2(10) as usize;
    grant(obj, HIGH_RESISTANCES[idx])
}

/// One of the four base elemental resistances
pub fn one_ele_resistance(obj: &mut Object, rng: &mut GameRng) -> TrFlag {
    let idx = rng.rn2(ELEMENT_RESISTANCES.len() as u32) as usize;
    grant(obj, ELEMENT_RESISTANCES[idx])
}

/// Elemental resistance, or poison one time in seven
pub fn one_dragon_ele_resistance(obj: &mut Object, rng: &mut GameRng) -> TrFlag {
    if rng.one_in(7) {
        grant(obj, TrFlag::ResPois)
    } else {
        one_ele_resistance(obj, rng)
    }
}

/// One of the creature-specific telepathies
pub fn one_low_esp(obj: &mut Object, rng: &mut GameRng) -> TrFlag {
    let idx = (rng.rnd(LOW_ESP.len() as u32) - 1) as usize;
    grant(obj, LOW_ESP[idx])
}

/// Any resistance: elemental one time in three, otherwise high
pub fn one_resistance(obj: &mut Object, rng: &mut GameRng) -> TrFlag {
    if rng.one_in(3) {
        one_ele_resistance(obj, rng)
    } else {
        one_high_resistance(obj, rng)
    }
}

/// A utility ability, or a low telepathy for two rolls in ten
pub fn one_ability(obj: &mut Object, rng: &mut GameRng) -> TrFlag {
    let idx = rng.rn2(10) as usize;
    match ABILITIES.get(idx) {
        Some(&flag) => grant(obj, flag),
        None => one_low_esp(obj, rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{FlagSet, SV_DAGGER, Tval};
    use std::collections::HashSet;

    fn dagger() -> Object {
        Object::lookup(Tval::Sword, SV_DAGGER).unwrap()
    }

    type Picker = fn(&mut Object, &mut GameRng) -> TrFlag;

    fn menu(picker: Picker) -> HashSet<TrFlag> {
        let mut rng = GameRng::new(42);
        (0..2000)
            .map(|_| picker(&mut dagger(), &mut rng))
            .collect()
    }

    #[test]
    fn test_menu_sizes() {
        assert_eq!(menu(one_high_resistance).len(), 12);
        assert_eq!(menu(one_lordly_high_resistance).len(), 10);
        assert_eq!(menu(one_ele_resistance).len(), 4);
        assert_eq!(menu(one_low_esp).len(), 9);
        assert_eq!(menu(one_dragon_ele_resistance).len(), 5);
        assert_eq!(menu(one_resistance).len(), 16);
        assert_eq!(menu(one_ability).len(), 17);
    }

    #[test]
    fn test_lordly_excludes_disen_and_fear() {
        let picks = menu(one_lordly_high_resistance);
        assert!(!picks.contains(&TrFlag::ResDisen));
        assert!(!picks.contains(&TrFlag::ResFear));
    }

    #[test]
    fn test_picker_adds_exactly_what_it_returns() {
        let mut rng = GameRng::new(42);
        let pickers: [Picker; 7] = [
            one_high_resistance,
            one_lordly_high_resistance,
            one_ele_resistance,
            one_dragon_ele_resistance,
            one_low_esp,
            one_resistance,
            one_ability,
        ];
        for picker in pickers {
            let mut obj = dagger();
            let before = obj.flags;
            let flag = picker(&mut obj, &mut rng);
            assert_eq!(obj.flags.difference(&before), FlagSet::from_flags(&[flag]));
        }
    }

    #[test]
    fn test_repeat_pick_is_idempotent() {
        let mut rng = GameRng::new(42);
        let mut obj = dagger();
        let first = one_ele_resistance(&mut obj, &mut rng);
        let once = obj.flags;
        loop {
            let again = one_ele_resistance(&mut obj, &mut rng);
            if again == first {
                break;
            }
            obj.flags.remove(again);
        }
        assert_eq!(obj.flags, once);
    }
}

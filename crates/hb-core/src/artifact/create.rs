//! Random artifact creation
//!
//! `create_artifact` turns a plain item into a random artifact in one pass:
//! pick a power count, spend it on themed properties, settle pval and the
//! numeric bonuses, curse or activate, tidy up, balance damage, then name.

use log::Level;
use serde::{Deserialize, Serialize};

use super::activation::give_activation_power;
use super::balance::{balance_damage, damage_breakdown};
use super::bias::{Theme, theme_name};
use super::curse::curse_artifact;
use super::generators::{random_misc, random_plus, random_resistance, random_slay};
use super::naming::{
    ArtifactName, NamePrompt, PowerTier, ask_artifact_name, get_random_name, power_tier,
};
use super::value::{FlagCost, StandardFlagCost};
use crate::consts::WEIRD_LUCK;
use crate::object::{
    COMBAT_FLAGS, IGNORE_ELEMENTS, Object, SV_DOKUBARI, SV_HAYABUSA, TrFlag, Tval,
};
use crate::options::GenerationOptions;
use crate::player::PlayerContext;
use crate::rng::GameRng;

/// What the caller asks of one forge run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArtifactRequest {
    /// Created by a scroll of artifact creation
    pub scroll: bool,
    /// Force the curse state; `None` rolls for it
    pub cursed: Option<bool>,
    /// Theme to start from
    pub theme: Option<Theme>,
}

impl ArtifactRequest {
    pub fn scroll() -> Self {
        Self {
            scroll: true,
            ..Default::default()
        }
    }
}

/// Collaborators of a forge run
pub struct ForgeContext<'a> {
    pub player: PlayerContext,
    pub options: GenerationOptions,
    pub cost: &'a dyn FlagCost,
    /// Asked for a name on the scroll path
    pub prompt: Option<&'a mut dyn NamePrompt>,
}

impl<'a> ForgeContext<'a> {
    /// Context with the standard flag cost and no prompt
    pub fn new(player: PlayerContext, options: GenerationOptions) -> Self {
        Self {
            player,
            options,
            cost: &StandardFlagCost,
            prompt: None,
        }
    }

    pub fn with_cost(mut self, cost: &'a dyn FlagCost) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_prompt(mut self, prompt: &'a mut dyn NamePrompt) -> Self {
        self.prompt = Some(prompt);
        self
    }
}

/// Summary of a forge run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactReport {
    /// Powers spent in the generation loop
    pub powers: u32,
    pub total_cost: i32,
    pub tier: PowerTier,
    pub theme: Option<Theme>,
    pub cursed: bool,
    pub weakening_steps: u32,
    pub name: ArtifactName,
}

/// Property categories drawn by the generation loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Plus,
    Resistance,
    Misc,
    Slay,
}

impl Category {
    /// 2:2:1:2 for weapons; armour never draws slays
    fn from_roll(roll: u32) -> Option<Category> {
        match roll {
            1 | 2 => Some(Category::Plus),
            3 | 4 => Some(Category::Resistance),
            5 => Some(Category::Misc),
            6 | 7 => Some(Category::Slay),
            _ => None,
        }
    }
}

/// Clear the state a previous run may have left behind
fn reset(obj: &mut Object) -> bool {
    let was_cursed = obj.is_cursed();

    obj.bias.clear();
    if let Some(kind) = obj.kind() {
        obj.flags = kind.flag_set();
    }
    obj.curse_flags = Default::default();
    obj.activation = None;
    obj.timeout = 0;
    obj.art_name = None;
    obj.fixed_artifact = None;

    was_cursed
}

/// Seed the theme from the player's class
///
/// A quarter of scrolls take the class theme. The warrior override roll is
/// made on every scroll, but only classes with a non-zero percentage can
/// pass it.
fn scroll_theme(obj: &mut Object, player: &PlayerContext, rng: &mut GameRng) {
    let (mut theme, warrior_pct) = if rng.one_in(4) {
        player.class.scroll_bias(rng)
    } else {
        (None, 0)
    };

    if rng.percent(warrior_pct) {
        theme = Some(Theme::Warrior);
    }

    if let Some(theme) = theme {
        obj.bias.set_if_absent(theme);
    }
}

/// Long-tailed power count
fn roll_powers(cursed: bool, rng: &mut GameRng) -> u32 {
    let mut powers = rng.rnd(5) + 1;
    while rng.one_in(powers) || rng.one_in(7) || rng.one_in(10) {
        powers += 1;
    }

    if !cursed && rng.one_in(WEIRD_LUCK) {
        powers *= 2;
    }
    if cursed {
        powers /= 2;
    }
    powers
}

/// Grow the weapon's dice instead of adding a resistance
fn grow_dice(obj: &mut Object, rng: &mut GameRng) {
    let (dd, ds) = (obj.dd, obj.ds);

    if rng.one_in(13) {
        if rng.one_in(u32::from(obj.ds) + 4) {
            obj.ds = obj.ds.saturating_add(1);
        }
    } else if rng.one_in(u32::from(obj.dd) + 1) {
        obj.dd = obj.dd.saturating_add(1);
    }

    if (obj.dd, obj.ds) != (dd, ds) {
        obj.flags.remove(TrFlag::Blows);
    }
}

/// Spend the power budget; returns the count actually spent and whether the
/// item carries a pval-scaled property (from its base kind or a new grant)
fn invest_powers(obj: &mut Object, powers: u32, cursed: bool, rng: &mut GameRng) -> (u32, bool) {
    let max_type = if obj.is_weapon_ammo() { 7 } else { 5 };
    let mut powers = powers;
    let mut has_pval = obj.pval != 0;
    let mut i = 0;

    while i < powers {
        i += 1;
        match Category::from_roll(rng.rnd(max_type)) {
            Some(Category::Plus) => {
                random_plus(obj, rng);
                has_pval = true;
            }
            Some(Category::Resistance) => {
                if rng.one_in(2) && obj.is_weapon_ammo() && obj.tval != Tval::Bow {
                    if cursed && !rng.one_in(13) {
                        continue;
                    }
                    grow_dice(obj, rng);
                } else {
                    random_resistance(obj, rng);
                }
            }
            Some(Category::Misc) => random_misc(obj, rng),
            Some(Category::Slay) => random_slay(obj, rng),
            None => {
                log::warn!("switch error in create_artifact");
                powers += 1;
            }
        }
    }

    (powers, has_pval)
}

/// Settle pval once some property depends on it
fn finalize_pval(obj: &mut Object, rng: &mut GameRng) {
    if obj.flags.has(TrFlag::Blows) {
        obj.pval = rng.rnd(2) as i16;
        if obj.is(Tval::Sword, SV_HAYABUSA) {
            obj.pval += 1;
        }
    } else {
        loop {
            obj.pval += 1;
            if !(i32::from(obj.pval) < rng.rnd(5) as i32 || rng.one_in_signed(obj.pval.into())) {
                break;
            }
        }
    }

    if obj.pval > 4 && !rng.one_in(WEIRD_LUCK) {
        obj.pval = 4;
    }
}

fn bonus(value: i16, rng: &mut GameRng) -> i16 {
    let range = if value > 19 { 1 } else { 20 - value };
    rng.rnd(range.max(1) as u32) as i16
}

/// Raise to-AC on armour, to-hit and to-dam on weapons
fn invest_numeric_bonuses(obj: &mut Object, rng: &mut GameRng) {
    if obj.is_armour() {
        obj.to_a += bonus(obj.to_a, rng);
    } else if obj.is_weapon_ammo() {
        obj.to_h += bonus(obj.to_h, rng);
        obj.to_d += bonus(obj.to_d, rng);
        if obj.flags.has(TrFlag::Wis) && obj.pval > 0 {
            obj.flags.add(TrFlag::Blessed);
        }
    }
}

/// Keep armour from carrying a weapon's worth of to-hit and to-dam
fn soften_armour(obj: &mut Object, rng: &mut GameRng) {
    while obj.to_d + obj.to_h > 20 {
        if rng.one_in_signed(obj.to_d.into()) && rng.one_in_signed(obj.to_h.into()) {
            break;
        }
        obj.to_d -= rng.rn2(3) as i16;
        obj.to_h -= rng.rn2(3) as i16;
    }
    while obj.to_d + obj.to_h > 10 {
        if rng.one_in_signed(obj.to_d.into()) || rng.one_in_signed(obj.to_h.into()) {
            break;
        }
        obj.to_d -= rng.rn2(3) as i16;
        obj.to_h -= rng.rn2(3) as i16;
    }
}

/// Theme and sub-type specific overrides
fn special_fixups(obj: &mut Object) {
    if matches!(obj.bias.get(), Some(Theme::Mage | Theme::Int)) && obj.tval == Tval::Gloves {
        obj.flags.add(TrFlag::FreeAct);
    }

    if obj.is(Tval::Sword, SV_DOKUBARI) {
        obj.to_h = 0;
        obj.to_d = 0;
        for flag in COMBAT_FLAGS {
            obj.flags.remove(flag);
        }
    }
}

/// Turn `obj` into a random artifact
pub fn create_artifact(
    obj: &mut Object,
    request: &ArtifactRequest,
    ctx: &mut ForgeContext<'_>,
    rng: &mut GameRng,
) -> ArtifactReport {
    let level = if ctx.options.wizard {
        Level::Info
    } else {
        Level::Debug
    };

    let was_cursed = reset(obj);
    if let Some(theme) = request.theme {
        obj.bias.set_if_absent(theme);
    }
    if request.scroll {
        scroll_theme(obj, &ctx.player, rng);
    }

    let cursed = request
        .cursed
        .unwrap_or_else(|| !request.scroll && rng.one_in(ctx.options.cursed_chance))
        || (obj.tval.is_jewelry() && was_cursed);

    let powers = roll_powers(cursed, rng);
    let (powers, has_pval) = invest_powers(obj, powers, cursed, rng);

    if has_pval {
        finalize_pval(obj, rng);
    }
    invest_numeric_bonuses(obj, rng);
    obj.flags.add_all(IGNORE_ELEMENTS);

    let total_cost = ctx.cost.flag_cost(obj, i32::from(obj.pval));

    if cursed {
        curse_artifact(obj, ctx.player.class, rng);
    }

    let activation_chance = if obj.is_armour() {
        ctx.options.activation_chance.saturating_mul(2)
    } else {
        ctx.options.activation_chance
    };
    if !cursed && rng.one_in(activation_chance) {
        obj.timeout = 0;
        give_activation_power(obj, rng);
    }

    if obj.is_armour() {
        soften_armour(obj, rng);
    }
    special_fixups(obj);

    let tier = power_tier(total_cost, obj.is_weapon_ammo(), cursed);

    log::log!(level, "Power-level = {total_cost}");
    log::log!(level, "Bias = {}", theme_name(obj.bias.get()));
    log::log!(level, "Powers = {powers}");

    let weakening_steps = if obj.tval.is_melee_weapon() {
        log::log!(level, "{}", damage_breakdown(obj));
        let steps = balance_damage(obj, ctx.options.weakening, rng);
        log::log!(level, "After {steps} weakening step(s): {}", damage_breakdown(obj));
        steps
    } else {
        0
    };

    let name = if request.scroll {
        ask_artifact_name(obj, ctx.prompt.as_deref_mut(), rng)
    } else {
        get_random_name(!obj.is_weapon_ammo(), tier, obj.bias.get(), rng)
    };
    obj.art_name = Some(name.text.clone());

    ArtifactReport {
        powers,
        total_cost,
        tier,
        theme: obj.bias.get(),
        cursed,
        weakening_steps,
        name,
    }
}

//! Item forge constants
//!
//! Probability denominators and ceilings shared by the random artifact code.

/// 1-in-N chance of a run getting doubled powers, uncapped pval, or a rare immunity
pub const WEIRD_LUCK: u32 = 12;

/// 1-in-N chance that a themed resistance roll reaches for an immunity
pub const BIAS_LUCK: u32 = 20;

/// 1-in-N chance that a new immunity leaves sibling immunities alone
pub const IM_LUCK: u32 = 7;

/// 1-in-N chance of an activation (doubled for armour)
pub const ACTIVATION_CHANCE: u32 = 3;

/// 1-in-N chance that a random (non-scroll) artifact comes out cursed
pub const A_CURSED: u32 = 13;

/// 1-in-N chance to escape the damage suppression loop
pub const SWORDFISH_LUCK: u32 = 6;

/// Percentage of random names drawn from the Sindarin generator
pub const SINDARIN_NAME: u32 = 10;

/// Cumulative percentage of random names drawn from the syllable table
pub const TABLE_NAME: u32 = 20;

/// Number of raw activation codes `one_activation` samples from
pub const ACTIVATION_CODES: u32 = 255;

/// Words backing a flag set (160 bits)
pub const TR_FLAG_SIZE: usize = 5;

/// Power-cost tier thresholds for armour and jewelry
pub const ARMOUR_TIER_LOW: i32 = 15000;
pub const ARMOUR_TIER_MEDIUM: i32 = 35000;

/// Power-cost tier thresholds for weapons and ammo
pub const WEAPON_TIER_LOW: i32 = 20000;
pub const WEAPON_TIER_MEDIUM: i32 = 45000;

/// Average damage ceilings checked by the balancer
pub const DAMAGE_CEILING: i32 = 75;
pub const DAMAGE_CEILING_BLOWS: [i32; 3] = [65, 52, 40];
pub const VAMPIRIC_DAMAGE_CEILING: i32 = 63;
pub const VAMPIRIC_DAMAGE_CEILING_BLOWS: [i32; 3] = [52, 43, 33];

/// Floor for to-dam shaved by the weakening step
pub const WEAKENING_TO_DAM_FLOOR: i16 = 10;

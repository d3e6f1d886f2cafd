//! Random artifact forge
//!
//! Themes, property pickers and generators, curses, activations, damage
//! balancing, naming, and the fixed-artifact hook.

mod activation;
mod balance;
mod bias;
mod create;
mod curse;
mod fixed;
mod generators;
mod naming;
pub mod pickers;
mod value;

pub use activation::{
    ACTIVATIONS, Activation, ActivationInfo, give_activation_power, one_activation,
};
pub use balance::{
    DamageBreakdown, WeakeningMode, balance_damage, calc_arm_avgdamage, damage_breakdown,
    damage_ceiling, suppression_evil_dam, weakening_artifact,
};
pub use bias::{Theme, ThemeSlot, theme_name};
pub use create::{ArtifactReport, ArtifactRequest, ForgeContext, create_artifact};
pub use curse::{curse_artifact, random_curse};
pub use fixed::{
    FIXED_ARTIFACTS, FixedArtifact, FixedArtifactId, GenFlags, get_bloody_moon_flags,
    make_fixed_artifact, random_artifact_resistance,
};
pub use generators::{random_misc, random_plus, random_resistance, random_slay};
pub use naming::{
    ArtifactName, NamePrompt, NameSource, PowerTier, ask_artifact_name, get_random_name,
    get_table_name, get_table_name_aux, get_table_sindarin, get_table_sindarin_aux, power_tier,
    tier_names,
};
pub use value::{FlagCost, StandardFlagCost};

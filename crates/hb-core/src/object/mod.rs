//! Object system
//!
//! Base item templates, the special-property flag set, and item instances.

mod flags;
mod kind;
mod obj;

pub use flags::{
    COMBAT_FLAGS, CurseFlags, CurseSeverity, ELEMENT_IMMUNITIES, FlagSet, IGNORE_ELEMENTS,
    RANDOM_CURSES, TrFlag,
};
pub use kind::{
    BASE_ITEMS, BaseItem, SV_CLOAK, SV_DAGGER, SV_DOKUBARI, SV_HAYABUSA, SV_IRON_HELM,
    SV_KATANA, SV_LONG_SWORD, SV_QUARTERSTAFF, SV_ROBE, SV_SCYTHE, SV_SOFT_LEATHER_ARMOUR,
    SV_SPEAR, Tval,
};
pub use obj::Object;

//! Object instances (object_type)

use serde::{Deserialize, Serialize};

use super::flags::{CurseFlags, CurseSeverity, FlagSet};
use super::kind::{BaseItem, Tval};
use crate::artifact::{Activation, FixedArtifactId, ThemeSlot};
use crate::errors::ObjectError;

/// An item instance, possibly under construction by the forge
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Object {
    pub tval: Tval,
    pub sval: u8,

    /// Magnitude of stat/speed/blows style bonuses
    pub pval: i16,
    pub weight: u16,

    // Damage dice
    pub dd: u8,
    pub ds: u8,

    pub ac: i16,
    pub to_h: i16,
    pub to_d: i16,
    pub to_a: i16,

    pub flags: FlagSet,
    pub curse_flags: CurseFlags,

    /// Theme steering the forge, first writer wins
    pub bias: ThemeSlot,

    pub activation: Option<Activation>,
    /// Remaining recharge turns of the activation
    pub timeout: u16,

    /// Inscribed artifact name
    pub art_name: Option<String>,
    pub fixed_artifact: Option<FixedArtifactId>,
}

impl Object {
    /// Create a fresh, un-enchanted instance of a base item
    pub fn from_kind(kind: &BaseItem) -> Self {
        Self {
            tval: kind.tval,
            sval: kind.sval,
            pval: kind.pval,
            weight: kind.weight,
            dd: kind.dd,
            ds: kind.ds,
            ac: kind.ac,
            to_h: kind.to_h,
            to_d: kind.to_d,
            to_a: kind.to_a,
            flags: kind.flag_set(),
            ..Default::default()
        }
    }

    /// Create an instance from a (tval, sval) pair
    pub fn lookup(tval: Tval, sval: u8) -> Result<Self, ObjectError> {
        BaseItem::lookup(tval, sval).map(Self::from_kind)
    }

    /// The template this object was made from
    pub fn kind(&self) -> Option<&'static BaseItem> {
        BaseItem::lookup(self.tval, self.sval).ok()
    }

    pub fn is_weapon_ammo(&self) -> bool {
        self.tval.is_weapon_ammo()
    }

    pub fn is_armour(&self) -> bool {
        self.tval.is_armour()
    }

    pub fn is_cursed(&self) -> bool {
        self.curse_flags.contains(CurseFlags::CURSED)
    }

    pub fn curse_severity(&self) -> CurseSeverity {
        self.curse_flags.severity()
    }

    /// Is this the given sub-type?
    pub fn is(&self, tval: Tval, sval: u8) -> bool {
        self.tval == tval && self.sval == sval
    }

    /// Full name with numbers, e.g. `Long Sword 'Foo' (2d5) (+7,+9) <+2>`
    pub fn display_name(&self) -> String {
        let mut out = String::from(self.kind().map_or("strange object", |k| k.name));

        if let Some(ref name) = self.art_name {
            out.push(' ');
            out.push_str(name);
        }

        if self.tval.is_weapon_ammo() {
            if self.dd > 0 {
                out.push_str(&format!(" ({}d{})", self.dd, self.ds));
            }
            out.push_str(&format!(" ({:+},{:+})", self.to_h, self.to_d));
        } else if self.to_h != 0 || self.to_d != 0 {
            out.push_str(&format!(" ({:+},{:+})", self.to_h, self.to_d));
        }

        if self.tval.is_armour() || self.to_a != 0 {
            out.push_str(&format!(" [{},{:+}]", self.ac, self.to_a));
        }

        if self.pval != 0 {
            out.push_str(&format!(" <{:+}>", self.pval));
        }

        out
    }
}

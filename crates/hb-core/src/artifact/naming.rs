//! Artifact naming
//!
//! Random artifacts draw their name from one of three sources: a Sindarin
//! style generator, a syllable table, or a flavor pool keyed by armour vs
//! weapon and power tier. Scroll-created artifacts ask the player instead.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::bias::Theme;
use crate::consts::{
    ARMOUR_TIER_LOW, ARMOUR_TIER_MEDIUM, SINDARIN_NAME, TABLE_NAME, WEAPON_TIER_LOW,
    WEAPON_TIER_MEDIUM,
};
use crate::object::Object;
use crate::rng::GameRng;

/// Naming tier derived from flag cost
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
pub enum PowerTier {
    Cursed,
    #[default]
    Low,
    Medium,
    High,
}

/// Bucket a flag cost into a naming tier
pub fn power_tier(cost: i32, is_weapon: bool, cursed: bool) -> PowerTier {
    let (low, medium) = if is_weapon {
        (WEAPON_TIER_LOW, WEAPON_TIER_MEDIUM)
    } else {
        (ARMOUR_TIER_LOW, ARMOUR_TIER_MEDIUM)
    };

    if cursed {
        PowerTier::Cursed
    } else if cost < low {
        PowerTier::Low
    } else if cost < medium {
        PowerTier::Medium
    } else {
        PowerTier::High
    }
}

/// Where a name came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NameSource {
    Sindarin,
    Table,
    Tiered(PowerTier),
    Player,
}

/// An artifact name and its origin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactName {
    pub text: String,
    pub source: NameSource,
}

/// Asks the player to name a scroll-created artifact
pub trait NamePrompt {
    /// Returns `None` when the player cancels
    fn ask_name(&mut self, obj: &Object) -> Option<String>;
}

/// One line of a flavor pool, optionally reserved for a theme
#[derive(Debug, Clone, Copy)]
struct NameLine {
    text: &'static str,
    theme: Option<Theme>,
}

const fn any(text: &'static str) -> NameLine {
    NameLine { text, theme: None }
}

const fn only(theme: Theme, text: &'static str) -> NameLine {
    NameLine {
        text,
        theme: Some(theme),
    }
}

const ARMOUR_CURSED: &[NameLine] = &[
    any("of Despair"),
    any("of the Oathbreaker"),
    any("of Rust and Ruin"),
    any("'Millstone'"),
    any("of the Hollow Crown"),
    only(Theme::Necromantic, "of the Barrow-wights"),
    only(Theme::Chaos, "of Unmaking"),
];

const ARMOUR_LOW: &[NameLine] = &[
    any("of the Watchman"),
    any("of the Wayfarer"),
    any("of Bree"),
    any("'Patchwork'"),
    any("of the Hobbit"),
    any("of Minor Warding"),
    only(Theme::Fire, "of Embers"),
    only(Theme::Cold, "of Hoarfrost"),
    only(Theme::Rogue, "of the Cutpurse"),
];

const ARMOUR_MEDIUM: &[NameLine] = &[
    any("of the Dunedain"),
    any("of Lothlorien"),
    any("of the Guard of the Citadel"),
    any("'Shieldwall'"),
    any("of Thranduil"),
    any("of Steadfastness"),
    only(Theme::Elec, "of the Thunderhead"),
    only(Theme::Priestly, "of the Faithful"),
    only(Theme::Mage, "of the Istari"),
];

const ARMOUR_HIGH: &[NameLine] = &[
    any("of Gondolin"),
    any("of the Valar"),
    any("of Elbereth"),
    any("'Starmantle'"),
    any("of Numenor"),
    any("of the Eldar"),
    only(Theme::Fire, "of the Anar"),
    only(Theme::Cold, "of the Helcaraxe"),
    only(Theme::Law, "of Tulkas"),
    only(Theme::Priestly, "of Varda"),
];

const WEAPON_CURSED: &[NameLine] = &[
    any("of Treachery"),
    any("of the Kinslayer"),
    any("of Sorrow"),
    any("'Gutripper'"),
    any("of the Fallen"),
    only(Theme::Necromantic, "of the Nazgul"),
    only(Theme::Chaos, "of Bedlam"),
];

const WEAPON_LOW: &[NameLine] = &[
    any("of the Militia"),
    any("of the Skirmisher"),
    any("of the Apprentice"),
    any("'Stinger'"),
    any("of Minor Valor"),
    any("of the Shire"),
    only(Theme::Fire, "of Cinders"),
    only(Theme::Pois, "of the Adder"),
    only(Theme::Ranger, "of the Poacher"),
];

const WEAPON_MEDIUM: &[NameLine] = &[
    any("of the Vanguard"),
    any("of Westernesse"),
    any("of the Rohirrim"),
    any("'Orcbiter'"),
    any("of Dale"),
    any("of the Iron Hills"),
    only(Theme::Fire, "of Flame"),
    only(Theme::Cold, "of Winter"),
    only(Theme::Elec, "of Storms"),
    only(Theme::Warrior, "of the Berserker"),
];

const WEAPON_HIGH: &[NameLine] = &[
    any("of the Valar"),
    any("of Gondolin"),
    any("'Doombringer'"),
    any("of the First Age"),
    any("of Nargothrond"),
    any("of Fingolfin"),
    only(Theme::Fire, "of the Balrog's Bane"),
    only(Theme::Elec, "of Manwe"),
    only(Theme::Necromantic, "of the Necromancer"),
    only(Theme::Law, "of Eonwe"),
];

const SYLLABLES: &[&str] = &[
    "a", "ab", "ag", "aks", "ala", "an", "ankh", "app", "arg", "arze", "ash", "aus", "ban",
    "bar", "bat", "bek", "bie", "bin", "bit", "bjor", "blu", "bot", "bu", "byt", "comp", "con",
    "cos", "cre", "dalf", "dan", "den", "der", "doe", "dok", "eep", "el", "eng", "er", "ere",
    "erk", "esh", "evs", "fa", "fid", "flit", "for", "fri", "fu", "gan", "gar", "glen", "gop",
    "gre", "ha", "he", "hyd", "i", "ing", "ion", "ip", "ish", "it", "ite", "iv", "jo", "kho",
    "kli", "klis", "la", "lech", "man", "mar", "me", "mi", "mic", "mik", "mon", "mung", "mur",
    "nag", "nej", "nelg", "nep", "ner", "nes", "nis", "nih", "nin", "o", "od", "ood", "org",
    "orn", "ox", "oxy", "pay", "pet", "ple", "plu", "po", "pot", "prok", "re", "rea", "rhov",
    "ri", "ro", "rog", "rok", "rol", "sa", "san", "sat", "see", "sef", "seh", "shu", "ski",
    "sna", "sne", "snik", "sno", "so", "sol", "sri", "sta", "sun", "ta", "tab", "tem", "ther",
    "ti", "tox", "trol", "tue", "turs", "u", "ulk", "um", "un", "uni", "ur", "val", "viv",
    "vly", "vom", "wah", "wed", "werg", "wex", "whon", "wun", "x", "yerg", "yp", "zun",
];

const ELVISH_WORDS: &[&str] = &[
    "aear", "aglar", "alag", "amon", "anga", "anor", "arth", "bar", "beleg", "born", "brith",
    "calen", "celeb", "dag", "del", "dol", "dur", "edhel", "faroth", "fin", "gil", "glor",
    "gond", "hith", "ithil", "lin", "lith", "loth", "mir", "mor", "nar", "nim", "orod", "ram",
    "rim", "ros", "sarn", "sil", "tal", "thal", "thol", "tir", "ur",
];

const SINDARIN_PREFIXES: &[&str] = &[
    "Aeg", "Agar", "Ang", "Arn", "Bel", "Cal", "Celeb", "Dae", "Dag", "Ear", "Ereg", "Fal",
    "Fin", "Gal", "Gil", "Glor", "Gond", "Hith", "Ith", "Lhach", "Lin", "Loth", "Mith", "Mor",
    "Nar", "Nim", "Orod", "Ras", "Rhun", "Sarn", "Sil", "Tar", "Thar", "Tin", "Ur",
];

const SINDARIN_SUFFIXES: &[&str] = &[
    "adan", "aer", "amarth", "and", "annon", "ar", "ath", "baul", "born", "brand", "dil",
    "dor", "duin", "eth", "galad", "gil", "gollor", "grond", "hir", "ion", "lach", "las",
    "lin", "lond", "mir", "nar", "nor", "oth", "rant", "rim", "ring", "ros", "thil", "thor",
    "uil", "waith",
];

fn pick(rng: &mut GameRng, words: &[&'static str]) -> &'static str {
    rng.choose(words).copied().unwrap_or_default()
}

fn capitalize(stem: &str) -> String {
    let mut chars = stem.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Syllable-table name stem, capitalized and unquoted
pub fn get_table_name_aux(rng: &mut GameRng) -> String {
    let syllables = rng.rnd(3) + 1;
    let mut stem = String::new();

    if rng.rnd(3) == 2 {
        for _ in 0..syllables {
            stem.push_str(pick(rng, SYLLABLES));
        }
    } else {
        let words = rng.rnd(2) + 1;
        for _ in 0..words {
            stem.push_str(pick(rng, ELVISH_WORDS));
        }
    }

    capitalize(&stem)
}

/// Syllable-table name, e.g. `'Ashbek'`
pub fn get_table_name(rng: &mut GameRng) -> String {
    format!("'{}'", get_table_name_aux(rng))
}

/// Sindarin-style name stem
pub fn get_table_sindarin_aux(rng: &mut GameRng) -> String {
    let prefix = pick(rng, SINDARIN_PREFIXES);
    let suffix = pick(rng, SINDARIN_SUFFIXES);
    format!("{prefix}{suffix}")
}

/// Sindarin-style name, e.g. `of Gilthor`
pub fn get_table_sindarin(rng: &mut GameRng) -> String {
    format!("of {}", get_table_sindarin_aux(rng))
}

fn tier_pool(armour: bool, tier: PowerTier) -> &'static [NameLine] {
    match (armour, tier) {
        (true, PowerTier::Cursed) => ARMOUR_CURSED,
        (true, PowerTier::Low) => ARMOUR_LOW,
        (true, PowerTier::Medium) => ARMOUR_MEDIUM,
        (true, PowerTier::High) => ARMOUR_HIGH,
        (false, PowerTier::Cursed) => WEAPON_CURSED,
        (false, PowerTier::Low) => WEAPON_LOW,
        (false, PowerTier::Medium) => WEAPON_MEDIUM,
        (false, PowerTier::High) => WEAPON_HIGH,
    }
}

/// Every name a tier pool may produce for a theme
pub fn tier_names(armour: bool, tier: PowerTier, theme: Option<Theme>) -> Vec<&'static str> {
    tier_pool(armour, tier)
        .iter()
        .filter(|line| line.theme.is_none() || line.theme == theme)
        .map(|line| line.text)
        .collect()
}

/// Random name for a non-scroll artifact
pub fn get_random_name(
    armour: bool,
    tier: PowerTier,
    theme: Option<Theme>,
    rng: &mut GameRng,
) -> ArtifactName {
    let prob = rng.rnd(100);

    if prob <= SINDARIN_NAME {
        ArtifactName {
            text: get_table_sindarin(rng),
            source: NameSource::Sindarin,
        }
    } else if prob <= TABLE_NAME {
        ArtifactName {
            text: get_table_name(rng),
            source: NameSource::Table,
        }
    } else {
        let names = tier_names(armour, tier, theme);
        match rng.choose(&names) {
            Some(text) => ArtifactName {
                text: (*text).to_string(),
                source: NameSource::Tiered(tier),
            },
            None => ArtifactName {
                text: get_table_name(rng),
                source: NameSource::Table,
            },
        }
    }
}

/// Name for a scroll-created artifact
///
/// An empty or cancelled answer falls back to a generated stem.
pub fn ask_artifact_name(
    obj: &Object,
    prompt: Option<&mut (dyn NamePrompt + '_)>,
    rng: &mut GameRng,
) -> ArtifactName {
    let answer = prompt
        .and_then(|p| p.ask_name(obj))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let (stem, source) = match answer {
        Some(name) => (name, NameSource::Player),
        None if rng.one_in(2) => (get_table_sindarin_aux(rng), NameSource::Sindarin),
        None => (get_table_name_aux(rng), NameSource::Table),
    };

    ArtifactName {
        text: format!("'{stem}'"),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{SV_DAGGER, Tval};
    use strum::IntoEnumIterator;

    struct Fixed(Option<&'static str>);

    impl NamePrompt for Fixed {
        fn ask_name(&mut self, _obj: &Object) -> Option<String> {
            self.0.map(str::to_string)
        }
    }

    #[test]
    fn test_power_tier_thresholds() {
        assert_eq!(power_tier(14999, false, false), PowerTier::Low);
        assert_eq!(power_tier(15000, false, false), PowerTier::Medium);
        assert_eq!(power_tier(35000, false, false), PowerTier::High);
        assert_eq!(power_tier(19999, true, false), PowerTier::Low);
        assert_eq!(power_tier(20000, true, false), PowerTier::Medium);
        assert_eq!(power_tier(44999, true, false), PowerTier::Medium);
        assert_eq!(power_tier(45000, true, false), PowerTier::High);
        assert_eq!(power_tier(90000, true, true), PowerTier::Cursed);
    }

    #[test]
    fn test_generated_name_shapes() {
        let mut rng = GameRng::new(42);
        for _ in 0..200 {
            let table = get_table_name(&mut rng);
            assert!(table.starts_with('\'') && table.ends_with('\''));
            assert!(table[1..2].chars().all(|c| c.is_ascii_uppercase()));

            let sindarin = get_table_sindarin(&mut rng);
            assert!(sindarin.starts_with("of "));
            assert!(sindarin.len() > 4);
        }
    }

    #[test]
    fn test_random_name_sources() {
        let mut rng = GameRng::new(42);
        let mut sindarin = 0;
        let mut table = 0;
        for _ in 0..5000 {
            match get_random_name(false, PowerTier::Medium, None, &mut rng).source {
                NameSource::Sindarin => sindarin += 1,
                NameSource::Table => table += 1,
                NameSource::Tiered(tier) => assert_eq!(tier, PowerTier::Medium),
                NameSource::Player => panic!("random name claimed to be the player's"),
            }
        }
        assert!((350..650).contains(&sindarin), "sindarin = {sindarin}");
        assert!((350..650).contains(&table), "table = {table}");
    }

    #[test]
    fn test_tier_names_stay_in_their_pool() {
        let mut rng = GameRng::new(42);
        for tier in PowerTier::iter() {
            let allowed = tier_names(true, tier, None);
            for _ in 0..300 {
                let name = get_random_name(true, tier, None, &mut rng);
                if name.source == NameSource::Tiered(tier) {
                    assert!(allowed.contains(&name.text.as_str()));
                }
            }
        }
    }

    #[test]
    fn test_themed_lines_need_matching_theme() {
        let unthemed = tier_names(false, PowerTier::High, None);
        assert!(!unthemed.contains(&"of the Balrog's Bane"));
        let fire = tier_names(false, PowerTier::High, Some(Theme::Fire));
        assert!(fire.contains(&"of the Balrog's Bane"));
        assert!(!fire.contains(&"of Manwe"));
    }

    #[test]
    fn test_ask_name() {
        let mut rng = GameRng::new(42);
        let obj = Object::lookup(Tval::Sword, SV_DAGGER).unwrap();

        let mut prompt = Fixed(Some("  Sting "));
        let name = ask_artifact_name(&obj, Some(&mut prompt), &mut rng);
        assert_eq!(name.text, "'Sting'");
        assert_eq!(name.source, NameSource::Player);

        let mut cancelled = Fixed(None);
        let name = ask_artifact_name(&obj, Some(&mut cancelled), &mut rng);
        assert_ne!(name.source, NameSource::Player);
        assert!(name.text.starts_with('\'') && name.text.len() > 2);

        let mut empty = Fixed(Some("   "));
        let name = ask_artifact_name(&obj, Some(&mut empty), &mut rng);
        assert_ne!(name.source, NameSource::Player);

        let name = ask_artifact_name(&obj, None, &mut rng);
        assert_ne!(name.source, NameSource::Player);
    }
}

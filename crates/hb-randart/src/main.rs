//! Random artifact forge
//!
//! Forges random artifacts (or stamps fixed ones) and prints them.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, ValueEnum};
use strum::IntoEnumIterator;

use hb_core::artifact::{
    ArtifactReport, ArtifactRequest, FixedArtifact, ForgeContext, NamePrompt, Theme,
    WeakeningMode, create_artifact, make_fixed_artifact, random_artifact_resistance,
};
use hb_core::object::{BaseItem, Object};
use hb_core::player::{PlayerClass, PlayerContext, Sex};
use hb_core::{GameRng, GenerationOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CurseChoice {
    Yes,
    No,
    Random,
}

/// Random artifact forge
#[derive(Parser, Debug)]
#[command(name = "hb-randart")]
#[command(author, version, about = "Forge random artifacts", long_about = None)]
struct Args {
    /// RNG seed (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of artifacts to forge
    #[arg(short = 'n', long, default_value = "1")]
    count: u32,

    /// Base item name (e.g. "Long Sword"); random weapon or armour when omitted
    #[arg(short, long)]
    kind: Option<String>,

    /// Class of the finder (e.g. Warrior, High-Mage)
    #[arg(short, long, default_value = "Warrior")]
    class: String,

    /// Sex of the finder (female/male)
    #[arg(long, default_value = "female")]
    sex: String,

    /// Created by a scroll of artifact creation
    #[arg(long)]
    scroll: bool,

    /// Ask for the name on stdin (scroll artifacts only)
    #[arg(long, requires = "scroll")]
    ask: bool,

    /// Force the curse state
    #[arg(long, value_enum, default_value = "random")]
    cursed: CurseChoice,

    /// Starting theme (e.g. Fire, Warrior, STR)
    #[arg(short, long)]
    theme: Option<String>,

    /// Stamp a fixed artifact instead (e.g. "Ringil")
    #[arg(long, conflicts_with_all = ["kind", "scroll", "theme"])]
    fixed: Option<String>,

    /// Options file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Weakening mode (literal/until-safe)
    #[arg(long)]
    weakening: Option<String>,

    /// Wizard mode: log forge diagnostics at info level
    #[arg(short = 'D', long)]
    wizard: bool,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Reads artifact names from stdin
struct StdinPrompt;

impl NamePrompt for StdinPrompt {
    fn ask_name(&mut self, obj: &Object) -> Option<String> {
        print!("What do you want to call {}? ", obj.display_name());
        io::stdout().flush().ok()?;

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line),
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn parse_sex(name: &str) -> Result<Sex> {
    Sex::iter()
        .find(|s| s.to_string().eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| anyhow!("unknown sex '{name}'"))
}

/// Options file first, then command-line overrides
fn load_options(args: &Args) -> Result<GenerationOptions> {
    let mut options = match &args.config {
        Some(path) => GenerationOptions::load_from_file(path)
            .with_context(|| format!("reading options from {}", path.display()))?,
        None => GenerationOptions::default(),
    };

    if let Some(ref name) = args.weakening {
        options.weakening = WeakeningMode::from_name(name)
            .ok_or_else(|| anyhow!("unknown weakening mode '{name}'"))?;
    }
    if args.wizard {
        options.wizard = true;
    }
    Ok(options)
}

fn base_item(args: &Args, rng: &mut GameRng) -> Result<Object> {
    let kind = match &args.kind {
        Some(name) => BaseItem::by_name(name)?,
        None => BaseItem::random(rng, |k| k.tval.is_weapon_ammo() || k.tval.is_armour())
            .context("no base items to forge")?,
    };
    Ok(Object::from_kind(kind))
}

fn print_text(obj: &Object, report: Option<&ArtifactReport>) {
    println!("{}", obj.display_name());
    if let Some(report) = report {
        println!(
            "  powers {}  cost {}  tier {}  theme {}",
            report.powers,
            report.total_cost,
            report.tier,
            report.theme.map_or_else(|| "none".to_string(), |t| t.to_string())
        );
        if report.weakening_steps > 0 {
            println!("  weakened {} time(s)", report.weakening_steps);
        }
    }

    let flags: Vec<String> = obj.flags.iter().map(|f| f.to_string()).collect();
    println!("  flags: {}", flags.join(", "));
    if obj.is_cursed() {
        println!("  curse: {}", obj.curse_severity());
    }
    if let Some(activation) = obj.activation {
        println!("  activates for {}", activation.description());
    }
}

fn print_json(obj: &Object, report: Option<&ArtifactReport>) -> Result<()> {
    let value = serde_json::json!({
        "name": obj.display_name(),
        "object": obj,
        "report": report,
    });
    println!("{}", serde_json::to_string(&value)?);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let options = load_options(&args)?;
    let class = PlayerClass::from_name(&args.class)
        .ok_or_else(|| anyhow!("unknown class '{}'", args.class))?;
    let player = PlayerContext::new(class, parse_sex(&args.sex)?);

    let mut rng = match args.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };
    log::info!("seed {}", rng.seed());

    if let Some(ref name) = args.fixed {
        let artifact = FixedArtifact::by_name(name)?;
        for _ in 0..args.count {
            let mut obj = make_fixed_artifact(artifact.id)?;
            random_artifact_resistance(&mut obj, artifact, &player, &mut rng);
            if args.json {
                print_json(&obj, None)?;
            } else {
                print_text(&obj, None);
            }
        }
        return Ok(());
    }

    let theme = match &args.theme {
        Some(name) => {
            Some(Theme::from_name(name).ok_or_else(|| anyhow!("unknown theme '{name}'"))?)
        }
        None => None,
    };
    let request = ArtifactRequest {
        scroll: args.scroll,
        cursed: match args.cursed {
            CurseChoice::Yes => Some(true),
            CurseChoice::No => Some(false),
            CurseChoice::Random => None,
        },
        theme,
    };
    if args.scroll && request.cursed == Some(true) {
        bail!("scroll artifacts are never cursed");
    }

    let mut prompt = StdinPrompt;
    let mut ctx = ForgeContext::new(player, options);
    if args.ask {
        ctx = ctx.with_prompt(&mut prompt);
    }

    for _ in 0..args.count {
        let mut obj = base_item(&args, &mut rng)?;
        let report = create_artifact(&mut obj, &request, &mut ctx, &mut rng);
        if args.json {
            print_json(&obj, Some(&report))?;
        } else {
            print_text(&obj, Some(&report));
        }
    }

    Ok(())
}

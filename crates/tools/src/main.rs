use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use serde::Serialize;
use skirmish_core::{
    AdvanceStopReason, Combatant, Encounter, EncounterConfig, RandomSource, Roster, RunOutcome,
    SeededSource, TracingSink,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Encounter TOML file. Without it one enemy of each kind fights the player.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Overrides the config seed; absent in both means an entropy seed
    #[arg(short, long)]
    seed: Option<u64>,
    #[arg(short, long)]
    ticks: Option<u32>,
    #[arg(short, long)]
    delta: Option<f32>,
    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Summary {
    seed: u64,
    ticks: u64,
    outcome: &'static str,
    player: Option<CombatantSummary>,
    survivors: Vec<CombatantSummary>,
    fallen: Vec<String>,
}

#[derive(Serialize)]
struct CombatantSummary {
    name: String,
    hp: f32,
    max_hp: f32,
    state: Option<&'static str>,
}

fn main() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("skirmish_core=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EncounterConfig::load(path)
            .with_context(|| format!("Failed to load encounter config: {}", path.display()))?,
        None => EncounterConfig::default(),
    };
    if let Some(ticks) = args.ticks {
        config.max_ticks = ticks;
    }
    if let Some(delta) = args.delta {
        config.tick_delta = delta;
    }
    config.validate().context("Invalid encounter settings")?;

    let random = match args.seed.or(config.seed) {
        Some(seed) => SeededSource::from_seed(seed),
        None => SeededSource::from_entropy(),
    };
    let seed = random.seed();
    let mut autopilot = ChaCha8Rng::seed_from_u64(seed);

    tracing::info!(seed, max_ticks = config.max_ticks, delta = config.tick_delta, "starting");
    let mut encounter =
        config.build(TracingSink, random).context("Failed to build the encounter")?;

    let mut ticks = 0;
    while ticks < config.max_ticks {
        drive_player(&mut encounter, &mut autopilot).context("Player command failed")?;

        let result = encounter.advance(1, config.tick_delta)?;
        ticks += result.simulated_ticks;
        if let AdvanceStopReason::Finished(_) = result.stop_reason {
            break;
        }
    }

    let summary = summarize(&encounter, seed);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    Ok(())
}

/// Spends a full meter on a heal when badly hurt, otherwise on an attack.
fn drive_player<R: RandomSource>(
    encounter: &mut Encounter<TracingSink, R>,
    rng: &mut ChaCha8Rng,
) -> Result<()> {
    if !encounter.is_player_charged() {
        return Ok(());
    }
    let Some(ratio) = encounter
        .player_id()
        .and_then(|id| encounter.combatant(id))
        .map(Combatant::health_ratio)
    else {
        return Ok(());
    };

    if ratio < 0.4 {
        encounter.player_heal()?;
        return Ok(());
    }

    if encounter.player_target().is_none() {
        let Some(next) = encounter.roster().active().first().copied() else {
            return Ok(());
        };
        encounter.select_target(next)?;
    }

    // Bias to the basic attack so the cut stays a finisher.
    if choose(rng, &[false, false, true]) {
        encounter.player_cut_attack()?;
    } else {
        encounter.player_basic_attack()?;
    }
    Ok(())
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn summarize<R: RandomSource>(encounter: &Encounter<TracingSink, R>, seed: u64) -> Summary {
    let describe = |combatant: &Combatant| CombatantSummary {
        name: combatant.name.clone(),
        hp: combatant.hp(),
        max_hp: combatant.max_hp(),
        state: encounter
            .controller(combatant.id)
            .and_then(|controller| controller.current())
            .map(|state| state.name()),
    };

    Summary {
        seed,
        ticks: encounter.current_tick(),
        outcome: match encounter.outcome() {
            Some(RunOutcome::Victory) => "victory",
            Some(RunOutcome::Defeat) => "defeat",
            None => "undecided",
        },
        player: encounter.player_id().and_then(|id| encounter.combatant(id)).map(describe),
        survivors: encounter
            .roster()
            .active()
            .iter()
            .filter_map(|id| encounter.combatant(*id))
            .map(describe)
            .collect(),
        fallen: encounter.fallen().iter().map(|combatant| combatant.name.clone()).collect(),
    }
}

fn print_summary(summary: &Summary) {
    println!("Encounter complete.");
    println!("Seed: {}", summary.seed);
    println!("Ticks: {}", summary.ticks);
    println!("Outcome: {}", summary.outcome);
    if let Some(player) = &summary.player {
        println!("Player: {:.1}/{:.1}", player.hp, player.max_hp);
    }
    for survivor in &summary.survivors {
        println!(
            "  {}: {:.1}/{:.1} ({})",
            survivor.name,
            survivor.hp,
            survivor.max_hp,
            survivor.state.unwrap_or("idle")
        );
    }
    if !summary.fallen.is_empty() {
        println!("Fallen: {}", summary.fallen.join(", "));
    }
}

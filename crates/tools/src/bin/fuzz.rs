use anyhow::{Result, ensure};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use skirmish_core::{
    AdvanceStopReason, Archetype, BehaviorState, Encounter, EncounterError, NullSink, Roster,
    SeededSource, profile,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    ticks: u32,
    /// Independent encounters, each seeded from the previous one
    #[arg(short, long, default_value_t = 1)]
    runs: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!(
        "Starting Fuzz harness on seed {} for {} runs of max {} ticks...",
        args.seed, args.runs, args.ticks
    );
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    for run in 0..args.runs {
        let seed = rng.next_u64();
        let total_ticks = fuzz_encounter(seed, args.ticks)?;
        println!("Run {run} (seed {seed}) stopped after {total_ticks} ticks");
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}

fn fuzz_encounter(seed: u64, max_ticks: u32) -> Result<u32> {
    let mut encounter = Encounter::new(NullSink, SeededSource::from_seed(seed));
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    encounter.spawn_player(profile(Archetype::Player).build()?);
    for _ in 0..=rng.next_u64() % 5 {
        let archetype = choose(
            &mut rng,
            &[Archetype::Rage, Archetype::Guardian, Archetype::Healer, Archetype::Default],
        );
        let base = profile(archetype);
        encounter.spawn(base.build()?, base.start);
    }

    let mut total_ticks = 0;
    while total_ticks < max_ticks {
        let command = match rng.next_u64() % 8 {
            0 => encounter.player_basic_attack().map(drop),
            1 => encounter.player_cut_attack().map(drop),
            2 => encounter.player_heal().map(drop),
            3 => match encounter.roster().active().last().copied() {
                Some(id) => encounter.select_target(id),
                None => Ok(()),
            },
            _ => Ok(()),
        };
        match command {
            // Rejected commands are expected when the meter is empty or nothing is targeted.
            Ok(())
            | Err(EncounterError::NotCharged { .. })
            | Err(EncounterError::NoTarget)
            | Err(EncounterError::PlayerDead) => {}
            Err(other) => return Err(other.into()),
        }

        let result = encounter.advance(10, 0.1)?;
        total_ticks += result.simulated_ticks;

        // Assert invariants
        for (id, combatant) in encounter.combatants() {
            ensure!(
                (0.0..=combatant.max_hp()).contains(&combatant.hp()),
                "Invariant failed: {} hp {} outside [0, {}]",
                combatant.name,
                combatant.hp(),
                combatant.max_hp()
            );
            if let Some(BehaviorState::HealAlly { target }) =
                encounter.controller(id).and_then(|controller| controller.current())
            {
                ensure!(*target != id, "Invariant failed: {} heals itself", combatant.name);
            }
        }
        for id in encounter.roster().active() {
            ensure!(
                encounter.combatant(*id).is_some_and(|combatant| combatant.is_alive()),
                "Invariant failed: dead combatant left on the roster"
            );
        }

        if let AdvanceStopReason::Finished(outcome) = result.stop_reason {
            println!("Finished with outcome {:?} after {} ticks", outcome, total_ticks);
            break;
        }
    }

    Ok(total_ticks)
}

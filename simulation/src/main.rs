//! Ballroom Simulation Benchmark
//!
//! Standalone benchmark for the simulation engine.
//!
//! Usage: ballroom-bench [leaders] [followers] [minutes] [seed]

use std::collections::BTreeMap;

use anyhow::Context;
use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use simulation::{
    calculate_average_partners, DanceParticipants, DanceStyle, FollowerId, LeaderId, MemorySink,
};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Random non-empty subset of the style catalog
fn random_styles(rng: &mut StdRng) -> Vec<DanceStyle> {
    let count = rng.gen_range(1..=DanceStyle::ALL.len());
    DanceStyle::ALL
        .choose_multiple(rng, count)
        .copied()
        .collect()
}

fn seed_event(leaders: u32, followers: u32, minutes: f64, rng: &mut StdRng) -> DanceParticipants {
    let leader_knowledge: BTreeMap<LeaderId, Vec<DanceStyle>> = (1..=leaders)
        .map(|id| (LeaderId(id), random_styles(rng)))
        .collect();
    let follower_knowledge: IndexMap<FollowerId, Vec<DanceStyle>> = (1..=followers)
        .map(|id| (FollowerId(format!("F{}", id)), random_styles(rng)))
        .collect();

    DanceParticipants {
        total_leaders: leaders,
        total_followers: followers,
        dance_styles: DanceStyle::ALL.to_vec(),
        leader_knowledge,
        follower_knowledge,
        dance_duration_minutes: minutes,
    }
}

fn arg<T: std::str::FromStr>(args: &[String], index: usize, default: T) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match args.get(index) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("invalid argument {}: {:?}", index, raw)),
        None => Ok(default),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args: Vec<String> = std::env::args().collect();
    let leaders: u32 = arg(&args, 1, 1_000)?;
    let followers: u32 = arg(&args, 2, 1_000)?;
    let minutes: f64 = arg(&args, 3, 240.0)?;
    let seed: u64 = arg(&args, 4, 42)?;

    info!("Ballroom Simulation Engine starting...");

    let mut rng = StdRng::seed_from_u64(seed);
    info!("Seeding event: {} leaders, {} followers, {} minutes", leaders, followers, minutes);
    let event = seed_event(leaders, followers, minutes, &mut rng);

    let sink = MemorySink::new();
    let start = std::time::Instant::now();
    let outcome = calculate_average_partners(&event, &mut rng, &sink).await;
    let elapsed = start.elapsed();

    info!(
        "Benchmark complete: {:?} total, {} sessions, {} couples, {} records stored, average {:.2}",
        elapsed,
        outcome.sessions,
        outcome.valid_pairings,
        sink.len(),
        outcome.average_partners()
    );

    Ok(())
}

use std::time::Duration;

use matchday::config::db::DbProfile;
use matchday::config::engine::EngineConfig;
use matchday::infra::state::build_state;
use matchday::services::{
    shutdown, LeagueService, MatchFlowService, NewClub, NewLeague, RoundScheduler,
};
use matchday::utils::clock;
use matchday::AppError;
use tracing::{error, info};

mod telemetry;

/// Upper bound on waiting for replays to finalize after ctrl-c
const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() {
    telemetry::init_tracing();

    if let Err(err) = run().await {
        error!(error = %err, code = err.code(), "matchday stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let engine = EngineConfig::from_env()?;
    let state = build_state()
        .with_db(DbProfile::Prod)
        .with_engine(engine)
        .build()
        .await?;
    info!(?state, "database connected");

    bootstrap_demo_league(&LeagueService::new(state.clone())).await?;

    let flow = MatchFlowService::new(state.clone());
    let report = flow.recover_interrupted().await?;
    if !report.finalized.is_empty() {
        info!(finalized = ?report.finalized, "recovered matches left live by the last run");
    }

    let scheduler = RoundScheduler::new(flow).spawn(state.shutdown.clone());

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| AppError::internal(format!("failed to listen for shutdown: {e}")))?;
    info!("shutdown requested");

    // Cancelled replays finalize from their authoritative scores on the way out
    let report = shutdown(&state, scheduler, DRAIN_TIMEOUT).await;
    info!(
        cancelled = report.cancelled,
        remaining = report.remaining,
        "matchday stopped"
    );
    Ok(())
}

/// Create a league of generated clubs when `MATCHDAY_BOOTSTRAP_CLUBS` is set
/// and the database has none yet.
async fn bootstrap_demo_league(leagues: &LeagueService) -> Result<(), AppError> {
    let Ok(raw) = std::env::var("MATCHDAY_BOOTSTRAP_CLUBS") else {
        return Ok(());
    };
    if !leagues.leagues().await?.is_empty() {
        return Ok(());
    }
    let count: usize = raw
        .trim()
        .parse()
        .map_err(|_| AppError::config(format!("MATCHDAY_BOOTSTRAP_CLUBS has an invalid value '{raw}'")))?;

    let clubs = {
        let mut rng = rand::rng();
        (1..=count)
            .map(|n| NewClub::generated(format!("Club {n:02}"), &mut rng))
            .collect()
    };
    let now = clock::now();
    let setup = leagues
        .create_league(NewLeague {
            name: "Demo League".to_string(),
            country: "Demoland".to_string(),
            start_year: now.year(),
            clubs,
            first_kickoff: now + time::Duration::minutes(1),
            rng_seed: None,
        })
        .await?;
    info!(league_id = setup.league.id, season = %setup.season.name, "demo league bootstrapped");
    Ok(())
}

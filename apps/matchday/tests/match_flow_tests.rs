mod common;
mod support;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use matchday::config::engine::EngineConfig;
use matchday::domain::events::MatchEventKind;
use matchday::domain::outcome::Score;
use matchday::domain::replay::{MatchEvent, ReplayOutcome};
use matchday::infra::state::build_state;
use matchday::repos::matches::{self, MatchStatus};
use matchday::services::{FinalizeOutcome, LeagueService, MatchFlowService, ResolveOutcome};
use matchday::utils::clock;
use matchday::AppError;
use support::league_factory::round_matches;
use support::sinks::{CountingSink, FailingSink, PanickingSink};
use support::{build_test_state, build_test_state_with, create_test_league};

async fn first_match_id(state: &matchday::AppState, season_id: i64) -> Result<i64, AppError> {
    Ok(round_matches(state, season_id, 1).await?[0].id)
}

#[tokio::test]
async fn resolve_goes_live_then_completes_with_authoritative_score() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let league = create_test_league(&state, 4).await?;
    let flow = MatchFlowService::new(state.clone());
    let match_id = first_match_id(&state, league.season_id()).await?;

    let (score, handle) = match flow.resolve(match_id).await? {
        ResolveOutcome::Live { score, handle, .. } => (score, handle),
        other => panic!("expected a live match, got {other:?}"),
    };

    let outcome = handle.wait().await.expect("finalized");
    let FinalizeOutcome::Finalized { score: final_score, events, .. } = outcome else {
        panic!("expected the replay to finalize the match");
    };
    assert_eq!(final_score, score);
    assert!(events > 0);

    let fixture = matches::require_match(&state.db, match_id).await?;
    assert_eq!(fixture.status, MatchStatus::Completed);
    assert!(fixture.finished);
    assert_eq!(fixture.score, Some(score));
    assert_eq!(fixture.sim_score, Some(score));
    assert!(fixture.started_at.is_some() && fixture.completed_at.is_some());
    assert!(!state.sessions.is_active(match_id));

    let narrative = LeagueService::new(state.clone()).match_events(match_id).await?;
    assert_eq!(narrative.len(), events);
    let goals = narrative.iter().filter(|e| e.kind == MatchEventKind::Goal).count();
    assert_eq!(goals, score.total() as usize);
    let last = narrative.last().expect("narrative has events");
    assert_eq!(last.kind, MatchEventKind::FullTime);
    assert_eq!((last.home_score, last.away_score), (score.home, score.away));
    assert!(narrative.windows(2).all(|w| w[0].seq < w[1].seq));

    // Team stats are tallied from the same narrative
    let stats = fixture.stats.expect("stats for a replayed match");
    assert_eq!(stats.home.goals, score.home as u16);
    assert_eq!(stats.away.goals, score.away as u16);
    assert!(stats.home.on_target >= stats.home.goals);
    assert!(stats.away.shots >= stats.away.on_target);
    Ok(())
}

#[tokio::test]
async fn resolving_twice_is_a_no_op() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let league = create_test_league(&state, 4).await?;
    let flow = MatchFlowService::new(state.clone());
    let match_id = first_match_id(&state, league.season_id()).await?;

    let first = flow.resolve(match_id).await?;
    match flow.resolve(match_id).await? {
        ResolveOutcome::Skipped { status, .. } => assert_eq!(status, MatchStatus::Live),
        other => panic!("second resolve should skip, got {other:?}"),
    }
    if let ResolveOutcome::Live { handle, .. } = first {
        handle.wait().await;
    }
    match flow.resolve(match_id).await? {
        ResolveOutcome::Skipped { status, .. } => assert_eq!(status, MatchStatus::Completed),
        other => panic!("resolve after completion should skip, got {other:?}"),
    }

    let table = LeagueService::new(state.clone()).standings(league.season_id()).await?;
    assert_eq!(table.iter().map(|r| r.played).sum::<i32>(), 2);
    Ok(())
}

#[tokio::test]
async fn no_live_capacity_falls_back_to_direct_completion() -> Result<(), AppError> {
    let state = build_test_state_with(EngineConfig::for_tests().with_max_live_sessions(0)).await?;
    let league = create_test_league(&state, 4).await?;
    let flow = MatchFlowService::new(state.clone());
    let match_id = first_match_id(&state, league.season_id()).await?;

    let outcome = match flow.resolve(match_id).await? {
        ResolveOutcome::Completed { outcome, .. } => outcome,
        other => panic!("expected direct completion, got {other:?}"),
    };
    let FinalizeOutcome::Finalized { score, events, .. } = outcome else {
        panic!("expected finalization");
    };
    assert_eq!(events, 0);

    let fixture = matches::require_match(&state.db, match_id).await?;
    assert_eq!(fixture.status, MatchStatus::Completed);
    assert_eq!(fixture.score, Some(score));
    assert_eq!(fixture.sim_score, Some(score));
    Ok(())
}

#[tokio::test]
async fn failing_feed_still_completes_the_match() -> Result<(), AppError> {
    let sink = Arc::new(FailingSink::after(3));
    let state = build_state()
        .with_engine(EngineConfig::for_tests())
        .with_feed_sink(sink)
        .build()
        .await?;
    let league = create_test_league(&state, 4).await?;
    let flow = MatchFlowService::new(state.clone());
    let match_id = first_match_id(&state, league.season_id()).await?;

    let ResolveOutcome::Live { score, handle, .. } = flow.resolve(match_id).await? else {
        panic!("expected a live match");
    };
    let outcome = handle.wait().await.expect("finalized");
    assert!(matches!(outcome, FinalizeOutcome::Finalized { events: 0, .. }));

    let fixture = matches::require_match(&state.db, match_id).await?;
    assert_eq!(fixture.score, Some(score));
    assert!(fixture.finished);
    assert!(state.sessions.is_empty());
    Ok(())
}

#[tokio::test]
async fn panicking_feed_still_completes_the_match() -> Result<(), AppError> {
    let state = build_state()
        .with_engine(EngineConfig::for_tests())
        .with_feed_sink(Arc::new(PanickingSink))
        .build()
        .await?;
    let league = create_test_league(&state, 4).await?;
    let flow = MatchFlowService::new(state.clone());
    let match_id = first_match_id(&state, league.season_id()).await?;

    let ResolveOutcome::Live { score, handle, .. } = flow.resolve(match_id).await? else {
        panic!("expected a live match");
    };
    assert!(handle.wait().await.is_some());

    let fixture = matches::require_match(&state.db, match_id).await?;
    assert_eq!(fixture.status, MatchStatus::Completed);
    assert_eq!(fixture.score, Some(score));
    Ok(())
}

#[tokio::test]
async fn feed_is_closed_on_every_path() -> Result<(), AppError> {
    let sink = Arc::new(CountingSink::default());
    let state = build_state()
        .with_engine(EngineConfig::for_tests())
        .with_feed_sink(sink.clone())
        .build()
        .await?;
    let league = create_test_league(&state, 4).await?;
    let flow = MatchFlowService::new(state.clone());

    let outcomes = support::play_round(&flow, league.season_id(), 1).await?;
    assert_eq!(outcomes.len(), 2);
    assert_eq!(sink.closed.load(Ordering::SeqCst), 2);
    assert!(sink.events.load(Ordering::SeqCst) > 0);
    Ok(())
}

#[tokio::test]
async fn force_finish_cancels_a_slow_replay() -> Result<(), AppError> {
    let engine = EngineConfig::for_tests().with_replay_duration(Duration::from_secs(3_600));
    let state = build_test_state_with(engine).await?;
    let league = create_test_league(&state, 4).await?;
    let flow = MatchFlowService::new(state.clone());
    let match_id = first_match_id(&state, league.season_id()).await?;

    let ResolveOutcome::Live { score, handle, .. } = flow.resolve(match_id).await? else {
        panic!("expected a live match");
    };
    assert!(state.sessions.is_active(match_id));

    let forced = flow.force_finish(match_id).await?;
    let supervised = handle.wait().await.expect("supervisor finished");

    // Both paths try to finalize; exactly one of them wins
    let finalized = [&forced, &supervised]
        .iter()
        .filter(|o| matches!(o, FinalizeOutcome::Finalized { .. }))
        .count();
    assert_eq!(finalized, 1);
    assert!([&forced, &supervised].contains(&&FinalizeOutcome::AlreadyFinal { match_id }));
    assert!(!state.sessions.is_active(match_id));

    let fixture = matches::require_match(&state.db, match_id).await?;
    assert_eq!(fixture.score, Some(score));

    let table = LeagueService::new(state.clone()).standings(league.season_id()).await?;
    assert_eq!(table.iter().map(|r| r.played).sum::<i32>(), 2);
    Ok(())
}

#[tokio::test]
async fn force_finish_resolves_a_scheduled_match_without_replay() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let league = create_test_league(&state, 4).await?;
    let flow = MatchFlowService::new(state.clone());
    let match_id = first_match_id(&state, league.season_id()).await?;

    let outcome = flow.force_finish(match_id).await?;
    assert!(matches!(outcome, FinalizeOutcome::Finalized { events: 0, .. }));
    assert!(!state.sessions.is_active(match_id));
    assert_eq!(
        flow.force_finish(match_id).await?,
        FinalizeOutcome::AlreadyFinal { match_id }
    );
    Ok(())
}

#[tokio::test]
async fn unknown_match_is_not_found() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let flow = MatchFlowService::new(state);
    let err = flow.resolve(9_999).await.unwrap_err();
    assert_eq!(err.code(), "MATCH_NOT_FOUND");
    Ok(())
}

#[tokio::test]
async fn disagreeing_replay_keeps_authoritative_score_and_drops_narrative() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let league = create_test_league(&state, 4).await?;
    let fixture = round_matches(&state, league.season_id(), 1).await?.remove(0);
    let authoritative = Score::new(2, 1);
    assert!(matches::go_live(&state.db, fixture.id, authoritative, clock::now()).await?);

    let replay = ReplayOutcome {
        score: Score::new(0, 1),
        events: vec![MatchEvent {
            seq: 1,
            minute: 30,
            stoppage: 0,
            kind: MatchEventKind::Goal,
            club_id: Some(fixture.away_club_id),
            player_id: None,
            description: "GOAL".to_string(),
            home_score: 0,
            away_score: 1,
        }],
    };
    let flow = MatchFlowService::new(state.clone());
    let outcome = flow
        .finalize_from_replay(fixture.id, authoritative, replay.clone())
        .await?;
    assert!(matches!(
        outcome,
        FinalizeOutcome::Finalized { score, events: 0, .. } if score == authoritative
    ));

    let stored = matches::require_match(&state.db, fixture.id).await?;
    assert_eq!(stored.status, MatchStatus::Completed);
    assert_eq!(stored.score, Some(authoritative));
    assert_eq!(stored.stats, None);
    let leagues = LeagueService::new(state.clone());
    assert!(leagues.match_events(fixture.id).await?.is_empty());

    let table = leagues.standings(league.season_id()).await?;
    let home = table.iter().find(|r| r.club_id == fixture.home_club_id).expect("home row");
    let away = table.iter().find(|r| r.club_id == fixture.away_club_id).expect("away row");
    assert_eq!((home.played, home.won, home.points, home.goals_for), (1, 1, 3, 2));
    assert_eq!((away.played, away.lost, away.points, away.goals_against), (1, 1, 0, 2));

    // Delivered twice, the result is counted once
    let again = flow
        .finalize_from_replay(fixture.id, authoritative, replay)
        .await?;
    assert_eq!(again, FinalizeOutcome::AlreadyFinal { match_id: fixture.id });
    let table = leagues.standings(league.season_id()).await?;
    assert_eq!(table.iter().map(|r| r.played).sum::<i32>(), 2);
    Ok(())
}

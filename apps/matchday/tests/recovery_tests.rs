mod common;
mod support;

use matchday::domain::outcome::Score;
use matchday::repos::matches::{self, MatchStatus};
use matchday::services::{FinalizeOutcome, MatchFlowService, ResolveOutcome};
use matchday::utils::clock;
use matchday::AppError;
use support::league_factory::round_matches;
use support::{build_test_state, create_test_league};

#[tokio::test]
async fn live_match_without_replay_is_finalized_from_stored_score() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let league = create_test_league(&state, 4).await?;
    let fixture = round_matches(&state, league.season_id(), 1).await?.remove(0);

    // A previous process took the match live and died before finalizing it
    let stored = Score::new(2, 1);
    assert!(matches::go_live(&state.db, fixture.id, stored, clock::now()).await?);

    let flow = MatchFlowService::new(state.clone());
    let report = flow.recover_interrupted().await?;
    assert_eq!(report.finalized, vec![fixture.id]);
    assert!(report.still_running.is_empty());

    let fixture = matches::require_match(&state.db, fixture.id).await?;
    assert_eq!(fixture.status, MatchStatus::Completed);
    assert_eq!(fixture.score, Some(stored));

    // A second sweep finds nothing to do
    let again = flow.recover_interrupted().await?;
    assert!(again.finalized.is_empty());
    Ok(())
}

#[tokio::test]
async fn authoritative_score_is_reproducible() -> Result<(), AppError> {
    let a_state = build_test_state().await?;
    let b_state = build_test_state().await?;
    let a = create_test_league(&a_state, 4).await?;
    let b = create_test_league(&b_state, 4).await?;
    let a_id = round_matches(&a_state, a.season_id(), 1).await?[0].id;
    let b_id = round_matches(&b_state, b.season_id(), 1).await?[0].id;

    // One match replays live, the other skips straight to completion
    let a_flow = MatchFlowService::new(a_state.clone());
    let b_flow = MatchFlowService::new(b_state.clone());
    let a_score = match a_flow.resolve(a_id).await? {
        ResolveOutcome::Live { score, handle, .. } => {
            handle.wait().await;
            score
        }
        other => panic!("expected live, got {other:?}"),
    };
    let b_score = match b_flow.force_finish(b_id).await? {
        FinalizeOutcome::Finalized { score, .. } => score,
        other => panic!("expected finalization, got {other:?}"),
    };

    assert_eq!(a_score, b_score);
    Ok(())
}

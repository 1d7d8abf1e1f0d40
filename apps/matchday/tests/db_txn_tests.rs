mod common;
mod support;

use matchday::db::txn::with_txn;
use matchday::db::txn_policy::{current, TxnPolicy};
use matchday::repos::leagues;
use matchday::AppError;
use migration::{count_applied_migrations, migrate, MigrationCommand};
use support::build_test_state;

#[tokio::test]
async fn commit_policy_persists_successful_writes() -> Result<(), AppError> {
    assert_eq!(current(), TxnPolicy::CommitOnOk);
    let state = build_test_state().await?;

    let league = with_txn(&state, |txn| {
        Box::pin(async move { Ok(leagues::create_league(txn, "Kept League", "Testland").await?) })
    })
    .await?;

    let found = leagues::find_by_id(&state.db, league.id).await?;
    assert_eq!(found.map(|l| l.name), Some("Kept League".to_string()));
    Ok(())
}

#[tokio::test]
async fn failed_closure_rolls_back_earlier_writes() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let result: Result<(), AppError> = with_txn(&state, |txn| {
        Box::pin(async move {
            leagues::create_league(txn, "Doomed League", "Testland").await?;
            Err(AppError::invalid("TEST_FAILURE", "abort"))
        })
    })
    .await;

    assert_eq!(result.unwrap_err().code(), "TEST_FAILURE");
    assert!(leagues::find_all(&state.db).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn schema_migrates_down_and_back_up() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let applied = count_applied_migrations(&state.db).await?;
    assert_eq!(applied, 1);

    migrate(&state.db, MigrationCommand::Down).await?;
    assert_eq!(count_applied_migrations(&state.db).await?, 0);

    migrate(&state.db, MigrationCommand::Up).await?;
    assert_eq!(count_applied_migrations(&state.db).await?, 1);
    assert!(leagues::find_all(&state.db).await?.is_empty());
    Ok(())
}
